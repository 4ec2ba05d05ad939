//! Time abstraction traits for platform-agnostic timing.
//!
//! The firmware only ever needs "milliseconds since some earlier instant", so
//! the traits are kept to that. A wrapping 32-bit SysTick counter works as
//! long as `duration_since` uses wrapping arithmetic.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Milliseconds elapsed between `earlier` and `now`.
#[inline]
pub fn millis_since<I: TimeInstant>(now: I, earlier: I) -> u64 {
    now.duration_since(earlier).as_millis()
}

/// Returns true once at least `millis` have passed since `earlier`.
#[inline]
pub fn has_elapsed<I: TimeInstant>(now: I, earlier: I, millis: u32) -> bool {
    millis_since(now, earlier) >= u64::from(millis)
}
