/// Millisecond counter the receive loop measures its idle timeout against.
///
/// On a device this is typically backed by a hardware timer or the HAL's uptime counter.
/// Any `Fn() -> u64` closure is a `Clock`:
///
/// ```
/// use restlite::clock::Clock;
///
/// let clock = || 1500u64;
/// assert_eq!(clock.now_ms(), 1500);
/// ```
pub trait Clock {
    /// Milliseconds elapsed since some fixed point.  The counter may wrap.
    fn now_ms(&self) -> u64;

    /// Milliseconds elapsed since `since`, an earlier reading of [`Clock::now_ms`].
    fn elapsed_ms(&self, since: u64) -> u64 {
        self.now_ms().wrapping_sub(since)
    }
}

impl<F> Clock for F
where
    F: Fn() -> u64,
{
    fn now_ms(&self) -> u64 {
        self()
    }
}
