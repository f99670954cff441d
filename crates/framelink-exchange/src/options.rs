use std::fmt;

/// Millisecond tick supplied by the host. Must be monotonic; wall-clock
/// time that can step backwards will confuse the retry timers.
pub type TimeFn = Box<dyn Fn() -> u64>;

/// Tuning for the reliable-exchange engine.
///
/// `max_retries` counts retransmissions after the original send, so an
/// unacknowledged request is transmitted at most `max_retries + 1`
/// times. `retry_timeout_ms` is the minimum quiet interval between
/// (re)sends of the same request.
pub struct ExchangeOptions {
    pub max_retries: u8,
    pub retry_timeout_ms: u32,
    pub time_fn: TimeFn,
}

impl ExchangeOptions {
    /// Default tuning (3 retries, 1000 ms) over the host's clock.
    ///
    /// There is no default clock: what counts milliseconds differs
    /// between an embedded target and a host process, so the caller
    /// always supplies one.
    pub fn new(time_fn: impl Fn() -> u64 + 'static) -> Self {
        Self {
            max_retries: 3,
            retry_timeout_ms: 1000,
            time_fn: Box::new(time_fn),
        }
    }

    pub fn with_max_retries(mut self, max_retries: u8) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_timeout_ms(mut self, retry_timeout_ms: u32) -> Self {
        self.retry_timeout_ms = retry_timeout_ms;
        self
    }
}

impl fmt::Debug for ExchangeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeOptions")
            .field("max_retries", &self.max_retries)
            .field("retry_timeout_ms", &self.retry_timeout_ms)
            .field("time_fn", &format_args!("<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_builders() {
        let options = ExchangeOptions::new(|| 42)
            .with_max_retries(5)
            .with_retry_timeout_ms(250);

        assert_eq!(options.max_retries, 5);
        assert_eq!(options.retry_timeout_ms, 250);
        assert_eq!((options.time_fn)(), 42);

        let defaults = ExchangeOptions::new(|| 0);
        assert_eq!(defaults.max_retries, 3);
        assert_eq!(defaults.retry_timeout_ms, 1000);
    }

    #[test]
    fn debug_elides_the_clock() {
        let options = ExchangeOptions::new(|| 0);
        let debug = format!("{options:?}");
        assert!(debug.contains("max_retries"));
        assert!(debug.contains("<fn>"));
    }
}
