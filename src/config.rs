/// Idle receive timeout used unless configured otherwise.
pub const DEFAULT_TIMEOUT_MS: u64 = 7000;

/// Server configuration.  Fixed once the server is constructed.
///
/// ```
/// use restlite::config::Config;
///
/// let config = Config::default().with_reserved(128).with_timeout_ms(2000);
/// assert_eq!(config.reserved, 128);
/// assert_eq!(config.timeout_ms, 2000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Bytes at the end of the shared buffer reserved for response headers.  With a
    /// reserve of 0 handlers cannot set response headers.
    pub reserved: usize,
    /// Longest gap in milliseconds allowed between two received bytes before the request is
    /// abandoned and answered with `400 Bad Request`.
    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reserved: 0,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Reserve `reserved` bytes of the shared buffer for response headers
    pub fn with_reserved(mut self, reserved: usize) -> Self {
        self.reserved = reserved;
        self
    }

    /// Set the idle receive timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub(crate) fn validate(&self, capacity: usize) -> Result<(), ConfigError> {
        if self.reserved > capacity {
            return Err(ConfigError::ReserveExceedsBuffer {
                reserved: self.reserved,
                capacity,
            });
        }

        Ok(())
    }
}

/// Returned when a server is constructed with an unusable configuration
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The header reserve is larger than the whole shared buffer
    ReserveExceedsBuffer {
        /// Requested reserve
        reserved: usize,
        /// Size of the shared buffer
        capacity: usize,
    },
}
