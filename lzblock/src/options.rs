//! Compression options.

/// Acceleration factor for the fast compressor (1-65537).
///
/// Higher values skip more input positions while no match is found, trading
/// compression ratio for speed. `1` checks every position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Acceleration(u32);

impl Acceleration {
    /// Slowest, best-ratio setting.
    pub const MIN: Self = Self(1);
    /// Default acceleration.
    pub const DEFAULT: Self = Self(1);
    /// Fastest setting.
    pub const MAX: Self = Self(65_537);

    /// Create an acceleration factor.
    ///
    /// Returns None if the value is outside 1-65537.
    pub fn new(value: u32) -> Option<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create an acceleration factor, clamping out-of-range values.
    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0)) as u32)
    }

    /// Get the factor.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Acceleration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Options for block compression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressOptions {
    acceleration: Acceleration,
}

impl CompressOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the acceleration factor.
    pub fn with_acceleration(mut self, acceleration: Acceleration) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Get the acceleration factor.
    pub fn acceleration(&self) -> Acceleration {
        self.acceleration
    }
}
