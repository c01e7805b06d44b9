use std::{fmt, str};

/// Identifies one of the six RFC 4122 fields of a [`Uuid`](crate::Uuid), in field order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Field {
    /// Low 32 bits of the timestamp.
    TimeLow,

    /// Middle 16 bits of the timestamp.
    TimeMid,

    /// High 12 bits of the timestamp multiplexed with the 4-bit version.
    TimeHiAndVersion,

    /// High 6 bits of the clock sequence multiplexed with the 2-bit variant.
    ClockSeqHiAndReserved,

    /// Low 8 bits of the clock sequence.
    ClockSeqLow,

    /// 48-bit spatially unique node identifier.
    Node,
}

impl Field {
    /// All fields in field order.
    pub const ALL: [Self; 6] = [
        Self::TimeLow,
        Self::TimeMid,
        Self::TimeHiAndVersion,
        Self::ClockSeqHiAndReserved,
        Self::ClockSeqLow,
        Self::Node,
    ];

    /// Returns the zero-based position of the field.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the field at the zero-based position `index`, if any.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::ALL.len() {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Returns the field width in bits.
    pub const fn width(self) -> u32 {
        match self {
            Self::TimeLow => 32,
            Self::TimeMid | Self::TimeHiAndVersion => 16,
            Self::ClockSeqHiAndReserved | Self::ClockSeqLow => 8,
            Self::Node => 48,
        }
    }

    /// Returns the bit mask that truncates a value to the field width.
    pub const fn mask(self) -> u64 {
        (1 << self.width()) - 1
    }

    /// Returns the RFC 4122 name of the field in lower camel case (e.g. `"timeHiAndVersion"`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::TimeLow => "timeLow",
            Self::TimeMid => "timeMid",
            Self::TimeHiAndVersion => "timeHiAndVersion",
            Self::ClockSeqHiAndReserved => "clockSeqHiAndReserved",
            Self::ClockSeqLow => "clockSeqLow",
            Self::Node => "node",
        }
    }

    /// Looks up a field by name.
    ///
    /// Both the lower camel case names returned by [`Field::name()`] and their snake case
    /// counterparts (e.g. `"time_hi_and_version"`) are accepted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4122::Field;
    ///
    /// assert_eq!(Field::from_name("clockSeqLow"), Some(Field::ClockSeqLow));
    /// assert_eq!(Field::from_name("clock_seq_low"), Some(Field::ClockSeqLow));
    /// assert_eq!(Field::from_name("clock"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == name || f.snake_case_name() == name)
    }

    const fn snake_case_name(self) -> &'static str {
        match self {
            Self::TimeLow => "time_low",
            Self::TimeMid => "time_mid",
            Self::TimeHiAndVersion => "time_hi_and_version",
            Self::ClockSeqHiAndReserved => "clock_seq_hi_and_reserved",
            Self::ClockSeqLow => "clock_seq_low",
            Self::Node => "node",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl str::FromStr for Field {
    type Err = ParseFieldError;

    /// Looks up a field by name. See [`Field::from_name()`].
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::from_name(src).ok_or(ParseFieldError {})
    }
}

/// Error parsing an unknown field name.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseFieldError {}

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field name")
    }
}

impl std::error::Error for ParseFieldError {}
