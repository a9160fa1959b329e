use derive_more::{Display, Into};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, Into)]
#[display("{_0:02}")]
pub struct Hour(u8);

crate::impl_bounded_newtype!(Hour, 23);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, Into)]
#[display("{_0:02}")]
pub struct Minute(u8);

crate::impl_bounded_newtype!(Minute, 59);

/// A wall-clock time of day with minute precision.
///
/// The caller owns the value; the picker only ever hands back modified
/// copies through [`TimeValue::with_hour`] and [`TimeValue::with_minute`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Display,
    SerializeDisplay,
    DeserializeFromStr,
)]
#[display("{hour}:{minute}")]
pub struct TimeValue {
    pub hour: Hour,
    pub minute: Minute,
}

impl TimeValue {
    pub fn new(hour: Hour, minute: Minute) -> Self {
        Self { hour, minute }
    }

    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        Some(Self::new(Hour::new(hour)?, Minute::new(minute)?))
    }

    pub fn with_hour(self, hour: Hour) -> Self {
        Self { hour, ..self }
    }

    pub fn with_minute(self, minute: Minute) -> Self {
        Self { minute, ..self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTimeError {
    #[error("expected HH:MM, got '{0}'")]
    Format(String),
    #[error("hour {0} is out of range (00-23)")]
    Hour(u32),
    #[error("minute {0} is out of range (00-59)")]
    Minute(u32),
}

impl FromStr for TimeValue {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let format_err = || ParseTimeError::Format(s.to_string());

        let (h, m) = s.split_once(':').ok_or_else(format_err)?;
        let field = |part: &str| {
            (!part.is_empty() && part.len() <= 2 && part.bytes().all(|b| b.is_ascii_digit()))
                .then(|| part.parse::<u32>().ok())
                .flatten()
                .ok_or_else(format_err)
        };
        let (h, m) = (field(h)?, field(m)?);

        let hour = u8::try_from(h)
            .ok()
            .and_then(Hour::new)
            .ok_or(ParseTimeError::Hour(h))?;
        let minute = u8::try_from(m)
            .ok()
            .and_then(Minute::new)
            .ok_or(ParseTimeError::Minute(m))?;

        Ok(Self::new(hour, minute))
    }
}
