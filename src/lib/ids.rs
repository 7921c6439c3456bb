use lazy_static::lazy_static;
use regex::Regex;
use std::cmp;
use std::fmt::Display;
use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum IdError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("ID {0} is out of range, valid IDs are 1-253")]
    OutOfRange(i64),
    #[error("ID 254 is the broadcast address")]
    Broadcast,
}

/// Address of one servo on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServoId(u8);

impl ServoId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 253;
    pub const BROADCAST: u8 = 254;

    pub fn new(value: u8) -> Result<Self, IdError> {
        match value {
            Self::BROADCAST => Err(IdError::Broadcast),
            Self::MIN..=Self::MAX => Ok(Self(value)),
            _ => Err(IdError::OutOfRange(value.into())),
        }
    }

    /// Every addressable id in scan order.
    pub fn all() -> impl Iterator<Item = ServoId> {
        (Self::MIN..=Self::MAX).map(ServoId)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<ServoId> for u8 {
    fn from(id: ServoId) -> Self {
        id.0
    }
}

impl TryFrom<i64> for ServoId {
    type Error = IdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| IdError::OutOfRange(value))
            .and_then(ServoId::new)
    }
}

impl Display for ServoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ServoId {
    type Err = IdError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let s = input.trim();
        let parsed = match s.strip_prefix("0x") {
            Some(hex) => i64::from_str_radix(hex, 16),
            None => s.parse::<i64>(),
        };

        parsed
            .map_err(|_| IdError::NotANumber(s.to_string()))
            .and_then(ServoId::try_from)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RangeError {
    #[error("invalid range '{0}'")]
    BadRange(String),
    #[error("invalid range '{0}': {1}")]
    BadId(String, IdError),
}

/// Sorted, deduplicated set of ids given as `1-5,9`.
#[derive(Debug, Clone, PartialEq)]
pub struct IdRange(Vec<ServoId>);

impl IdRange {
    pub fn contains(&self, id: ServoId) -> bool {
        self.0.binary_search(&id).is_ok()
    }
}

impl Deref for IdRange {
    type Target = Vec<ServoId>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for IdRange {
    type Err = RangeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"^(\d+)(?:-(\d+))?$").unwrap();
        }

        let mut result: Vec<ServoId> = Vec::new();

        for s in input.split(',') {
            let c = RE
                .captures(s.trim())
                .ok_or_else(|| RangeError::BadRange(s.to_string()))?;
            let parse = |m: regex::Match<'_>| {
                m.as_str()
                    .parse::<ServoId>()
                    .map_err(|e| RangeError::BadId(s.to_string(), e))
            };

            // Group 1 always participates in a match.
            let first = parse(c.get(1).ok_or_else(|| RangeError::BadRange(s.to_string()))?)?;
            match c.get(2) {
                None => result.push(first),
                Some(m) => {
                    let second = parse(m)?;
                    let (lo, hi) = (cmp::min(first, second), cmp::max(first, second));
                    result.extend(ServoId::all().filter(|id| *id >= lo && *id <= hi));
                }
            }
        }

        result.sort_unstable();
        result.dedup();
        Ok(IdRange(result))
    }
}
