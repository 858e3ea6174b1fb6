//! Byte-denominated memory sizes.
//!
//! `MemSize` is the unit type for every memory quantity in streamgrid. It
//! parses from and renders to the worker configuration system's textual
//! convention (`"30 gb"`, `"120 mb"`, `"0 bytes"`), which is also the form
//! memory-typed option values take in config change-sets.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::ParseSizeError;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;
const TIB: u64 = 1024 * GIB;

/// A memory size in bytes.
///
/// Rendering picks the largest power-of-1024 unit that divides the byte
/// count evenly, so a size round-trips through its textual form without
/// losing precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemSize(u64);

impl MemSize {
    pub const ZERO: MemSize = MemSize(0);

    pub const fn new(bytes: u64) -> Self {
        MemSize(bytes)
    }

    pub const fn of_mebi_bytes(mebi_bytes: u64) -> Self {
        MemSize(mebi_bytes * MIB)
    }

    pub const fn bytes(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Scale by a factor, truncating toward zero bytes.
    pub fn scale(&self, factor: f64) -> MemSize {
        MemSize((self.0 as f64 * factor) as u64)
    }

    /// Subtraction that stops at zero; sizes never go negative.
    pub fn saturating_sub(&self, rhs: MemSize) -> MemSize {
        MemSize(self.0.saturating_sub(rhs.0))
    }
}

impl Add for MemSize {
    type Output = MemSize;

    fn add(self, rhs: MemSize) -> MemSize {
        MemSize(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for MemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "0 bytes");
        }
        for (unit_size, unit) in [(TIB, "tb"), (GIB, "gb"), (MIB, "mb"), (KIB, "kb")] {
            if self.0 % unit_size == 0 {
                return write!(f, "{} {}", self.0 / unit_size, unit);
            }
        }
        write!(f, "{} bytes", self.0)
    }
}

impl FromStr for MemSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseSizeError::Empty);
        }
        let digits_end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, unit) = trimmed.split_at(digits_end);
        let count: u64 = digits
            .parse()
            .map_err(|_| ParseSizeError::InvalidCount(s.to_string()))?;
        let multiplier = match unit.trim().to_ascii_lowercase().as_str() {
            "" | "b" | "bytes" => 1,
            "k" | "kb" => KIB,
            "m" | "mb" => MIB,
            "g" | "gb" => GIB,
            "t" | "tb" => TIB,
            _ => return Err(ParseSizeError::UnknownUnit(s.to_string())),
        };
        count
            .checked_mul(multiplier)
            .map(MemSize)
            .ok_or_else(|| ParseSizeError::Overflow(s.to_string()))
    }
}

impl Serialize for MemSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MemSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
