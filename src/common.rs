use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

pub type Int = i32;
pub type UInt = u32;
pub type NonZeroUInt = std::num::NonZeroU32;

/// Largest number of dice a single term may roll.
pub const MAX_DICE: UInt = 100;
/// Smallest die a term may name.
pub const MIN_SIDES: UInt = 2;
/// Largest die a term may name.
pub const MAX_SIDES: UInt = 100;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeepKind {
    Highest,
    Lowest,
}

impl fmt::Display for KeepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Highest => 'h',
            Self::Lowest => 'l',
        };
        f.write_char(c)
    }
}

/// A "keep highest/lowest N" reduction attached to a dice term.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Keep {
    #[serde(rename = "type")]
    pub kind: KeepKind,
    pub count: UInt,
}

impl Keep {
    pub const fn highest(count: UInt) -> Self {
        Self {
            kind: KeepKind::Highest,
            count,
        }
    }

    pub const fn lowest(count: UInt) -> Self {
        Self {
            kind: KeepKind::Lowest,
            count,
        }
    }
}

impl fmt::Display for Keep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k{}{}", self.kind, self.count)
    }
}
