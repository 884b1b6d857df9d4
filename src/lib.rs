//! Dice notation parsing and rolling for D&D 5e character sheets.
//!
//! ```
//! let parsed = dnd_dice::parse("2d20kh1 + 5").unwrap();
//! assert_eq!(dnd_dice::format_notation(&parsed), "2d20kh1+5");
//!
//! let roll = dnd_dice::roll("4d6kh3", Some("Strength")).unwrap();
//! assert_eq!(roll.rolls[0].kept_rolls.len(), 3);
//! assert!((3..=18).contains(&roll.total));
//! ```

pub mod common;
pub mod parse;
pub mod roll;
pub mod stats;

pub use common::{Int, Keep, KeepKind, NonZeroUInt, UInt};
pub use parse::{format_expression, format_notation, parse, DiceExpression, ParseError, ParsedNotation};
pub use roll::{
    ability_modifier, classify, format_long, format_short, modifier_notation, roll, Classification,
    Critical, DeathSave, DiceExpressionResult, Proficiency, RollContext, RollResult, Roller,
};
pub use stats::{compute_statistics, RollStatistics};
