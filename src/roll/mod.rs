mod checks;
mod ctx;
mod result;
mod roller;
mod stringify;

use crate::parse::ParseError;

pub use checks::{ability_modifier, modifier_notation, DeathSave, Proficiency};
pub use ctx::RollContext;
pub use result::{classify, Classification, Critical, DiceExpressionResult, RollResult};
pub use roller::{DefaultRoller, Roller};
pub use stringify::{format_long, format_short, LongStringifier, ShortStringifier, Stringify};

/// Rolls `notation` with the operating system's CSPRNG.
pub fn roll(notation: &str, label: Option<&str>) -> Result<RollResult, ParseError> {
    RollContext::default().roll(notation, label)
}
