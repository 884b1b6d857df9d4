use crate::common::*;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// One dice term of a notation, e.g. `-2d6` or `4d6kh3`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DiceExpression {
    /// Number of dice; negative when the term is subtracted.
    pub count: Int,
    pub sides: UInt,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep: Option<Keep>,
}

impl DiceExpression {
    pub const fn new(count: Int, sides: UInt) -> Self {
        Self {
            count,
            sides,
            keep: None,
        }
    }

    pub const fn with_keep(mut self, keep: Keep) -> Self {
        self.keep = Some(keep);
        self
    }

    /// How many dice are physically rolled.
    pub fn num_dice(&self) -> UInt {
        self.count.unsigned_abs()
    }

    pub fn is_negative(&self) -> bool {
        self.count < 0
    }

    /// Writes the term without its sign.
    pub(crate) fn fmt_magnitude(&self, f: &mut impl Write) -> fmt::Result {
        if self.num_dice() > 1 {
            write!(f, "{}", self.num_dice())?;
        }
        write!(f, "d{}", self.sides)?;
        if let Some(keep) = self.keep {
            write!(f, "{}", keep)?;
        }
        Ok(())
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_char('-')?;
        }
        self.fmt_magnitude(f)
    }
}

/// A parsed notation: its dice terms in source order and the sum of its
/// flat terms.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ParsedNotation {
    pub expressions: Vec<DiceExpression>,
    pub modifier: Int,
}

impl ParsedNotation {
    pub fn new(expressions: Vec<DiceExpression>, modifier: Int) -> Self {
        Self {
            expressions,
            modifier,
        }
    }
}

impl fmt::Display for ParsedNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, expr) in self.expressions.iter().enumerate() {
            if expr.is_negative() {
                f.write_char('-')?;
            } else if i > 0 {
                f.write_char('+')?;
            }
            expr.fmt_magnitude(f)?;
        }

        match self.modifier {
            0 => Ok(()),
            m if self.expressions.is_empty() => write!(f, "{}", m),
            m => write!(f, "{:+}", m),
        }
    }
}

impl std::str::FromStr for ParsedNotation {
    type Err = super::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse(s)
    }
}

/// Renders a single dice term, e.g. `4d6kh3` or `-d8`.
pub fn format_expression(expr: &DiceExpression) -> String {
    expr.to_string()
}

/// Renders a whole notation so that it parses back to `parsed`.
pub fn format_notation(parsed: &ParsedNotation) -> String {
    parsed.to_string()
}
