use super::roller::Roller;
use crate::common::*;
use crate::parse::DiceExpression;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Critical {
    Hit,
    Miss,
}

/// The dice rolled for one [`DiceExpression`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceExpressionResult {
    pub expression: DiceExpression,
    /// Every face in the order it was rolled.
    pub rolls: Vec<UInt>,
    /// The faces selected by the keep rule, in selection order.
    pub kept_rolls: Vec<UInt>,
    pub dropped_rolls: Vec<UInt>,
    pub subtotal: Int,
}

impl DiceExpressionResult {
    pub(crate) fn roll_new<R: Roller + ?Sized>(expression: DiceExpression, roller: &mut R) -> Self {
        let rolls = match NonZeroUInt::new(expression.sides) {
            Some(sides) => roller.roll_n(expression.num_dice(), sides),
            None => Vec::new(),
        };
        Self::from_rolls(expression, rolls)
    }

    /// Applies `expression`'s keep rule to faces that were already rolled.
    pub fn from_rolls(expression: DiceExpression, rolls: Vec<UInt>) -> Self {
        let (kept_rolls, dropped_rolls) = match expression.keep {
            None => (rolls.clone(), Vec::new()),
            Some(keep) => {
                let mut sorted = rolls.clone();
                match keep.kind {
                    KeepKind::Highest => sorted.sort_by(|a, b| b.cmp(a)),
                    KeepKind::Lowest => sorted.sort(),
                }
                let at = (keep.count as usize).min(sorted.len());
                let dropped = sorted.split_off(at);
                (sorted, dropped)
            }
        };

        let sum: Int = kept_rolls.iter().map(|&x| x as Int).sum();
        let subtotal = if expression.is_negative() { -sum } else { sum };

        Self {
            expression,
            rolls,
            kept_rolls,
            dropped_rolls,
            subtotal,
        }
    }
}

/// Natural-roll flags of a result.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Classification {
    pub critical: Option<Critical>,
    pub advantage: bool,
    pub disadvantage: bool,
}

/// Flags a roll made of exactly one d20 term: `2d20kh1` is advantage,
/// `2d20kl1` is disadvantage, and a single kept 20 or 1 is a critical.
/// Anything else is left unflagged.
pub fn classify(rolls: &[DiceExpressionResult]) -> Classification {
    let mut ret = Classification::default();
    let result = match rolls {
        [result] if result.expression.sides == 20 => result,
        _ => return ret,
    };

    let expr = &result.expression;
    if expr.count == 2 {
        match expr.keep {
            Some(Keep {
                kind: KeepKind::Highest,
                count: 1,
            }) => ret.advantage = true,
            Some(Keep {
                kind: KeepKind::Lowest,
                count: 1,
            }) => ret.disadvantage = true,
            _ => {}
        }
    }

    ret.critical = match result.kept_rolls[..] {
        [20] => Some(Critical::Hit),
        [1] => Some(Critical::Miss),
        _ => None,
    };
    ret
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// The full outcome of rolling a notation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollResult {
    pub id: Uuid,
    /// The notation exactly as the caller passed it.
    pub notation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub rolls: Vec<DiceExpressionResult>,
    pub modifier: Int,
    pub total: Int,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<Critical>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub advantage: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disadvantage: bool,
    pub timestamp: DateTime<Utc>,
}

impl RollResult {
    /// Recomputes the natural-roll flags from the dice alone.
    pub fn classification(&self) -> Classification {
        classify(&self.rolls)
    }

    pub fn is_critical_hit(&self) -> bool {
        self.critical == Some(Critical::Hit)
    }

    pub fn is_critical_miss(&self) -> bool {
        self.critical == Some(Critical::Miss)
    }
}
