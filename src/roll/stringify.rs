use super::result::{Critical, DiceExpressionResult, RollResult};
use crate::common::UInt;

pub trait Stringify {
    fn stringify(&mut self, roll: &RollResult) -> String {
        self.str_roll(roll)
    }

    fn str_roll(&mut self, roll: &RollResult) -> String {
        let mut ret = String::new();
        for (i, result) in roll.rolls.iter().enumerate() {
            if result.expression.is_negative() {
                ret.push_str(if i == 0 { "-" } else { " - " });
            } else if i > 0 {
                ret.push_str(" + ");
            }
            let inner = self.str_expression_result(result);
            ret.push_str(&inner);
        }

        match roll.modifier {
            0 => {}
            m if roll.rolls.is_empty() => ret.push_str(&m.to_string()),
            m if m < 0 => ret.push_str(&format!(" - {}", m.unsigned_abs())),
            m => ret.push_str(&format!(" + {}", m)),
        }

        format!("{} = {}", ret, roll.total)
    }

    fn str_expression_result(&mut self, result: &DiceExpressionResult) -> String {
        let num = result.expression.num_dice();
        let faces = self.str_faces(result);
        if num > 1 {
            format!("{}d{}[{}]", num, result.expression.sides, faces)
        } else {
            format!("d{}[{}]", result.expression.sides, faces)
        }
    }

    fn str_faces(&mut self, result: &DiceExpressionResult) -> String {
        dropped_mask(result)
            .into_iter()
            .zip(&result.rolls)
            .map(|(dropped, &value)| self.str_face(value, dropped))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn str_face(&mut self, value: UInt, dropped: bool) -> String {
        if dropped {
            format!("~~{}~~", value)
        } else {
            value.to_string()
        }
    }
}

/// Marks which positions of `result.rolls` were dropped. Among equal faces
/// the later ones are the dropped ones, matching the stable sort used to
/// select kept dice.
fn dropped_mask(result: &DiceExpressionResult) -> Vec<bool> {
    let mut pending = result.dropped_rolls.clone();
    let mut mask = vec![false; result.rolls.len()];
    for (i, value) in result.rolls.iter().enumerate().rev() {
        if let Some(pos) = pending.iter().position(|d| d == value) {
            pending.swap_remove(pos);
            mask[i] = true;
        }
    }
    mask
}

/// Shows every face, striking through dropped ones: `2d20[~~7~~, 20] + 5 = 25`.
#[derive(Default, Debug)]
pub struct LongStringifier;

impl Stringify for LongStringifier {}

/// One-line summary: `Natural 20! = 25` or `2d20kh1+5 = 25`.
#[derive(Default, Debug)]
pub struct ShortStringifier;

impl Stringify for ShortStringifier {
    fn str_roll(&mut self, roll: &RollResult) -> String {
        match roll.critical {
            Some(Critical::Hit) => format!("Natural 20! = {}", roll.total),
            Some(Critical::Miss) => format!("Natural 1! = {}", roll.total),
            None => format!("{} = {}", roll.notation, roll.total),
        }
    }
}

pub fn format_long(roll: &RollResult) -> String {
    LongStringifier.stringify(roll)
}

pub fn format_short(roll: &RollResult) -> String {
    ShortStringifier.stringify(roll)
}
