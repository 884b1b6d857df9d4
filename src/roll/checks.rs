//! D&D 5e roll templates built on [`RollContext`].

use super::result::{Critical, RollResult};
use super::roller::Roller;
use super::RollContext;
use crate::common::{Int, UInt};
use crate::parse::ParseError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    #[default]
    None,
    Proficient,
    /// Proficiency bonus applies twice.
    Expertise,
}

impl Proficiency {
    pub fn bonus(self, proficiency_bonus: Int) -> Int {
        match self {
            Self::None => 0,
            Self::Proficient => proficiency_bonus,
            Self::Expertise => proficiency_bonus.saturating_mul(2),
        }
    }
}

/// Outcome of a single death saving throw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeathSave {
    Success,
    Failure,
    /// A natural 1 counts as two failures.
    DoubleFailure,
    /// A natural 20 brings the character back with 1 hit point.
    Revived,
}

impl DeathSave {
    pub fn from_roll(roll: &RollResult) -> Self {
        match roll.critical {
            Some(Critical::Hit) => Self::Revived,
            Some(Critical::Miss) => Self::DoubleFailure,
            None if roll.total >= 10 => Self::Success,
            None => Self::Failure,
        }
    }

    pub fn failures(self) -> u8 {
        match self {
            Self::Failure => 1,
            Self::DoubleFailure => 2,
            Self::Success | Self::Revived => 0,
        }
    }
}

/// `floor((score - 10) / 2)`.
pub fn ability_modifier(score: Int) -> Int {
    score.saturating_sub(10).div_euclid(2)
}

/// Appends a flat modifier to `base`: `1d20`, `1d20+3` or `1d20-1`.
pub fn modifier_notation(base: &str, modifier: Int) -> String {
    match modifier {
        0 => base.to_string(),
        m => format!("{}{:+}", base, m),
    }
}

const ABILITY_SCORE: &str = "4d6kh3";

impl<R: Roller> RollContext<R> {
    /// Rolls a built-in template. Templates are well formed, so the only way
    /// this fails is an out-of-range argument baked into the notation.
    fn roll_template(&mut self, notation: String, label: &str) -> Result<RollResult, ParseError> {
        self.roll(&notation, Some(label))
    }

    pub fn ability_check(&mut self, ability: &str, modifier: Int) -> Result<RollResult, ParseError> {
        self.roll_template(modifier_notation("1d20", modifier), &format!("{} Check", ability))
    }

    pub fn skill_check(
        &mut self,
        skill: &str,
        ability_modifier: Int,
        proficiency_bonus: Int,
        proficiency: Proficiency,
    ) -> Result<RollResult, ParseError> {
        let modifier = ability_modifier.saturating_add(proficiency.bonus(proficiency_bonus));
        self.roll_template(modifier_notation("1d20", modifier), &format!("{} Check", skill))
    }

    pub fn saving_throw(
        &mut self,
        ability: &str,
        modifier: Int,
        proficiency_bonus: Int,
        proficient: bool,
    ) -> Result<RollResult, ParseError> {
        let bonus = if proficient { proficiency_bonus } else { 0 };
        self.roll_template(
            modifier_notation("1d20", modifier.saturating_add(bonus)),
            &format!("{} Saving Throw", ability),
        )
    }

    pub fn advantage(&mut self, modifier: Int) -> Result<RollResult, ParseError> {
        self.roll_template(modifier_notation("2d20kh1", modifier), "Advantage")
    }

    pub fn disadvantage(&mut self, modifier: Int) -> Result<RollResult, ParseError> {
        self.roll_template(modifier_notation("2d20kl1", modifier), "Disadvantage")
    }

    pub fn initiative(&mut self, dex_modifier: Int) -> Result<RollResult, ParseError> {
        self.roll_template(modifier_notation("1d20", dex_modifier), "Initiative")
    }

    pub fn death_save(&mut self) -> Result<RollResult, ParseError> {
        self.roll_template("1d20".to_string(), "Death Saving Throw")
    }

    /// Spends `count` hit dice, each adding the Constitution modifier.
    pub fn hit_dice(
        &mut self,
        count: UInt,
        hit_die: UInt,
        con_modifier: Int,
    ) -> Result<RollResult, ParseError> {
        let dice = format!("{}d{}", count, hit_die);
        let modifier = con_modifier.saturating_mul(count as Int);
        self.roll_template(modifier_notation(&dice, modifier), "Hit Dice Recovery")
    }

    /// Six `4d6kh3` rolls, one per ability.
    pub fn ability_scores(&mut self) -> Result<Vec<RollResult>, ParseError> {
        (0..6)
            .map(|_| self.roll_template(ABILITY_SCORE.to_string(), "Ability Score"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::roller::StepRoller;

    fn ctx(initial: u32, step: u32) -> RollContext<StepRoller> {
        RollContext::new(StepRoller::new(initial, step))
    }

    #[test]
    fn test_modifier_notation() {
        assert_eq!(modifier_notation("1d20", 0), "1d20");
        assert_eq!(modifier_notation("1d20", 3), "1d20+3");
        assert_eq!(modifier_notation("2d20kh1", -1), "2d20kh1-1");
    }

    #[test]
    fn test_ability_modifier() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(18), 4);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(Int::MIN), Int::MIN / 2);
        assert_eq!(ability_modifier(Int::MAX), (Int::MAX - 10) / 2);
    }

    #[test]
    fn test_skill_check() {
        let r = ctx(10, 1)
            .skill_check("Stealth", 3, 2, Proficiency::Expertise)
            .unwrap();
        assert_eq!(r.notation, "1d20+7");
        assert_eq!(r.label.as_deref(), Some("Stealth Check"));
        assert_eq!(r.total, 17);

        let r = ctx(10, 1)
            .skill_check("Athletics", -1, 2, Proficiency::None)
            .unwrap();
        assert_eq!(r.notation, "1d20-1");
    }

    #[test]
    fn test_ability_check_and_save() {
        let r = ctx(4, 1).ability_check("Strength", 2).unwrap();
        assert_eq!(r.label.as_deref(), Some("Strength Check"));
        assert_eq!(r.total, 6);

        let r = ctx(4, 1).saving_throw("Wisdom", 1, 3, true).unwrap();
        assert_eq!(r.notation, "1d20+4");
        assert_eq!(r.label.as_deref(), Some("Wisdom Saving Throw"));
    }

    #[test]
    fn test_advantage_and_disadvantage() {
        let r = ctx(7, 13).advantage(2).unwrap();
        assert_eq!(r.notation, "2d20kh1+2");
        assert_eq!(r.label.as_deref(), Some("Advantage"));
        assert!(r.advantage);
        assert_eq!(r.total, 22);

        let r = ctx(7, 13).disadvantage(0).unwrap();
        assert_eq!(r.notation, "2d20kl1");
        assert!(r.disadvantage);
        assert_eq!(r.total, 7);
    }

    #[test]
    fn test_initiative_and_death_save() {
        let r = ctx(12, 1).initiative(3).unwrap();
        assert_eq!(r.label.as_deref(), Some("Initiative"));
        assert_eq!(r.total, 15);

        let r = ctx(20, 1).death_save().unwrap();
        assert_eq!(DeathSave::from_roll(&r), DeathSave::Revived);
        let r = ctx(1, 1).death_save().unwrap();
        assert_eq!(DeathSave::from_roll(&r), DeathSave::DoubleFailure);
        assert_eq!(DeathSave::DoubleFailure.failures(), 2);
        let r = ctx(10, 1).death_save().unwrap();
        assert_eq!(DeathSave::from_roll(&r), DeathSave::Success);
        let r = ctx(9, 1).death_save().unwrap();
        assert_eq!(DeathSave::from_roll(&r), DeathSave::Failure);
    }

    #[test]
    fn test_hit_dice() {
        let r = ctx(10, 1).hit_dice(2, 8, 1).unwrap();
        assert_eq!(r.notation, "2d8+2");
        assert_eq!(r.label.as_deref(), Some("Hit Dice Recovery"));
        assert_eq!(r.total, 2 + 3 + 2);

        assert_eq!(
            ctx(10, 1).hit_dice(1, 1, 0).unwrap_err(),
            ParseError::InvalidSides("1d1".into())
        );
        assert_eq!(
            ctx(10, 1).hit_dice(0, 8, 2).unwrap_err(),
            ParseError::InvalidCount("0d8".into())
        );
    }

    #[test]
    fn test_ability_scores() {
        let scores = ctx(1, 1).ability_scores().unwrap();
        assert_eq!(scores.len(), 6);
        for score in &scores {
            assert_eq!(score.notation, "4d6kh3");
            assert_eq!(score.rolls[0].kept_rolls.len(), 3);
            assert!((3..=18).contains(&score.total));
        }
    }
}
