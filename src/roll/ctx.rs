use super::result::{classify, DiceExpressionResult, RollResult};
use super::roller::{DefaultRoller, Roller};
use crate::common::Int;
use crate::parse::{self, ParseError, ParsedNotation};
use log::debug;
use uuid::Uuid;

/// Rolls notations with an owned [`Roller`].
///
/// The roller and the id source are injected so that tests can make every
/// draw deterministic; by default faces come from the operating system's
/// CSPRNG and ids are random v4 UUIDs.
pub struct RollContext<R = DefaultRoller> {
    roller: R,
    ids: fn() -> Uuid,
}

impl<R: Roller> RollContext<R> {
    pub fn new(roller: R) -> Self {
        Self {
            roller,
            ids: Uuid::new_v4,
        }
    }

    pub fn with_id_source(mut self, ids: fn() -> Uuid) -> Self {
        self.ids = ids;
        self
    }

    /// Parses and rolls `notation`. Parse failures are returned unchanged.
    pub fn roll(&mut self, notation: &str, label: Option<&str>) -> Result<RollResult, ParseError> {
        let parsed = parse::parse(notation)?;
        Ok(self.eval(notation, &parsed, label))
    }

    /// Rolls an already parsed notation; `notation` is recorded verbatim.
    pub fn eval(&mut self, notation: &str, parsed: &ParsedNotation, label: Option<&str>) -> RollResult {
        let rolls: Vec<_> = parsed
            .expressions
            .iter()
            .map(|&expr| {
                let result = DiceExpressionResult::roll_new(expr, &mut self.roller);
                debug!(
                    "rolled {} -> {:?}, kept {:?} (subtotal {})",
                    expr, result.rolls, result.kept_rolls, result.subtotal
                );
                result
            })
            .collect();

        let exact = rolls
            .iter()
            .fold(i64::from(parsed.modifier), |acc, r| acc + i64::from(r.subtotal));
        let total = exact.clamp(Int::MIN.into(), Int::MAX.into()) as Int;
        let flags = classify(&rolls);

        let result = RollResult {
            id: (self.ids)(),
            notation: notation.to_string(),
            label: label.map(str::to_string),
            rolls,
            modifier: parsed.modifier,
            total,
            critical: flags.critical,
            advantage: flags.advantage,
            disadvantage: flags.disadvantage,
            timestamp: chrono::Utc::now(),
        };
        debug!("{:?} totals {}", result.notation, result.total);
        result
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new(rand::rngs::OsRng)
    }
}
