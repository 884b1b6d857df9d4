use crate::common::Int;
use crate::roll::{Critical, RollResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate figures over a history of rolls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollStatistics {
    pub total_rolls: usize,
    pub average: f64,
    pub min: Int,
    pub max: Int,
    pub critical_hits: usize,
    pub critical_misses: usize,
    /// How many rolls landed on each total.
    pub distribution: BTreeMap<Int, usize>,
}

impl RollStatistics {
    fn add(&mut self, roll: &RollResult) {
        if self.total_rolls == 0 {
            self.min = roll.total;
            self.max = roll.total;
        } else {
            self.min = self.min.min(roll.total);
            self.max = self.max.max(roll.total);
        }
        self.total_rolls += 1;
        match roll.critical {
            Some(Critical::Hit) => self.critical_hits += 1,
            Some(Critical::Miss) => self.critical_misses += 1,
            None => {}
        }
        *self.distribution.entry(roll.total).or_insert(0) += 1;
    }
}

impl<'a> FromIterator<&'a RollResult> for RollStatistics {
    fn from_iter<I: IntoIterator<Item = &'a RollResult>>(iter: I) -> Self {
        let mut ret = Self::default();
        let mut sum = 0f64;
        for roll in iter {
            ret.add(roll);
            sum += f64::from(roll.total);
        }
        if ret.total_rolls > 0 {
            ret.average = sum / ret.total_rolls as f64;
        }
        ret
    }
}

/// Summarises `results`; an empty slice gives all zeros.
pub fn compute_statistics(results: &[RollResult]) -> RollStatistics {
    results.iter().collect()
}
