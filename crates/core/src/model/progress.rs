use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::GradeTier;

/// Integer score percentage: `correct / max(1, attempts)`, floored and clamped into `0..=100`.
#[must_use]
pub fn score_percent(correct: u32, attempts: u32) -> u8 {
    let denominator = u64::from(attempts.max(1));
    let pct = (u64::from(correct) * 100 / denominator).min(100);
    u8::try_from(pct).unwrap_or(100)
}

/// Counters for a single grade tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeProgress {
    pub correct: u32,
    pub attempts: u32,
}

impl GradeProgress {
    #[must_use]
    pub fn new(correct: u32, attempts: u32) -> Self {
        Self { correct, attempts }
    }

    /// Folds a finished quiz into the counters. Never decreases either count.
    pub fn record(&mut self, correct: u32, attempts: u32) {
        self.correct = self.correct.saturating_add(correct);
        self.attempts = self.attempts.saturating_add(attempts);
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        score_percent(self.correct, self.attempts)
    }
}

/// Per-tier progress. Always holds an entry for every [`GradeTier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    tiers: BTreeMap<GradeTier, GradeProgress>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            tiers: GradeTier::ALL
                .into_iter()
                .map(|tier| (tier, GradeProgress::default()))
                .collect(),
        }
    }
}

impl Progress {
    /// Rebuilds progress from persisted entries; tiers missing from `entries` start at zero.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (GradeTier, GradeProgress)>) -> Self {
        let mut progress = Self::default();
        for (tier, counts) in entries {
            progress.tiers.insert(tier, counts);
        }
        progress
    }

    #[must_use]
    pub fn get(&self, tier: GradeTier) -> GradeProgress {
        self.tiers.get(&tier).copied().unwrap_or_default()
    }

    pub fn record(&mut self, tier: GradeTier, correct: u32, attempts: u32) {
        self.tiers.entry(tier).or_default().record(correct, attempts);
    }

    /// Entries in tier order.
    pub fn iter(&self) -> impl Iterator<Item = (GradeTier, GradeProgress)> + '_ {
        self.tiers.iter().map(|(tier, counts)| (*tier, *counts))
    }

    /// Sum of all tiers.
    #[must_use]
    pub fn totals(&self) -> GradeProgress {
        self.tiers
            .values()
            .fold(GradeProgress::default(), |mut acc, counts| {
                acc.record(counts.correct, counts.attempts);
                acc
            })
    }

    /// Overall score percentage across every tier.
    #[must_use]
    pub fn overall_percent(&self) -> u8 {
        self.totals().percent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_uses_minimum_denominator_of_one() {
        assert_eq!(score_percent(0, 0), 0);
        assert_eq!(score_percent(1, 0), 100);
        assert_eq!(score_percent(1, 3), 33);
        assert_eq!(score_percent(2, 3), 66);
        assert_eq!(score_percent(50, 50), 100);
        assert_eq!(score_percent(9, 4), 100);
    }

    #[test]
    fn default_progress_covers_every_tier() {
        let progress = Progress::default();
        assert_eq!(progress.iter().count(), GradeTier::ALL.len());
        assert_eq!(progress.totals(), GradeProgress::default());
    }

    #[test]
    fn record_accumulates_and_totals_sum() {
        let mut progress = Progress::default();
        progress.record(GradeTier::Grade1, 40, 50);
        progress.record(GradeTier::Grade1, 10, 50);
        progress.record(GradeTier::Calculus, 25, 50);

        assert_eq!(progress.get(GradeTier::Grade1), GradeProgress::new(50, 100));
        assert_eq!(progress.totals(), GradeProgress::new(75, 150));
        assert_eq!(progress.overall_percent(), 50);
    }

    #[test]
    fn from_entries_fills_missing_tiers() {
        let progress = Progress::from_entries([(GradeTier::Grade2, GradeProgress::new(3, 4))]);
        assert_eq!(progress.get(GradeTier::Grade2), GradeProgress::new(3, 4));
        assert_eq!(progress.get(GradeTier::Advanced), GradeProgress::default());
        assert_eq!(progress.iter().count(), GradeTier::ALL.len());
    }
}
