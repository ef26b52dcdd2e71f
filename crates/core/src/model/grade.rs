use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GradeError {
    #[error("unknown grade tier: {0}")]
    UnknownGrade(String),
}

//
// ─── GRADE TIER ───────────────────────────────────────────────────────────────
//

/// Named difficulty bucket controlling operand ranges and operator choice.
///
/// Serialized as the lowercase key used in the user store (`grade1`, `calculus`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeTier {
    Grade1,
    Grade2,
    Grade3,
    Grade4,
    Grade5,
    Grade6,
    Grade7,
    Grade8,
    Grade9,
    Calculus,
    Advanced,
}

/// How a tier draws its operands and operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    /// Grades 1-3: small operands, addition and subtraction.
    Basic,
    /// Grades 4-6: adds multiplication.
    Medium,
    /// Grades 7-9: adds division.
    Division,
    /// Calculus: small powers.
    Power,
    /// Advanced: same shape as `Division`.
    Advanced,
}

impl GradeTier {
    /// Every tier, in display order.
    pub const ALL: [GradeTier; 11] = [
        GradeTier::Grade1,
        GradeTier::Grade2,
        GradeTier::Grade3,
        GradeTier::Grade4,
        GradeTier::Grade5,
        GradeTier::Grade6,
        GradeTier::Grade7,
        GradeTier::Grade8,
        GradeTier::Grade9,
        GradeTier::Calculus,
        GradeTier::Advanced,
    ];

    /// Store key for this tier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GradeTier::Grade1 => "grade1",
            GradeTier::Grade2 => "grade2",
            GradeTier::Grade3 => "grade3",
            GradeTier::Grade4 => "grade4",
            GradeTier::Grade5 => "grade5",
            GradeTier::Grade6 => "grade6",
            GradeTier::Grade7 => "grade7",
            GradeTier::Grade8 => "grade8",
            GradeTier::Grade9 => "grade9",
            GradeTier::Calculus => "calculus",
            GradeTier::Advanced => "advanced",
        }
    }

    /// Human-facing label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GradeTier::Grade1 => "Grade 1",
            GradeTier::Grade2 => "Grade 2",
            GradeTier::Grade3 => "Grade 3",
            GradeTier::Grade4 => "Grade 4",
            GradeTier::Grade5 => "Grade 5",
            GradeTier::Grade6 => "Grade 6",
            GradeTier::Grade7 => "Grade 7",
            GradeTier::Grade8 => "Grade 8",
            GradeTier::Grade9 => "Grade 9",
            GradeTier::Calculus => "Calculus",
            GradeTier::Advanced => "Advanced",
        }
    }

    #[must_use]
    pub fn difficulty(self) -> Difficulty {
        match self {
            GradeTier::Grade1 | GradeTier::Grade2 | GradeTier::Grade3 => Difficulty::Basic,
            GradeTier::Grade4 | GradeTier::Grade5 | GradeTier::Grade6 => Difficulty::Medium,
            GradeTier::Grade7 | GradeTier::Grade8 | GradeTier::Grade9 => Difficulty::Division,
            GradeTier::Calculus => Difficulty::Power,
            GradeTier::Advanced => Difficulty::Advanced,
        }
    }
}

impl FromStr for GradeTier {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        GradeTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == key)
            .ok_or_else(|| GradeError::UnknownGrade(key.to_owned()))
    }
}

impl fmt::Display for GradeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_store_key() {
        for tier in GradeTier::ALL {
            assert_eq!(tier.as_str().parse::<GradeTier>().unwrap(), tier);
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = "grade10".parse::<GradeTier>().unwrap_err();
        assert_eq!(err, GradeError::UnknownGrade("grade10".into()));
        assert!("unknown".parse::<GradeTier>().is_err());
    }

    #[test]
    fn display_matches_store_key() {
        assert_eq!(GradeTier::Calculus.to_string(), "calculus");
        assert_eq!(GradeTier::Grade7.to_string(), "grade7");
        assert_eq!(GradeTier::Grade7.label(), "Grade 7");
    }

    #[test]
    fn difficulty_bands_follow_tiers() {
        assert_eq!(GradeTier::Grade3.difficulty(), Difficulty::Basic);
        assert_eq!(GradeTier::Grade4.difficulty(), Difficulty::Medium);
        assert_eq!(GradeTier::Grade9.difficulty(), Difficulty::Division);
        assert_eq!(GradeTier::Calculus.difficulty(), Difficulty::Power);
        assert_eq!(GradeTier::Advanced.difficulty(), Difficulty::Advanced);
    }
}
