//! Named scoring profiles: weights, targets and thresholds as configuration data

use crate::error::{AnalyzerError, Result};
use crate::processing::similarity::SimilarityMetric;
use serde::{Deserialize, Serialize};

const WEIGHT_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f64,
    pub education: f64,
    pub experience: f64,
    pub format: f64,
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.skills + self.education + self.experience + self.format
    }
}

/// Points awarded toward the format score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatPoints {
    pub contact: f64,
    pub sections: f64,
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleMatchWeights {
    pub overlap: f64,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistThresholds {
    pub min_words: usize,
    pub max_words: usize,
    pub min_bullets: usize,
    pub min_skills: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub name: String,
    pub description: String,
    pub weights: ScoreWeights,
    /// Matched skills needed for a full skills score
    pub skill_target: usize,
    /// Years of experience needed for a full experience score
    pub experience_target_years: f64,
    /// Accepted word range for the length points, inclusive
    pub min_words: usize,
    pub max_words: usize,
    pub format_points: FormatPoints,
    pub required_sections: Vec<String>,
    pub role_weights: RoleMatchWeights,
    pub similarity: SimilarityMetric,
    pub checklist: ChecklistThresholds,
}

fn default_sections() -> Vec<String> {
    ["experience", "education", "skills"].iter().map(|s| s.to_string()).collect()
}

impl ScoringProfile {
    /// The weights and thresholds of the original analyzer
    pub fn standard() -> Self {
        Self {
            name: "standard".to_string(),
            description: "Balanced scoring: skills 45%, education 15%, experience 25%, format 15%".to_string(),
            weights: ScoreWeights {
                skills: 0.45,
                education: 0.15,
                experience: 0.25,
                format: 0.15,
            },
            skill_target: 6,
            experience_target_years: 8.0,
            min_words: 200,
            max_words: 2000,
            format_points: FormatPoints {
                contact: 40.0,
                sections: 30.0,
                length: 30.0,
            },
            required_sections: default_sections(),
            role_weights: RoleMatchWeights {
                overlap: 0.75,
                similarity: 0.25,
            },
            similarity: SimilarityMetric::Sequence,
            checklist: ChecklistThresholds {
                min_words: 150,
                max_words: 4000,
                min_bullets: 3,
                min_skills: 3,
            },
        }
    }

    pub fn technical() -> Self {
        Self {
            name: "technical".to_string(),
            description: "Skills-heavy scoring for engineering roles; fuzzier role similarity".to_string(),
            weights: ScoreWeights {
                skills: 0.55,
                education: 0.10,
                experience: 0.25,
                format: 0.10,
            },
            skill_target: 8,
            similarity: SimilarityMetric::JaroWinkler,
            checklist: ChecklistThresholds {
                min_skills: 5,
                ..Self::standard().checklist
            },
            ..Self::standard()
        }
    }

    pub fn entry_level() -> Self {
        Self {
            name: "entry-level".to_string(),
            description: "Education-heavy scoring for graduates and interns".to_string(),
            weights: ScoreWeights {
                skills: 0.40,
                education: 0.30,
                experience: 0.10,
                format: 0.20,
            },
            skill_target: 4,
            experience_target_years: 3.0,
            min_words: 150,
            max_words: 1200,
            ..Self::standard()
        }
    }

    pub fn builtin() -> Vec<Self> {
        vec![Self::standard(), Self::technical(), Self::entry_level()]
    }

    pub fn builtin_by_name(name: &str) -> Option<Self> {
        Self::builtin().into_iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Reject profiles that could push a score outside 0-100
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(AnalyzerError::Profile(format!("{}: {}", self.name, msg)));

        let weights = [
            self.weights.skills,
            self.weights.education,
            self.weights.experience,
            self.weights.format,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return invalid("score weights must be non-negative".to_string());
        }
        if (self.weights.total() - 1.0).abs() > WEIGHT_TOLERANCE {
            return invalid(format!("score weights sum to {:.3}, expected 1.0", self.weights.total()));
        }

        let role = [self.role_weights.overlap, self.role_weights.similarity];
        if role.iter().any(|w| !w.is_finite() || *w < 0.0)
            || (role.iter().sum::<f64>() - 1.0).abs() > WEIGHT_TOLERANCE
        {
            return invalid("role weights must be non-negative and sum to 1.0".to_string());
        }

        let points = [
            self.format_points.contact,
            self.format_points.sections,
            self.format_points.length,
        ];
        if points.iter().any(|p| !p.is_finite() || *p < 0.0) || points.iter().sum::<f64>() > 100.0 + WEIGHT_TOLERANCE {
            return invalid("format points must be non-negative and total at most 100".to_string());
        }

        if self.skill_target == 0 {
            return invalid("skill_target must be positive".to_string());
        }
        if !(self.experience_target_years > 0.0) {
            return invalid("experience_target_years must be positive".to_string());
        }
        if self.min_words > self.max_words || self.checklist.min_words > self.checklist.max_words {
            return invalid("word ranges must not be inverted".to_string());
        }

        Ok(())
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_are_valid() {
        for profile in ScoringProfile::builtin() {
            assert!(profile.validate().is_ok(), "{} should validate", profile.name);
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(ScoringProfile::builtin_by_name("Entry-Level").unwrap().skill_target, 4);
        assert!(ScoringProfile::builtin_by_name("unknown").is_none());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut profile = ScoringProfile::standard();
        profile.weights.skills = 0.6;

        assert!(matches!(profile.validate(), Err(AnalyzerError::Profile(_))));
    }

    #[test]
    fn test_inverted_word_range_is_rejected() {
        let mut profile = ScoringProfile::standard();
        profile.min_words = 3000;

        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_profile_roundtrips_through_toml() {
        let profile = ScoringProfile::technical();
        let text = toml::to_string(&profile).unwrap();
        let parsed: ScoringProfile = toml::from_str(&text).unwrap();

        assert_eq!(parsed, profile);
    }
}
