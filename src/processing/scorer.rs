//! Weighted 0-100 resume score

use crate::processing::profile_extractor::ExtractedProfile;
use crate::processing::scoring_profile::ScoringProfile;
use crate::processing::text_processor::DocumentSignals;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub skills_score: f64,
    pub education_score: f64,
    pub experience_score: f64,
    pub format_score: f64,
}

/// Four sub-scores and their weighted composite, all within 0-100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub breakdown: SubScores,
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

pub fn skills_score(matched: usize, profile: &ScoringProfile) -> f64 {
    let ratio = matched as f64 / profile.skill_target as f64;
    clamp_score(ratio.min(1.0) * 100.0)
}

pub fn education_score(education: &[String]) -> f64 {
    if education.is_empty() {
        0.0
    } else {
        100.0
    }
}

pub fn experience_score(max_years: Option<u32>, profile: &ScoringProfile) -> f64 {
    match max_years {
        Some(years) => {
            let ratio = years as f64 / profile.experience_target_years;
            clamp_score(ratio.min(1.0) * 100.0)
        }
        None => 0.0,
    }
}

pub fn format_score(signals: &DocumentSignals, profile: &ScoringProfile) -> f64 {
    let points = &profile.format_points;
    let mut score = 0.0;

    if signals.has_contact() {
        score += points.contact;
    }
    if signals.has_all_sections() {
        score += points.sections;
    }
    if (profile.min_words..=profile.max_words).contains(&signals.word_count) {
        score += points.length;
    }

    clamp_score(score)
}

/// Combine sub-scores with the profile weights; the composite uses the unrounded sub-scores
pub fn score_resume(
    extracted: &ExtractedProfile,
    signals: &DocumentSignals,
    profile: &ScoringProfile,
) -> ScoreBreakdown {
    let skills = skills_score(extracted.skills.len(), profile);
    let education = education_score(&extracted.education);
    let experience = experience_score(extracted.experience.max_years(), profile);
    let format = format_score(signals, profile);

    let weights = &profile.weights;
    let composite = skills * weights.skills
        + education * weights.education
        + experience * weights.experience
        + format * weights.format;

    ScoreBreakdown {
        score: round1(clamp_score(composite)),
        breakdown: SubScores {
            skills_score: round1(skills),
            education_score: round1(education),
            experience_score: round1(experience),
            format_score: round1(format),
        },
    }
}
