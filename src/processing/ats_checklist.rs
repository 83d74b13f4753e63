//! ATS (Applicant Tracking System) compatibility checklist

use crate::processing::scoring_profile::ChecklistThresholds;
use crate::processing::text_processor::{title_case, DocumentSignals};
use serde::{Deserialize, Serialize};

/// A failed check as `(title, suggestion)`; serializes as a two-element array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsIssue(pub String, pub String);

impl AtsIssue {
    fn new(title: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self(title.into(), suggestion.into())
    }

    pub fn title(&self) -> &str {
        &self.0
    }

    pub fn suggestion(&self) -> &str {
        &self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtsCheck {
    Email,
    Phone,
    Sections,
    TooShort,
    TooLong,
    BulletPoints,
    SkillCount,
}

impl AtsCheck {
    /// Checks in reporting order
    pub const ALL: [AtsCheck; 7] = [
        AtsCheck::Email,
        AtsCheck::Phone,
        AtsCheck::Sections,
        AtsCheck::TooShort,
        AtsCheck::TooLong,
        AtsCheck::BulletPoints,
        AtsCheck::SkillCount,
    ];

    /// Issues raised by this check; empty when it passes
    pub fn evaluate(
        &self,
        signals: &DocumentSignals,
        skill_count: usize,
        thresholds: &ChecklistThresholds,
    ) -> Vec<AtsIssue> {
        match self {
            AtsCheck::Email if !signals.has_email => {
                vec![AtsIssue::new("Missing email", "Add an email address")]
            }
            AtsCheck::Phone if !signals.has_phone => vec![AtsIssue::new(
                "Missing phone",
                "Add phone number with country code if possible",
            )],
            AtsCheck::Sections => signals
                .missing_sections
                .iter()
                .map(|section| {
                    AtsIssue::new(
                        format!("Missing section: {}", title_case(section)),
                        format!("Add a {} section with bullets", section),
                    )
                })
                .collect(),
            AtsCheck::TooShort if signals.word_count < thresholds.min_words => vec![AtsIssue::new(
                "Resume too short",
                "Try to add more accomplishments or details",
            )],
            AtsCheck::TooLong if signals.word_count > thresholds.max_words => {
                vec![AtsIssue::new("Resume too long", "Trim down to 1-2 pages")]
            }
            AtsCheck::BulletPoints if signals.bullet_count < thresholds.min_bullets => vec![AtsIssue::new(
                "Few bullet points",
                "Use bullet points for achievements under each role",
            )],
            AtsCheck::SkillCount if skill_count < thresholds.min_skills => vec![AtsIssue::new(
                "Few detected skills",
                "Add more relevant skill keywords (tools, languages, frameworks)",
            )],
            _ => Vec::new(),
        }
    }
}

/// Run every check in order and collect the failures
pub fn run_checklist(
    signals: &DocumentSignals,
    skill_count: usize,
    thresholds: &ChecklistThresholds,
) -> Vec<AtsIssue> {
    AtsCheck::ALL
        .iter()
        .flat_map(|check| check.evaluate(signals, skill_count, thresholds))
        .collect()
}
