//! Analysis pipeline: text → profile → score, role ranking and checklist

use crate::error::Result;
use crate::processing::ats_checklist::{run_checklist, AtsIssue};
use crate::processing::catalog::SkillCatalog;
use crate::processing::profile_extractor::{extract_education, extract_experience, ExperienceInfo, ExtractedProfile};
use crate::processing::role_matcher::{missing_for_role, rank_roles, RoleMatch};
use crate::processing::scorer::{score_resume, ScoreBreakdown};
use crate::processing::scoring_profile::ScoringProfile;
use crate::processing::skill_matcher::SkillMatcher;
use crate::processing::text_processor::TextProcessor;
use log::debug;
use serde::{Deserialize, Serialize};

/// Everything computed for one resume; this is the JSON report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub score: ScoreBreakdown,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub experience_info: ExperienceInfo,
    pub job_matches: Vec<RoleMatch>,
    pub ats_issues: Vec<AtsIssue>,
}

impl AnalysisReport {
    pub fn top_role(&self) -> Option<&RoleMatch> {
        self.job_matches.first()
    }
}

/// Runs every analysis stage for one document at a time.
///
/// Holds the catalog and profile it was built with plus the matchers compiled
/// from them; `analyze` itself keeps no state between calls.
pub struct ResumeAnalyzer {
    catalog: SkillCatalog,
    profile: ScoringProfile,
    skill_matcher: SkillMatcher,
    text_processor: TextProcessor,
}

impl ResumeAnalyzer {
    pub fn new(catalog: SkillCatalog, profile: ScoringProfile) -> Result<Self> {
        profile.validate()?;
        let skill_matcher = SkillMatcher::new(&catalog)?;
        let text_processor = TextProcessor::new(&profile.required_sections)?;

        Ok(Self {
            catalog,
            profile,
            skill_matcher,
            text_processor,
        })
    }

    pub fn extract_profile(&self, text: &str) -> ExtractedProfile {
        ExtractedProfile {
            skills: self.skill_matcher.find_skills(text),
            education: extract_education(text),
            experience: extract_experience(text),
        }
    }

    pub fn analyze(&self, text: &str) -> AnalysisReport {
        let profile = self.extract_profile(text);
        let signals = self.text_processor.signals(text);

        debug!(
            "Extracted {} skills, {} education entries, {} year mentions; {} words, {} bullets",
            profile.skills.len(),
            profile.education.len(),
            profile.experience.years_mentioned.len(),
            signals.word_count,
            signals.bullet_count
        );

        let score = score_resume(&profile, &signals, &self.profile);
        let job_matches = rank_roles(&self.catalog, &profile.skills, &self.profile);
        let ats_issues = run_checklist(&signals, profile.skills.len(), &self.profile.checklist);

        AnalysisReport {
            score,
            skills: profile.skills,
            education: profile.education,
            experience_info: profile.experience,
            job_matches,
            ats_issues,
        }
    }

    /// Required skills of a role missing from an analyzed report
    pub fn missing_skills(&self, report: &AnalysisReport, role: &str) -> Option<Vec<String>> {
        missing_for_role(&self.catalog, role, &report.skills)
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::catalog::CatalogPreset;

    const SCENARIO: &str = "I am a Python developer with 5 years experience. Skills: SQL, Pandas. \
        Education: B.Tech. Contact: a@b.com, +1-555-123-4567. Experience Education Skills.";

    fn analyzer() -> ResumeAnalyzer {
        ResumeAnalyzer::new(SkillCatalog::default(), ScoringProfile::standard()).unwrap()
    }

    #[test]
    fn test_short_resume_scenario() {
        let report = analyzer().analyze(SCENARIO);

        for skill in ["python", "sql", "pandas"] {
            assert!(report.skills.contains(&skill.to_string()));
        }
        assert!(report.education.contains(&"B.Tech".to_string()));
        assert_eq!(report.experience_info.years_mentioned, vec![5]);
        assert_eq!(report.experience_info.roles_mentioned, vec!["Developer"]);
        // contact and sections present; far below the 200-word floor
        assert_eq!(report.score.breakdown.format_score, 70.0);
        assert_eq!(report.score.breakdown.education_score, 100.0);
        assert_eq!(report.score.breakdown.experience_score, 62.5);
    }

    #[test]
    fn test_empty_text() {
        let report = analyzer().analyze("");

        assert!(report.skills.is_empty());
        assert!(report.education.is_empty());
        assert!(report.experience_info.years_mentioned.is_empty());
        assert_eq!(report.score.score, 0.0);
        assert_eq!(report.ats_issues.len(), 8);
        assert_eq!(report.job_matches.len(), 6);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let analyzer = analyzer();

        assert_eq!(analyzer.analyze(SCENARIO), analyzer.analyze(SCENARIO));
    }

    #[test]
    fn test_skills_come_from_catalog() {
        let analyzer = ResumeAnalyzer::new(SkillCatalog::preset(CatalogPreset::Domains), ScoringProfile::technical()).unwrap();
        let report = analyzer.analyze(SCENARIO);

        for skill in &report.skills {
            assert!(analyzer.catalog().contains_skill(skill));
        }
        assert!(report.skills.contains(&"Python".to_string()));
    }

    #[test]
    fn test_missing_skills_for_selected_role() {
        let analyzer = analyzer();
        let report = analyzer.analyze(SCENARIO);

        let missing = analyzer.missing_skills(&report, "Data Scientist").unwrap();
        assert!(!missing.contains(&"python".to_string()));
        assert!(missing.contains(&"numpy".to_string()));
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let mut profile = ScoringProfile::standard();
        profile.weights.format = 0.5;

        assert!(ResumeAnalyzer::new(SkillCatalog::default(), profile).is_err());
    }
}
