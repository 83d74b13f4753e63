//! Report structures: the analysis plus generation metadata

use crate::input::manager::ExtractedDocument;
use crate::processing::analyzer::{AnalysisReport, ResumeAnalyzer};
use crate::processing::role_matcher::RoleMatch;
use crate::processing::text_processor::truncate_text;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PREVIEW_GRAPHEMES: usize = 300;

/// Everything a formatter needs to render one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    /// The analysis itself; the JSON output is exactly this value
    pub analysis: AnalysisReport,

    /// Role the user asked about, with its missing skills
    pub role_focus: Option<RoleFocus>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleFocus {
    pub role: String,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub analyzer_version: String,
    pub resume_file: String,
    pub file_type: String,
    pub profile: String,
    pub catalog_skills: usize,
    pub character_count: usize,
    pub text_preview: String,
    /// Extraction problems that did not stop the analysis
    pub warnings: Vec<String>,
}

/// Coarse label for a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreLevel::Excellent
        } else if score >= 60.0 {
            ScoreLevel::Good
        } else if score >= 40.0 {
            ScoreLevel::Fair
        } else {
            ScoreLevel::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreLevel::Excellent => "Excellent",
            ScoreLevel::Good => "Good",
            ScoreLevel::Fair => "Fair",
            ScoreLevel::Poor => "Poor",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreLevel::Excellent => "score-excellent",
            ScoreLevel::Good => "score-good",
            ScoreLevel::Fair => "score-fair",
            ScoreLevel::Poor => "score-poor",
        }
    }
}

impl ReportDocument {
    pub fn new(analysis: AnalysisReport, document: &ExtractedDocument, analyzer: &ResumeAnalyzer) -> Self {
        let metadata = ReportMetadata {
            generated_at: Utc::now(),
            analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: document.file_name.clone(),
            file_type: document.file_type.to_string(),
            profile: analyzer.profile().name.clone(),
            catalog_skills: analyzer.catalog().skill_count(),
            character_count: document.char_count(),
            text_preview: truncate_text(document.text.trim(), PREVIEW_GRAPHEMES),
            warnings: document.warnings.clone(),
        };

        Self {
            analysis,
            role_focus: None,
            metadata,
        }
    }

    /// Attach the missing skills of one role; `None` if the catalog has no such role
    pub fn with_role_focus(mut self, role: &str, analyzer: &ResumeAnalyzer) -> Option<Self> {
        let role_entry = analyzer.catalog().role(role)?;
        let missing_skills = analyzer.missing_skills(&self.analysis, role)?;
        self.role_focus = Some(RoleFocus {
            role: role_entry.name.clone(),
            missing_skills,
        });
        Some(self)
    }

    pub fn score_level(&self) -> ScoreLevel {
        ScoreLevel::from_score(self.analysis.score.score)
    }

    pub fn top_roles(&self, n: usize) -> &[RoleMatch] {
        let n = n.min(self.analysis.job_matches.len());
        &self.analysis.job_matches[..n]
    }

    pub fn generated_at_display(&self) -> String {
        self.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}
