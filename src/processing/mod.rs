//! Text processing and analysis module

pub mod text_processor;
pub mod catalog;
pub mod skill_matcher;
pub mod profile_extractor;
pub mod similarity;
pub mod scoring_profile;
pub mod scorer;
pub mod role_matcher;
pub mod ats_checklist;
pub mod analyzer;

pub use analyzer::{AnalysisReport, ResumeAnalyzer};
pub use catalog::{CatalogPreset, SkillCatalog};
pub use scoring_profile::ScoringProfile;
