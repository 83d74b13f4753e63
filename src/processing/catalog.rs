//! Static skill and job-role catalogs

use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A canonical skill and the keywords that signal it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub synonyms: Vec<String>,
}

/// A job role and the catalog skills it requires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRole {
    pub name: String,
    pub required: Vec<String>,
}

/// Immutable mapping of skills to synonyms plus the job roles built on them.
///
/// Constructed once (from a preset or a TOML file) and handed to each
/// component by reference. Construction validates that every role requirement
/// names a catalog skill, so role matching never sees unknown skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCatalog {
    skills: Vec<SkillEntry>,
    roles: Vec<JobRole>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    skills: Vec<SkillEntry>,
    #[serde(default)]
    roles: Vec<JobRole>,
}

/// Built-in catalogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogPreset {
    /// Every role keyword is its own skill
    Roles,
    /// Keywords grouped under broader canonical skills
    Domains,
}

impl fmt::Display for CatalogPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogPreset::Roles => write!(f, "roles"),
            CatalogPreset::Domains => write!(f, "domains"),
        }
    }
}

impl FromStr for CatalogPreset {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "roles" => Ok(CatalogPreset::Roles),
            "domains" => Ok(CatalogPreset::Domains),
            other => Err(AnalyzerError::Catalog(format!(
                "Unknown catalog preset: {}. Supported: roles, domains",
                other
            ))),
        }
    }
}

const ROLE_KEYWORDS: &[(&str, &[&str])] = &[
    ("Data Scientist", &["python", "pandas", "numpy", "scikit-learn", "machine learning", "sql", "data analysis", "visualization"]),
    ("Machine Learning Engineer", &["python", "tensorflow", "keras", "pytorch", "model", "training", "deployment", "docker"]),
    ("Backend Developer", &["python", "java", "node", "sql", "api", "rest", "django", "flask"]),
    ("Frontend Developer", &["html", "css", "javascript", "react", "ui", "typescript"]),
    ("Data Analyst", &["excel", "sql", "power bi", "tableau", "pandas", "data visualization"]),
    ("Product Manager", &["product", "roadmap", "communication", "stakeholder", "leadership"]),
];

const DOMAIN_SKILLS: &[(&str, &[&str])] = &[
    ("Python", &["python", "pandas", "numpy", "django", "flask"]),
    ("SQL", &["sql", "mysql", "postgresql", "sqlite"]),
    ("Data Analysis", &["data analysis", "power bi", "tableau", "excel", "data visualization"]),
    ("Machine Learning", &["machine learning", "scikit-learn", "sklearn", "tensorflow", "keras", "pytorch"]),
    ("Web Development", &["html", "css", "javascript", "typescript", "react"]),
    ("Backend Development", &["api", "rest", "node", "node.js", "java", "spring"]),
    ("DevOps", &["docker", "kubernetes", "deployment", "ci/cd", "aws"]),
    ("Product Management", &["product", "roadmap", "stakeholder"]),
    ("Communication", &["communication", "presentation", "leadership"]),
];

const DOMAIN_ROLES: &[(&str, &[&str])] = &[
    ("Data Scientist", &["Python", "SQL", "Data Analysis", "Machine Learning"]),
    ("Machine Learning Engineer", &["Python", "Machine Learning", "DevOps"]),
    ("Backend Developer", &["Python", "SQL", "Backend Development", "DevOps"]),
    ("Frontend Developer", &["Web Development", "Communication"]),
    ("Data Analyst", &["SQL", "Data Analysis", "Communication"]),
    ("Product Manager", &["Product Management", "Communication", "Data Analysis"]),
];

impl SkillCatalog {
    /// Build and validate a catalog
    pub fn new(skills: Vec<SkillEntry>, roles: Vec<JobRole>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut cleaned_skills = Vec::with_capacity(skills.len());

        for skill in skills {
            let name = skill.name.trim().to_string();
            if name.is_empty() {
                return Err(AnalyzerError::Catalog("Skill with empty name".to_string()));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(AnalyzerError::Catalog(format!("Duplicate skill: {}", name)));
            }

            let mut synonyms: Vec<String> = Vec::new();
            for synonym in skill.synonyms {
                let synonym = synonym.trim().to_lowercase();
                if synonym.is_empty() {
                    return Err(AnalyzerError::Catalog(format!("Empty synonym for skill: {}", name)));
                }
                if !synonyms.contains(&synonym) {
                    synonyms.push(synonym);
                }
            }
            if synonyms.is_empty() {
                synonyms.push(name.to_lowercase());
            }

            cleaned_skills.push(SkillEntry { name, synonyms });
        }

        let mut cleaned_roles = Vec::with_capacity(roles.len());
        for role in roles {
            let name = role.name.trim().to_string();
            if name.is_empty() {
                return Err(AnalyzerError::Catalog("Job role with empty name".to_string()));
            }

            let mut required: Vec<String> = Vec::new();
            for requirement in &role.required {
                let skill = cleaned_skills
                    .iter()
                    .find(|s| s.name.eq_ignore_ascii_case(requirement.trim()))
                    .ok_or_else(|| AnalyzerError::Catalog(format!(
                        "Role '{}' requires unknown skill '{}'",
                        name, requirement
                    )))?;
                if !required.contains(&skill.name) {
                    required.push(skill.name.clone());
                }
            }
            if required.is_empty() {
                return Err(AnalyzerError::Catalog(format!("Role '{}' has no required skills", name)));
            }

            cleaned_roles.push(JobRole { name, required });
        }

        Ok(Self {
            skills: cleaned_skills,
            roles: cleaned_roles,
        })
    }

    pub fn preset(preset: CatalogPreset) -> Self {
        match preset {
            CatalogPreset::Roles => Self::role_keywords(),
            CatalogPreset::Domains => Self::skill_domains(),
        }
    }

    /// Load a catalog from a TOML file with `[[skills]]` and `[[roles]]` tables
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| AnalyzerError::Catalog(format!("Failed to parse catalog: {}", e)))?;
        Self::new(file.skills, file.roles)
    }

    /// The job roles of the original analyzer; each keyword is its own skill
    fn role_keywords() -> Self {
        let mut skills: Vec<SkillEntry> = Vec::new();
        for (_, keywords) in ROLE_KEYWORDS {
            for keyword in keywords.iter() {
                if !skills.iter().any(|s| s.name == *keyword) {
                    skills.push(SkillEntry {
                        name: keyword.to_string(),
                        synonyms: vec![keyword.to_string()],
                    });
                }
            }
        }
        skills.sort_by(|a, b| a.name.cmp(&b.name));

        let roles = Self::roles_from(ROLE_KEYWORDS);
        Self::new(skills, roles).expect("built-in role catalog is valid")
    }

    fn skill_domains() -> Self {
        let skills = DOMAIN_SKILLS
            .iter()
            .map(|(name, synonyms)| SkillEntry {
                name: name.to_string(),
                synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            })
            .collect();

        let roles = Self::roles_from(DOMAIN_ROLES);
        Self::new(skills, roles).expect("built-in domain catalog is valid")
    }

    fn roles_from(table: &[(&str, &[&str])]) -> Vec<JobRole> {
        table
            .iter()
            .map(|(name, required)| JobRole {
                name: name.to_string(),
                required: required.iter().map(|s| s.to_string()).collect(),
            })
            .collect()
    }

    pub fn skills(&self) -> &[SkillEntry] {
        &self.skills
    }

    pub fn roles(&self) -> &[JobRole] {
        &self.roles
    }

    pub fn role(&self, name: &str) -> Option<&JobRole> {
        self.roles.iter().find(|r| r.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn contains_skill(&self, name: &str) -> bool {
        self.skills.iter().any(|s| s.name == name)
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::preset(CatalogPreset::Roles)
    }
}
