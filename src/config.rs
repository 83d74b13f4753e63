//! Configuration management for the resume analyzer

use crate::error::{AnalyzerError, Result};
use crate::input::manager::DEFAULT_MIN_TEXT_CHARS;
use crate::processing::catalog::{CatalogPreset, SkillCatalog};
use crate::processing::scoring_profile::ScoringProfile;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
    pub input: InputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub preset: CatalogPreset,
    /// A custom TOML catalog; takes precedence over `preset`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Name of the profile used when `--profile` is not given
    pub profile: String,
    /// Custom profiles; a custom profile shadows a built-in of the same name
    #[serde(default)]
    pub profiles: Vec<ScoringProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
    pub top_roles: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub min_text_chars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
    Pdf,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Console => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Console => "console",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
            OutputFormat::Pdf => "pdf",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            "pdf" => Ok(OutputFormat::Pdf),
            _ => Err(AnalyzerError::InvalidInput(format!(
                "Invalid output format: {}. Supported: console, json, markdown, html, pdf",
                s
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                preset: CatalogPreset::Roles,
                path: None,
            },
            scoring: ScoringConfig {
                profile: "standard".to_string(),
                profiles: Vec::new(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                pretty_json: true,
                top_roles: 3,
            },
            input: InputConfig {
                min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing the defaults there on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    /// Custom profiles must be valid and the default profile must resolve
    pub fn validate(&self) -> Result<()> {
        for profile in &self.scoring.profiles {
            profile.validate().map_err(|e| {
                AnalyzerError::Configuration(format!("Invalid profile '{}': {}", profile.name, e))
            })?;
        }
        if self.output.top_roles == 0 {
            return Err(AnalyzerError::Configuration(
                "output.top_roles must be at least 1".to_string(),
            ));
        }
        self.resolve_profile(&self.scoring.profile)?;
        Ok(())
    }

    /// Custom profiles first, then built-ins; names compare case-insensitively
    pub fn resolve_profile(&self, name: &str) -> Result<ScoringProfile> {
        self.scoring
            .profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned()
            .or_else(|| ScoringProfile::builtin_by_name(name))
            .ok_or_else(|| {
                AnalyzerError::Profile(format!(
                    "Unknown scoring profile: {}. Available: {}",
                    name,
                    self.profile_names().join(", ")
                ))
            })
    }

    /// Built-in profiles followed by custom ones not shadowing a built-in
    pub fn available_profiles(&self) -> Vec<ScoringProfile> {
        let mut profiles: Vec<ScoringProfile> = ScoringProfile::builtin()
            .into_iter()
            .map(|builtin| {
                self.scoring
                    .profiles
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(&builtin.name))
                    .cloned()
                    .unwrap_or(builtin)
            })
            .collect();

        for custom in &self.scoring.profiles {
            if !profiles.iter().any(|p| p.name.eq_ignore_ascii_case(&custom.name)) {
                profiles.push(custom.clone());
            }
        }
        profiles
    }

    fn profile_names(&self) -> Vec<String> {
        self.available_profiles().into_iter().map(|p| p.name).collect()
    }

    /// `roles` or `domains` selects a preset; anything else is a catalog file path
    pub fn override_catalog(&mut self, value: &str) {
        match value.parse::<CatalogPreset>() {
            Ok(preset) => {
                self.catalog.preset = preset;
                self.catalog.path = None;
            }
            Err(_) => self.catalog.path = Some(PathBuf::from(value)),
        }
    }

    pub fn load_catalog(&self) -> Result<SkillCatalog> {
        match &self.catalog.path {
            Some(path) => SkillCatalog::from_toml_file(path),
            None => Ok(SkillCatalog::preset(self.catalog.preset)),
        }
    }
}
