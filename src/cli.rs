//! CLI interface for the resume analyzer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Keyword-based resume analyzer")]
#[command(long_about = "Score a resume (PDF, DOCX, TXT, MD) on skills, education, experience and format, rank job roles by fit and flag ATS issues")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume
    Analyze {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Scoring profile (standard, technical, entry-level or a custom one)
        #[arg(short, long)]
        profile: Option<String>,

        /// Skill catalog: a preset name (roles, domains) or a TOML file
        #[arg(long)]
        catalog: Option<String>,

        /// Output format: console, json, markdown, html, pdf
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to a file, or into a directory with a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Number of top job roles to show
        #[arg(short, long)]
        top: Option<usize>,

        /// Show the missing skills for this job role
        #[arg(long)]
        role: Option<String>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,
    },

    /// List job roles and their required skills
    Roles {
        /// Skill catalog: a preset name (roles, domains) or a TOML file
        #[arg(long)]
        catalog: Option<String>,
    },

    /// List scoring profiles
    Profiles,

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    format.parse::<OutputFormat>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "resume-analyzer", "analyze", "--resume", "cv.pdf", "--profile", "technical",
            "--catalog", "domains", "--output", "json", "--top", "5", "--role", "Data Analyst", "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze { resume, profile, catalog, output, top, role, detailed, save } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(profile.as_deref(), Some("technical"));
                assert_eq!(catalog.as_deref(), Some("domains"));
                assert_eq!(output.as_deref(), Some("json"));
                assert_eq!(top, Some(5));
                assert_eq!(role.as_deref(), Some("Data Analyst"));
                assert!(!detailed);
                assert!(save.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("HTML").unwrap(), OutputFormat::Html);
        assert!(parse_output_format("docx").unwrap_err().contains("Invalid output format"));
    }
}
