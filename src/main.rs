//! Resume analyzer: keyword-based resume scoring and job-role fit

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction};
use resume_analyzer::config::{Config, OutputFormat};
use resume_analyzer::input::InputManager;
use resume_analyzer::output::{save_report_to_file, suggest_filename, ReportDocument, ReportGenerator};
use resume_analyzer::processing::ResumeAnalyzer;
use resume_analyzer::{AnalyzerError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            profile,
            catalog,
            output,
            save,
            top,
            role,
            detailed,
        } => {
            if let Some(catalog) = &catalog {
                config.override_catalog(catalog);
            }
            let profile_name = profile.unwrap_or_else(|| config.scoring.profile.clone());
            let scoring_profile = config.resolve_profile(&profile_name)?;
            let skill_catalog = config.load_catalog()?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(AnalyzerError::InvalidInput)?,
                None => config.output.format,
            };
            if output_format == OutputFormat::Pdf && save.is_none() {
                return Err(AnalyzerError::InvalidInput(
                    "PDF output must be written to a file; pass --save <file>".to_string(),
                ));
            }
            let top_roles = top.unwrap_or(config.output.top_roles).max(1);
            let detailed = detailed || config.output.detailed;

            info!(
                "Analyzing {} with profile '{}' ({} skills, {} roles)",
                resume.display(),
                scoring_profile.name,
                skill_catalog.skill_count(),
                skill_catalog.roles().len()
            );

            let interactive = output_format == OutputFormat::Console && save.is_none();
            let progress = interactive.then(|| spinner("Extracting text..."));

            let document = InputManager::new()
                .with_min_text_chars(config.input.min_text_chars)
                .load(&resume)?;

            if let Some(progress) = &progress {
                progress.set_message("Analyzing resume...");
            }
            let analyzer = ResumeAnalyzer::new(skill_catalog, scoring_profile)?;
            let analysis = analyzer.analyze(&document.text);

            if let Some(progress) = progress {
                progress.finish_and_clear();
            }
            info!(
                "Score {:.1}; {} skills found; {} ATS issues",
                analysis.score.score,
                analysis.skills.len(),
                analysis.ats_issues.len()
            );

            let mut report = ReportDocument::new(analysis, &document, &analyzer);
            if let Some(role) = &role {
                report = report.with_role_focus(role, &analyzer).ok_or_else(|| {
                    AnalyzerError::InvalidInput(format!(
                        "Unknown job role: {}. Run `resume-analyzer roles` to list roles",
                        role
                    ))
                })?;
            }

            let use_colors = config.output.color_output && save.is_none();
            let generator =
                ReportGenerator::with_options(use_colors, detailed, config.output.pretty_json, top_roles);
            let content = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(output_format, &document.file_name, true))
                    } else {
                        path
                    };
                    save_report_to_file(&content, &path)?;
                    println!("{} Report saved to {}", "✓".green(), path.display());
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&content)?;
                    if !content.ends_with(b"\n") {
                        stdout.write_all(b"\n")?;
                    }
                }
            }
        }

        Commands::Roles { catalog } => {
            if let Some(catalog) = &catalog {
                config.override_catalog(catalog);
            }
            let skill_catalog = config.load_catalog()?;

            println!("{}\n", "Job Roles".bold());
            for role in skill_catalog.roles() {
                println!("  • {}", role.name.cyan());
                println!("    {}", role.required.join(", "));
            }
            println!("\n{} skills in catalog", skill_catalog.skill_count());
        }

        Commands::Profiles => {
            println!("{}\n", "Scoring Profiles".bold());
            for profile in config.available_profiles() {
                let marker = if profile.name.eq_ignore_ascii_case(&config.scoring.profile) {
                    " (default)"
                } else {
                    ""
                };
                println!("  • {}{}", profile.name.cyan(), marker);
                println!("    {}", profile.description);
                println!(
                    "    Weights: skills {:.0}% | education {:.0}% | experience {:.0}% | format {:.0}%",
                    profile.weights.skills * 100.0,
                    profile.weights.education * 100.0,
                    profile.weights.experience * 100.0,
                    profile.weights.format * 100.0
                );
                println!(
                    "    Targets: {} skills, {} years experience, {}-{} words | similarity: {}",
                    profile.skill_target,
                    profile.experience_target_years,
                    profile.min_words,
                    profile.max_words,
                    profile.similarity
                );
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => show_config(&config, &path)?,

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("{} Configuration reset: {}", "✓".green(), path.display());
                }

                Some(ConfigAction::Path) => println!("{}", path.display()),
            }
        }
    }

    Ok(())
}

fn show_config(config: &Config, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| AnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

    println!("{} {}\n", "Configuration:".bold(), path.display());
    println!("{}", content);
    Ok(())
}
