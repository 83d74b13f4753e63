//! Output formatters: console, JSON, Markdown, HTML and PDF

use crate::config::OutputFormat;
use crate::error::{AnalyzerError, Result};
use crate::output::pdf::PdfFormatter;
use crate::output::report::*;
use crate::processing::role_matcher::RoleMatch;
use crate::processing::text_processor::title_case;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for the text-based report formats
pub trait OutputFormatter {
    fn format_report(&self, report: &ReportDocument) -> Result<String>;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    top_roles: usize,
}

/// JSON formatter; emits the analysis only
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
    top_roles: usize,
}

pub struct HtmlFormatter {
    include_styles: bool,
    top_roles: usize,
}

/// Coordinates the formatters; every format renders to bytes
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
    pdf_formatter: PdfFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Analysis Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        .score-breakdown { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 15px; }
        .score-item { background: #f8f9fa; padding: 15px; border-radius: 6px; border-left: 4px solid #007acc; }
        .issue { background: #f8f9fa; padding: 10px 15px; margin: 8px 0; border-radius: 6px; border-left: 4px solid #ffc107; }
        .warning { color: #856404; background: #fff3cd; padding: 10px; border-radius: 6px; }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #e9ecef; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Analysis Report</h1>
            <p>Generated: {{ generated_at }} | Profile: {{ profile }}</p>
        </div>

        {% for warning in warnings %}
        <p class="warning">{{ warning }}</p>
        {% endfor %}

        <div class="section">
            <h2>Overall Score: {{ score }}/100 <span class="score-badge {{ score_class }}">{{ score_label }}</span></h2>
            <div class="score-breakdown">
                <div class="score-item"><h4>Skills</h4><p><strong>{{ skills_score }}</strong></p></div>
                <div class="score-item"><h4>Education</h4><p><strong>{{ education_score }}</strong></p></div>
                <div class="score-item"><h4>Experience</h4><p><strong>{{ experience_score }}</strong></p></div>
                <div class="score-item"><h4>Format</h4><p><strong>{{ format_score }}</strong></p></div>
            </div>
        </div>

        <div class="section">
            <h2>Skills Detected</h2>
            {% if skills.is_empty() %}
            <p>No catalog skills detected.</p>
            {% else %}
            <ul>
            {% for skill in skills %}
                <li>{{ skill }}</li>
            {% endfor %}
            </ul>
            {% endif %}
        </div>

        <div class="section">
            <h2>Education &amp; Experience</h2>
            <p><strong>Education:</strong> {{ education }}</p>
            <p><strong>Years mentioned:</strong> {{ years }}</p>
            <p><strong>Roles mentioned:</strong> {{ roles_mentioned }}</p>
        </div>

        <div class="section">
            <h2>Top Job Matches</h2>
            <table>
                <tr><th>Role</th><th>Match</th><th>Matched</th><th>Missing</th></tr>
                {% for role in roles %}
                <tr><td>{{ role.name }}</td><td>{{ role.score }}%</td><td>{{ role.matched }}</td><td>{{ role.missing }}</td></tr>
                {% endfor %}
            </table>
            {% if has_focus %}
            <h3>Missing for {{ focus_role }}</h3>
            <p>{{ focus_missing }}</p>
            {% endif %}
        </div>

        <div class="section">
            <h2>ATS Checklist</h2>
            {% if issues.is_empty() %}
            <p>No issues found.</p>
            {% endif %}
            {% for issue in issues %}
            <div class="issue"><strong>{{ issue.title }}</strong><br><small>{{ issue.suggestion }}</small></div>
            {% endfor %}
        </div>

        <div class="metadata">
            <p><strong>Generated by Resume Analyzer v{{ version }}</strong></p>
            <p><strong>Resume:</strong> {{ resume_file }} ({{ file_type }}, {{ character_count }} characters)</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    profile: String,
    warnings: Vec<String>,
    score: String,
    score_class: String,
    score_label: String,
    skills_score: String,
    education_score: String,
    experience_score: String,
    format_score: String,
    skills: Vec<String>,
    education: String,
    years: String,
    roles_mentioned: String,
    roles: Vec<HtmlRole>,
    has_focus: bool,
    focus_role: String,
    focus_missing: String,
    issues: Vec<HtmlIssue>,
    version: String,
    resume_file: String,
    file_type: String,
    character_count: usize,
}

struct HtmlIssue {
    title: String,
    suggestion: String,
}

struct HtmlRole {
    name: String,
    score: String,
    matched: String,
    missing: String,
}

fn join_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

fn years_display(years: &[u32]) -> String {
    if years.is_empty() {
        "None".to_string()
    } else {
        years.iter().map(|y| y.to_string()).collect::<Vec<_>>().join(", ")
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool, top_roles: usize) -> Self {
        Self {
            use_colors,
            detailed,
            top_roles,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, level: ScoreLevel) -> String {
        let color = match level {
            ScoreLevel::Excellent => Color::Green,
            ScoreLevel::Good => Color::BrightGreen,
            ScoreLevel::Fair => Color::Yellow,
            ScoreLevel::Poor => Color::Red,
        };
        let badge = level.label().to_uppercase();

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_role(&self, index: usize, role: &RoleMatch) -> String {
        let mut output = format!(
            "  {}. {} {}\n",
            index,
            self.colorize(&role.role, Color::White),
            self.colorize(&format!("({:.1}%)", role.match_score), Color::Cyan)
        );
        if self.detailed {
            output.push_str(&format!("     Matched: {}\n", join_or(&role.matched_skills, "none")));
        }
        if !role.missing_skills.is_empty() {
            output.push_str(&format!(
                "     Missing: {}\n",
                self.colorize(&role.missing_skills.join(", "), Color::Yellow)
            ));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ReportDocument) -> Result<String> {
        let analysis = &report.analysis;
        let breakdown = &analysis.score.breakdown;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "File: {} ({}) | Profile: {} | Generated: {}\n",
            report.metadata.resume_file,
            report.metadata.file_type,
            report.metadata.profile,
            report.generated_at_display()
        ));

        for warning in &report.metadata.warnings {
            output.push_str(&format!("{} {}\n", self.colorize("Warning:", Color::Yellow), warning));
        }

        if self.detailed && !report.metadata.text_preview.is_empty() {
            output.push_str(&self.format_header("Resume Content Preview", 3));
            output.push_str(&format!("{}\n", report.metadata.text_preview));
        }

        output.push_str(&self.format_header("Score", 2));
        output.push_str(&format!(
            "Overall Score: {:.1}/100 {}\n",
            analysis.score.score,
            self.format_score_badge(report.score_level())
        ));
        output.push_str(&format!("  • Skills:     {:.1}\n", breakdown.skills_score));
        output.push_str(&format!("  • Education:  {:.1}\n", breakdown.education_score));
        output.push_str(&format!("  • Experience: {:.1}\n", breakdown.experience_score));
        output.push_str(&format!("  • Format:     {:.1}\n", breakdown.format_score));

        output.push_str(&self.format_header(&format!("Skills Detected ({})", analysis.skills.len()), 2));
        output.push_str(&format!("{}\n", self.colorize(&join_or(&analysis.skills, "None detected"), Color::Green)));

        output.push_str(&self.format_header("Education & Experience", 2));
        output.push_str(&format!("Education: {}\n", join_or(&analysis.education, "None detected")));
        output.push_str(&format!(
            "Years mentioned: {}\n",
            years_display(&analysis.experience_info.years_mentioned)
        ));
        output.push_str(&format!(
            "Roles mentioned: {}\n",
            join_or(&analysis.experience_info.roles_mentioned, "None detected")
        ));

        let shown = if self.detailed {
            analysis.job_matches.len()
        } else {
            self.top_roles
        };
        output.push_str(&self.format_header("Top Job Matches", 2));
        for (i, role) in report.top_roles(shown).iter().enumerate() {
            output.push_str(&self.format_role(i + 1, role));
        }

        if let Some(focus) = &report.role_focus {
            output.push_str(&self.format_header(&format!("Missing Skills for {}", focus.role), 3));
            if focus.missing_skills.is_empty() {
                output.push_str(&format!("{}\n", self.colorize("All required skills found", Color::Green)));
            } else {
                for skill in &focus.missing_skills {
                    output.push_str(&format!("  • {}\n", skill));
                }
            }
        }

        output.push_str(&self.format_header("ATS Checklist", 2));
        if analysis.ats_issues.is_empty() {
            output.push_str(&format!("{}\n", self.colorize("✓ No issues found", Color::Green)));
        }
        for issue in &analysis.ats_issues {
            output.push_str(&format!("  • {}\n", self.colorize(issue.title(), Color::Red)));
            output.push_str(&format!("    {}\n", issue.suggestion()));
        }

        output.push_str(&format!(
            "\n{} Generated by Resume Analyzer v{} | {} catalog skills\n",
            self.colorize("ℹ", Color::Blue),
            report.metadata.analyzer_version,
            report.metadata.catalog_skills
        ));

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ReportDocument) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(&report.analysis)?)
        } else {
            Ok(serde_json::to_string(&report.analysis)?)
        }
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool, top_roles: usize) -> Self {
        Self {
            include_styles,
            top_roles,
        }
    }

    fn create_template_data(&self, report: &ReportDocument) -> HtmlTemplate {
        let analysis = &report.analysis;
        let breakdown = &analysis.score.breakdown;
        let level = report.score_level();

        let roles = report
            .top_roles(self.top_roles)
            .iter()
            .map(|role| HtmlRole {
                name: role.role.clone(),
                score: format!("{:.1}", role.match_score),
                matched: join_or(&role.matched_skills, "-"),
                missing: join_or(&role.missing_skills, "-"),
            })
            .collect();

        let (has_focus, focus_role, focus_missing) = match &report.role_focus {
            Some(focus) => (
                true,
                focus.role.clone(),
                join_or(&focus.missing_skills, "All required skills found"),
            ),
            None => (false, String::new(), String::new()),
        };

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.generated_at_display(),
            profile: report.metadata.profile.clone(),
            warnings: report.metadata.warnings.clone(),
            score: format!("{:.1}", analysis.score.score),
            score_class: level.css_class().to_string(),
            score_label: level.label().to_string(),
            skills_score: format!("{:.1}", breakdown.skills_score),
            education_score: format!("{:.1}", breakdown.education_score),
            experience_score: format!("{:.1}", breakdown.experience_score),
            format_score: format!("{:.1}", breakdown.format_score),
            skills: analysis.skills.clone(),
            education: join_or(&analysis.education, "None detected"),
            years: years_display(&analysis.experience_info.years_mentioned),
            roles_mentioned: join_or(&analysis.experience_info.roles_mentioned, "None detected"),
            roles,
            has_focus,
            focus_role,
            focus_missing,
            issues: analysis
                .ats_issues
                .iter()
                .map(|issue| HtmlIssue {
                    title: issue.title().to_string(),
                    suggestion: issue.suggestion().to_string(),
                })
                .collect(),
            version: report.metadata.analyzer_version.clone(),
            resume_file: report.metadata.resume_file.clone(),
            file_type: report.metadata.file_type.clone(),
            character_count: report.metadata.character_count,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ReportDocument) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| AnalyzerError::OutputFormatting(e.to_string()))
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, top_roles: usize) -> Self {
        Self {
            include_metadata,
            top_roles,
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ReportDocument) -> Result<String> {
        let analysis = &report.analysis;
        let breakdown = &analysis.score.breakdown;
        let mut output = String::new();

        output.push_str("# Resume Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Profile:** {}\n",
                report.generated_at_display(),
                report.metadata.profile
            ));
            output.push_str(&format!(
                "**Resume:** `{}` ({})\n\n",
                report.metadata.resume_file, report.metadata.file_type
            ));
        }

        for warning in &report.metadata.warnings {
            output.push_str(&format!("> **Warning:** {}\n\n", warning));
        }

        output.push_str("## Score\n\n");
        output.push_str(&format!(
            "**Overall Score:** {:.1}/100 ({})\n\n",
            analysis.score.score,
            report.score_level().label()
        ));
        output.push_str("| Component | Score |\n");
        output.push_str("|-----------|-------|\n");
        output.push_str(&format!("| Skills | {:.1} |\n", breakdown.skills_score));
        output.push_str(&format!("| Education | {:.1} |\n", breakdown.education_score));
        output.push_str(&format!("| Experience | {:.1} |\n", breakdown.experience_score));
        output.push_str(&format!("| Format | {:.1} |\n\n", breakdown.format_score));

        output.push_str(&format!("## Skills Detected ({})\n\n", analysis.skills.len()));
        if analysis.skills.is_empty() {
            output.push_str("None detected\n\n");
        } else {
            output.push_str(&format!("`{}`\n\n", analysis.skills.join("`, `")));
        }

        output.push_str("## Education & Experience\n\n");
        output.push_str(&format!("- **Education:** {}\n", join_or(&analysis.education, "None detected")));
        output.push_str(&format!(
            "- **Years mentioned:** {}\n",
            years_display(&analysis.experience_info.years_mentioned)
        ));
        output.push_str(&format!(
            "- **Roles mentioned:** {}\n\n",
            join_or(&analysis.experience_info.roles_mentioned, "None detected")
        ));

        output.push_str("## Top Job Matches\n\n");
        output.push_str("| Role | Match | Missing Skills |\n");
        output.push_str("|------|-------|----------------|\n");
        for role in report.top_roles(self.top_roles) {
            output.push_str(&format!(
                "| {} | {:.1}% | {} |\n",
                role.role,
                role.match_score,
                join_or(&role.missing_skills, "-")
            ));
        }
        output.push('\n');

        if let Some(focus) = &report.role_focus {
            output.push_str(&format!("### Missing Skills for {}\n\n", focus.role));
            if focus.missing_skills.is_empty() {
                output.push_str("All required skills found\n\n");
            } else {
                for skill in &focus.missing_skills {
                    output.push_str(&format!("- {}\n", skill));
                }
                output.push('\n');
            }
        }

        output.push_str("## ATS Checklist\n\n");
        if analysis.ats_issues.is_empty() {
            output.push_str("No issues found\n\n");
        }
        for issue in &analysis.ats_issues {
            output.push_str(&format!("- [ ] **{}**: {}\n", issue.title(), issue.suggestion()));
        }

        if self.include_metadata {
            output.push_str("\n---\n\n");
            output.push_str(&format!(
                "*Generated by Resume Analyzer v{}*\n",
                report.metadata.analyzer_version
            ));
        }

        Ok(output)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, 3)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, top_roles: usize) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed, top_roles),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(true, top_roles),
            html_formatter: HtmlFormatter::new(true, top_roles),
            pdf_formatter: PdfFormatter::new(top_roles),
        }
    }

    pub fn generate_report(&self, report: &ReportDocument, format: OutputFormat) -> Result<Vec<u8>> {
        let text = match format {
            OutputFormat::Console => self.console_formatter.format_report(report)?,
            OutputFormat::Json => self.json_formatter.format_report(report)?,
            OutputFormat::Markdown => self.markdown_formatter.format_report(report)?,
            OutputFormat::Html => self.html_formatter.format_report(report)?,
            OutputFormat::Pdf => return self.pdf_formatter.render(report),
        };
        Ok(text.into_bytes())
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &[u8], file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    format!("{}_analysis{}.{}", base_name, timestamp_suffix, format.extension())
}

/// Title-cased skills for summary documents
pub fn display_skills(skills: &[String]) -> Vec<String> {
    skills.iter().map(|s| title_case(s)).collect()
}
