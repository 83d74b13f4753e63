//! Paginated A4 summary document

use crate::error::{AnalyzerError, Result};
use crate::output::formatter::display_skills;
use crate::output::report::ReportDocument;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const LEFT_MARGIN_MM: f32 = 20.0;
const TOP_MARGIN_MM: f32 = 20.0;
/// 80pt
const BOTTOM_MARGIN_MM: f32 = 28.2;
const WRAP_COLUMNS: usize = 90;

pub struct PdfFormatter {
    top_roles: usize,
}

impl PdfFormatter {
    pub fn new(top_roles: usize) -> Self {
        Self { top_roles }
    }

    pub fn render(&self, report: &ReportDocument) -> Result<Vec<u8>> {
        let analysis = &report.analysis;
        let mut writer = PageWriter::new("Resume Analysis Summary")?;

        writer.line("Resume Analysis Summary", 18.0, true);
        writer.line(
            &format!("{} | {} | {}", report.metadata.resume_file, report.metadata.profile, report.generated_at_display()),
            9.0,
            false,
        );
        writer.gap();

        writer.line(&format!("Score: {:.1}/100", analysis.score.score), 14.0, true);
        let b = &analysis.score.breakdown;
        writer.line(
            &format!(
                "Skills {:.1} | Education {:.1} | Experience {:.1} | Format {:.1}",
                b.skills_score, b.education_score, b.experience_score, b.format_score
            ),
            10.0,
            false,
        );
        writer.gap();

        let skills = display_skills(&analysis.skills);
        writer.paragraph("Skills", &join_or_none(&skills));
        writer.paragraph("Education", &join_or_none(&analysis.education));
        let years: Vec<String> = analysis
            .experience_info
            .years_mentioned
            .iter()
            .map(|y| y.to_string())
            .collect();
        writer.paragraph("Experience (years)", &join_or_none(&years));

        let top_role = analysis
            .top_role()
            .map(|m| format!("{} ({:.1}%)", m.role, m.match_score))
            .unwrap_or_else(|| "None".to_string());
        writer.paragraph("Top Role", &top_role);

        writer.line("Top Roles", 12.0, true);
        for role in report.top_roles(self.top_roles) {
            writer.wrapped(&format!("- {}: {:.1}%", role.role, role.match_score), 10.0);
            if !role.missing_skills.is_empty() {
                writer.wrapped(&format!("    Missing: {}", role.missing_skills.join(", ")), 9.0);
            }
        }
        writer.gap();

        if let Some(focus) = &report.role_focus {
            writer.paragraph(&format!("Missing for {}", focus.role), &join_or_none(&focus.missing_skills));
        }

        writer.line("ATS Checklist", 12.0, true);
        if analysis.ats_issues.is_empty() {
            writer.line("No issues found", 10.0, false);
        }
        for issue in &analysis.ats_issues {
            writer.wrapped(&format!("- {}: {}", issue.title(), issue.suggestion()), 10.0);
        }

        writer.finish()
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

/// Greedy word wrap; a single overlong word gets a line of its own
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > columns {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Writes lines top-down and starts a new page below the bottom margin
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AnalyzerError::OutputFormatting(format!("Failed to load PDF font: {}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AnalyzerError::OutputFormatting(format!("Failed to load PDF font: {}", e)))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT_MM - TOP_MARGIN_MM,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - TOP_MARGIN_MM;
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        if self.y < BOTTOM_MARGIN_MM {
            self.new_page();
        }
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(LEFT_MARGIN_MM), Mm(self.y), font);
        // roughly 1.4 leading, pt to mm
        self.y -= size * 0.5;
    }

    fn wrapped(&mut self, text: &str, size: f32) {
        for line in wrap(text, WRAP_COLUMNS) {
            self.line(&line, size, false);
        }
    }

    fn paragraph(&mut self, heading: &str, body: &str) {
        self.line(heading, 12.0, true);
        self.wrapped(body, 10.0);
        self.gap();
    }

    fn gap(&mut self) {
        self.y -= 3.0;
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| AnalyzerError::OutputFormatting(format!("Failed to write PDF: {}", e)))
    }
}
