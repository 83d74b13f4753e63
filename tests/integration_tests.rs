//! Integration tests for the resume analyzer

use resume_analyzer::config::{Config, OutputFormat};
use resume_analyzer::input::{FileType, InputManager};
use resume_analyzer::output::{save_report_to_file, ReportDocument, ReportGenerator};
use resume_analyzer::processing::{CatalogPreset, ResumeAnalyzer, ScoringProfile, SkillCatalog};
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::TempDir;

fn standard_analyzer() -> ResumeAnalyzer {
    ResumeAnalyzer::new(SkillCatalog::default(), ScoringProfile::standard()).unwrap()
}

fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{}</w:body></w:document>",
        body
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("[Content_Types].xml", zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(b"<Types/>").unwrap();
    writer
        .start_file("word/document.xml", zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

#[test]
fn test_text_extraction_from_txt() {
    let document = InputManager::new()
        .load(Path::new("tests/fixtures/sample_resume.txt"))
        .unwrap();

    assert_eq!(document.file_type, FileType::Text);
    assert!(document.text.contains("John Doe"));
    assert!(document.text.contains("Software Engineer"));
    assert!(document.text.contains("React"));
    assert!(document.text.contains("Node.js"));
    assert!(document.warnings.is_empty());
}

#[test]
fn test_text_extraction_from_markdown() {
    let document = InputManager::new()
        .load(Path::new("tests/fixtures/sample_resume.md"))
        .unwrap();

    assert_eq!(document.file_type, FileType::Markdown);
    assert!(document.text.contains("John Doe"));
    assert!(document.text.contains("React"));
    assert!(document.text.contains("Node.js"));
    assert!(!document.text.contains("**"));
    assert!(!document.text.contains("##"));
}

#[test]
fn test_unsupported_file_type_degrades_to_empty_text() {
    let document = InputManager::new()
        .load(Path::new("tests/fixtures/unsupported.xyz"))
        .unwrap();

    assert_eq!(document.file_type, FileType::Unknown);
    assert!(document.text.is_empty());
    assert!(document.warnings.iter().any(|w| w.contains("very little text")));

    let report = standard_analyzer().analyze(&document.text);
    assert_eq!(report.score.score, 0.0);
    assert_eq!(report.ats_issues.len(), 8);
}

#[test]
fn test_nonexistent_file() {
    let result = InputManager::new().load(Path::new("tests/fixtures/nonexistent.pdf"));
    assert!(result.is_err());
}

#[test]
fn test_full_pipeline_on_fixture() {
    let document = InputManager::new()
        .load(Path::new("tests/fixtures/sample_resume.txt"))
        .unwrap();
    let report = standard_analyzer().analyze(&document.text);

    for skill in ["react", "typescript", "javascript", "html", "css", "ui", "sql", "node"] {
        assert!(report.skills.contains(&skill.to_string()), "missing {}", skill);
    }
    assert_eq!(report.education, vec!["B.Sc".to_string()]);
    assert_eq!(report.experience_info.years_mentioned, vec![6]);
    assert!(report.experience_info.roles_mentioned.contains(&"Engineer".to_string()));
    assert!(report.experience_info.roles_mentioned.contains(&"Developer".to_string()));

    let top = report.top_role().unwrap();
    assert_eq!(top.role, "Frontend Developer");
    assert!(top.missing_skills.is_empty());

    let b = &report.score.breakdown;
    for value in [report.score.score, b.skills_score, b.education_score, b.experience_score, b.format_score] {
        assert!((0.0..=100.0).contains(&value));
    }
    assert_eq!(b.skills_score, 100.0);
    assert!(!report.ats_issues.iter().any(|i| i.title() == "Missing email"));
    assert!(!report.ats_issues.iter().any(|i| i.title() == "Few bullet points"));
}

#[test]
fn test_docx_resume_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.docx");
    std::fs::write(
        &path,
        build_docx(&[
            "Jane Smith",
            "Data Analyst with 3 years of experience",
            "Skills: SQL, Excel, Tableau, Power BI, Pandas",
            "Education: MBA",
        ]),
    )
    .unwrap();

    let document = InputManager::new().load(&path).unwrap();
    assert_eq!(document.file_type, FileType::Docx);
    assert!(document.text.contains("Jane Smith\n"));

    let report = standard_analyzer().analyze(&document.text);
    for skill in ["sql", "excel", "tableau", "power bi", "pandas"] {
        assert!(report.skills.contains(&skill.to_string()), "missing {}", skill);
    }
    assert_eq!(report.education, vec!["Mba".to_string()]);
    assert_eq!(report.top_role().unwrap().role, "Data Analyst");
}

fn build_pdf(pages: &[&str]) -> Vec<u8> {
    use printpdf::{BuiltinFont, Mm, PdfDocument};

    let (doc, first_page, first_layer) = PdfDocument::new("cv", Mm(210.0), Mm(297.0), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).unwrap();
    for (i, text) in pages.iter().enumerate() {
        let (page, layer) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(210.0), Mm(297.0), "Layer 1")
        };
        doc.get_page(page)
            .get_layer(layer)
            .use_text(*text, 12.0, Mm(20.0), Mm(270.0), &font);
    }
    doc.save_to_bytes().unwrap()
}

#[test]
fn test_pdf_resume_end_to_end() {
    let bytes = build_pdf(&[
        "Sam Lee - Data Scientist with 4 years of experience",
        "Skills: Python, SQL, Pandas, Machine Learning. Education: M.Sc",
    ]);

    let document = InputManager::new().extract("cv.pdf", &bytes);
    assert_eq!(document.file_type, FileType::Pdf);
    assert!(document.skipped_pages.is_empty());
    assert!(document.warnings.is_empty());
    assert!(document.text.contains("Sam Lee"));
    assert!(document.text.contains("Skills: Python, SQL"));

    let report = standard_analyzer().analyze(&document.text);
    for skill in ["python", "sql", "pandas", "machine learning"] {
        assert!(report.skills.contains(&skill.to_string()), "missing {}", skill);
    }
    assert_eq!(report.education, vec!["M.Sc".to_string()]);
    assert_eq!(report.experience_info.years_mentioned, vec![4]);
}

#[test]
fn test_docx_detected_without_extension() {
    let bytes = build_docx(&["Python developer"]);
    let document = InputManager::new().extract("upload", &bytes);

    assert_eq!(document.file_type, FileType::Docx);
    assert!(document.text.contains("Python developer"));
}

#[test]
fn test_domains_catalog_groups_synonyms() {
    let analyzer = ResumeAnalyzer::new(
        SkillCatalog::preset(CatalogPreset::Domains),
        ScoringProfile::standard(),
    )
    .unwrap();

    let report = analyzer.analyze("Built dashboards in Power BI for the sales team.");
    assert_eq!(report.skills, vec!["Data Analysis".to_string()]);
}

#[test]
fn test_profiles_weight_the_same_resume_differently() {
    let text = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();

    let scores: Vec<f64> = ScoringProfile::builtin()
        .into_iter()
        .map(|profile| {
            ResumeAnalyzer::new(SkillCatalog::default(), profile)
                .unwrap()
                .analyze(&text)
                .score
                .score
        })
        .collect();

    assert_eq!(scores.len(), 3);
    assert!(scores.iter().all(|s| (0.0..=100.0).contains(s)));
    assert_ne!(scores[0], scores[2]);
}

#[test]
fn test_custom_catalog_from_config() {
    let dir = TempDir::new().unwrap();
    let catalog_path = dir.path().join("catalog.toml");
    std::fs::write(
        &catalog_path,
        r#"
[[skills]]
name = "Rust"
synonyms = ["rust", "cargo", "tokio"]

[[skills]]
name = "Embedded"
synonyms = ["embedded", "firmware", "rtos"]

[[roles]]
name = "Firmware Engineer"
required = ["Rust", "Embedded"]
"#,
    )
    .unwrap();

    let mut config = Config::default();
    config.override_catalog(catalog_path.to_str().unwrap());
    let catalog = config.load_catalog().unwrap();
    let analyzer = ResumeAnalyzer::new(catalog, config.resolve_profile("technical").unwrap()).unwrap();

    let report = analyzer.analyze("Wrote firmware in Rust with tokio and an RTOS.");
    assert_eq!(report.skills, vec!["Embedded".to_string(), "Rust".to_string()]);
    assert_eq!(report.job_matches.len(), 1);
    assert!(report.job_matches[0].missing_skills.is_empty());
}

#[test]
fn test_json_report_shape() {
    let document = InputManager::new()
        .load(Path::new("tests/fixtures/sample_resume.txt"))
        .unwrap();
    let analyzer = standard_analyzer();
    let report = ReportDocument::new(analyzer.analyze(&document.text), &document, &analyzer);

    let bytes = ReportGenerator::new()
        .generate_report(&report, OutputFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert!(value["score"]["score"].is_number());
    assert!(value["experience_info"]["years_mentioned"].is_array());
    assert!(value["job_matches"][0]["matched_skills"].is_array());
    for issue in value["ats_issues"].as_array().unwrap() {
        assert_eq!(issue.as_array().unwrap().len(), 2);
    }
}

#[test]
fn test_every_format_renders_and_saves() {
    let dir = TempDir::new().unwrap();
    let document = InputManager::new()
        .load(Path::new("tests/fixtures/sample_resume.md"))
        .unwrap();
    let analyzer = standard_analyzer();
    let report = ReportDocument::new(analyzer.analyze(&document.text), &document, &analyzer)
        .with_role_focus("Backend Developer", &analyzer)
        .unwrap();
    let generator = ReportGenerator::with_options(false, true, true, 3);

    for format in [
        OutputFormat::Console,
        OutputFormat::Json,
        OutputFormat::Markdown,
        OutputFormat::Html,
        OutputFormat::Pdf,
    ] {
        let content = generator.generate_report(&report, format).unwrap();
        let path = dir.path().join(format!("report.{}", format.extension()));
        save_report_to_file(&content, &path).unwrap();

        assert!(!std::fs::read(&path).unwrap().is_empty());
    }

    let pdf = std::fs::read(dir.path().join("report.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}
