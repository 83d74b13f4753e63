//! Text extraction from in-memory documents

use crate::error::{AnalyzerError, Result};
use anyhow::Context;
use log::{debug, warn};
use pulldown_cmark::{html, Parser};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::io::{Cursor, Read};
use std::sync::LazyLock;

static HTML_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Extracted text plus the pages that had to be skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub skipped_pages: Vec<u32>,
}

impl From<String> for ExtractedText {
    fn from(text: String) -> Self {
        Self {
            text,
            skipped_pages: Vec::new(),
        }
    }
}

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText>;
}

/// Page-by-page extraction with lopdf, whole-document pdf-extract as fallback
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText> {
        match self.extract_by_page(bytes) {
            Ok(extracted) if !extracted.text.trim().is_empty() => Ok(extracted),
            Ok(extracted) => {
                debug!("Page-level extraction produced no text, retrying with pdf-extract");
                match self.extract_whole(bytes) {
                    Ok(text) => Ok(ExtractedText {
                        text,
                        skipped_pages: extracted.skipped_pages,
                    }),
                    Err(e) => {
                        debug!("pdf-extract fallback failed: {}", e);
                        Ok(extracted)
                    }
                }
            }
            Err(e) => {
                warn!("{}; retrying with pdf-extract", e);
                self.extract_whole(bytes).map(ExtractedText::from)
            }
        }
    }
}

impl PdfExtractor {
    /// A page that fails to decode is logged and skipped; the rest still count
    pub fn extract_by_page(&self, bytes: &[u8]) -> Result<ExtractedText> {
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| AnalyzerError::PdfExtraction(format!("Failed to load PDF: {}", e)))?;

        let mut extracted = ExtractedText::default();
        for page_num in doc.get_pages().keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(page_text) => {
                    if !page_text.is_empty() {
                        extracted.text.push_str(&page_text);
                        extracted.text.push('\n');
                    }
                }
                Err(e) => {
                    warn!("Skipping PDF page {}: {}", page_num, e);
                    extracted.skipped_pages.push(*page_num);
                }
            }
        }

        Ok(extracted)
    }

    pub fn extract_whole(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed font tables
        std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|_| AnalyzerError::PdfExtraction("pdf-extract panicked".to_string()))?
            .map_err(|e| AnalyzerError::PdfExtraction(format!("Failed to extract text from PDF: {}", e)))
    }
}

/// Reads `word/document.xml` out of the zip container
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText> {
        let text = Self::document_xml(bytes)
            .and_then(|xml| Self::xml_to_text(&xml))
            .map_err(|e| AnalyzerError::DocxExtraction(format!("{:#}", e)))?;
        Ok(text.into())
    }
}

impl DocxExtractor {
    fn document_xml(bytes: &[u8]) -> anyhow::Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .context("Failed to read DOCX container")?;

        let mut entry = archive
            .by_name("word/document.xml")
            .context("DOCX has no word/document.xml")?;

        let mut xml = String::new();
        entry
            .read_to_string(&mut xml)
            .context("Failed to read word/document.xml")?;
        Ok(xml)
    }

    /// Concatenate `w:t` runs; paragraph ends and breaks become newlines, `w:tab` a tab
    fn xml_to_text(xml: &str) -> anyhow::Result<String> {
        let mut reader = Reader::from_str(xml);
        let mut text = String::new();
        let mut in_text_run = false;

        loop {
            match reader.read_event().context("Malformed word/document.xml")? {
                Event::Start(e) => {
                    if e.local_name().as_ref() == b"t" {
                        in_text_run = true;
                    }
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"t" => in_text_run = false,
                    b"p" => text.push('\n'),
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"br" | b"cr" | b"p" => text.push('\n'),
                    b"tab" => text.push('\t'),
                    _ => {}
                },
                Event::Text(t) if in_text_run => {
                    text.push_str(&t.unescape().context("Invalid text run")?);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(text)
    }
}

/// UTF-8 with invalid byte sequences dropped
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText> {
        Ok(decode_utf8_ignoring_invalid(bytes).into())
    }
}

pub fn decode_utf8_ignoring_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText> {
        let markdown_content = decode_utf8_ignoring_invalid(bytes);

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output).into())
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n");

        let clean_text = HTML_TAG_REGEX.replace_all(&text, "");
        let clean_text = clean_text
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        let lines: Vec<&str> = clean_text
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printpdf::{BuiltinFont, Mm, PdfDocument};
    use std::io::Write;

    const PAGE_ONE: &str = "Jane Doe, Python developer with 5 years of experience";
    const PAGE_TWO: &str = "Skills: SQL, Pandas, Docker and Kubernetes";

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn build_pdf(pages: &[&str]) -> Vec<u8> {
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

    /// Replace one page's content with a stream that lopdf parses but cannot extract
    fn break_page(bytes: &[u8], page_number: u32) -> Vec<u8> {
        let mut doc = lopdf::Document::load_mem(bytes).unwrap();
        let page_id = doc.get_pages()[&page_number];
        let broken = doc.add_object(lopdf::Stream::new(
            lopdf::Dictionary::new(),
            b"BT 12 Tf (unreadable) Tj ET".to_vec(),
        ));
        doc.get_object_mut(page_id)
            .and_then(lopdf::Object::as_dict_mut)
            .unwrap()
            .set("Contents", broken);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_pdf_pages_are_extracted_in_order() {
        let extracted = PdfExtractor.extract(&build_pdf(&[PAGE_ONE, PAGE_TWO])).unwrap();

        assert!(extracted.text.contains(PAGE_ONE));
        assert!(extracted.text.contains(PAGE_TWO));
        assert!(extracted.text.find(PAGE_ONE) < extracted.text.find(PAGE_TWO));
        assert!(extracted.skipped_pages.is_empty());
    }

    #[test]
    fn test_unreadable_pdf_page_is_skipped() {
        let bytes = break_page(&build_pdf(&[PAGE_ONE, PAGE_TWO]), 2);

        let extracted = PdfExtractor.extract_by_page(&bytes).unwrap();
        assert!(extracted.text.contains(PAGE_ONE));
        assert!(!extracted.text.contains("unreadable"));
        assert_eq!(extracted.skipped_pages, vec![2]);

        let extracted = PdfExtractor.extract(&bytes).unwrap();
        assert!(extracted.text.contains(PAGE_ONE));
        assert_eq!(extracted.skipped_pages, vec![2]);
    }

    #[test]
    fn test_plain_text_drops_invalid_bytes() {
        let bytes = b"Python \xff\xfedeveloper \xe2\x80\xa2 SQL";
        let extracted = PlainTextExtractor.extract(bytes).unwrap();

        assert_eq!(extracted.text, "Python developer • SQL");
    }

    #[test]
    fn test_docx_extraction() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Skills: </w:t></w:r><w:r><w:t>Python &amp; SQL</w:t></w:r></w:p>
    <w:p><w:r><w:t>B.Tech</w:t><w:tab/><w:t>2019</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

        let extracted = DocxExtractor.extract(&build_docx(xml)).unwrap();

        assert!(extracted.text.contains("Jane Doe\n"));
        assert!(extracted.text.contains("Skills: Python & SQL\n"));
        assert!(extracted.text.contains("B.Tech\t2019"));
    }

    #[test]
    fn test_docx_without_document_part_fails() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("other.txt", zip::write::FileOptions::default()).unwrap();
        writer.write_all(b"nothing").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        match DocxExtractor.extract(&bytes) {
            Err(AnalyzerError::DocxExtraction(message)) => {
                assert!(message.contains("word/document.xml"), "{}", message);
            }
            other => panic!("expected a DOCX extraction error, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_pdf_is_an_error() {
        assert!(PdfExtractor.extract(b"%PDF-1.4 this is not really a pdf").is_err());
    }

    #[test]
    fn test_markdown_extraction() {
        let markdown = b"# Jane Doe\n\n**Skills**: Rust & Python\n\n- Built APIs\n- Led team\n";
        let extracted = MarkdownExtractor.extract(markdown).unwrap();

        assert!(extracted.text.contains("Jane Doe"));
        assert!(extracted.text.contains("Skills: Rust & Python"));
        assert!(extracted.text.contains("Built APIs"));
        assert!(!extracted.text.contains("**"));
        assert!(!extracted.text.contains('<'));
    }
}
