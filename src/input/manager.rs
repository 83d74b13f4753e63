//! Input manager: read a resume from disk and route it to the right extractor

use crate::error::{AnalyzerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, ExtractedText, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{info, warn};
use std::path::Path;

pub const DEFAULT_MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub file_name: String,
    pub file_type: FileType,
    pub byte_count: usize,
    pub text: String,
    pub skipped_pages: Vec<u32>,
    pub warnings: Vec<String>,
}

impl ExtractedDocument {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

pub struct InputManager {
    min_text_chars: usize,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
        }
    }

    pub fn with_min_text_chars(mut self, min_text_chars: usize) -> Self {
        self.min_text_chars = min_text_chars;
        self
    }

    /// Reading the file is the only hard failure; extraction problems become warnings
    pub fn load(&self, path: &Path) -> Result<ExtractedDocument> {
        if !path.is_file() {
            return Err(AnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(self.extract(&file_name, &bytes))
    }

    pub fn extract(&self, file_name: &str, bytes: &[u8]) -> ExtractedDocument {
        let file_type = FileType::detect(file_name, bytes);
        info!("Extracting {} text from {} ({} bytes)", file_type, file_name, bytes.len());

        let mut warnings = Vec::new();
        let extracted = match self.extractor_for(file_type) {
            Some(extractor) => extractor.extract(bytes).unwrap_or_else(|e| {
                warn!("Could not extract text from {}: {}", file_name, e);
                warnings.push(format!("Could not extract text from {}: {}", file_name, e));
                ExtractedText::default()
            }),
            None => {
                warn!("Unsupported file type for {}", file_name);
                warnings.push(format!("Unsupported file type for {}", file_name));
                ExtractedText::default()
            }
        };

        if !extracted.skipped_pages.is_empty() {
            warnings.push(format!(
                "Skipped {} unreadable PDF page(s): {:?}",
                extracted.skipped_pages.len(),
                extracted.skipped_pages
            ));
        }

        let char_count = extracted.text.trim().chars().count();
        if char_count < self.min_text_chars {
            warn!("Extracted very little text from {} ({} characters)", file_name, char_count);
            warnings.push(format!(
                "Extracted very little text ({} characters); results may be incomplete",
                char_count
            ));
        }

        ExtractedDocument {
            file_name: file_name.to_string(),
            file_type,
            byte_count: bytes.len(),
            text: extracted.text,
            skipped_pages: extracted.skipped_pages,
            warnings,
        }
    }

    fn extractor_for(&self, file_type: FileType) -> Option<Box<dyn TextExtractor>> {
        match file_type {
            FileType::Pdf => Some(Box::new(PdfExtractor)),
            FileType::Docx => Some(Box::new(DocxExtractor)),
            FileType::Text => Some(Box::new(PlainTextExtractor)),
            FileType::Markdown => Some(Box::new(MarkdownExtractor)),
            FileType::Unknown => None,
        }
    }
}
