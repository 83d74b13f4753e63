//! File type detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Sniff the leading bytes; only PDF and zip (DOCX) containers are recognizable
    pub fn from_magic(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"%PDF") {
            FileType::Pdf
        } else if bytes.starts_with(b"PK\x03\x04") {
            FileType::Docx
        } else {
            FileType::Unknown
        }
    }

    /// Extension first, falling back to magic bytes when the extension is missing or unknown
    pub fn detect(file_name: &str, bytes: &[u8]) -> Self {
        let by_extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown);

        match by_extension {
            FileType::Unknown => Self::from_magic(bytes),
            known => known,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileType::Pdf => "PDF",
            FileType::Docx => "DOCX",
            FileType::Text => "plain text",
            FileType::Markdown => "Markdown",
            FileType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}
