//! Tokenization and formatting signals shared by the scorer and the ATS checklist

use crate::error::{AnalyzerError, Result};
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Lowercase the text, blank out everything except `[a-z0-9+#]`, split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '+' || c == '#' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Capitalize the first letter of every run of letters and lowercase the rest,
/// so "b.tech" becomes "B.Tech" and "master of science" becomes "Master Of Science".
///
/// Digits start a new run like any other non-letter, so "3d" becomes "3D".
/// This matches Python's `str.title()`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_was_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_was_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_was_letter = true;
        } else {
            out.push(c);
            previous_was_letter = false;
        }
    }

    out
}

/// Truncate to at most `max_graphemes` user-perceived characters, cutting at a word boundary
pub fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max_graphemes {
        return text.to_string();
    }

    let head = graphemes[..max_graphemes].concat();
    let cut = head.rfind(char::is_whitespace).unwrap_or(head.len());
    format!("{}...", head[..cut].trim_end())
}

/// Presence/count signals the format score and the checklist are computed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSignals {
    pub has_email: bool,
    pub has_phone: bool,
    pub missing_sections: Vec<String>,
    pub word_count: usize,
    pub bullet_count: usize,
}

impl DocumentSignals {
    pub fn has_contact(&self) -> bool {
        self.has_email && self.has_phone
    }

    pub fn has_all_sections(&self) -> bool {
        self.missing_sections.is_empty()
    }
}

pub struct TextProcessor {
    email_regex: Regex,
    phone_regex: Regex,
    bullet_regex: Regex,
    section_regexes: Vec<(String, Regex)>,
}

impl TextProcessor {
    /// Build a processor that checks for the given section headings
    pub fn new(required_sections: &[String]) -> Result<Self> {
        let email_regex = Regex::new(r"[\w.-]+@[\w.-]+\.\w{2,4}")
            .map_err(|e| AnalyzerError::Processing(format!("Invalid email regex: {}", e)))?;

        let phone_regex = Regex::new(r"\+?\d[\d\-\s]{7,}\d")
            .map_err(|e| AnalyzerError::Processing(format!("Invalid phone regex: {}", e)))?;

        let bullet_regex = Regex::new(r"(?:^|\n)\s*[-•]\s+")
            .map_err(|e| AnalyzerError::Processing(format!("Invalid bullet regex: {}", e)))?;

        let section_regexes = required_sections
            .iter()
            .map(|section| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(section));
                Regex::new(&pattern)
                    .map(|re| (section.to_lowercase(), re))
                    .map_err(|e| AnalyzerError::Profile(format!("Invalid section heading '{}': {}", section, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            email_regex,
            phone_regex,
            bullet_regex,
            section_regexes,
        })
    }

    pub fn has_email(&self, text: &str) -> bool {
        self.email_regex.is_match(text)
    }

    pub fn has_phone(&self, text: &str) -> bool {
        self.phone_regex.is_match(text)
    }

    pub fn count_bullets(&self, text: &str) -> usize {
        self.bullet_regex.find_iter(text).count()
    }

    /// Required section headings that never appear as a whole word, in profile order
    pub fn missing_sections(&self, text: &str) -> Vec<String> {
        self.section_regexes
            .iter()
            .filter(|(_, re)| !re.is_match(text))
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn signals(&self, text: &str) -> DocumentSignals {
        DocumentSignals {
            has_email: self.has_email(text),
            has_phone: self.has_phone(text),
            missing_sections: self.missing_sections(text),
            word_count: tokenize(text).len(),
            bullet_count: self.count_bullets(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<String> {
        vec!["experience".to_string(), "education".to_string(), "skills".to_string()]
    }

    #[test]
    fn test_tokenization_keeps_plus_and_hash() {
        let tokens = tokenize("Skills: C++, C#, Node.js & scikit-learn!");

        assert_eq!(tokens, vec!["skills", "c++", "c#", "node", "js", "scikit", "learn"]);
    }

    #[test]
    fn test_tokenization_of_empty_and_symbol_only_text() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ---  ***  ").is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("b.tech"), "B.Tech");
        assert_eq!(title_case("MSC"), "Msc");
        assert_eq!(title_case("master of science"), "Master Of Science");
        assert_eq!(title_case("developer"), "Developer");
    }

    #[test]
    fn test_title_case_restarts_after_digits() {
        assert_eq!(title_case("3d modeling"), "3D Modeling");
        assert_eq!(title_case("web3 dev"), "Web3 Dev");
        assert_eq!(title_case("b2b"), "B2B");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("hello wonderful world", 12), "hello...");
    }

    #[test]
    fn test_contact_detection() {
        let processor = TextProcessor::new(&sections()).unwrap();

        assert!(processor.has_email("reach me at jane.doe@example.com"));
        assert!(processor.has_phone("call +1-555-123-4567"));
        assert!(!processor.has_email("no address here"));
        assert!(!processor.has_phone("room 42"));
    }

    #[test]
    fn test_signals() {
        let processor = TextProcessor::new(&sections()).unwrap();
        let text = "Experience\n- Built things\n- Shipped things\n• Led a team\nSkills: rust";

        let signals = processor.signals(text);

        assert_eq!(signals.missing_sections, vec!["education".to_string()]);
        assert_eq!(signals.bullet_count, 3);
        assert!(!signals.has_contact());
        assert!(!signals.has_all_sections());
        assert_eq!(signals.word_count, tokenize(text).len());
    }

    #[test]
    fn test_section_match_requires_whole_word() {
        let processor = TextProcessor::new(&sections()).unwrap();

        let missing = processor.missing_sections("Experienced engineer, educational skillset");
        assert_eq!(missing.len(), 3);
    }
}
