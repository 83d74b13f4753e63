//! Education and experience extraction with fixed regular expressions

use crate::processing::text_processor::title_case;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::num::IntErrorKind;
use std::sync::LazyLock;

static DEGREE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(b\.?tech|bachelor of technology|btech)\b",
        r"(?i)\b(m\.?tech|master of technology|mtech)\b",
        r"(?i)\b(b\.?sc|bachelor of science|bsc)\b",
        r"(?i)\b(m\.?sc|master of science|msc)\b",
        r"(?i)\b(mba|master of business administration)\b",
        r"(?i)\b(diploma)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static YEARS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*\+?\s*(years?)").unwrap());

const ROLE_TITLES: &[&str] = &[
    "engineer",
    "developer",
    "analyst",
    "manager",
    "intern",
    "consultant",
    "scientist",
];

static ROLE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    ROLE_TITLES
        .iter()
        .map(|title| (*title, Regex::new(&format!(r"(?i)\b{}\b", regex::escape(title))).unwrap()))
        .collect()
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceInfo {
    pub years_mentioned: Vec<u32>,
    pub roles_mentioned: Vec<String>,
}

impl ExperienceInfo {
    pub fn max_years(&self) -> Option<u32> {
        self.years_mentioned.iter().copied().max()
    }
}

/// The structured result of analyzing one resume's text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedProfile {
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub experience: ExperienceInfo,
}

/// First capture group of a match as a plain string
fn first_group<'t>(caps: &regex::Captures<'t>) -> Option<&'t str> {
    caps.get(1).map(|m| m.as_str())
}

/// Counts too large for `u32` saturate; non-ASCII digit runs are skipped
fn parse_years(digits: &str) -> Option<u32> {
    match digits.parse::<u32>() {
        Ok(years) => Some(years),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u32::MAX),
        Err(_) => None,
    }
}

/// Degree mentions, title-cased, sorted and de-duplicated
pub fn extract_education(text: &str) -> Vec<String> {
    let mut found = BTreeSet::new();

    for pattern in DEGREE_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            if let Some(degree) = first_group(&caps) {
                found.insert(title_case(degree));
            }
        }
    }

    found.into_iter().collect()
}

/// "N years" mentions in document order plus the generic role titles present
pub fn extract_experience(text: &str) -> ExperienceInfo {
    let years_mentioned = YEARS_PATTERN
        .captures_iter(text)
        .filter_map(|caps| first_group(&caps).and_then(parse_years))
        .collect();

    let roles_mentioned = ROLE_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(title, _)| title_case(title))
        .collect();

    ExperienceInfo {
        years_mentioned,
        roles_mentioned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_education_is_title_cased_and_sorted() {
        let education = extract_education("B.Tech in CS, later an MBA and a master of science; also btech");

        assert_eq!(education, vec!["B.Tech", "Btech", "Master Of Science", "Mba"]);
    }

    #[test]
    fn test_education_requires_word_boundaries() {
        assert!(extract_education("bsctech mbalance diplomatic").is_empty());
    }

    #[test]
    fn test_years_in_document_order() {
        let info = extract_experience("5 years at Acme, 10+ years overall, 1 year intern, 3+years lead");

        assert_eq!(info.years_mentioned, vec![5, 10, 1, 3]);
        assert_eq!(info.max_years(), Some(10));
    }

    #[test]
    fn test_oversized_numbers_saturate() {
        let info = extract_experience("99999999999 years, then 2 years");

        assert_eq!(info.years_mentioned, vec![u32::MAX, 2]);
        assert_eq!(info.max_years(), Some(u32::MAX));
    }

    #[test]
    fn test_non_ascii_digits_are_skipped() {
        let info = extract_experience("\u{0665} years");

        assert!(info.years_mentioned.is_empty());
    }

    #[test]
    fn test_roles_follow_fixed_order() {
        let info = extract_experience("Data Scientist and former software ENGINEER, briefly an intern");

        assert_eq!(info.roles_mentioned, vec!["Engineer", "Intern", "Scientist"]);
    }

    #[test]
    fn test_no_matches() {
        let info = extract_experience("");

        assert!(info.years_mentioned.is_empty());
        assert!(info.roles_mentioned.is_empty());
        assert!(extract_education("").is_empty());
    }
}
