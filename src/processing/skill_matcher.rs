//! Catalog skill detection by token membership and substring search

use crate::error::{AnalyzerError, Result};
use crate::processing::catalog::SkillCatalog;
use crate::processing::text_processor::tokenize;
use aho_corasick::AhoCorasick;
use log::debug;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Detects which catalog skills a text mentions.
///
/// Synonyms that tokenize to exactly themselves (`python`, `c++`) are checked
/// against the token set, so `java` never fires on `javascript`. Everything
/// else (`power bi`, `scikit-learn`, `node.js`) is searched as a substring of
/// the lowercased text with a single Aho-Corasick pass.
pub struct SkillMatcher {
    token_synonyms: HashMap<String, Vec<usize>>,
    phrase_matcher: Option<AhoCorasick>,
    phrase_owners: Vec<usize>,
    skill_names: Vec<String>,
}

impl SkillMatcher {
    pub fn new(catalog: &SkillCatalog) -> Result<Self> {
        let mut token_synonyms: HashMap<String, Vec<usize>> = HashMap::new();
        let mut phrases: Vec<String> = Vec::new();
        let mut phrase_owners: Vec<usize> = Vec::new();

        for (skill_idx, skill) in catalog.skills().iter().enumerate() {
            for synonym in &skill.synonyms {
                let tokens = tokenize(synonym);
                if tokens.len() == 1 && tokens[0] == *synonym {
                    token_synonyms.entry(synonym.clone()).or_default().push(skill_idx);
                } else {
                    phrases.push(synonym.to_lowercase());
                    phrase_owners.push(skill_idx);
                }
            }
        }

        let phrase_matcher = if phrases.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::new(&phrases)
                    .map_err(|e| AnalyzerError::Processing(format!("Failed to build skill matcher: {}", e)))?,
            )
        };

        debug!(
            "Skill matcher built: {} token synonyms, {} phrase synonyms",
            token_synonyms.len(),
            phrases.len()
        );

        Ok(Self {
            token_synonyms,
            phrase_matcher,
            phrase_owners,
            skill_names: catalog.skills().iter().map(|s| s.name.clone()).collect(),
        })
    }

    /// Sorted, de-duplicated names of every skill found in `text`
    pub fn find_skills(&self, text: &str) -> Vec<String> {
        let mut found: HashSet<usize> = HashSet::new();

        if let Some(matcher) = &self.phrase_matcher {
            let lowered = text.to_lowercase();
            for mat in matcher.find_overlapping_iter(&lowered) {
                found.insert(self.phrase_owners[mat.pattern().as_usize()]);
            }
        }

        for token in tokenize(text) {
            if let Some(owners) = self.token_synonyms.get(&token) {
                found.extend(owners.iter().copied());
            }
        }

        found
            .into_iter()
            .map(|idx| self.skill_names[idx].clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
