//! Job-role fit: required-skill overlap blended with lexical similarity

use crate::processing::catalog::{JobRole, SkillCatalog};
use crate::processing::scorer::round1;
use crate::processing::scoring_profile::ScoringProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleMatch {
    pub role: String,
    pub match_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Lowercased found skills, sorted so the joined form is deterministic
fn normalized(found: &[String]) -> BTreeSet<String> {
    found.iter().map(|s| s.to_lowercase()).collect()
}

fn match_normalized(role: &JobRole, found: &BTreeSet<String>, joined: &str, profile: &ScoringProfile) -> RoleMatch {
    let (mut matched, mut missing): (Vec<String>, Vec<String>) = role
        .required
        .iter()
        .cloned()
        .partition(|skill| found.contains(&skill.to_lowercase()));
    matched.sort();
    missing.sort();

    let required = role.required.len().max(1) as f64;
    let overlap = matched.len() as f64 / required;
    let similarity = role
        .required
        .iter()
        .map(|skill| profile.similarity.ratio(&skill.to_lowercase(), joined))
        .sum::<f64>()
        / required;

    let weights = &profile.role_weights;
    let score = (overlap * weights.overlap + similarity * weights.similarity) * 100.0;

    RoleMatch {
        role: role.name.clone(),
        match_score: round1(score.clamp(0.0, 100.0)),
        matched_skills: matched,
        missing_skills: missing,
    }
}

/// Score one role against the found skills
pub fn match_role(role: &JobRole, found: &[String], profile: &ScoringProfile) -> RoleMatch {
    let found = normalized(found);
    let joined = found.iter().cloned().collect::<Vec<_>>().join(" ");
    match_normalized(role, &found, &joined, profile)
}

/// Every catalog role, best fit first. The sort is stable, so equal scores keep catalog order.
pub fn rank_roles(catalog: &SkillCatalog, found: &[String], profile: &ScoringProfile) -> Vec<RoleMatch> {
    let found = normalized(found);
    let joined = found.iter().cloned().collect::<Vec<_>>().join(" ");

    let mut matches: Vec<RoleMatch> = catalog
        .roles()
        .iter()
        .map(|role| match_normalized(role, &found, &joined, profile))
        .collect();

    matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    matches
}

/// Required skills of `role_name` that were not found, or `None` for an unknown role
pub fn missing_for_role(catalog: &SkillCatalog, role_name: &str, found: &[String]) -> Option<Vec<String>> {
    let found = normalized(found);
    catalog.role(role_name).map(|role| {
        role.required
            .iter()
            .filter(|skill| !found.contains(&skill.to_lowercase()))
            .cloned()
            .collect()
    })
}
