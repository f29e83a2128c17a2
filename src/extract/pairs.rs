//! Entity pair extraction from dependency-annotated tokens.

use super::EntityPair;
use crate::annotate::Document;

/// Dependency labels marking a token as the head of a clause-like structure
const ANCHOR_DEPS: [&str; 6] = ["ROOT", "conj", "relcl", "xcomp", "ccomp", "acomp"];

/// Labels identifying subject candidates among an anchor's left children
const SUBJECT_DEPS: [&str; 3] = ["subj", "nsubj", "nsubjpass"];

/// Labels identifying object candidates among an anchor's right children
const OBJECT_DEPS: [&str; 4] = ["dobj", "attr", "prep", "pobj"];

/// Extract (subject, object) pairs from a parsed document.
///
/// Single pass in document token order. For each anchor token, subject
/// candidates are searched among its left children and object candidates
/// among its right children; the full subject × object cross product is
/// emitted. Anchors missing either side contribute nothing, and identical
/// pairs produced by different anchors are kept as duplicates. Matching is
/// by dependency label only.
pub fn extract_entity_pairs(doc: &Document) -> Vec<EntityPair> {
    let mut pairs = Vec::new();

    for (idx, token) in doc.tokens().iter().enumerate() {
        if !ANCHOR_DEPS.contains(&token.dep.as_str()) {
            continue;
        }

        let subjects: Vec<&str> = doc
            .lefts(idx)
            .filter(|t| SUBJECT_DEPS.contains(&t.dep.as_str()))
            .map(|t| t.text.as_str())
            .collect();

        if subjects.is_empty() {
            continue;
        }

        let objects: Vec<&str> = doc
            .rights(idx)
            .filter(|t| OBJECT_DEPS.contains(&t.dep.as_str()))
            .map(|t| t.text.as_str())
            .collect();

        for subject in &subjects {
            for object in &objects {
                pairs.push(EntityPair {
                    subject: (*subject).to_string(),
                    object: (*object).to_string(),
                });
            }
        }
    }

    pairs
}
