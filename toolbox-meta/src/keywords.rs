//! Search keyword generation.
//!
//! How keywords are derived from names and labels is a policy choice, so it
//! sits behind the [`KeywordPolicy`] trait. [`DefaultKeywordPolicy`] splits
//! text into letter runs and de-duplicates them case-insensitively.

use std::collections::BTreeMap;

/// Turns free text into a list of search keywords.
pub trait KeywordPolicy: Send + Sync {
    fn keywords(&self, inputs: &[&str]) -> Vec<String>;
}

/// Letter-run keywords, upper-cased unless they already carry capitals.
///
/// - text is split on every character that is not an ASCII letter;
/// - an all-lowercase token is upper-cased (`roads` → `ROADS`), a token that
///   already contains a capital keeps its spelling (`ArcGIS`);
/// - tokens equal ignoring case collapse into one, preferring a mixed-case
///   spelling over an all-uppercase one;
/// - output is sorted case-insensitively so documents are reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultKeywordPolicy;

impl DefaultKeywordPolicy {
    fn spell(token: &str) -> String {
        if token.chars().any(|c| c.is_ascii_uppercase()) {
            token.to_string()
        } else {
            token.to_ascii_uppercase()
        }
    }

    fn is_mixed_case(token: &str) -> bool {
        token.chars().any(|c| c.is_ascii_lowercase())
    }
}

impl KeywordPolicy for DefaultKeywordPolicy {
    fn keywords(&self, inputs: &[&str]) -> Vec<String> {
        let mut by_key: BTreeMap<String, String> = BTreeMap::new();
        for input in inputs {
            for token in input.split(|c: char| !c.is_ascii_alphabetic()) {
                if token.is_empty() {
                    continue;
                }
                let spelled = Self::spell(token);
                let key = spelled.to_ascii_uppercase();
                match by_key.get(&key) {
                    Some(existing) if Self::is_mixed_case(existing) => {}
                    _ => {
                        by_key.insert(key, spelled);
                    }
                }
            }
        }
        by_key.into_values().collect()
    }
}
