//! Vocabulary item types and the JSON shapes the model is asked to return.

use serde::{Deserialize, Serialize};

use crate::utils::text::norm;

/// One extracted vocabulary entry.
///
/// `english` is expected to be a base-form phrase; that rule lives in the
/// prompt and is not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabItem {
    pub english: String,
    pub chinese: String,
    pub example_en: String,
    pub example_zh: String,
}

impl VocabItem {
    /// Returns a copy with every field normalized.
    pub fn normalized(&self) -> VocabItem {
        VocabItem {
            english: norm(&self.english),
            chinese: norm(&self.chinese),
            example_en: norm(&self.example_en),
            example_zh: norm(&self.example_zh),
        }
    }
}

/// Reply shape shared by extraction and refinement: `{theme, items}`.
/// A missing theme defaults to empty; missing items or a missing item field
/// is a parse failure.
#[derive(Debug, Deserialize)]
pub struct VocabReply {
    #[serde(default)]
    pub theme: String,
    pub items: Vec<VocabItem>,
}

/// One problem reported by the grammar check, pointing back at a numbered
/// item and field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarIssue {
    pub item_index: usize,
    pub field: String,
    pub original: String,
    pub corrected: String,
    pub explanation: String,
}

/// Result of a grammar check. `has_issues` always mirrors `issues`.
#[derive(Debug, Clone, Serialize)]
pub struct GrammarReport {
    pub has_issues: bool,
    pub issues: Vec<GrammarIssue>,
}

impl GrammarReport {
    /// The neutral "no issues" result.
    pub fn clean() -> Self {
        Self {
            has_issues: false,
            issues: Vec::new(),
        }
    }

    pub fn from_issues(issues: Vec<GrammarIssue>) -> Self {
        Self {
            has_issues: !issues.is_empty(),
            issues,
        }
    }
}

/// Reply shape for the grammar check: `{issues}`.
#[derive(Debug, Deserialize)]
pub struct GrammarReply {
    #[serde(default)]
    pub issues: Vec<GrammarIssue>,
}

/// Reply shape for suggestions: `{items}`.
#[derive(Debug, Deserialize)]
pub struct SuggestionReply {
    #[serde(default)]
    pub items: Vec<VocabItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_cleans_every_field() {
        let item = VocabItem {
            english: " dig——into ".to_string(),
            chinese: "深入研究".to_string(),
            example_en: "Dig  into   the topic.".to_string(),
            example_zh: " 深入研究——这个话题。".to_string(),
        };
        let cleaned = item.normalized();
        assert_eq!(cleaned.english, "dig into");
        assert_eq!(cleaned.example_en, "Dig into the topic.");
        assert_eq!(cleaned.example_zh, "深入研究 这个话题。");
        // The source item is untouched.
        assert_eq!(item.english, " dig——into ");
    }

    #[test]
    fn vocab_reply_requires_items_but_not_theme() {
        let reply: VocabReply = serde_json::from_str(
            r#"{"items": [{"english": "a", "chinese": "b", "example_en": "c", "example_zh": "d"}]}"#,
        )
        .unwrap();
        assert_eq!(reply.theme, "");
        assert_eq!(reply.items.len(), 1);

        assert!(serde_json::from_str::<VocabReply>(r#"{"theme": "x"}"#).is_err());
        assert!(
            serde_json::from_str::<VocabReply>(r#"{"items": [{"english": "a"}]}"#).is_err(),
            "an item missing fields must not parse"
        );
    }

    #[test]
    fn grammar_report_mirrors_issue_presence() {
        assert!(!GrammarReport::clean().has_issues);
        assert!(!GrammarReport::from_issues(Vec::new()).has_issues);

        let report = GrammarReport::from_issues(vec![GrammarIssue {
            item_index: 1,
            field: "english".to_string(),
            original: "digged into".to_string(),
            corrected: "dig into".to_string(),
            explanation: "base form".to_string(),
        }]);
        assert!(report.has_issues);
        assert_eq!(report.issues.len(), 1);
    }
}
