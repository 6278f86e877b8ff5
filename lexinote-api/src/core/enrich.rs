//! Best-effort enrichment passes: grammar review and themed suggestions.
//!
//! Unlike extraction and refinement these never fail. Transport or parse
//! trouble is logged and degrades to the neutral result, and an empty item
//! list returns immediately without a remote call.

use std::sync::Arc;

use lexinote_claude::CompletionProvider;
use tracing::{info, warn};

use crate::core::pipeline::numbered_listing;
use crate::models::vocab::{GrammarReply, GrammarReport, SuggestionReply, VocabItem};
use crate::utils::text::parse_model_json;

const SUGGESTION_COUNT: usize = 5;

/// Reviews item fields for English grammar problems.
pub struct GrammarChecker {
    provider: Arc<dyn CompletionProvider>,
    max_tokens: u32,
}

impl GrammarChecker {
    pub fn new(provider: Arc<dyn CompletionProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    pub async fn check(&self, items: &[VocabItem]) -> GrammarReport {
        if items.is_empty() {
            return GrammarReport::clean();
        }

        let prompt = grammar_prompt(items);
        let reply = match self.provider.complete(&prompt, self.max_tokens).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(%err, "grammar check failed upstream, reporting no issues");
                return GrammarReport::clean();
            }
        };

        match parse_model_json::<GrammarReply>(&reply) {
            Ok(parsed) => {
                let report = GrammarReport::from_issues(parsed.issues);
                info!(issues = report.issues.len(), "grammar check finished");
                report
            }
            Err(err) => {
                warn!(%err, "grammar reply unparseable, reporting no issues");
                GrammarReport::clean()
            }
        }
    }
}

/// Proposes additional items on the current theme.
pub struct SuggestionGenerator {
    provider: Arc<dyn CompletionProvider>,
    max_tokens: u32,
}

impl SuggestionGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    /// Returns candidate additions, not yet accepted by the user. The
    /// no-duplicates and base-form rules live in the prompt only.
    pub async fn suggest(&self, items: &[VocabItem], theme: &str) -> Vec<VocabItem> {
        if items.is_empty() {
            return Vec::new();
        }

        let prompt = suggestion_prompt(items, theme);
        let reply = match self.provider.complete(&prompt, self.max_tokens).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(%err, "suggestion request failed upstream, returning none");
                return Vec::new();
            }
        };

        match parse_model_json::<SuggestionReply>(&reply) {
            Ok(parsed) => {
                let suggestions: Vec<VocabItem> =
                    parsed.items.iter().map(VocabItem::normalized).collect();
                info!(count = suggestions.len(), "suggestions generated");
                suggestions
            }
            Err(err) => {
                warn!(%err, "suggestion reply unparseable, returning none");
                Vec::new()
            }
        }
    }
}

fn grammar_prompt(items: &[VocabItem]) -> String {
    let numbered = numbered_listing(items);
    let full = serde_json::to_string(items).unwrap_or_default();
    format!(
        r#"检查下面每个词条的英文语法：english、example_en，以及中英例句是否对应。
只返回 JSON，不要任何解释。

词条（带编号）：
{numbered}

完整数据：
{full}

格式：
{{
  "issues": [
    {{
      "item_index": 1,
      "field": "english",
      "original": "",
      "corrected": "",
      "explanation": ""
    }}
  ]
}}

item_index 对应上面的编号。没有问题就返回 {{"issues": []}}。
"#
    )
}

fn suggestion_prompt(items: &[VocabItem], theme: &str) -> String {
    let numbered = numbered_listing(items);
    format!(
        r#"基于主题「{theme}」再推荐 {SUGGESTION_COUNT} 个相关短语。
不要与已有短语重复。
english 用动词原形；被动结构要完整（如 be covered in）。
只返回 JSON，不要任何解释。

已有短语：
{numbered}

格式：
{{
  "items": [
    {{
      "english": "",
      "chinese": "",
      "example_en": "",
      "example_zh": ""
    }}
  ]
}}
"#
    )
}
