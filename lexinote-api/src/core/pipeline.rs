//! Prompt construction and reply parsing for extraction and refinement.
//!
//! Both operations share one reply contract: a single JSON object with
//! `theme` and `items`, optionally wrapped in a markdown code fence, every
//! string field normalized before use. Both fail hard on an unparseable
//! reply; there is no retry.

use std::sync::Arc;

use lexinote_claude::{ClaudeError, CompletionProvider};
use tracing::info;

use crate::models::vocab::{VocabItem, VocabReply};
use crate::utils::text::{build_preview, ensure_theme, parse_model_json};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("completion request failed: {0}")]
    Upstream(#[from] ClaudeError),

    #[error("model reply is not the expected JSON shape: {0}")]
    Reply(#[from] serde_json::Error),
}

/// Result of one extraction or refinement pass.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub theme: String,
    pub preview: String,
    pub items: Vec<VocabItem>,
}

/// Turns free-form study notes into structured vocabulary items.
pub struct Extractor {
    provider: Arc<dyn CompletionProvider>,
    max_tokens: u32,
}

impl Extractor {
    pub fn new(provider: Arc<dyn CompletionProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    pub async fn extract(&self, notes: &str) -> Result<Extraction, PipelineError> {
        let prompt = extraction_prompt(notes);
        let reply = self.provider.complete(&prompt, self.max_tokens).await?;
        let extraction = finish(&reply)?;
        info!(
            items = extraction.items.len(),
            theme = %extraction.theme,
            "notes extracted"
        );
        Ok(extraction)
    }
}

/// Revises a previously extracted item list from user feedback.
pub struct Refiner {
    provider: Arc<dyn CompletionProvider>,
    max_tokens: u32,
}

impl Refiner {
    pub fn new(provider: Arc<dyn CompletionProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    /// Numbering in the prompt is 1-based over `items` as passed in, which
    /// is what feedback like "remove 2" refers to. The model is told to
    /// delete or edit by number and never to add; both rules are advisory
    /// and not enforced here, so the result is a fresh list of whatever the
    /// model returned.
    pub async fn refine(
        &self,
        items: &[VocabItem],
        feedback: &str,
    ) -> Result<Extraction, PipelineError> {
        let prompt = refinement_prompt(items, feedback)?;
        let reply = self.provider.complete(&prompt, self.max_tokens).await?;
        let refined = finish(&reply)?;
        info!(
            before = items.len(),
            after = refined.items.len(),
            "items refined"
        );
        Ok(refined)
    }
}

/// Shared tail of both operations: parse, normalize, resolve the theme,
/// render the preview.
fn finish(reply: &str) -> Result<Extraction, PipelineError> {
    let parsed: VocabReply = parse_model_json(reply)?;
    let items: Vec<VocabItem> = parsed.items.iter().map(VocabItem::normalized).collect();
    let theme = ensure_theme(&parsed.theme);
    let preview = build_preview(&items, &theme);
    Ok(Extraction {
        theme,
        preview,
        items,
    })
}

fn extraction_prompt(notes: &str) -> String {
    format!(
        r#"只返回 JSON，不要任何解释。

english 必须是原形短语，不要变形。

格式：
{{
  "theme": "中文主题",
  "items": [
    {{
      "english": "",
      "chinese": "",
      "example_en": "",
      "example_zh": ""
    }}
  ]
}}

内容：
{notes}
"#
    )
}

fn refinement_prompt(items: &[VocabItem], feedback: &str) -> Result<String, PipelineError> {
    let numbered = numbered_listing(items);
    // ensure_ascii is off by default in serde_json, so Chinese survives as-is.
    let full = serde_json::to_string(items)?;
    Ok(format!(
        r#"你在【已有 items 基础上】修改。
可以删除编号（如：删除 2,3），也可以改表达。
不要新增。

当前 items（带编号）：
{numbered}

完整数据：
{full}

用户反馈：
{feedback}

注意：如果用户说"删除 2"或"remove 2"或"remove item 2"，就删除上面编号为 2 的那一项。

只返回 JSON：

{{
  "theme": "中文主题",
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
    ))
}

/// 1-based `<n>. <english> <chinese>` listing used in prompts.
pub(crate) fn numbered_listing(items: &[VocabItem]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {} {}", i + 1, item.english, item.chinese))
        .collect::<Vec<_>>()
        .join("\n")
}
