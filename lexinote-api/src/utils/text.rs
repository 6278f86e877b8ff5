//! Text helpers shared by the extraction pipeline: field normalization, CJK
//! detection, code-fence stripping, and preview rendering.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::vocab::VocabItem;

/// Theme label used when the model returns a theme with no Chinese in it.
pub const DEFAULT_THEME: &str = "短语与例句";

static CJK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{4e00}-\u{9fff}]").expect("valid regex"));
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("valid regex"));

/// True when the string contains at least one CJK ideograph. Used as the
/// "is this Chinese text" heuristic for theme resolution.
pub fn has_cn(s: &str) -> bool {
    CJK.is_match(s)
}

/// Keeps a model-returned theme only if it contains Chinese, otherwise
/// substitutes [`DEFAULT_THEME`].
pub fn ensure_theme(theme: &str) -> String {
    if has_cn(theme) {
        theme.to_string()
    } else {
        DEFAULT_THEME.to_string()
    }
}

/// Normalizes one model-produced field: dash variants become spaces, runs of
/// two or more spaces collapse to one, surrounding whitespace is trimmed.
///
/// Collapsing runs (rather than replacing pairs) keeps `norm` idempotent.
pub fn norm(s: &str) -> String {
    let replaced = s.replace("——", " ").replace('—', " ").replace('–', " ");
    MULTI_SPACE.replace_all(&replaced, " ").trim().to_string()
}

/// Parses a model reply expected to carry one JSON object, tolerating
/// markdown code-fence wrapping around it.
pub fn parse_model_json<T: serde::de::DeserializeOwned>(
    text: &str,
) -> Result<T, serde_json::Error> {
    serde_json::from_str(&strip_code_fences(text))
}

/// Drops every fence line (```json, ```) when the reply starts with one.
fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }
    trimmed
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the human-readable preview shown to the user before saving:
/// a theme header, then one numbered phrase line and one example line per
/// item.
pub fn build_preview(items: &[VocabItem], theme: &str) -> String {
    let mut out = Vec::new();
    if !theme.is_empty() {
        out.push(format!("【主题】{theme}"));
        out.push(String::new());
    }
    for (i, item) in items.iter().enumerate() {
        out.push(format!("{}. {} {}", i + 1, item.english, item.chinese));
        out.push(format!("例句: {} {}", item.example_en, item.example_zh));
        out.push(String::new());
    }
    out.join("\n").trim().to_string()
}
