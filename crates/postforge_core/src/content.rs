//! Canonical result shapes and the normalizer that produces them.
//!
//! The remote service emits optional fields under either snake_case or
//! camelCase spellings, and omits whole sections freely. Every logical
//! field resolves through an explicit ordered candidate list,
//! first-present-wins; nothing in here panics on a missing field.

use serde_json::{Map, Value};

/// Placeholder for an absent single string field.
pub const NOT_AVAILABLE: &str = "N/A";

/// The canonical, naming-convention-independent generation result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratedContent {
    pub id: Option<String>,
    pub plan: Option<ContentPlan>,
    pub outputs: Vec<PlatformSection>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPlan {
    pub hook: String,
    pub narrative_frame: String,
    pub key_points: Vec<String>,
    pub example: String,
    pub call_to_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSection {
    pub platform: String,
    pub output: PlatformOutput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformOutput {
    /// Twitter-style thread with tweets in source order.
    Thread {
        structure: String,
        tweets: Vec<Tweet>,
    },
    /// Any other platform, rendered losslessly as pretty-printed JSON.
    Opaque(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    pub order: i64,
    pub content: String,
    pub character_count: i64,
}

/// One page of past results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryPage {
    pub items: Vec<HistoryItem>,
    pub total_items: u64,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub id: String,
    pub topic: String,
    pub platforms: Vec<String>,
    pub generated_at: String,
    pub summary: String,
}

/// Normalize a generation or get-by-id payload.
///
/// Both payloads carry `id` at the top level and nest the body under
/// `content`; a missing body yields an empty canonical result.
pub fn normalize(raw: &Value) -> GeneratedContent {
    let Some(obj) = raw.as_object() else {
        return GeneratedContent::default();
    };
    let id = pick_str(obj, &["id"]);
    let Some(body) = obj.get("content").and_then(Value::as_object) else {
        return GeneratedContent {
            id,
            ..GeneratedContent::default()
        };
    };

    GeneratedContent {
        id,
        plan: body.get("plan").and_then(Value::as_object).map(normalize_plan),
        outputs: body
            .get("outputs")
            .and_then(Value::as_object)
            .map(normalize_outputs)
            .unwrap_or_default(),
        notes: pick_str(body, &["notes"]),
    }
}

fn normalize_plan(plan: &Map<String, Value>) -> ContentPlan {
    ContentPlan {
        hook: pick_str_or_na(plan, &["hook"]),
        narrative_frame: pick_str_or_na(plan, &["narrative_frame", "narrativeFrame"]),
        key_points: pick_string_list(plan, &["key_points", "keyPoints"]),
        example: pick_str_or_na(plan, &["example"]),
        call_to_action: pick_str_or_na(plan, &["cta", "call_to_action", "callToAction"]),
    }
}

/// Null entries are platforms the user did not request; they are dropped
/// rather than rendered as empty sections.
fn normalize_outputs(outputs: &Map<String, Value>) -> Vec<PlatformSection> {
    outputs
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(platform, value)| PlatformSection {
            platform: platform.clone(),
            output: normalize_output(platform, value),
        })
        .collect()
}

fn normalize_output(platform: &str, value: &Value) -> PlatformOutput {
    if platform == "twitter" {
        if let Some(obj) = value.as_object() {
            if let Some(tweets) = pick(obj, &["tweets"]).and_then(Value::as_array) {
                return PlatformOutput::Thread {
                    structure: pick_str(obj, &["thread_structure", "threadStructure"])
                        .unwrap_or_else(|| "Unknown".to_string()),
                    tweets: tweets
                        .iter()
                        .filter_map(Value::as_object)
                        .map(normalize_tweet)
                        .collect(),
                };
            }
        }
    }
    PlatformOutput::Opaque(
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
    )
}

fn normalize_tweet(tweet: &Map<String, Value>) -> Tweet {
    Tweet {
        order: pick_i64(tweet, &["order"]),
        content: pick_str(tweet, &["content"]).unwrap_or_default(),
        character_count: pick_i64(tweet, &["character_count", "characterCount"]),
    }
}

/// Normalize a history page payload
/// (`{items: [...], pagination: {total, limit, has_more}}`).
pub fn normalize_history_page(raw: &Value) -> HistoryPage {
    let Some(obj) = raw.as_object() else {
        return HistoryPage::default();
    };
    let items: Vec<HistoryItem> = obj
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(normalize_history_item)
                .collect()
        })
        .unwrap_or_default();
    let pagination = obj.get("pagination").and_then(Value::as_object);
    HistoryPage {
        total_items: pagination
            .and_then(|p| pick(p, &["total"]))
            .and_then(Value::as_u64)
            .unwrap_or(items.len() as u64),
        has_more: pagination
            .and_then(|p| pick(p, &["has_more", "hasMore"]))
            .and_then(Value::as_bool)
            .unwrap_or(false),
        items,
    }
}

fn normalize_history_item(item: &Map<String, Value>) -> HistoryItem {
    HistoryItem {
        id: pick_str(item, &["id"]).unwrap_or_default(),
        topic: pick_str_or_na(item, &["topic"]),
        platforms: pick_string_list(item, &["platforms"]),
        generated_at: pick_str(item, &["generated_at", "generatedAt"]).unwrap_or_default(),
        summary: pick_str(item, &["summary"]).unwrap_or_default(),
    }
}

/// First present, non-null candidate wins.
fn pick<'a>(obj: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a Value> {
    candidates.iter().find_map(|key| match obj.get(*key) {
        Some(Value::Null) | None => None,
        Some(value) => Some(value),
    })
}

fn pick_str(obj: &Map<String, Value>, candidates: &[&str]) -> Option<String> {
    pick(obj, candidates)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn pick_str_or_na(obj: &Map<String, Value>, candidates: &[&str]) -> String {
    pick_str(obj, candidates).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn pick_i64(obj: &Map<String, Value>, candidates: &[&str]) -> i64 {
    pick(obj, candidates)
        .and_then(Value::as_i64)
        .unwrap_or_default()
}

fn pick_string_list(obj: &Map<String, Value>, candidates: &[&str]) -> Vec<String> {
    pick(obj, candidates)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
