//! Chat titles derived from the first user message.

use gemchat_common::DEFAULT_TITLE;

/// Conversational lead-ins stripped from the start of a title. Groups are
/// applied in order, each at most once.
const LEAD_INS: &[&[&str]] = &[
    &["can you", "could you", "would you", "will you"],
    &["how do i", "how can i", "how to", "how does"],
    &["what is", "what are", "what does", "what do"],
    &["explain", "tell me about", "describe", "show me"],
    &["please", "pls"],
    &["help me", "help with"],
];

pub const DEFAULT_TITLE_LEN: usize = 50;

/// Build a short session title from the first message of a conversation.
pub fn generate_chat_title(first_message: &str, max_len: usize) -> String {
    let original = first_message.trim();
    if original.is_empty() {
        return DEFAULT_TITLE.to_string();
    }

    let mut cleaned = original;
    for group in LEAD_INS {
        if let Some(rest) = strip_lead_in(cleaned, group) {
            cleaned = rest;
        }
    }
    cleaned = cleaned.trim();
    if cleaned.is_empty() {
        cleaned = original;
    }

    let title = capitalize_first(cleaned);
    if title.chars().count() <= max_len {
        return title;
    }

    let truncated: String = title.chars().take(max_len).collect();
    let last_space = truncated.chars().rev().position(|c| c == ' ').map(|from_end| {
        truncated.chars().count() - 1 - from_end
    });
    match last_space {
        Some(idx) if idx > 0 && idx + 10 > max_len => {
            let head: String = truncated.chars().take(idx).collect();
            format!("{head}...")
        }
        _ => format!("{truncated}..."),
    }
}

/// Cut `text` to `max_len` characters, marking the cut with `...`.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let head: String = text.chars().take(max_len).collect();
    format!("{head}...")
}

/// Strip the first phrase of `group` that starts `text` (ASCII case
/// insensitive) and is followed by whitespace, along with that whitespace.
fn strip_lead_in<'a>(text: &'a str, group: &[&str]) -> Option<&'a str> {
    group.iter().find_map(|phrase| {
        let head = text.get(..phrase.len())?;
        if !head.eq_ignore_ascii_case(phrase) {
            return None;
        }
        let rest = &text[phrase.len()..];
        let after = rest.trim_start();
        (after.len() < rest.len()).then_some(after)
    })
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
