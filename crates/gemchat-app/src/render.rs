//! Plain-text rendering of sessions and messages for the terminal.

use chrono::{DateTime, Duration, Local, TimeZone};
use gemchat_common::{ChatSession, Message, Role, SessionId};
use gemchat_store::truncate_text;

const PREVIEW_LEN: usize = 40;

/// Format a millisecond timestamp relative to `now`.
///
/// Same calendar day gives `Today 03:04 PM`, the previous day gives
/// `Yesterday 03:04 PM`, anything else `Jun 10, 03:04 PM`.
pub fn format_timestamp(ms: i64, now: DateTime<Local>) -> String {
    let Some(at) = Local.timestamp_millis_opt(ms).single() else {
        return String::from("-");
    };
    let day = at.date_naive();
    let today = now.date_naive();
    if day == today {
        format!("Today {}", at.format("%I:%M %p"))
    } else if Some(day) == today.checked_sub_signed(Duration::days(1)) {
        format!("Yesterday {}", at.format("%I:%M %p"))
    } else {
        at.format("%b %-d, %I:%M %p").to_string()
    }
}

fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Gemini",
    }
}

pub fn message_line(message: &Message, now: DateTime<Local>) -> String {
    format!(
        "[{}] {}\n{}",
        speaker(message.role),
        format_timestamp(message.timestamp, now),
        message.content
    )
}

/// One line per session, most recently updated first. The active session is
/// marked with `*`.
pub fn session_list(
    sessions: &[ChatSession],
    active: Option<&SessionId>,
    now: DateTime<Local>,
) -> Vec<String> {
    let mut ordered: Vec<&ChatSession> = sessions.iter().collect();
    ordered.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    ordered
        .into_iter()
        .map(|session| {
            let marker = if active == Some(&session.id) { '*' } else { ' ' };
            let preview = session
                .last_message()
                .map(|m| truncate_text(m.content.lines().next().unwrap_or(""), PREVIEW_LEN))
                .unwrap_or_default();
            format!(
                "{marker} {}  {}  ({} messages, {})  {}",
                session.id,
                session.title,
                session.messages.len(),
                format_timestamp(session.updated_at, now),
                preview
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

pub fn transcript(session: &ChatSession, now: DateTime<Local>) -> String {
    let mut out = format!("== {} ({}) ==\n", session.title, session.id);
    if session.messages.is_empty() {
        out.push_str("(no messages yet)\n");
    }
    for message in session.messages.iter().filter(|m| m.is_displayable()) {
        out.push_str(&message_line(message, now));
        out.push_str("\n\n");
    }
    out
}
