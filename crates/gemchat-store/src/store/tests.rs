//! Tests for session store mutations, invariants and persistence.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use gemchat_common::{Message, Role, SessionId, StoreError, StoreState, DEFAULT_TITLE};

use super::*;
use crate::kv::{KeyValueStore, MemoryKvStore};

/// Clock that advances by one millisecond per reading.
fn ticking_clock(start: i64) -> Clock {
    let counter = Arc::new(AtomicI64::new(start));
    Arc::new(move || counter.fetch_add(1, Ordering::SeqCst))
}

fn open_memory() -> (SessionStore, MemoryKvStore) {
    let kv = MemoryKvStore::new();
    let store =
        SessionStore::open(kv.clone(), DEFAULT_STATE_KEY).with_clock(ticking_clock(1_000));
    (store, kv)
}

fn stored_state(kv: &MemoryKvStore) -> StoreState {
    let raw = kv.get(DEFAULT_STATE_KEY).unwrap().expect("snapshot written");
    serde_json::from_str(&raw).unwrap()
}

struct FailingKv;

impl KeyValueStore for FailingKv {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Read {
            key: key.to_string(),
            reason: "unavailable".into(),
        })
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Write {
            key: key.to_string(),
            reason: "quota exceeded".into(),
        })
    }
}

// -- create -------------------------------------------------------------------

#[test]
fn create_session_makes_it_active_and_first() {
    let (mut store, _kv) = open_memory();
    let s1 = store.create_session();
    let s2 = store.create_session();
    let s3 = store.create_session();

    assert_eq!(store.active_id(), Some(&s3));
    let order: Vec<&SessionId> = store.sessions().iter().map(|s| &s.id).collect();
    assert_eq!(order, vec![&s3, &s2, &s1]);
}

#[test]
fn newest_created_is_always_active() {
    let (mut store, _kv) = open_memory();
    for _ in 0..10 {
        let id = store.create_session();
        assert_eq!(store.active_id(), Some(&id));
        assert_eq!(store.sessions()[0].id, id);
    }
    assert_eq!(store.sessions().len(), 10);
}

#[test]
fn created_session_has_defaults() {
    let (mut store, _kv) = open_memory();
    let id = store.create_session();
    let session = store.session(&id).unwrap();
    assert_eq!(session.title, DEFAULT_TITLE);
    assert!(session.messages.is_empty());
    assert_eq!(session.created_at, session.updated_at);
}

#[test]
fn create_session_persists_snapshot() {
    let (mut store, kv) = open_memory();
    let id = store.create_session();
    let persisted = stored_state(&kv);
    assert_eq!(persisted.active_id, Some(id));
    assert_eq!(&persisted, store.snapshot());
}

// -- switch -------------------------------------------------------------------

#[test]
fn switch_active_changes_pointer() {
    let (mut store, kv) = open_memory();
    let s1 = store.create_session();
    let _s2 = store.create_session();
    store.switch_active(&s1);
    assert_eq!(store.active_id(), Some(&s1));
    assert_eq!(store.active_session().unwrap().id, s1);
    assert_eq!(stored_state(&kv).active_id, Some(s1));
}

#[test]
fn switch_active_accepts_unknown_id() {
    let (mut store, _kv) = open_memory();
    store.create_session();
    let ghost = SessionId::from("does-not-exist");
    store.switch_active(&ghost);
    assert_eq!(store.active_id(), Some(&ghost));
    assert!(store.active_session().is_none());
}

// -- append -------------------------------------------------------------------

#[test]
fn append_without_active_session_is_noop() {
    let (mut store, kv) = open_memory();
    let before = store.snapshot().clone();
    assert!(!store.append_message(Message::user("Hi")));
    assert_eq!(store.snapshot(), &before);
    assert!(kv.is_empty());
}

#[test]
fn append_to_unresolved_active_id_is_noop() {
    let (mut store, _kv) = open_memory();
    store.create_session();
    store.switch_active(&SessionId::from("ghost"));
    let before = store.snapshot().clone();
    assert!(!store.append_message(Message::user("Hi")));
    assert_eq!(store.snapshot(), &before);
}

#[test]
fn append_extends_active_session_and_bumps_updated_at() {
    let (mut store, kv) = open_memory();
    let id = store.create_session();
    let created = store.session(&id).unwrap().updated_at;

    let first = Message::user("Hi");
    let second = Message::assistant("Hello!");
    assert!(store.append_message(first.clone()));
    assert!(store.append_message(second.clone()));

    let session = store.session(&id).unwrap();
    assert_eq!(session.messages, vec![first, second]);
    assert!(session.updated_at > created);
    assert_eq!(stored_state(&kv).sessions[0].messages.len(), 2);
}

#[test]
fn append_only_touches_active_session() {
    let (mut store, _kv) = open_memory();
    let s1 = store.create_session();
    let s2 = store.create_session();
    let s1_updated = store.session(&s1).unwrap().updated_at;

    store.append_message(Message::user("to s2"));
    assert_eq!(store.session(&s2).unwrap().messages.len(), 1);
    assert!(store.session(&s1).unwrap().messages.is_empty());
    assert_eq!(store.session(&s1).unwrap().updated_at, s1_updated);
}

// -- rename -------------------------------------------------------------------

#[test]
fn rename_replaces_title_and_bumps_only_that_session() {
    let (mut store, _kv) = open_memory();
    let s1 = store.create_session();
    let s2 = store.create_session();
    let s2_updated = store.session(&s2).unwrap().updated_at;
    let s1_updated = store.session(&s1).unwrap().updated_at;

    assert!(store.rename_session(&s1, "Rust lifetimes"));
    assert_eq!(store.session(&s1).unwrap().title, "Rust lifetimes");
    assert!(store.session(&s1).unwrap().updated_at > s1_updated);
    assert_eq!(store.session(&s2).unwrap().updated_at, s2_updated);
}

#[test]
fn rename_unknown_session_is_noop() {
    let (mut store, _kv) = open_memory();
    store.create_session();
    let before = store.snapshot().clone();
    assert!(!store.rename_session(&SessionId::from("ghost"), "x"));
    assert_eq!(store.snapshot(), &before);
}

// -- delete -------------------------------------------------------------------

#[test]
fn deleting_active_with_one_other_activates_the_other() {
    let (mut store, _kv) = open_memory();
    let s1 = store.create_session();
    let s2 = store.create_session();
    assert!(store.delete_session(&s2));
    assert_eq!(store.active_id(), Some(&s1));
}

#[test]
fn deleting_only_session_clears_active() {
    let (mut store, kv) = open_memory();
    let s1 = store.create_session();
    assert!(store.delete_session(&s1));
    assert!(store.sessions().is_empty());
    assert_eq!(store.active_id(), None);
    assert_eq!(stored_state(&kv), StoreState::default());
}

#[test]
fn deleting_active_picks_new_first_session() {
    let (mut store, _kv) = open_memory();
    let s1 = store.create_session();
    let s2 = store.create_session();
    let s3 = store.create_session();
    store.switch_active(&s2);
    store.delete_session(&s2);
    assert_eq!(store.active_id(), Some(&s3));
    assert_eq!(store.sessions().len(), 2);
    assert!(store.session(&s1).is_some());
}

#[test]
fn deleting_inactive_keeps_active() {
    let (mut store, _kv) = open_memory();
    let s1 = store.create_session();
    let s2 = store.create_session();
    store.delete_session(&s1);
    assert_eq!(store.active_id(), Some(&s2));
}

#[test]
fn delete_unknown_session_is_noop() {
    let (mut store, _kv) = open_memory();
    let s1 = store.create_session();
    assert!(!store.delete_session(&SessionId::from("ghost")));
    assert_eq!(store.active_id(), Some(&s1));
    assert_eq!(store.sessions().len(), 1);
}

// -- persistence ----------------------------------------------------------------

#[test]
fn reload_yields_identical_snapshot() {
    let kv = MemoryKvStore::new();
    let mut store = SessionStore::open(kv.clone(), DEFAULT_STATE_KEY);
    let s1 = store.create_session();
    store.append_message(Message::user("Hi"));
    store.append_message(Message::assistant("Hello!"));
    store.create_session();
    store.rename_session(&s1, "Greeting");
    let before = store.snapshot().clone();

    let reopened = SessionStore::open(kv, DEFAULT_STATE_KEY);
    assert_eq!(reopened.snapshot(), &before);
}

#[test]
fn open_with_absent_snapshot_is_empty() {
    let store = SessionStore::open(MemoryKvStore::new(), DEFAULT_STATE_KEY);
    assert_eq!(store.snapshot(), &StoreState::default());
    assert!(store.active_session().is_none());
}

#[test]
fn open_with_malformed_snapshot_falls_back_to_empty() {
    let kv = MemoryKvStore::new().with_value(DEFAULT_STATE_KEY, "{\"sessions\": [oops");
    let store = SessionStore::open(kv, DEFAULT_STATE_KEY);
    assert_eq!(store.snapshot(), &StoreState::default());
}

#[test]
fn open_with_read_failure_falls_back_to_empty() {
    let store = SessionStore::open(FailingKv, DEFAULT_STATE_KEY);
    assert_eq!(store.snapshot(), &StoreState::default());
}

#[test]
fn open_reads_browser_snapshot() {
    let raw = r#"{
        "sessions": [{
            "id": "1700000000000-k3j4h5g6f",
            "title": "Hello there",
            "messages": [
                {"id": "1700000000001-a", "role": "user", "content": "Hello there", "timestamp": 1700000000001},
                {"id": "1700000000002-b", "role": "ai", "content": "Hi!", "timestamp": 1700000000002}
            ],
            "createdAt": 1700000000000,
            "updatedAt": 1700000000002
        }],
        "activeChatId": "1700000000000-k3j4h5g6f"
    }"#;
    let kv = MemoryKvStore::new().with_value(DEFAULT_STATE_KEY, raw);
    let store = SessionStore::open(kv, DEFAULT_STATE_KEY);

    let active = store.active_session().unwrap();
    assert_eq!(active.title, "Hello there");
    assert_eq!(active.messages[1].role, Role::Assistant);
}

#[test]
fn write_failure_keeps_memory_state_and_reports_error() {
    let mut store = SessionStore::open(FailingKv, DEFAULT_STATE_KEY);
    let id = store.create_session();
    assert_eq!(store.active_id(), Some(&id));
    let err = store.last_persist_error().unwrap();
    assert!(err.contains("quota exceeded"));
    assert!(store.persist().is_err());
}

#[test]
fn successful_write_clears_last_error() {
    let (mut store, _kv) = open_memory();
    store.create_session();
    assert!(store.last_persist_error().is_none());
    assert!(store.persist().is_ok());
}

#[test]
fn custom_key_is_used_for_snapshot() {
    let kv = MemoryKvStore::new();
    let mut store = SessionStore::open(kv.clone(), "work");
    store.create_session();
    assert_eq!(store.key(), "work");
    assert!(kv.get("work").unwrap().is_some());
    assert!(kv.get(DEFAULT_STATE_KEY).unwrap().is_none());
}
