//! Memory collaborator: long-term facts, structured profile, contacts.
//!
//! The agent only ever sees the [`MemoryStore`] trait; the store object is
//! injected at construction so there is no process-wide singleton. The
//! bundled [`InMemoryStore`] keeps everything in process — persistence
//! formats belong to the host.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// What the agent may ask of the host's memory.
///
/// All methods take `&self`: implementations are shared across the
/// orchestrator's worker tasks and must be internally synchronized.
pub trait MemoryStore: Send + Sync {
    /// Long-term user facts, oldest first.
    fn relevant_facts(&self) -> Vec<String>;

    /// Record a user fact (e.g. "Likes jazz music"). Duplicates ignored.
    fn add_user_fact(&self, fact: &str);

    /// Structured profile data for form filling (name, email, ...).
    fn profile(&self) -> HashMap<String, String>;

    /// Merge `fields` into the profile, overwriting existing keys.
    fn update_profile(&self, fields: HashMap<String, String>);

    /// All saved contacts as lowercase-name → phone-number.
    fn contacts(&self) -> HashMap<String, String>;

    /// Case-insensitive contact lookup by name.
    fn contact(&self, name: &str) -> Option<String>;
}

/// A stored fact with the moment it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFact {
    /// The fact text.
    pub text: String,
    /// When the fact was recorded.
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct StoreInner {
    facts: Vec<StoredFact>,
    profile: HashMap<String, String>,
    contacts: HashMap<String, String>,
}

/// Thread-safe in-process [`MemoryStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a contact. Names are stored lowercased for case-insensitive
    /// lookup.
    pub fn add_contact(&self, name: &str, phone: &str) {
        self.inner
            .write()
            .contacts
            .insert(name.to_lowercase(), phone.to_string());
    }

    /// Facts with their timestamps, for hosts that display history.
    pub fn facts_with_timestamps(&self) -> Vec<StoredFact> {
        self.inner.read().facts.clone()
    }
}

impl MemoryStore for InMemoryStore {
    fn relevant_facts(&self) -> Vec<String> {
        self.inner
            .read()
            .facts
            .iter()
            .map(|f| f.text.clone())
            .collect()
    }

    fn add_user_fact(&self, fact: &str) {
        let mut inner = self.inner.write();
        if inner.facts.iter().any(|f| f.text == fact) {
            return;
        }
        inner.facts.push(StoredFact {
            text: fact.to_string(),
            recorded_at: Utc::now(),
        });
    }

    fn profile(&self) -> HashMap<String, String> {
        self.inner.read().profile.clone()
    }

    fn update_profile(&self, fields: HashMap<String, String>) {
        self.inner.write().profile.extend(fields);
    }

    fn contacts(&self) -> HashMap<String, String> {
        self.inner.read().contacts.clone()
    }

    fn contact(&self, name: &str) -> Option<String> {
        self.inner.read().contacts.get(&name.to_lowercase()).cloned()
    }
}
