//! Per-turn context snapshot supplied by the browser host.
//!
//! The host fills one of these for every conversational turn with whatever
//! it knows about the current page and any pending tab-cleanup proposal.
//! The core treats it as read-only input.

use serde::{Deserialize, Serialize};

/// A pending tab-cleanup proposal produced by the host's tab monitor.
///
/// The host detects a cluster of tabs about one topic and parks a proposal
/// here; the agent acts on it only when the user confirms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupProposal {
    /// Topic the clustered tabs share (e.g. "rust tutorials").
    pub topic: String,
    /// Host tab indices belonging to the cluster, most relevant first.
    pub indices: Vec<usize>,
    /// Tab titles in the same order as `indices`.
    pub titles: Vec<String>,
}

/// Snapshot of the browsing context for a single turn.
///
/// All fields are optional: the agent works with whatever the host can
/// provide, including nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// URL of the active page.
    pub url: Option<String>,
    /// Title of the active page.
    pub title: Option<String>,
    /// Extracted text of the active page. Length-capped at prompt assembly.
    pub page_text: Option<String>,
    /// Pending tab-cleanup proposal, if the host has one.
    pub cleanup_proposal: Option<CleanupProposal>,
}

impl ConversationContext {
    /// Context carrying only a URL, the common case for persona routing.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }
}
