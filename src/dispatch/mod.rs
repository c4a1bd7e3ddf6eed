//! Cross-thread-safe dispatch of decoded actions onto the host Controller.
//!
//! The Controller is single-owner: it lives on the host's owning thread and
//! is never handed to a worker task. Workers get an [`ActionSender`] — a
//! message-passing handle — and the owning thread drains the channel and
//! performs the real capability calls. Callers on the owning thread may
//! dispatch directly. Either way a failing invocation is logged and
//! skipped, never blocking the rest of its batch.

use std::collections::HashMap;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::protocol::{parse_field_map, parse_tab_indices, ActionInvocation, ActionKind};

// ---------------------------------------------------------------------------
// Controller capability
// ---------------------------------------------------------------------------

/// The host's capability surface. Implemented by the browser window, out of
/// scope here; every method may fail with an arbitrary host error.
pub trait Controller: Send {
    fn open_url(&mut self, url: &str) -> Result<()>;
    fn play_music(&mut self, query: &str) -> Result<()>;
    fn open_whatsapp(&mut self, target: &str) -> Result<()>;
    fn search(&mut self, query: &str) -> Result<()>;
    fn auto_fill(&mut self, fields: HashMap<String, String>) -> Result<()>;
    fn click_element(&mut self, text: &str) -> Result<()>;
    fn close_tabs(&mut self, indices: Vec<usize>) -> Result<()>;
    fn save_profile(&mut self, fields: HashMap<String, String>) -> Result<()>;
}

/// Apply one invocation's sub-grammar and call the matching capability.
fn execute(controller: &mut dyn Controller, invocation: &ActionInvocation) -> Result<()> {
    let param = invocation.raw_parameter.as_str();
    match invocation.kind {
        ActionKind::Open => controller.open_url(param),
        ActionKind::Music => controller.play_music(param),
        ActionKind::Whatsapp => controller.open_whatsapp(param),
        ActionKind::Search => controller.search(param),
        ActionKind::Autofill => controller.auto_fill(parse_field_map("AUTOFILL", param)?),
        ActionKind::Click => controller.click_element(param),
        ActionKind::CloseTabs => controller.close_tabs(parse_tab_indices(param)?),
        ActionKind::SaveProfile => {
            controller.save_profile(parse_field_map("SAVE_PROFILE", param)?)
        }
    }
}

// ---------------------------------------------------------------------------
// Batches and handles
// ---------------------------------------------------------------------------

/// One turn's worth of invocations, in decode order.
#[derive(Debug)]
pub struct ActionBatch {
    /// Monotonic turn identifier, used for stale-turn suppression.
    pub turn_id: u64,
    /// Invocations in decode order.
    pub invocations: Vec<ActionInvocation>,
}

/// Worker-side handle: fire-and-forget submission onto the owning thread.
///
/// Cloneable and `Send`; holding one never grants direct Controller access.
#[derive(Debug, Clone)]
pub struct ActionSender {
    tx: mpsc::UnboundedSender<ActionBatch>,
}

impl ActionSender {
    /// Queue a batch for the owning thread. Returns `false` when the shim
    /// has been dropped — side effects are lost, the text reply is not.
    pub fn submit(&self, batch: ActionBatch) -> bool {
        if batch.invocations.is_empty() {
            return true;
        }
        self.tx.send(batch).is_ok()
    }
}

// ---------------------------------------------------------------------------
// Shim
// ---------------------------------------------------------------------------

/// Owns the Controller and the single-consumer end of the action channel.
///
/// Lives on the host's owning thread for the lifetime of the session.
pub struct DispatchShim {
    controller: Box<dyn Controller>,
    rx: mpsc::UnboundedReceiver<ActionBatch>,
    /// Highest turn id already executed; older batches are suppressed.
    high_water: u64,
}

impl DispatchShim {
    /// Wrap a Controller; returns the shim and the worker-side handle.
    pub fn new(controller: Box<dyn Controller>) -> (Self, ActionSender) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                controller,
                rx,
                high_water: 0,
            },
            ActionSender { tx },
        )
    }

    /// Direct mode: execute a batch synchronously on the owning thread.
    pub fn dispatch_direct(&mut self, batch: ActionBatch) {
        self.run_batch(batch);
    }

    /// Deferred mode, async host: drain batches until every sender is gone.
    pub async fn run(&mut self) {
        while let Some(batch) = self.rx.recv().await {
            self.run_batch(batch);
        }
        debug!("action channel closed, dispatch shim stopping");
    }

    /// Deferred mode, event-loop host: drain whatever is queued right now.
    /// Intended to be called from the owning thread's own tick.
    pub fn drain_pending(&mut self) {
        while let Ok(batch) = self.rx.try_recv() {
            self.run_batch(batch);
        }
    }

    fn run_batch(&mut self, batch: ActionBatch) {
        if batch.turn_id < self.high_water {
            warn!(
                turn_id = batch.turn_id,
                high_water = self.high_water,
                dropped = batch.invocations.len(),
                "suppressing stale turn's actions"
            );
            return;
        }
        self.high_water = batch.turn_id;

        for invocation in &batch.invocations {
            info!(
                kind = invocation.kind.as_token(),
                param = %invocation.raw_parameter,
                "dispatching action"
            );
            if let Err(error) = execute(self.controller.as_mut(), invocation) {
                warn!(
                    kind = invocation.kind.as_token(),
                    %error,
                    "action failed, skipping"
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
