//! # Solace Core
//!
//! The conversational core of an empathetic browser assistant: it reads the
//! emotional state of each user message, picks a response persona, assembles
//! a grounded prompt, calls a hosted language model, and decodes the reply's
//! `[[KIND: PARAMETER]]` directives into browser actions.
//!
//! The embedding host supplies three collaborators: a [`MemoryStore`] for
//! long-term facts, profile, and contacts; a [`ModelClient`] (the bundled
//! [`OpenAiCompatClient`] covers OpenAI-compatible endpoints); and a
//! [`Controller`] implementing the browser capabilities, wrapped in a
//! [`DispatchShim`] so workers never touch it directly.
//!
//! ```no_run
//! use std::sync::Arc;
//! use solace_core::{Agent, AgentConfig, DispatchShim, InMemoryStore, OpenAiCompatClient};
//! # struct MyBrowser;
//! # impl solace_core::Controller for MyBrowser {
//! #     fn open_url(&mut self, _: &str) -> anyhow::Result<()> { Ok(()) }
//! #     fn play_music(&mut self, _: &str) -> anyhow::Result<()> { Ok(()) }
//! #     fn open_whatsapp(&mut self, _: &str) -> anyhow::Result<()> { Ok(()) }
//! #     fn search(&mut self, _: &str) -> anyhow::Result<()> { Ok(()) }
//! #     fn auto_fill(&mut self, _: std::collections::HashMap<String, String>) -> anyhow::Result<()> { Ok(()) }
//! #     fn click_element(&mut self, _: &str) -> anyhow::Result<()> { Ok(()) }
//! #     fn close_tabs(&mut self, _: Vec<usize>) -> anyhow::Result<()> { Ok(()) }
//! #     fn save_profile(&mut self, _: std::collections::HashMap<String, String>) -> anyhow::Result<()> { Ok(()) }
//! # }
//!
//! # async fn run() {
//! let config = AgentConfig::default();
//! let model = Arc::new(OpenAiCompatClient::new(&config));
//! let (mut shim, actions) = DispatchShim::new(Box::new(MyBrowser));
//! let agent = Agent::new(config, Arc::new(InMemoryStore::new()), model, actions);
//!
//! let reply = agent.chat("open github for me", None).await;
//! shim.drain_pending();
//! println!("{reply}");
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod emotion;
pub mod error;
pub mod llm;
pub mod memory;
pub mod persona;
pub mod protocol;

pub use agent::{Agent, Relationship, TurnPhase};
pub use config::AgentConfig;
pub use context::{CleanupProposal, ConversationContext};
pub use dispatch::{ActionBatch, ActionSender, Controller, DispatchShim};
pub use emotion::{classify, classify_with, EmotionResult, Mood, SentimentAnalyzer, SignalSource};
pub use error::AgentError;
pub use llm::{ModelClient, ModelError, OpenAiCompatClient};
pub use memory::{InMemoryStore, MemoryStore, StoredFact};
pub use persona::{assemble_prompt, select_persona, Persona, PromptBundle};
pub use protocol::{decode, ActionInvocation, ActionKind, DirectiveError};
