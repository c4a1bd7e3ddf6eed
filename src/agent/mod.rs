//! Per-turn orchestrator.
//!
//! Composes classifier, persona selection, prompt assembly, the model
//! client, the directive codec, and the dispatch shim into one pipeline:
//! Idle → Classifying → PersonaSelecting → PromptAssembling →
//! AwaitingModel → Decoding → Dispatching → Idle. The model call is the
//! only suspension point. Two fast paths answer unambiguous intents
//! locally, with no model latency or cost.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::AgentConfig;
use crate::context::ConversationContext;
use crate::dispatch::{ActionBatch, ActionSender};
use crate::emotion::{classify_with, EmotionResult, LexiconSentiment, SentimentAnalyzer};
use crate::error::AgentError;
use crate::llm::ModelClient;
use crate::memory::MemoryStore;
use crate::persona::{assemble_prompt, select_persona};
use crate::protocol::{decode, resolve_whatsapp_target, ActionInvocation, ActionKind};

/// Utterances accepted as confirmation of a pending cleanup proposal.
const CONFIRM_WORDS: &[&str] = &[
    "yes", "sure", "do it", "ok", "clean", "close", "yep", "allow",
];

/// How many of a cleanup cluster's tabs survive a confirmed cleanup.
const CLEANUP_KEEP_COUNT: usize = 2;

/// Generation budget for message rewrites.
const REWRITE_TEMPERATURE: f32 = 0.3;
const REWRITE_MAX_TOKENS: u32 = 200;

/// Generation budget for emotional-support responses.
const SUPPORT_TEMPERATURE: f32 = 0.3;
const SUPPORT_MAX_TOKENS: u32 = 600;

// ---------------------------------------------------------------------------
// Turn phases
// ---------------------------------------------------------------------------

/// Where a turn currently is. Exposed so hosts can show progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    Classifying,
    PersonaSelecting,
    PromptAssembling,
    AwaitingModel,
    Decoding,
    Dispatching,
}

// ---------------------------------------------------------------------------
// Relationship tones (message rewriting)
// ---------------------------------------------------------------------------

/// Who the rewritten message is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Relationship {
    #[default]
    Friend,
    Boss,
    Teacher,
    Partner,
    Family,
}

impl Relationship {
    fn tone_instruction(&self) -> &'static str {
        match self {
            Relationship::Friend => "Casual, chill, and direct.",
            Relationship::Boss => {
                "Formal, professional, and respectful. Use 'I would like to discuss' \
                 instead of emotional outbursts."
            }
            Relationship::Teacher => "Respectful, polite, and eager to learn.",
            Relationship::Partner => "Affectionate, gentle, open, and vulnerable.",
            Relationship::Family => "Warm, respectful, but personal.",
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Relationship::Friend => "Friend",
            Relationship::Boss => "Boss",
            Relationship::Teacher => "Teacher",
            Relationship::Partner => "Partner",
            Relationship::Family => "Family",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Ancillary prompt texts
// ---------------------------------------------------------------------------

const REWRITE_PROMPT_HEADER: &str = "\
You are an expert communication coach and emotional intelligence assistant.
Your goal is to help the user express themselves better, especially when they are emotional.";

const REWRITE_PROMPT_RULES: &str = "\
Rewrite the user's draft message to be:
1. More polite and respectful.
2. Constructive and solution-oriented.
3. Empathetic and clear.
4. Keep the ORIGINAL INTENT but remove aggression, passive-aggressiveness, or despair.
5. EXTREMELY IMPORTANT: make the rewrite UNIQUE and tailored to the specific situation. Avoid generic phrases.

Output ONLY the rewritten message. Do not add quotes or explanations.";

const SUPPORT_PROMPT: &str = "\
You are Solace, an empathetic and supportive emotional assistant.
Your goal is to provide immediate, compassionate support to a user who is searching for something distressing.

=== RESPONSE FRAMEWORK ===
1. Warm acknowledgment (1-2 sentences): validate their feelings without judgment.
2. Crisis resources (IF SEVERE DISTRESS DETECTED): display crisis hotlines prominently:
   - National Suicide Prevention Lifeline: 988 (US) / 112 (EU) / 9152987821 (India)
   - Crisis Text Line: text HOME to 741741
3. Immediate support options: breathing exercises, calming music, guided meditation.
4. Helpful content categories: suggest searching for coping strategies, uplifting stories.
5. Empowering next steps: concrete small actions; encourage professional help.

=== TONE GUIDELINES ===
- Warm, compassionate, non-clinical.
- Avoid toxic positivity.
- Never minimize their feelings.
- Use \"you\" language to create connection.

=== BROWSER ACTIONS ===
You can use tags to help, BUT FOLLOW THESE RULES:
- [[OPEN: url]] (e.g. a meditation site) -> OK to suggest.
- [[MUSIC: song]] -> DO NOT use this unless the user EXPLICITLY asks for music.
- [[SEARCH: resource]] -> OK to suggest.

Be concise but meaningful. Focus on listening. Do not overwhelm the user.";

const SUPPORT_FALLBACK: &str = "I'm having trouble connecting, but please know you are \
not alone. Consider calling a local helpline if you need someone to talk to.";

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// One conversational agent instance, one per browser session.
///
/// `chat` may run on any worker task; side effects always travel through
/// the [`ActionSender`] to the thread that owns the Controller.
pub struct Agent {
    /// Session identity, for logs and host bookkeeping.
    pub id: Uuid,
    config: AgentConfig,
    memory: Arc<dyn MemoryStore>,
    model: Arc<dyn ModelClient>,
    actions: ActionSender,
    sentiment: Option<Arc<dyn SentimentAnalyzer>>,
    phase: RwLock<TurnPhase>,
    last_emotion: RwLock<Option<EmotionResult>>,
    turns: AtomicU64,
}

impl Agent {
    /// Build an agent with the built-in lexicon sentiment backend.
    pub fn new(
        config: AgentConfig,
        memory: Arc<dyn MemoryStore>,
        model: Arc<dyn ModelClient>,
        actions: ActionSender,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            memory,
            model,
            actions,
            sentiment: Some(Arc::new(LexiconSentiment)),
            phase: RwLock::new(TurnPhase::Idle),
            last_emotion: RwLock::new(None),
            turns: AtomicU64::new(0),
        }
    }

    /// Replace the sentiment backend, or disable the layer with `None`.
    pub fn with_sentiment(mut self, analyzer: Option<Arc<dyn SentimentAnalyzer>>) -> Self {
        self.sentiment = analyzer;
        self
    }

    /// Emotion judgment of the most recent full-pipeline turn.
    ///
    /// Written by whichever worker finishes a turn; a reader may observe a
    /// value one turn stale, which is acceptable for UI badges.
    pub fn last_emotion(&self) -> Option<EmotionResult> {
        self.last_emotion.read().clone()
    }

    /// Current phase of the in-flight turn, [`TurnPhase::Idle`] between turns.
    pub fn phase(&self) -> TurnPhase {
        *self.phase.read()
    }

    fn set_phase(&self, phase: TurnPhase) {
        debug!(?phase, "turn phase");
        *self.phase.write() = phase;
    }

    fn next_turn_id(&self) -> u64 {
        self.turns.fetch_add(1, Ordering::Relaxed) + 1
    }

    // -----------------------------------------------------------------------
    // Main pipeline
    // -----------------------------------------------------------------------

    /// Process one user message. Always returns text; never faults the host.
    pub async fn chat(&self, message: &str, context: Option<&ConversationContext>) -> String {
        let lower = message.to_lowercase();

        // Fast path: explicit preference statement.
        if let Some(reply) = self.capture_preference(&lower) {
            return reply;
        }

        // Fast path: memory recall.
        if lower.contains("what did i") || lower.contains("remember") {
            return self.recall_facts();
        }

        // Fast path: confirmation of a pending tab-cleanup proposal.
        if let Some(proposal) = context.and_then(|c| c.cleanup_proposal.as_ref()) {
            if CONFIRM_WORDS.iter().any(|w| lower.contains(w)) {
                return self.confirm_cleanup(proposal);
            }
        }

        let turn_id = self.next_turn_id();

        self.set_phase(TurnPhase::Classifying);
        let emotion = classify_with(message, self.sentiment.as_deref());
        info!(turn_id, %emotion, "classified turn");
        *self.last_emotion.write() = Some(emotion.clone());

        self.set_phase(TurnPhase::PersonaSelecting);
        let persona = select_persona(message, &emotion, context);
        info!(turn_id, %persona, "selected persona");

        self.set_phase(TurnPhase::PromptAssembling);
        let bundle = assemble_prompt(
            persona,
            &emotion,
            message,
            context,
            self.memory.as_ref(),
            self.config.page_excerpt_limit,
        );

        self.set_phase(TurnPhase::AwaitingModel);
        let reply = match self
            .model
            .complete(
                &bundle.system_prompt,
                &bundle.user_prompt,
                self.config.temperature,
                self.config.max_tokens,
            )
            .await
        {
            Ok(reply) => reply,
            Err(error) => {
                warn!(turn_id, %error, "model call failed");
                self.set_phase(TurnPhase::Idle);
                return format!(
                    "I couldn't reach the assistant service right now ({error}). \
                     Please try again in a moment."
                );
            }
        };

        self.set_phase(TurnPhase::Decoding);
        let invocations = self.resolve_targets(decode(&reply));

        self.set_phase(TurnPhase::Dispatching);
        if !self.actions.submit(ActionBatch {
            turn_id,
            invocations,
        }) {
            warn!(turn_id, "dispatch shim gone, actions dropped");
        }

        self.set_phase(TurnPhase::Idle);
        reply
    }

    /// Resolve WHATSAPP targets against the contacts collaborator.
    fn resolve_targets(&self, invocations: Vec<ActionInvocation>) -> Vec<ActionInvocation> {
        invocations
            .into_iter()
            .map(|inv| match inv.kind {
                ActionKind::Whatsapp => {
                    let resolved =
                        resolve_whatsapp_target(&inv.raw_parameter, |name| {
                            self.memory.contact(name)
                        });
                    ActionInvocation::new(ActionKind::Whatsapp, resolved)
                }
                _ => inv,
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Fast paths
    // -----------------------------------------------------------------------

    /// "i like X" → store the fact, acknowledge locally.
    fn capture_preference(&self, lower: &str) -> Option<String> {
        let at = lower.find("i like")?;
        let liked = lower[at + "i like".len()..]
            .trim()
            .trim_end_matches(['.', '!', '?'])
            .trim()
            .to_string();
        if liked.is_empty() {
            return None;
        }
        self.memory.add_user_fact(&format!("Likes {liked}"));
        info!(fact = %liked, "captured preference");
        Some(format!("(I've remembered that you like {liked})"))
    }

    fn recall_facts(&self) -> String {
        let facts = self.memory.relevant_facts();
        if facts.is_empty() {
            "I don't have many facts stored about you yet.".to_string()
        } else {
            format!(
                "Here's what I remember about you:\n- {}",
                facts.join("\n- ")
            )
        }
    }

    /// Confirmed cleanup: keep the first tabs of the cluster, close the rest.
    fn confirm_cleanup(&self, proposal: &crate::context::CleanupProposal) -> String {
        let close: Vec<usize> = proposal
            .indices
            .iter()
            .skip(CLEANUP_KEEP_COUNT)
            .copied()
            .collect();
        if close.is_empty() {
            return format!(
                "I analyzed your tabs about '{}' but there aren't enough to safely close. \
                 I'll keep them open.",
                proposal.topic
            );
        }

        let kept: Vec<&str> = proposal
            .titles
            .iter()
            .take(CLEANUP_KEEP_COUNT)
            .map(String::as_str)
            .collect();
        let indices_json =
            serde_json::to_string(&close).unwrap_or_else(|_| "[]".to_string());

        let turn_id = self.next_turn_id();
        self.actions.submit(ActionBatch {
            turn_id,
            invocations: vec![ActionInvocation::new(ActionKind::CloseTabs, indices_json)],
        });
        info!(turn_id, topic = %proposal.topic, closing = close.len(), "confirmed tab cleanup");

        format!(
            "Cleaning up tabs for '{}'. Keeping focused on:\n{}\nClosing {} background tabs.",
            proposal.topic,
            kept.iter()
                .enumerate()
                .map(|(i, t)| format!("{}. {t}", i + 1))
                .collect::<Vec<_>>()
                .join("\n"),
            close.len()
        )
    }

    // -----------------------------------------------------------------------
    // Ancillary operations
    // -----------------------------------------------------------------------

    /// Rewrite a draft message constructively, toned for the recipient.
    pub async fn rewrite_message(
        &self,
        draft: &str,
        emotion: &EmotionResult,
        relationship: Relationship,
    ) -> Result<String, AgentError> {
        let system = format!(
            "{REWRITE_PROMPT_HEADER}\nTarget Recipient: {relationship}\nTarget Tone: {}\n\n{REWRITE_PROMPT_RULES}",
            relationship.tone_instruction()
        );
        let user = format!("User Draft: '{draft}'\nDetected Emotion: {emotion}\n\nRewritten Message:");

        let reply = self
            .model
            .complete(&system, &user, REWRITE_TEMPERATURE, REWRITE_MAX_TOKENS)
            .await?;
        Ok(reply.trim().trim_matches('"').trim().to_string())
    }

    /// Compassionate response for a distressing search query. Dispatches
    /// any directives the reply carries; degrades to canned support text.
    pub async fn emotional_support(&self, query: &str) -> String {
        let user = format!("The user searched for: '{query}'. Provide emotional support and resources.");
        match self
            .model
            .complete(SUPPORT_PROMPT, &user, SUPPORT_TEMPERATURE, SUPPORT_MAX_TOKENS)
            .await
        {
            Ok(reply) => {
                let turn_id = self.next_turn_id();
                let invocations = self.resolve_targets(decode(&reply));
                self.actions.submit(ActionBatch {
                    turn_id,
                    invocations,
                });
                reply
            }
            Err(error) => {
                warn!(%error, "emotional support call failed");
                SUPPORT_FALLBACK.to_string()
            }
        }
    }

    /// Local page-safety verdict. No model involved.
    pub fn check_safety(&self, context: Option<&ConversationContext>) -> String {
        let Some(url) = context.and_then(|c| c.url.as_deref()) else {
            return "No page loaded.".to_string();
        };
        if url.starts_with("http://") {
            "Warning: this site is using HTTP. Your connection is not secure.".to_string()
        } else {
            "This site looks standard. Connection is secure (HTTPS).".to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CleanupProposal;
    use crate::dispatch::{Controller, DispatchShim};
    use crate::llm::ModelError;
    use crate::memory::InMemoryStore;
    use anyhow::Result;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;

    /// Model client returning a fixed reply (or a scripted failure) and
    /// counting calls.
    struct Scripted {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelClient for Scripted {
        async fn complete(
            &self,
            _system: &str,
            _user: &str,
            _temperature: f32,
            _max_tokens: u32,
        ) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(ModelError::Quota),
            }
        }
    }

    #[derive(Default)]
    struct Recording {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl Controller for Recording {
        fn open_url(&mut self, url: &str) -> Result<()> {
            self.calls.lock().push(format!("open_url({url})"));
            Ok(())
        }
        fn play_music(&mut self, query: &str) -> Result<()> {
            self.calls.lock().push(format!("play_music({query})"));
            Ok(())
        }
        fn open_whatsapp(&mut self, target: &str) -> Result<()> {
            self.calls.lock().push(format!("open_whatsapp({target})"));
            Ok(())
        }
        fn search(&mut self, query: &str) -> Result<()> {
            self.calls.lock().push(format!("search({query})"));
            Ok(())
        }
        fn auto_fill(&mut self, fields: HashMap<String, String>) -> Result<()> {
            self.calls.lock().push(format!("auto_fill({} fields)", fields.len()));
            Ok(())
        }
        fn click_element(&mut self, text: &str) -> Result<()> {
            self.calls.lock().push(format!("click_element({text})"));
            Ok(())
        }
        fn close_tabs(&mut self, indices: Vec<usize>) -> Result<()> {
            self.calls.lock().push(format!("close_tabs({indices:?})"));
            Ok(())
        }
        fn save_profile(&mut self, fields: HashMap<String, String>) -> Result<()> {
            self.calls.lock().push(format!("save_profile({} fields)", fields.len()));
            Ok(())
        }
    }

    struct Harness {
        agent: Agent,
        model: Arc<Scripted>,
        memory: Arc<InMemoryStore>,
        shim: DispatchShim,
        calls: Arc<Mutex<Vec<String>>>,
    }

    /// Surface turn-phase and dispatch logs when tests run with
    /// `RUST_LOG` set.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn harness(model: Scripted) -> Harness {
        init_tracing();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let (shim, sender) = DispatchShim::new(Box::new(Recording {
            calls: calls.clone(),
        }));
        let memory = Arc::new(InMemoryStore::new());
        let model = Arc::new(model);
        let agent = Agent::new(
            AgentConfig::default(),
            memory.clone(),
            model.clone(),
            sender,
        );
        Harness {
            agent,
            model,
            memory,
            shim,
            calls,
        }
    }

    #[tokio::test]
    async fn preference_fast_path_skips_model() {
        let mut h = harness(Scripted::replying("should never be used"));
        let reply = h.agent.chat("i like jazz music", None).await;

        assert!(reply.contains("jazz music"));
        assert_eq!(h.memory.relevant_facts(), vec!["Likes jazz music"]);
        assert_eq!(h.model.call_count(), 0);
        h.shim.drain_pending();
        assert!(h.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn recall_fast_path_lists_facts() {
        let h = harness(Scripted::replying("unused"));
        h.memory.add_user_fact("Likes jazz music");
        let reply = h.agent.chat("what did i tell you about me?", None).await;
        assert!(reply.contains("Likes jazz music"));
        assert_eq!(h.model.call_count(), 0);

        let empty = harness(Scripted::replying("unused"));
        let reply = empty.agent.chat("do you remember anything?", None).await;
        assert!(reply.contains("don't have many facts"));
    }

    #[tokio::test]
    async fn cleanup_confirmation_closes_background_tabs() {
        let mut h = harness(Scripted::replying("unused"));
        let ctx = ConversationContext {
            cleanup_proposal: Some(CleanupProposal {
                topic: "rust tutorials".into(),
                indices: vec![0, 1, 4, 5, 6],
                titles: vec![
                    "The Book".into(),
                    "Rustlings".into(),
                    "Old tab".into(),
                    "Older tab".into(),
                    "Oldest tab".into(),
                ],
            }),
            ..Default::default()
        };

        let reply = h.agent.chat("yes, do it", Some(&ctx)).await;
        assert!(reply.contains("rust tutorials"));
        assert!(reply.contains("Closing 3 background tabs"));
        assert_eq!(h.model.call_count(), 0);

        h.shim.drain_pending();
        assert_eq!(*h.calls.lock(), vec!["close_tabs([4, 5, 6])"]);
    }

    #[tokio::test]
    async fn cleanup_declines_when_too_few_tabs() {
        let mut h = harness(Scripted::replying("unused"));
        let ctx = ConversationContext {
            cleanup_proposal: Some(CleanupProposal {
                topic: "news".into(),
                indices: vec![0, 1],
                titles: vec!["A".into(), "B".into()],
            }),
            ..Default::default()
        };

        let reply = h.agent.chat("sure", Some(&ctx)).await;
        assert!(reply.contains("aren't enough to safely close"));
        h.shim.drain_pending();
        assert!(h.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn full_turn_decodes_and_dispatches_in_order() {
        let mut h = harness(Scripted::replying(
            "Sure! [[OPEN: github.com]] [[SEARCH: rust tutorials]]",
        ));
        let reply = h.agent.chat("open github and find tutorials", None).await;

        assert!(reply.starts_with("Sure!"));
        assert_eq!(h.model.call_count(), 1);
        h.shim.drain_pending();
        assert_eq!(
            *h.calls.lock(),
            vec!["open_url(github.com)", "search(rust tutorials)"]
        );
        assert_eq!(h.agent.phase(), TurnPhase::Idle);
    }

    #[tokio::test]
    async fn whatsapp_target_resolved_through_contacts() {
        let mut h = harness(Scripted::replying(
            "On it. [[WHATSAPP: John|hello there]]",
        ));
        h.memory.add_contact("john", "+15551234567");

        h.agent.chat("message john for me", None).await;
        h.shim.drain_pending();
        assert_eq!(
            *h.calls.lock(),
            vec!["open_whatsapp(+15551234567|hello there)"]
        );
    }

    #[tokio::test]
    async fn model_failure_becomes_apology_with_no_side_effects() {
        let mut h = harness(Scripted::failing());
        let reply = h.agent.chat("open github", None).await;

        assert!(reply.contains("quota"));
        assert_eq!(h.agent.phase(), TurnPhase::Idle);
        h.shim.drain_pending();
        assert!(h.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn last_emotion_updates_per_full_turn() {
        let h = harness(Scripted::replying("take care of yourself"));
        assert!(h.agent.last_emotion().is_none());

        h.agent.chat("i feel so lonely and sad", None).await;
        let emotion = h.agent.last_emotion().expect("emotion recorded");
        assert!(emotion.needs_comfort());
    }

    #[tokio::test]
    async fn crisis_turn_reaches_model_with_crisis_prompt() {
        // The crisis path must not be short-circuited by fast paths.
        let h = harness(Scripted::replying("I'm here with you."));
        let reply = h.agent.chat("I want to kill myself", None).await;
        assert_eq!(reply, "I'm here with you.");
        assert_eq!(h.model.call_count(), 1);
        assert!(h.agent.last_emotion().unwrap().is_crisis());
    }

    #[tokio::test]
    async fn rewrite_trims_surrounding_quotes() {
        let h = harness(Scripted::replying("\"I would like to discuss the deadline.\""));
        let emotion = crate::emotion::classify_with("i am furious", None);
        let rewritten = h
            .agent
            .rewrite_message("this deadline is insane!!", &emotion, Relationship::Boss)
            .await
            .unwrap();
        assert_eq!(rewritten, "I would like to discuss the deadline.");
    }

    #[tokio::test]
    async fn emotional_support_degrades_to_fallback() {
        let h = harness(Scripted::failing());
        let reply = h.agent.emotional_support("how to cope with loss").await;
        assert_eq!(reply, SUPPORT_FALLBACK);
    }

    #[tokio::test]
    async fn emotional_support_dispatches_reply_actions() {
        let mut h = harness(Scripted::replying(
            "You are not alone. [[OPEN: calm-breathing.example.org]]",
        ));
        h.agent.emotional_support("i feel empty").await;
        h.shim.drain_pending();
        assert_eq!(
            *h.calls.lock(),
            vec!["open_url(calm-breathing.example.org)"]
        );
    }

    #[test]
    fn check_safety_verdicts() {
        let h = harness(Scripted::replying("unused"));
        assert_eq!(h.agent.check_safety(None), "No page loaded.");

        let insecure = ConversationContext::with_url("http://legacy.example.org");
        assert!(h.agent.check_safety(Some(&insecure)).contains("not secure"));

        let secure = ConversationContext::with_url("https://example.org");
        assert!(h.agent.check_safety(Some(&secure)).contains("secure (HTTPS)"));
    }
}
