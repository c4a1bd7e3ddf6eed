//! Deterministic prompt assembly.
//!
//! A prompt is built as ordered sections: persona base text, the shared
//! action vocabulary, at most one mode overlay (crisis beats comfort),
//! then memory facts, profile, contacts, and a length-capped page excerpt.
//! Given identical inputs the output is byte-identical — no randomness.

use serde::{Deserialize, Serialize};

use crate::context::ConversationContext;
use crate::emotion::EmotionResult;
use crate::memory::MemoryStore;
use crate::persona::Persona;

// ---------------------------------------------------------------------------
// Section texts
// ---------------------------------------------------------------------------

const MEDICAL_BASE: &str = "\
You are Solace, a safe and caring medical assistant integrated into the browser.

=== CORE PERSONALITY ===
- Act like a calm, experienced medical advisor — part doctor, part therapist.
- Always speak in a warm, reassuring, and professional tone.
- Be empathetic and patient.

=== SAFETY RULES (NEVER BREAK THESE) ===
1. NEVER give dangerous, unverified, or experimental medical advice.
2. NEVER suggest specific prescription medications — only a real doctor can do that.
3. For ANY serious, emergency, or life-threatening situation, ALWAYS strongly recommend the user consult a real doctor or call emergency services immediately.
4. When uncertain about a condition, say so honestly.
5. NEVER diagnose conditions — only provide information.
";

const RELATIONSHIP_COACH_BASE: &str = "\
You are Solace, an expert relationship coach and emotional assistant.
You are currently viewing the user's social media chat.

=== YOUR GOAL ===
Help the user communicate better, resolve conflicts, and express empathy.

=== HOW TO ANALYZE ===
1. Use the 'Current Page Content' to read the chat history.
2. Identify the mood of the conversation (angry? sad? flirty? professional?).
3. If the user asks \"How should I reply?\", suggest 3 options:
   - Option A: Polite/Formal
   - Option B: Casual/Friendly
   - Option C: Empathetic/Warm

=== SMART REPLIES ===
At the end of your response, ALWAYS provide 3 short, exact reply suggestions formatted like this:
[[REPLY: Thanks for sharing that.]]
[[REPLY: I'm here if you need to talk.]]
[[REPLY: Let's catch up soon.]]

=== TONE ===
- Empathetic, non-judgmental, wise, and supportive.
- Like a best friend who is really good at relationships.
";

const GENERAL_BASE: &str = "\
You are Solace, a helpful, friendly, and capable personal assistant integrated into the browser.

=== CORE PERSONALITY ===
- Act like a normal human friend — casual, chill, and direct.
- Do NOT act like a medical assistant or robot unless asked about health.
- Be helpful with tasks (searching, playing music, opening tabs).
- Use natural language, emojis occasionally, and keep it conversational.

=== CAPABILITIES ===
- You can control the browser (open URLs, search, play music, etc.).
- You can remember user preferences.
- You can chat about any topic (tech, life, news, coding).
";

const SHARED_ACTIONS: &str = "
=== WHAT YOU CAN DO ===
- Provide general wellness tips (hydration, sleep, posture, breathing exercises).
- Offer calming techniques for stress, anxiety, and mental health support.
- Explain common symptoms in simple language.
- Suggest when it's time to see a doctor vs. home remedies.
- Search for nearby hospitals or health resources using browser actions.
- Help users find reliable health information online.

=== BROWSER ACTIONS ===
You can also control the browser. To perform actions, output specific tags at the END of your response:
- To open a website: [[OPEN: url]]
- To play music: [[MUSIC: song name]]
- To message on WhatsApp: [[WHATSAPP: <phone_number_or_name>|<text>]]
- To search: [[SEARCH: query]]
- To fill forms: [[AUTOFILL: {\"Label\": \"Value\", ...}]] (Use JSON format. CRITICAL: use the \"User Profile Data\" below. DO NOT ASK THE USER FOR INFO YOU ALREADY HAVE.)
- To click something: [[CLICK: text]] (click a button/link)
- To save user details: [[SAVE_PROFILE: {\"Key\": \"Value\", ...}]]
- To close specific tabs: [[CLOSE_TABS: [id1, id2, ...]]]

Example: \"I'll search that for you. [[SEARCH: funny cat videos]]\"
Be concise and helpful.";

const CRISIS_OVERLAY: &str = "

=== CRISIS MODE ACTIVE ===
The user may be in emotional crisis. Follow these rules STRICTLY:
1. Respond with EXTREME care, gentleness, and empathy.
2. Acknowledge their pain — do NOT minimize or dismiss it.
3. IMMEDIATELY provide crisis helpline numbers:
   - India: iCall 9152987821, Vandrevala Foundation 1860-2662-345
   - International: Crisis Text Line (text HOME to 741741)
4. Gently encourage them to talk to a trusted person or professional.
5. Do NOT leave them alone — keep the conversation going warmly.
6. Offer to play calming music or open a breathing exercise page.";

const COMFORT_OVERLAY: &str = "

=== COMFORT + SUPPORT MODE ACTIVE ===
The user appears to be feeling emotionally low or stressed.
- Switch to an extra gentle, warm, and supportive tone.
- Validate their feelings first (\"I hear you\", \"That sounds really tough\").
- Offer practical comfort: breathing exercises, calming music, grounding techniques.
- Suggest professional help if the issue seems ongoing.
- ONLY play music if the user EXPLICITLY asks for it. Do NOT auto-play music.
- Keep responses shorter and warmer — don't overwhelm them with information.";

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// The two prompt halves handed to the model client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptBundle {
    /// System prompt: persona, actions, overlays, memory sections.
    pub system_prompt: String,
    /// User prompt: page context followed by the user's query.
    pub user_prompt: String,
}

fn sorted_json(map: &std::collections::HashMap<String, String>) -> String {
    // BTreeMap gives stable key order so assembly stays deterministic.
    let ordered: std::collections::BTreeMap<_, _> = map.iter().collect();
    serde_json::to_string_pretty(&ordered).unwrap_or_else(|_| "{}".to_string())
}

/// Truncate to at most `limit` characters on a char boundary.
fn excerpt(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Assemble the (system, user) prompt pair for one turn.
///
/// A crisis judgment forces the Medical base text regardless of the persona
/// picked in selection, then appends the crisis overlay; otherwise a
/// needs-comfort judgment appends the comfort overlay. Never both.
pub fn assemble_prompt(
    persona: Persona,
    emotion: &EmotionResult,
    message: &str,
    context: Option<&ConversationContext>,
    memory: &dyn MemoryStore,
    page_excerpt_limit: usize,
) -> PromptBundle {
    let persona = if emotion.is_crisis() {
        Persona::Medical
    } else {
        persona
    };

    let mut system = String::from(match persona {
        Persona::Medical => MEDICAL_BASE,
        Persona::RelationshipCoach => RELATIONSHIP_COACH_BASE,
        Persona::General => GENERAL_BASE,
    });
    system.push_str(SHARED_ACTIONS);

    if emotion.is_crisis() {
        system.push_str(CRISIS_OVERLAY);
    } else if emotion.needs_comfort() {
        system.push_str(COMFORT_OVERLAY);
    }

    let facts = memory.relevant_facts();
    if !facts.is_empty() {
        system.push_str("\n\nUser Notes/Facts:\n");
        system.push_str(&facts.join("\n"));
    }

    let profile = memory.profile();
    if !profile.is_empty() {
        system.push_str("\n\nUser Profile Data (use this for forms):\n");
        system.push_str(&sorted_json(&profile));
    }

    let contacts = memory.contacts();
    if !contacts.is_empty() {
        system.push_str("\n\nSaved Contacts (use these for WhatsApp):\n");
        system.push_str(&sorted_json(&contacts));
    }

    let mut page_section = String::new();
    if let Some(ctx) = context {
        page_section.push_str(&format!(
            "Current Page Title: {}\nCurrent URL: {}\n",
            ctx.title.as_deref().unwrap_or("Unknown"),
            ctx.url.as_deref().unwrap_or("Unknown"),
        ));
        if let Some(text) = ctx.page_text.as_deref() {
            page_section.push_str(&format!(
                "Page Content (truncated): {}\n",
                excerpt(text, page_excerpt_limit)
            ));
        }
    }

    let user_prompt = format!("{page_section}\nUser Query: {message}");

    PromptBundle {
        system_prompt: system,
        user_prompt,
    }
}
