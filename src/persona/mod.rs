//! Persona selection and prompt assembly.
//!
//! A persona is a named system-prompt variant shaping tone and safety
//! behavior. Selection is first-match over a fixed priority: safety
//! routing (Medical) wins over context routing (RelationshipCoach), which
//! wins over the General default.

pub mod prompt;

use serde::{Deserialize, Serialize};

use crate::context::ConversationContext;
use crate::emotion::EmotionResult;

pub use prompt::{assemble_prompt, PromptBundle};

/// Topic keywords that route a message to the Medical persona.
pub const MEDICAL_KEYWORDS: &[&str] = &[
    "health", "doctor", "pain", "sick", "ill", "fever", "virus", "infection",
    "medicine", "drug", "pill", "symptom", "disease", "condition", "therapy",
    "mental", "anxiety", "depression", "hospital", "clinic", "nurse", "surgery",
    "bleed", "hurt", "injury", "ache", "stomach", "headache", "cold", "flu",
];

/// Social-messaging domains that route a browsing context to the
/// RelationshipCoach persona.
pub const SOCIAL_DOMAINS: &[&str] = &[
    "whatsapp.com",
    "messenger.com",
    "telegram.org",
    "instagram.com",
];

/// The response personas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// Safety-oriented advisor. Handles medical topics and every
    /// negative-emotion turn.
    Medical,
    /// Communication coach, active on social-messaging pages.
    RelationshipCoach,
    /// Casual capable assistant, the default.
    General,
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Persona::Medical => "medical",
            Persona::RelationshipCoach => "relationship_coach",
            Persona::General => "general",
        };
        write!(f, "{s}")
    }
}

/// Pick the persona for one turn. Deterministic and idempotent.
///
/// Any turn needing comfort routes to Medical: the safety-oriented persona
/// handles all negative emotion, not only explicit medical topics.
pub fn select_persona(
    message: &str,
    emotion: &EmotionResult,
    context: Option<&ConversationContext>,
) -> Persona {
    let lower = message.to_lowercase();
    let medical_topic = MEDICAL_KEYWORDS.iter().any(|kw| lower.contains(kw));
    if medical_topic || emotion.is_crisis() || emotion.needs_comfort() {
        return Persona::Medical;
    }

    let on_social_page = context
        .and_then(|c| c.url.as_deref())
        .map(|url| SOCIAL_DOMAINS.iter().any(|d| url.contains(d)))
        .unwrap_or(false);
    if on_social_page {
        return Persona::RelationshipCoach;
    }

    Persona::General
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::classify_with;

    fn neutral() -> EmotionResult {
        classify_with("the weather tomorrow", None)
    }

    #[test]
    fn medical_keyword_routes_to_medical() {
        let p = select_persona("what helps with a headache?", &neutral(), None);
        assert_eq!(p, Persona::Medical);
    }

    #[test]
    fn crisis_routes_to_medical() {
        let emotion = classify_with("I want to kill myself", None);
        assert!(emotion.is_crisis());
        let p = select_persona("I want to kill myself", &emotion, None);
        assert_eq!(p, Persona::Medical);
    }

    #[test]
    fn distress_routes_to_medical_even_on_social_page() {
        let emotion = classify_with("i feel so lonely", None);
        let ctx = ConversationContext::with_url("https://web.whatsapp.com/chat");
        let p = select_persona("i feel so lonely", &emotion, Some(&ctx));
        assert_eq!(p, Persona::Medical);
    }

    #[test]
    fn social_page_routes_to_relationship_coach() {
        let ctx = ConversationContext::with_url("https://web.whatsapp.com/chat");
        let p = select_persona("how should I reply here?", &neutral(), Some(&ctx));
        assert_eq!(p, Persona::RelationshipCoach);
    }

    #[test]
    fn default_is_general() {
        let p = select_persona("play some jazz", &neutral(), None);
        assert_eq!(p, Persona::General);

        let ctx = ConversationContext::with_url("https://news.example.org");
        let p = select_persona("summarize this", &neutral(), Some(&ctx));
        assert_eq!(p, Persona::General);
    }

    #[test]
    fn selection_is_idempotent() {
        let emotion = neutral();
        let ctx = ConversationContext::with_url("https://telegram.org/chat");
        let first = select_persona("hello", &emotion, Some(&ctx));
        for _ in 0..3 {
            assert_eq!(select_persona("hello", &emotion, Some(&ctx)), first);
        }
    }
}
