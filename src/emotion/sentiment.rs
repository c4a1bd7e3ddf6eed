//! Optional sentiment capability for the second classification layer.
//!
//! The classifier works without it; when present it contributes a compound
//! score in [-1, 1] that is fused with the keyword layer. The built-in
//! [`LexiconSentiment`] is a small valence-lexicon averager — good enough
//! to tip borderline cases, never authoritative on its own.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// A sentiment backend producing a compound score in [-1, 1].
///
/// Negative scores lean distressed, positive lean upbeat. Implementations
/// must be pure with respect to the input text.
pub trait SentimentAnalyzer: Send + Sync {
    /// Compound sentiment of `text`, clamped to [-1, 1].
    fn compound_score(&self, text: &str) -> f32;
}

/// Word valences, roughly -3 (strongly negative) to +3 (strongly positive).
static VALENCE: Lazy<HashMap<&'static str, f32>> = Lazy::new(|| {
    let entries: &[(&str, f32)] = &[
        // Positive
        ("happy", 2.5),
        ("glad", 1.8),
        ("great", 2.4),
        ("good", 1.9),
        ("amazing", 2.8),
        ("wonderful", 2.7),
        ("fantastic", 2.8),
        ("excellent", 2.7),
        ("love", 2.9),
        ("loving", 2.4),
        ("loved", 2.4),
        ("like", 1.5),
        ("enjoy", 2.0),
        ("excited", 2.2),
        ("joy", 2.6),
        ("joyful", 2.6),
        ("grateful", 2.3),
        ("thankful", 2.2),
        ("thanks", 1.8),
        ("blessed", 2.2),
        ("cheerful", 2.2),
        ("proud", 2.1),
        ("confident", 1.9),
        ("relaxed", 1.7),
        ("calm", 1.5),
        ("hope", 1.6),
        ("hopeful", 1.9),
        ("better", 1.4),
        ("best", 2.3),
        ("fun", 2.0),
        ("beautiful", 2.3),
        ("nice", 1.7),
        ("win", 1.8),
        ("won", 1.8),
        // Negative
        ("sad", -2.1),
        ("unhappy", -2.0),
        ("depressed", -2.6),
        ("depressing", -2.3),
        ("miserable", -2.6),
        ("hopeless", -2.7),
        ("worthless", -2.8),
        ("crying", -2.0),
        ("cry", -1.8),
        ("heartbroken", -2.7),
        ("grief", -2.4),
        ("lonely", -2.2),
        ("alone", -1.4),
        ("isolated", -1.9),
        ("anxious", -2.0),
        ("anxiety", -2.1),
        ("stressed", -2.0),
        ("stress", -1.8),
        ("panic", -2.3),
        ("nervous", -1.6),
        ("overwhelmed", -2.0),
        ("worried", -1.8),
        ("worry", -1.7),
        ("tired", -1.3),
        ("exhausted", -1.9),
        ("drained", -1.8),
        ("scared", -2.1),
        ("afraid", -2.0),
        ("terrified", -2.7),
        ("fear", -1.9),
        ("angry", -2.2),
        ("furious", -2.6),
        ("frustrated", -1.9),
        ("hate", -2.7),
        ("hated", -2.5),
        ("awful", -2.4),
        ("terrible", -2.4),
        ("horrible", -2.6),
        ("bad", -1.7),
        ("worse", -2.0),
        ("worst", -2.6),
        ("hurt", -1.9),
        ("hurts", -1.9),
        ("pain", -2.0),
        ("painful", -2.2),
        ("lost", -1.3),
        ("lose", -1.3),
        ("fail", -1.9),
        ("failed", -2.0),
        ("failure", -2.2),
        ("die", -2.8),
        ("dying", -2.8),
        ("dead", -2.5),
        ("suicide", -3.0),
        ("kill", -2.7),
    ];
    entries.iter().copied().collect()
});

/// Tokens that flip the valence of the word that follows them.
const NEGATORS: &[&str] = &["not", "no", "never", "don't", "dont", "can't", "cant", "isn't", "wasn't"];

/// Normalization constant: keeps single-word inputs off the ±1 rails.
const NORM_ALPHA: f32 = 15.0;

/// Built-in valence-lexicon sentiment backend.
///
/// Sums the valences of known tokens (with single-token negation flips)
/// and squashes the total into [-1, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect()
    }
}

impl SentimentAnalyzer for LexiconSentiment {
    fn compound_score(&self, text: &str) -> f32 {
        let tokens = Self::tokenize(text);
        let mut sum = 0.0f32;
        for (i, token) in tokens.iter().enumerate() {
            let Some(&valence) = VALENCE.get(token.as_str()) else {
                continue;
            };
            let negated = i > 0 && NEGATORS.contains(&tokens[i - 1].as_str());
            sum += if negated { -valence } else { valence };
        }
        if sum == 0.0 {
            return 0.0;
        }
        (sum / (sum * sum + NORM_ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}
