//! Signal-fusion emotion classifier.
//!
//! Two layers: an ordered keyword scan (crisis → toxic → distress →
//! positive) and an optional sentiment score, fused into one
//! [`EmotionResult`]. Classification is pure, deterministic, and total
//! over all strings including the empty string — there is no error path.

pub mod keywords;
pub mod sentiment;

use serde::{Deserialize, Serialize};

pub use keywords::{CRISIS_KEYWORDS, DISTRESS_KEYWORDS, POSITIVE_KEYWORDS, TOXIC_KEYWORDS};
pub use sentiment::{LexiconSentiment, SentimentAnalyzer};

/// Sentiment score at or below this maps to distress.
const SENTIMENT_DISTRESS_THRESHOLD: f32 = -0.3;
/// Sentiment score at or above this maps to positive.
const SENTIMENT_POSITIVE_THRESHOLD: f32 = 0.3;
/// Confidence contributed per keyword hit.
const KEYWORD_HIT_WEIGHT: f32 = 0.3;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Emotional tone of a piece of user text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Neutral,
    Distress,
    Crisis,
    Positive,
    Anger,
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mood::Neutral => "neutral",
            Mood::Distress => "distress",
            Mood::Crisis => "crisis",
            Mood::Positive => "positive",
            Mood::Anger => "anger",
        };
        write!(f, "{s}")
    }
}

/// Which layer produced the final judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalSource {
    /// Keyword layer alone.
    Keyword,
    /// Sentiment layer alone.
    Sentiment,
    /// Both layers, in agreement or jointly neutral.
    Both,
    /// Neither layer fired.
    None,
}

impl std::fmt::Display for SignalSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SignalSource::Keyword => "keyword",
            SignalSource::Sentiment => "sentiment",
            SignalSource::Both => "both",
            SignalSource::None => "none",
        };
        write!(f, "{s}")
    }
}

/// Outcome of one classification call. Immutable, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionResult {
    /// Final mood judgment.
    pub mood: Mood,
    /// Confidence in [0, 1].
    pub confidence: f32,
    /// Keyword hits, in list-scan order.
    pub matched_keywords: Vec<String>,
    /// Compound sentiment score in [-1, 1], when the layer was consulted.
    pub sentiment_score: Option<f32>,
    /// Layer(s) that produced the judgment.
    pub source: SignalSource,
}

impl EmotionResult {
    fn neutral() -> Self {
        Self {
            mood: Mood::Neutral,
            confidence: 0.0,
            matched_keywords: Vec::new(),
            sentiment_score: None,
            source: SignalSource::None,
        }
    }

    /// True when the agent should switch to a comfort-and-support register.
    pub fn needs_comfort(&self) -> bool {
        matches!(self.mood, Mood::Distress | Mood::Crisis)
    }

    /// True when probable self-harm risk language was detected.
    pub fn is_crisis(&self) -> bool {
        self.mood == Mood::Crisis
    }
}

impl std::fmt::Display for EmotionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mood={} confidence={:.2} source={}",
            self.mood, self.confidence, self.source
        )
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify `text` using the built-in lexicon sentiment backend.
pub fn classify(text: &str) -> EmotionResult {
    static DEFAULT_SENTIMENT: LexiconSentiment = LexiconSentiment;
    classify_with(text, Some(&DEFAULT_SENTIMENT))
}

/// Classify `text` with an explicit (or absent) sentiment backend.
///
/// Crisis and toxic keyword hits short-circuit before the sentiment layer
/// is consulted: a crisis judgment is never diluted by any other signal.
pub fn classify_with(text: &str, analyzer: Option<&dyn SentimentAnalyzer>) -> EmotionResult {
    let lower = text.to_lowercase();
    let mut result = EmotionResult::neutral();

    // Layer 1: priority-ordered keyword scan.
    let crisis_hits = keywords::hits(CRISIS_KEYWORDS, &lower);
    if !crisis_hits.is_empty() {
        result.mood = Mood::Crisis;
        result.confidence = 1.0;
        result.matched_keywords = crisis_hits;
        result.source = SignalSource::Keyword;
        return result;
    }

    let toxic_hits = keywords::hits(TOXIC_KEYWORDS, &lower);
    if !toxic_hits.is_empty() {
        result.mood = Mood::Anger;
        result.confidence = 0.95;
        result.matched_keywords = toxic_hits;
        result.source = SignalSource::Keyword;
        return result;
    }

    let mut keyword_mood = Mood::Neutral;
    let mut keyword_conf = 0.0f32;

    let distress_hits = keywords::hits(DISTRESS_KEYWORDS, &lower);
    let positive_hits = keywords::hits(POSITIVE_KEYWORDS, &lower);
    if !distress_hits.is_empty() {
        keyword_mood = Mood::Distress;
        keyword_conf = (distress_hits.len() as f32 * KEYWORD_HIT_WEIGHT).min(1.0);
        result.matched_keywords = distress_hits;
    } else if !positive_hits.is_empty() {
        keyword_mood = Mood::Positive;
        keyword_conf = (positive_hits.len() as f32 * KEYWORD_HIT_WEIGHT).min(1.0);
        result.matched_keywords = positive_hits;
    }

    // Layer 2: sentiment, when the capability is present.
    let Some(analyzer) = analyzer else {
        result.mood = keyword_mood;
        result.confidence = keyword_conf;
        result.source = if keyword_mood == Mood::Neutral {
            SignalSource::None
        } else {
            SignalSource::Keyword
        };
        return result;
    };

    let score = analyzer.compound_score(text).clamp(-1.0, 1.0);
    result.sentiment_score = Some(score);

    let sentiment_mood = if score <= SENTIMENT_DISTRESS_THRESHOLD {
        Mood::Distress
    } else if score >= SENTIMENT_POSITIVE_THRESHOLD {
        Mood::Positive
    } else {
        Mood::Neutral
    };
    let sentiment_conf = score.abs();

    // Fusion: agreement boosts, disagreement discounts the louder layer.
    if keyword_mood == sentiment_mood {
        result.mood = keyword_mood;
        result.confidence = ((keyword_conf + sentiment_conf) / 2.0 + 0.2).min(1.0);
        result.source = SignalSource::Both;
    } else if keyword_mood != Mood::Neutral {
        result.mood = keyword_mood;
        result.confidence = keyword_conf * 0.7;
        result.source = SignalSource::Keyword;
    } else if sentiment_mood != Mood::Neutral {
        result.mood = sentiment_mood;
        result.confidence = sentiment_conf * 0.6;
        result.source = SignalSource::Sentiment;
    } else {
        result.mood = Mood::Neutral;
        result.confidence = 0.0;
        result.source = SignalSource::Both;
    }

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Analyzer with a fixed score, for exercising each fusion arm.
    struct Fixed(f32);
    impl SentimentAnalyzer for Fixed {
        fn compound_score(&self, _text: &str) -> f32 {
            self.0
        }
    }

    #[test]
    fn crisis_short_circuits_everything() {
        // Positive keywords, toxic keywords, and a strongly positive
        // sentiment score all present: crisis still wins at full confidence.
        let r = classify_with(
            "I am happy you idiot but I want to kill myself",
            Some(&Fixed(0.9)),
        );
        assert_eq!(r.mood, Mood::Crisis);
        assert_eq!(r.confidence, 1.0);
        assert_eq!(r.source, SignalSource::Keyword);
        assert!(r.sentiment_score.is_none());
        assert!(r.matched_keywords.contains(&"kill myself".to_string()));
    }

    #[test]
    fn toxic_maps_to_anger() {
        let r = classify_with("you are such an idiot, shut up", None);
        assert_eq!(r.mood, Mood::Anger);
        assert_eq!(r.confidence, 0.95);
        assert_eq!(r.source, SignalSource::Keyword);
    }

    #[test]
    fn no_hits_no_sentiment_is_neutral_none() {
        let r = classify_with("the weather report for tomorrow", None);
        assert_eq!(r.mood, Mood::Neutral);
        assert_eq!(r.confidence, 0.0);
        assert_eq!(r.source, SignalSource::None);
        assert!(r.matched_keywords.is_empty());
    }

    #[test]
    fn empty_input_is_total() {
        let r = classify_with("", None);
        assert_eq!(r.mood, Mood::Neutral);
        let r = classify("");
        assert_eq!(r.mood, Mood::Neutral);
    }

    #[test]
    fn keyword_confidence_scales_with_hits() {
        let r = classify_with("i feel sad and lonely and exhausted", None);
        assert_eq!(r.mood, Mood::Distress);
        assert!((r.confidence - 0.9).abs() < 1e-6);
        assert_eq!(r.source, SignalSource::Keyword);
    }

    #[test]
    fn keyword_confidence_caps_at_one() {
        let r = classify_with("sad lonely exhausted anxious", None);
        assert_eq!(r.confidence, 1.0);
    }

    #[test]
    fn distress_checked_before_positive() {
        let r = classify_with("i am happy but so lonely", None);
        assert_eq!(r.mood, Mood::Distress);
    }

    #[test]
    fn agreement_boosts_confidence() {
        // One distress keyword (0.3) + agreeing sentiment of -0.5.
        let r = classify_with("i feel lonely", Some(&Fixed(-0.5)));
        assert_eq!(r.mood, Mood::Distress);
        assert_eq!(r.source, SignalSource::Both);
        assert!((r.confidence - ((0.3 + 0.5) / 2.0 + 0.2)).abs() < 1e-6);
    }

    #[test]
    fn disagreement_trusts_keywords_discounted() {
        // Distress keyword but positive sentiment: keyword wins at 0.7x.
        let r = classify_with("i feel lonely", Some(&Fixed(0.8)));
        assert_eq!(r.mood, Mood::Distress);
        assert_eq!(r.source, SignalSource::Keyword);
        assert!((r.confidence - 0.3 * 0.7).abs() < 1e-6);
    }

    #[test]
    fn sentiment_alone_fills_keyword_silence() {
        let r = classify_with("the quarterly report numbers", Some(&Fixed(-0.6)));
        assert_eq!(r.mood, Mood::Distress);
        assert_eq!(r.source, SignalSource::Sentiment);
        assert!((r.confidence - 0.6 * 0.6).abs() < 1e-6);
        assert_eq!(r.sentiment_score, Some(-0.6));
    }

    #[test]
    fn jointly_neutral_reports_both() {
        let r = classify_with("the quarterly report numbers", Some(&Fixed(0.1)));
        assert_eq!(r.mood, Mood::Neutral);
        assert_eq!(r.source, SignalSource::Both);
    }

    #[test]
    fn derived_flags() {
        let crisis = classify_with("i want to end my life", None);
        assert!(crisis.is_crisis());
        assert!(crisis.needs_comfort());

        let distress = classify_with("i feel so sad", None);
        assert!(!distress.is_crisis());
        assert!(distress.needs_comfort());

        let positive = classify_with("i feel great", None);
        assert!(!positive.needs_comfort());
    }

    #[test]
    fn classification_is_deterministic() {
        let a = classify("i'm stressed about the exam");
        let b = classify("i'm stressed about the exam");
        assert_eq!(a, b);
    }
}
