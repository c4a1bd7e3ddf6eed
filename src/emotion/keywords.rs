//! Keyword tables for the first classification layer.
//!
//! Four ordered lists, scanned in priority order crisis → toxic →
//! distress → positive. Matching is lowercase substring containment and
//! the scan order of each list is preserved in the reported hits.

/// Self-harm risk language. A single hit short-circuits classification.
pub const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "end my life",
    "don't want to live",
    "no reason to live",
    "self harm",
    "hurt myself",
];

/// Hostile or abusive language, classified as anger.
pub const TOXIC_KEYWORDS: &[&str] = &[
    "stupid",
    "idiot",
    "hate you",
    "shut up",
    "dumb",
    "fool",
    "useless",
    "kill yourself",
    "die",
    "crazy",
    "nasty",
    "ignorant",
    "loser",
    "anger",
    "furious",
    "mad",
    "rage",
    "disgust",
    "awful",
    "terrible",
    "abusive",
    "horrible",
    "pathetic",
    "worthless",
    "scum",
    "trash",
    "shut your mouth",
    "you are nothing",
    "get lost",
];

/// Sadness, anxiety, fatigue, fear. Includes the crisis terms so that a
/// distress scan alone still surfaces them in `matched_keywords`.
pub const DISTRESS_KEYWORDS: &[&str] = &[
    // Sadness / depression
    "sad",
    "depressed",
    "depression",
    "hopeless",
    "worthless",
    "crying",
    "unhappy",
    "miserable",
    "heartbroken",
    "grief",
    "grieving",
    "empty",
    // Loneliness
    "lonely",
    "alone",
    "isolated",
    "no friends",
    "nobody cares",
    "no one",
    // Anxiety / stress
    "anxious",
    "anxiety",
    "stressed",
    "panic",
    "panicking",
    "nervous",
    "overwhelmed",
    "worried",
    "can't sleep",
    "insomnia",
    "restless",
    // Fatigue
    "tired",
    "exhausted",
    "fatigue",
    "burnout",
    "burned out",
    "drained",
    // Anger / frustration
    "angry",
    "frustrated",
    "furious",
    "irritated",
    "mad",
    // Fear
    "scared",
    "afraid",
    "terrified",
    "fearful",
    // Self-harm, kept here as well so distress-only scans still flag them
    "hurt myself",
    "self harm",
    "suicide",
    "suicidal",
    "kill myself",
    "don't want to live",
    "end my life",
    "no reason to live",
];

/// Positive affect.
pub const POSITIVE_KEYWORDS: &[&str] = &[
    "happy",
    "great",
    "amazing",
    "wonderful",
    "fantastic",
    "good",
    "excited",
    "joyful",
    "grateful",
    "thankful",
    "blessed",
    "cheerful",
    "love",
    "loving",
    "proud",
    "confident",
    "relaxed",
    "calm",
];

/// Collect the keywords from `list` contained in `lower`, in list order.
///
/// `lower` must already be lowercased by the caller.
pub(crate) fn hits(list: &[&str], lower: &str) -> Vec<String> {
    list.iter()
        .filter(|kw| lower.contains(*kw))
        .map(|kw| kw.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_preserve_list_order() {
        let found = hits(POSITIVE_KEYWORDS, "so happy and grateful, truly blessed");
        assert_eq!(found, vec!["happy", "grateful", "blessed"]);
    }

    #[test]
    fn crisis_terms_also_appear_in_distress_list() {
        for kw in CRISIS_KEYWORDS {
            assert!(
                DISTRESS_KEYWORDS.contains(kw),
                "{kw} missing from distress list"
            );
        }
    }
}
