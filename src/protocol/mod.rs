//! Action directive codec.
//!
//! The model embeds side-effect requests in its reply as `[[KIND: PARAMETER]]`
//! tokens. [`decode`] extracts them with an explicit scanner — locate `[[`,
//! read the KIND up to `:`, read the parameter up to the next literal `]]` —
//! so parameters may contain any characters short of the closing `]]`.
//! Decoding is total: unknown kinds are dropped, never faulted, which keeps
//! the pipeline forward-compatible with new directives.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

// ---------------------------------------------------------------------------
// Directive vocabulary
// ---------------------------------------------------------------------------

/// The fixed directive vocabulary the dispatcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Open,
    Music,
    Whatsapp,
    Search,
    Autofill,
    Click,
    CloseTabs,
    SaveProfile,
}

impl ActionKind {
    /// Parse an uppercase wire token. Unknown tokens return `None` and are
    /// dropped by [`decode`].
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "OPEN" => Some(Self::Open),
            "MUSIC" => Some(Self::Music),
            "WHATSAPP" => Some(Self::Whatsapp),
            "SEARCH" => Some(Self::Search),
            "AUTOFILL" => Some(Self::Autofill),
            "CLICK" => Some(Self::Click),
            "CLOSE_TABS" => Some(Self::CloseTabs),
            "SAVE_PROFILE" => Some(Self::SaveProfile),
            _ => None,
        }
    }

    /// The wire token for this kind.
    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Music => "MUSIC",
            Self::Whatsapp => "WHATSAPP",
            Self::Search => "SEARCH",
            Self::Autofill => "AUTOFILL",
            Self::Click => "CLICK",
            Self::CloseTabs => "CLOSE_TABS",
            Self::SaveProfile => "SAVE_PROFILE",
        }
    }
}

/// One decoded directive, ready for dispatch. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInvocation {
    /// Which capability to invoke.
    pub kind: ActionKind,
    /// The raw parameter text, trimmed, sub-grammar not yet applied.
    pub raw_parameter: String,
}

impl ActionInvocation {
    pub fn new(kind: ActionKind, raw_parameter: impl Into<String>) -> Self {
        Self {
            kind,
            raw_parameter: raw_parameter.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A directive parameter that failed its per-kind sub-grammar.
///
/// Always local to one directive: the decoder and dispatcher carry on with
/// the rest of the batch.
#[derive(Debug, Error)]
pub enum DirectiveError {
    /// AUTOFILL / SAVE_PROFILE parameter was not a JSON object.
    #[error("malformed {kind} field blob: {source}")]
    MalformedFieldBlob {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// CLOSE_TABS parameter was not a JSON list of indices.
    #[error("malformed tab index list: {source}")]
    MalformedTabIndices {
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// True for tokens shaped like a directive KIND: uppercase ASCII and
/// underscores, non-empty.
fn is_kind_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_uppercase() || c == '_')
}

/// Find the end of a directive body: the first `]]` that is not closing a
/// bracket opened inside the parameter itself. This lets parameters carry
/// bracketed lists (`CLOSE_TABS: [3, 4]`) and bracketed text intact.
fn find_body_end(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'[' => depth += 1,
            b']' => {
                if depth > 0 {
                    depth -= 1;
                } else if bytes.get(i + 1) == Some(&b']') {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Extract every well-formed directive from `text`, in source order.
///
/// Total over all inputs: text without directives yields an empty vector,
/// an unrecognized KIND is parsed and silently dropped, and an unterminated
/// `[[` is skipped over.
pub fn decode(text: &str) -> Vec<ActionInvocation> {
    let mut invocations = Vec::new();
    let mut cursor = 0;

    while let Some(open) = text[cursor..].find("[[") {
        let start = cursor + open;
        let body_start = start + 2;
        let Some(close) = find_body_end(&text[body_start..]) else {
            // No terminator for this opener: rescan from inside it.
            cursor = body_start;
            continue;
        };
        let body = &text[body_start..body_start + close];

        let Some((token, parameter)) = body.split_once(':') else {
            // No KIND separator inside the brackets: not a directive.
            cursor = body_start;
            continue;
        };
        let token = token.trim();
        if !is_kind_token(token) {
            cursor = body_start;
            continue;
        }

        match ActionKind::from_token(token) {
            Some(kind) => {
                invocations.push(ActionInvocation::new(kind, parameter.trim()));
            }
            None => {
                // Forward compatibility: unknown directives never fault.
                debug!(token, "dropping unrecognized directive kind");
            }
        }
        cursor = body_start + close + 2;
    }

    invocations
}

// ---------------------------------------------------------------------------
// Per-kind parameter sub-grammars
// ---------------------------------------------------------------------------

/// Parse an AUTOFILL / SAVE_PROFILE parameter into field → value pairs.
///
/// The blob must be a JSON object; non-string values are stringified so a
/// model emitting `{"Age": 30}` still fills the form.
pub fn parse_field_map(
    kind: &'static str,
    parameter: &str,
) -> Result<HashMap<String, String>, DirectiveError> {
    let object: serde_json::Map<String, Value> = serde_json::from_str(parameter)
        .map_err(|source| DirectiveError::MalformedFieldBlob { kind, source })?;
    Ok(object
        .into_iter()
        .map(|(k, v)| {
            let value = match v {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (k, value)
        })
        .collect())
}

/// Parse a CLOSE_TABS parameter: a bracketed JSON list of tab indices.
pub fn parse_tab_indices(parameter: &str) -> Result<Vec<usize>, DirectiveError> {
    serde_json::from_str(parameter).map_err(|source| DirectiveError::MalformedTabIndices { source })
}

/// Resolve a WHATSAPP parameter (`TARGET` or `TARGET|MESSAGE`) against a
/// contacts lookup.
///
/// The TARGET half is looked up by name; on a miss it passes through
/// unchanged on the assumption it is already a phone number.
pub fn resolve_whatsapp_target(
    parameter: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> String {
    match parameter.split_once('|') {
        Some((target, message)) => {
            let target = target.trim();
            let message = message.trim();
            match lookup(target) {
                Some(number) => format!("{number}|{message}"),
                None => format!("{target}|{message}"),
            }
        }
        None => {
            let target = parameter.trim();
            lookup(target).unwrap_or_else(|| target.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
