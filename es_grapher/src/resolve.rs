//! External reference resolution.
//!
//! The compilers only record what they saw mentioned. Once every declaration
//! has been walked, [`resolve_externals`] decides which mentions have no
//! declaration and need a placeholder node.

use std::collections::HashSet;

use crate::classify::is_read_only;

/// Prefix of event keys and event condition names.
pub const EVENT_PREFIX: &str = "event: ";
/// Suffix of the condition set when a mission completes.
pub const DONE_SUFFIX: &str = ": done";

/// Something a condition or effect referred to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mention {
    Event(String),
    Mission(String),
    Variable(String),
}

impl Mention {
    /// Classify a raw condition name: `event: X` names an event, `X: done` a mission.
    pub fn from_token(token: &str) -> Self {
        if let Some(name) = token.strip_prefix(EVENT_PREFIX) {
            Self::Event(name.to_string())
        } else if let Some(name) = token.strip_suffix(DONE_SUFFIX) {
            Self::Mission(name.to_string())
        } else {
            Self::Variable(token.to_string())
        }
    }

    /// Key of the graph node this mention points at.
    pub fn key(&self) -> String {
        match self {
            Self::Event(name) => event_key(name),
            Self::Mission(name) | Self::Variable(name) => name.clone(),
        }
    }
}

pub fn event_key(name: &str) -> String {
    format!("{EVENT_PREFIX}{name}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Event,
    Mission,
    Variable,
}

/// A node standing in for something referenced but not declared in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    pub key: String,
    pub label: String,
}

/// Produce one placeholder per undeclared mention, in first-mention order.
///
/// `defined` holds declared mission names and `event: ` keys; `emitted` holds
/// keys that already have a node. Read-only conditions never get a placeholder.
pub fn resolve_externals(mentioned: &[Mention], defined: &HashSet<String>, emitted: &HashSet<String>) -> Vec<Placeholder> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for mention in mentioned {
        let key = mention.key();
        if defined.contains(&key) || emitted.contains(&key) || !seen.insert(key.clone()) {
            continue;
        }
        let placeholder = match mention {
            Mention::Event(name) => Placeholder {
                kind: PlaceholderKind::Event,
                key,
                label: format!("external event: {name}"),
            },
            Mention::Mission(name) => Placeholder {
                kind: PlaceholderKind::Mission,
                key,
                label: format!("external mission: {name}"),
            },
            Mention::Variable(name) if is_read_only(name) => continue,
            Mention::Variable(name) => Placeholder {
                kind: PlaceholderKind::Variable,
                label: name.clone(),
                key,
            },
        };
        out.push(placeholder);
    }
    out
}
