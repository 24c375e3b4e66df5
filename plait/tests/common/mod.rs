#![allow(dead_code)]

use plait::{DocumentState, HookArgs};

// ============================================================================
// Test State and Event Types
// ============================================================================

/// Opaque document state: a text body.
#[derive(Clone, Debug, PartialEq)]
pub struct Doc {
    pub text: String,
}

impl DocumentState for Doc {}

pub fn doc(text: &str) -> Doc {
    Doc {
        text: text.to_string(),
    }
}

/// Opaque hook payload: a key event.
#[derive(Debug)]
pub struct Key {
    pub code: String,
}

impl HookArgs for Key {}

pub fn key(code: &str) -> Key {
    Key {
        code: code.to_string(),
    }
}
