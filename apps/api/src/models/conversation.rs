use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One prior turn of a conversation. The caller owns history; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// History entry as the chat frontend sends it: `{"from": "user" | "bot", "text": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireTurn {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub text: String,
}

/// Converts frontend history into turns, dropping entries from unknown senders.
pub fn convert_history(history: &[WireTurn]) -> Vec<ConversationTurn> {
    history
        .iter()
        .filter_map(|turn| match turn.from.as_str() {
            "user" => Some(ConversationTurn::user(turn.text.clone())),
            "bot" => Some(ConversationTurn::assistant(turn.text.clone())),
            _ => None,
        })
        .collect()
}
