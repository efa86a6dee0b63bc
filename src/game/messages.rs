//! Message log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Messages kept before the oldest is dropped
pub const MAX_MESSAGES: usize = 100;

/// Categories for message filtering/coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    Combat,
    Item,
    System,
    Warning,
}

/// A message to display in the game log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMessage {
    pub text: String,
    pub category: MessageCategory,
}

/// Rolling log of the last [`MAX_MESSAGES`] messages
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: VecDeque<GameMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.messages.push_back(GameMessage {
            text: text.into(),
            category,
        });
        while self.messages.len() > MAX_MESSAGES {
            self.messages.pop_front();
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &GameMessage> + ExactSizeIterator {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&GameMessage> {
        self.messages.back()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
