//! Append-only conversation transcript for one request.

use llm::Message;

/// The ordered record of turns within one inbound-message request.
///
/// Shared by the classifier and the executor so the specialist sees the
/// classification step's own turns; discarded when the request ends.
/// Turns can be appended but never mutated or removed.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<Message>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one turn.
    pub fn push(&mut self, turn: Message) {
        self.turns.push(turn);
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    /// Number of turns recorded so far.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turn has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&Message> {
        self.turns.last()
    }
}
