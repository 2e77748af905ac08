use bytes::Bytes;

/// One turn of the conversation handed to the model.
///
/// The ordered `Vec<ConversationTurn>` built by the prompt builder is the
/// only input the model client receives.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationTurn {
    /// Grading rubric and instructions.
    System(String),
    /// Instructional text, optionally followed by a PDF document.
    User {
        text: String,
        document: Option<Bytes>,
    },
    /// A known-correct answer, serialized as compact JSON.
    Assistant(String),
}

impl ConversationTurn {
    pub fn role(&self) -> &'static str {
        match self {
            ConversationTurn::System(_) => "system",
            ConversationTurn::User { .. } => "user",
            ConversationTurn::Assistant(_) => "assistant",
        }
    }
}
