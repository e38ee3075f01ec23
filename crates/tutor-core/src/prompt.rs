//! Prompt builder for the tutoring model.
//!
//! Turns the current question plus the recent conversation window into a
//! single plain-text prompt. Pure and deterministic: identical inputs always
//! yield byte-identical output.
//!
//! Layout:
//! ```text
//! {PREAMBLE}
//!
//! Previous conversation:
//! Student: ...
//! Assistant: ...
//!
//! Current question: {message}
//!
//! {CLOSING_INSTRUCTION}
//! ```
//!
//! Individual messages are not truncated; callers bound the number of turns.

use tutor_types::history::ContextTurn;

/// Fixed system-role text describing the assistant's domain.
pub const PREAMBLE: &str = "You are a friendly and knowledgeable programming tutor. \
You help students understand computer science concepts, debug their code, and \
learn software development. Explain ideas clearly with short examples, and \
encourage good coding practices.";

const TRANSCRIPT_HEADER: &str = "Previous conversation:";

const CLOSING_INSTRUCTION: &str = "Respond helpfully and educationally. If the \
question builds on the previous conversation, use that context in your answer.";

/// Build the model prompt for `message` given the prior turns (oldest first).
pub fn build_prompt(message: &str, context: &[ContextTurn<'_>]) -> String {
    let mut sections = Vec::with_capacity(4);
    sections.push(PREAMBLE.to_string());

    if !context.is_empty() {
        let mut transcript = String::from(TRANSCRIPT_HEADER);
        for turn in context {
            transcript.push_str("\nStudent: ");
            transcript.push_str(turn.user);
            transcript.push_str("\nAssistant: ");
            transcript.push_str(turn.assistant);
        }
        sections.push(transcript);
    }

    sections.push(format!("Current question: {message}"));
    sections.push(CLOSING_INSTRUCTION.to_string());

    sections.join("\n\n")
}
