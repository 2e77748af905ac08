//! Prompt builder: turns a resume into the few-shot conversation sent to the model.

use bytes::Bytes;

use crate::grading::prompts::{render_system_prompt, render_user_preamble, SENTINEL_AUTHOR};
use crate::grading::training::GradingAssets;
use crate::models::conversation::ConversationTurn;

/// Builds the ordered conversation for one grading request:
/// system rubric, one user/assistant pair per training example (S, A, B, C),
/// then the caller's document as the final user turn.
///
/// Pure and deterministic; the document bytes are passed through untouched.
pub fn build_conversation(
    assets: &GradingAssets,
    document: Bytes,
    author_hint: Option<&str>,
) -> Vec<ConversationTurn> {
    let omit_template = author_hint == Some(SENTINEL_AUTHOR);
    let preamble = render_user_preamble(&assets.template_url);

    let mut turns = Vec::with_capacity(2 + assets.examples.len() * 2);
    turns.push(ConversationTurn::System(render_system_prompt(
        &assets.template_url,
        omit_template,
    )));

    for example in &assets.examples {
        turns.push(ConversationTurn::User {
            text: preamble.clone(),
            document: Some(example.document.clone()),
        });
        turns.push(ConversationTurn::Assistant(example.answer.clone()));
    }

    turns.push(ConversationTurn::User {
        text: preamble,
        document: Some(document),
    });

    turns
}
