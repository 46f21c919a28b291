//! Plain-text rendering of a conversation.

use crate::types::{Message, MessagePart, Speaker, UserContent, UserContentItem};

/// Horizontal rule printed after a batch of messages.
pub const RULE: &str = "---";

/// Pull the human-visible text out of a list of parts.
///
/// User prompts and agent text are kept; tool traffic, retries and system
/// prompts are dropped.
pub fn extract_parts(parts: &[MessagePart]) -> Vec<(Speaker, &str)> {
    let mut out = Vec::new();
    for part in parts {
        match part {
            MessagePart::UserPrompt { content } => match content {
                UserContent::Text(text) => out.push((Speaker::User, text.as_str())),
                UserContent::Items(items) => {
                    for item in items {
                        if let UserContentItem::Text(text) = item {
                            out.push((Speaker::User, text.as_str()));
                        }
                    }
                }
            },
            MessagePart::Text { content } => out.push((Speaker::Agent, content.as_str())),
            MessagePart::ToolCall { .. }
            | MessagePart::ToolReturn { .. }
            | MessagePart::RetryPrompt { .. }
            | MessagePart::SystemPrompt { .. } => {}
        }
    }
    out
}

fn render_block(speaker: Speaker, text: &str) -> String {
    match speaker {
        Speaker::User => format!("👤 User:\n{}", text),
        Speaker::Agent => format!("🤖 Agent:\n{}", text),
    }
}

/// Render one message as zero or more blocks separated by blank lines.
pub fn render_message(message: &Message) -> String {
    extract_parts(&message.parts)
        .into_iter()
        .map(|(speaker, text)| render_block(speaker, text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render a batch of messages followed by a rule.
pub fn render_messages<'a>(messages: impl IntoIterator<Item = &'a Message>) -> String {
    let mut blocks: Vec<String> = messages
        .into_iter()
        .map(render_message)
        .filter(|block| !block.is_empty())
        .collect();
    blocks.push(RULE.to_string());
    blocks.join("\n\n")
}
