//! Conversation message types.
//!
//! Wire shape follows the agent framework's message history dump: each
//! message carries a `kind` and a list of parts tagged by `part_kind`.

use serde::{Deserialize, Serialize};

/// Who a rendered line is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Agent,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speaker::User => write!(f, "user"),
            Speaker::Agent => write!(f, "agent"),
        }
    }
}

/// Direction of a message in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Sent to the model: prompts, tool returns, retries.
    Request,
    /// Produced by the model: text and tool calls.
    Response,
}

/// One message in a conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    pub parts: Vec<MessagePart>,
}

impl Message {
    pub fn request(parts: Vec<MessagePart>) -> Self {
        Self {
            kind: MessageKind::Request,
            parts,
        }
    }

    pub fn response(parts: Vec<MessagePart>) -> Self {
        Self {
            kind: MessageKind::Response,
            parts,
        }
    }
}

/// A single part of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "part_kind", rename_all = "kebab-case")]
pub enum MessagePart {
    UserPrompt {
        content: UserContent,
    },
    Text {
        content: String,
    },
    ToolCall {
        tool_name: String,
        #[serde(default)]
        args: serde_json::Value,
        #[serde(default)]
        tool_call_id: Option<String>,
    },
    ToolReturn {
        tool_name: String,
        content: serde_json::Value,
        #[serde(default)]
        tool_call_id: Option<String>,
    },
    RetryPrompt {
        content: serde_json::Value,
        #[serde(default)]
        tool_name: Option<String>,
    },
    SystemPrompt {
        content: String,
    },
}

impl MessagePart {
    pub fn user(text: impl Into<String>) -> Self {
        MessagePart::UserPrompt {
            content: UserContent::Text(text.into()),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        MessagePart::Text {
            content: text.into(),
        }
    }
}

/// User prompt content: a plain string, or a list mixing text and media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserContent {
    Text(String),
    Items(Vec<UserContentItem>),
}

/// An entry in a multi-part user prompt. Only text items are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserContentItem {
    Text(String),
    Other(serde_json::Value),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_history_dump() {
        let raw = json!([
            {
                "kind": "request",
                "parts": [
                    {"part_kind": "system-prompt", "content": "You are helpful."},
                    {"part_kind": "user-prompt", "content": "Create a table"}
                ]
            },
            {
                "kind": "response",
                "parts": [
                    {"part_kind": "tool-call", "tool_name": "run_sql", "args": {"sql_query": "CREATE TABLE t (x)"}, "tool_call_id": "c1"},
                    {"part_kind": "text", "content": "Done."}
                ]
            }
        ]);

        let messages: Vec<Message> = serde_json::from_value(raw).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].kind, MessageKind::Request);
        assert!(matches!(messages[0].parts[0], MessagePart::SystemPrompt { .. }));
        assert_eq!(messages[0].parts[1], MessagePart::user("Create a table"));
        match &messages[1].parts[0] {
            MessagePart::ToolCall { tool_name, args, .. } => {
                assert_eq!(tool_name, "run_sql");
                assert_eq!(args["sql_query"], "CREATE TABLE t (x)");
            }
            other => panic!("unexpected part: {:?}", other),
        }
    }

    #[test]
    fn test_multi_item_user_content() {
        let part: MessagePart = serde_json::from_value(json!({
            "part_kind": "user-prompt",
            "content": ["look at this", {"kind": "image-url", "url": "https://example.com/a.png"}]
        }))
        .unwrap();

        let MessagePart::UserPrompt { content: UserContent::Items(items) } = part else {
            panic!("expected multi-item user prompt");
        };
        assert_eq!(items[0], UserContentItem::Text("look at this".into()));
        assert!(matches!(items[1], UserContentItem::Other(_)));
    }

    #[test]
    fn test_part_kind_tag_on_serialize() {
        let value = serde_json::to_value(MessagePart::text("hi")).unwrap();
        assert_eq!(value, json!({"part_kind": "text", "content": "hi"}));
    }
}
