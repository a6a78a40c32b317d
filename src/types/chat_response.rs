use serde::{Deserialize, Serialize};

/// The JSON body of a successful `/chat/completions` response.
///
/// Only `choices[0].message.content` is consumed; everything else the
/// provider sends is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    /// The completion choices. Exactly the first one is read.
    pub choices: Vec<Choice>,
}

/// One completion choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Choice {
    /// The assistant message for this choice.
    pub message: ChoiceMessage,
}

/// The assistant message inside a choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceMessage {
    /// The generated reply text.
    pub content: String,
}

impl ChatResponse {
    /// Returns the reply text, when the response carries at least one
    /// choice.
    pub fn reply(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_choice() {
        let json = r#"{
            "choices": [
                {"message": {"content": "I'm doing well, thank you!"}},
                {"message": {"content": "second choice, never read"}}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.reply(), Some("I'm doing well, thank you!"));
    }

    #[test]
    fn tolerates_extra_fields() {
        let json = r#"{
            "id": "cmpl-123",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "hi"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 3, "completion_tokens": 1}
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.reply(), Some("hi"));
    }

    #[test]
    fn empty_choices_has_no_reply() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(response.reply(), None);
    }
}
