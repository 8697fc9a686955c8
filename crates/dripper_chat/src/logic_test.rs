#[cfg(test)]
mod tests {
    use crate::error::ChatError;
    use crate::logic::*;
    use dripper_common::ChatMessage;
    use serde_json::json;

    fn user(content: &str) -> ChatMessage {
        ChatMessage {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_parse_chat_request_keeps_role_and_content_only() {
        let body = br#"{"messages":[{"role":"user","content":"Hi","name":"jane","id":7}]}"#;
        let request = parse_chat_request(body).unwrap();
        assert_eq!(request.messages, vec![user("Hi")]);

        let forwarded = serde_json::to_value(&request.messages).unwrap();
        assert_eq!(forwarded, json!([{"role": "user", "content": "Hi"}]));
    }

    #[test]
    fn test_parse_chat_request_rejects_malformed_bodies() {
        let bodies: [&[u8]; 4] = [b"not json", b"{}", br#"{"messages":"hello"}"#, b""];
        for body in bodies {
            let err = parse_chat_request(body).unwrap_err();
            assert!(matches!(err, ChatError::InvalidRequest(_)), "{:?}", body);
        }
    }

    #[test]
    fn test_empty_message_list_is_accepted() {
        let request = parse_chat_request(br#"{"messages":[]}"#).unwrap();
        assert!(request.messages.is_empty());
    }

    #[test]
    fn test_openai_request_omits_unset_max_tokens() {
        let messages = vec![user("Hi")];
        let payload = OpenAiChatRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
            max_tokens: None,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"model": "gpt-3.5-turbo", "messages": [{"role": "user", "content": "Hi"}]})
        );

        let payload = OpenAiChatRequest {
            max_tokens: Some(256),
            ..payload
        };
        assert_eq!(serde_json::to_value(&payload).unwrap()["max_tokens"], 256);
    }

    #[test]
    fn test_anthropic_request_always_sends_max_tokens() {
        let messages = vec![user("Hi")];
        let payload = AnthropicMessagesRequest {
            model: "claude-3-opus-20240229",
            max_tokens: 1000,
            messages: &messages,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "model": "claude-3-opus-20240229",
                "max_tokens": 1000,
                "messages": [{"role": "user", "content": "Hi"}]
            })
        );
    }

    #[test]
    fn test_openai_reply_text_uses_first_choice() {
        let response: OpenAiChatResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "first"}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ]
        }))
        .unwrap();
        assert_eq!(openai_reply_text(response).as_deref(), Some("first"));
    }

    #[test]
    fn test_openai_reply_text_handles_missing_content() {
        let no_choices: OpenAiChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(openai_reply_text(no_choices), None);

        let null_content: OpenAiChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert_eq!(openai_reply_text(null_content), None);
    }

    #[test]
    fn test_anthropic_reply_text_uses_first_block() {
        let response: AnthropicMessagesResponse = serde_json::from_value(json!({
            "id": "msg_1",
            "type": "message",
            "content": [
                {"type": "text", "text": "Hello there"},
                {"type": "text", "text": "ignored"}
            ]
        }))
        .unwrap();
        assert_eq!(anthropic_reply_text(response).as_deref(), Some("Hello there"));

        let empty: AnthropicMessagesResponse = serde_json::from_value(json!({"content": []})).unwrap();
        assert_eq!(anthropic_reply_text(empty), None);
    }

    #[test]
    fn test_upstream_error_message_extraction() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(upstream_error_message(body), "Incorrect API key provided");

        assert_eq!(upstream_error_message("  "), "empty response body");
        assert_eq!(upstream_error_message("Bad Gateway"), "Bad Gateway");

        let long = "x".repeat(500);
        assert_eq!(upstream_error_message(&long).len(), 200);
    }
}
