use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of the conversation sent to the completion API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// What the completion boundary receives: the system instruction plus the ordered turns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub turns: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// All messages in wire order, system instruction first
    pub fn messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.turns.len() + 1);
        messages.push(ChatMessage::system(self.system.clone()));
        messages.extend(self.turns.iter().cloned());
        messages
    }
}

/// Request body for the chat completions endpoint
#[derive(Debug, Serialize)]
pub struct ChatCompletionBody {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
}

/// Response structure for a non-streamed chat completion
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub content: Option<String>,
}

/// One server-sent chunk of a streamed chat completion
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunk {
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChunkChoice {
    pub delta: ChunkDelta,
}

#[derive(Debug, Deserialize)]
pub struct ChunkDelta {
    pub content: Option<String>,
}

/// Response structure for the current-weather endpoint
#[derive(Debug, Deserialize)]
pub struct WeatherResponse {
    pub weather: Vec<WeatherCondition>,
    pub main: Option<WeatherReadings>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherCondition {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct WeatherReadings {
    pub temp: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_put_system_first() {
        let request = CompletionRequest {
            system: "be a DJ".to_string(),
            turns: vec![ChatMessage::user("rainy night"), ChatMessage::assistant("1. A - B")],
        };
        let messages = request.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], ChatMessage::system("be a DJ"));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[2].role, Role::Assistant);
    }

    #[test]
    fn test_body_omits_stream_flag_when_disabled() {
        let body = ChatCompletionBody {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage::user("hi")],
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("stream").is_none());
        assert_eq!(json["messages"][0]["role"], "user");

        let streamed = ChatCompletionBody { stream: true, ..body };
        assert_eq!(serde_json::to_value(&streamed).unwrap()["stream"], true);
    }

    #[test]
    fn test_weather_response_deserializes() {
        let json = r#"{"weather":[{"id":500,"main":"Rain","description":"light rain"}],"main":{"temp":11.4,"humidity":80},"name":"Seoul"}"#;
        let parsed: WeatherResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.weather[0].description, "light rain");
        assert_eq!(parsed.main.unwrap().temp, 11.4);
    }
}
