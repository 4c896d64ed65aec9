use std::io::{BufRead, BufReader, Lines};
use std::time::Duration;

use tracing::debug;
use ureq::{Agent, AgentBuilder};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{
    ChatCompletionBody, ChatCompletionChunk, ChatCompletionResponse, CompletionRequest,
};

/// Incremental text fragments of a streamed completion, in arrival order
pub type FragmentStream = Box<dyn Iterator<Item = Result<String>>>;

/// The chat-completion boundary: send a prompt with the conversation, get text back
#[cfg_attr(test, mockall::automock)]
pub trait CompletionClient {
    /// Request a completion and wait for the whole text
    fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Request a completion delivered as a sequence of fragments
    fn stream(&self, request: &CompletionRequest) -> Result<FragmentStream>;
}

/// A blocking client for OpenAI-compatible chat completion APIs
pub struct OpenAiClient {
    agent: Agent,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Create a new client with configuration from environment
    pub fn new(config: &Config) -> Self {
        let agent = AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(Duration::from_secs(120))
            .build();

        OpenAiClient {
            agent,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    fn post(&self, request: &CompletionRequest, stream: bool) -> Result<ureq::Response> {
        let body = ChatCompletionBody {
            model: self.model.clone(),
            messages: request.messages(),
            stream,
        };

        debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            turns = request.turns.len(),
            stream,
            "Sending chat completion request"
        );

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_json(&body)?;

        Ok(response)
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let response = self.post(request, false)?;
        let parsed: ChatCompletionResponse = response
            .into_json()
            .map_err(|e| Error::malformed(format!("completion body: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::malformed("completion contained no message content"))
    }

    fn stream(&self, request: &CompletionRequest) -> Result<FragmentStream> {
        let response = self.post(request, true)?;
        let reader = BufReader::new(response.into_reader());
        Ok(Box::new(SseFragments::new(reader)))
    }
}

/// Classification of one line of a server-sent event stream
#[derive(Debug, PartialEq, Eq)]
pub enum StreamLine {
    Fragment(String),
    Done,
    Skip,
}

/// Interpret one line of a streamed chat completion
pub fn parse_stream_line(line: &str) -> Result<StreamLine> {
    let Some(data) = line.trim().strip_prefix("data:") else {
        // blank separators, comments, `event:` lines
        return Ok(StreamLine::Skip);
    };

    let data = data.trim();
    if data == "[DONE]" {
        return Ok(StreamLine::Done);
    }

    let chunk: ChatCompletionChunk = serde_json::from_str(data)
        .map_err(|e| Error::malformed(format!("stream chunk: {e}")))?;

    match chunk.choices.into_iter().next().and_then(|c| c.delta.content) {
        Some(text) if !text.is_empty() => Ok(StreamLine::Fragment(text)),
        _ => Ok(StreamLine::Skip),
    }
}

/// Iterator over the text fragments of a server-sent event body
pub struct SseFragments<R> {
    lines: Lines<R>,
    finished: bool,
}

impl<R: BufRead> SseFragments<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for SseFragments<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            };

            match parse_stream_line(&line) {
                Ok(StreamLine::Fragment(text)) => return Some(Ok(text)),
                Ok(StreamLine::Skip) => continue,
                Ok(StreamLine::Done) => self.finished = true,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn chunk(content: &str) -> String {
        format!(
            r#"data: {{"id":"c1","object":"chat.completion.chunk","choices":[{{"index":0,"delta":{{"content":{}}}}}]}}"#,
            serde_json::to_string(content).unwrap()
        )
    }

    #[test]
    fn test_parse_stream_line_variants() {
        assert_eq!(
            parse_stream_line(&chunk("1. A")).unwrap(),
            StreamLine::Fragment("1. A".to_string())
        );
        assert_eq!(parse_stream_line("data: [DONE]").unwrap(), StreamLine::Done);
        assert_eq!(parse_stream_line("").unwrap(), StreamLine::Skip);
        assert_eq!(parse_stream_line(": keep-alive").unwrap(), StreamLine::Skip);
        assert_eq!(
            parse_stream_line(r#"data: {"choices":[{"index":0,"delta":{"role":"assistant"}}]}"#)
                .unwrap(),
            StreamLine::Skip
        );
    }

    #[test]
    fn test_parse_stream_line_rejects_garbage_payload() {
        let result = parse_stream_line("data: {not json");
        assert!(matches!(result, Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_sse_fragments_in_order_and_stop_at_done() {
        let body = format!(
            "{}\n\n{}\n\n{}\n\ndata: [DONE]\n\n{}\n",
            chunk("1. A - B"),
            chunk("\n💬 "),
            chunk("x"),
            chunk("ignored after done")
        );
        let fragments: Vec<String> = SseFragments::new(Cursor::new(body))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(fragments, vec!["1. A - B", "\n💬 ", "x"]);
    }

    #[test]
    fn test_sse_fragments_stop_after_error() {
        let body = format!("{}\ndata: oops\n{}\n", chunk("one"), chunk("two"));
        let mut fragments = SseFragments::new(Cursor::new(body));
        assert_eq!(fragments.next().unwrap().unwrap(), "one");
        assert!(fragments.next().unwrap().is_err());
        assert!(fragments.next().is_none());
    }
}
