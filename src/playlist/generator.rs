use tracing::{info, warn};

use super::{ReplyParser, SongEntry};
use crate::client::CompletionClient;
use crate::error::Result;
use crate::models::CompletionRequest;

/// Upper bound on completion calls for one generation
pub const MAX_GENERATION_ATTEMPTS: usize = 3;

/// How the completion text is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    #[default]
    Streaming,
    Whole,
}

/// Result of the retry loop: the songs of the attempt that was kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub songs: Vec<SongEntry>,
    pub reply: String,
    pub attempts: usize,
    pub requested: usize,
}

impl GenerationOutcome {
    /// Did the kept attempt deliver exactly the requested number of songs
    pub fn is_complete(&self) -> bool {
        self.songs.len() == self.requested
    }
}

/// Main playlist generator: completion call, parse, retry until the count matches
pub struct PlaylistGenerator<'a, C: CompletionClient + ?Sized> {
    client: &'a C,
    mode: DeliveryMode,
}

impl<'a, C: CompletionClient + ?Sized> PlaylistGenerator<'a, C> {
    pub fn new(client: &'a C, mode: DeliveryMode) -> Self {
        Self { client, mode }
    }

    /// Run up to [`MAX_GENERATION_ATTEMPTS`] completions.
    ///
    /// Stops at the first attempt whose reply parses to exactly `requested`
    /// songs. When none does, the last attempt is returned as is, even if an
    /// earlier one came closer. `on_partial` receives the attempt number and
    /// the text received so far after every fragment.
    pub fn generate<F>(
        &self,
        request: &CompletionRequest,
        requested: usize,
        mut on_partial: F,
    ) -> Result<GenerationOutcome>
    where
        F: FnMut(usize, &str),
    {
        let mut attempt = 1;
        loop {
            let reply = self.fetch_reply(request, |partial| on_partial(attempt, partial))?;
            let songs = ReplyParser::parse(&reply);
            let outcome = GenerationOutcome {
                songs,
                reply,
                attempts: attempt,
                requested,
            };

            if outcome.is_complete() {
                info!(attempt, songs = outcome.songs.len(), "Generation matched requested count");
                return Ok(outcome);
            }

            warn!(
                attempt,
                parsed = outcome.songs.len(),
                requested,
                "Reply did not match requested song count"
            );
            if attempt >= MAX_GENERATION_ATTEMPTS {
                return Ok(outcome);
            }
            attempt += 1;
        }
    }

    fn fetch_reply<F>(&self, request: &CompletionRequest, mut on_partial: F) -> Result<String>
    where
        F: FnMut(&str),
    {
        match self.mode {
            DeliveryMode::Whole => {
                let reply = self.client.complete(request)?;
                on_partial(&reply);
                Ok(reply)
            }
            DeliveryMode::Streaming => accumulate_stream(self.client.stream(request)?, on_partial),
        }
    }
}

/// Append fragments in arrival order, surfacing the buffer after each one
pub fn accumulate_stream<I, F>(fragments: I, mut on_partial: F) -> Result<String>
where
    I: IntoIterator<Item = Result<String>>,
    F: FnMut(&str),
{
    let mut buffer = String::new();
    for fragment in fragments {
        buffer.push_str(&fragment?);
        on_partial(&buffer);
    }
    Ok(buffer)
}
