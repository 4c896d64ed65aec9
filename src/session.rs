use tracing::{debug, info};

use crate::client::CompletionClient;
use crate::error::{Error, Result};
use crate::models::{ChatMessage, CompletionRequest};
use crate::playlist::{
    DeliveryMode, Feedback, GenerationOutcome, Playlist, PlaylistGenerator, PlaylistStore,
    PromptBuilder, RenameOutcome, SessionConfig, TasteTracker,
};
use crate::weather::WeatherProvider;

/// Everything one listener's session owns. Handlers take it by `&mut`.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub config: SessionConfig,
    pub playlists: PlaylistStore,
    pub taste: TasteTracker,
    pub history: Vec<ChatMessage>,
    startup_config: SessionConfig,
}

impl SessionState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config: config.clone(),
            playlists: PlaylistStore::new(),
            taste: TasteTracker::default(),
            history: Vec::new(),
            startup_config: config,
        }
    }

    /// Drop playlists, feedback and conversation; configuration returns to its startup values
    pub fn clear(&mut self) {
        info!("Clearing session state");
        *self = Self::new(self.startup_config.clone());
    }
}

/// What a submitted message produced
#[derive(Debug, Clone)]
pub struct SubmitReport {
    /// Name the songs were stored under; `None` when nothing parsed
    pub playlist: Option<String>,
    pub weather: Option<String>,
    pub outcome: GenerationOutcome,
}

impl SubmitReport {
    /// The kept attempt came back short or long; the listener should regenerate
    pub fn needs_regenerate(&self) -> bool {
        !self.outcome.is_complete()
    }
}

/// Ask the DJ for songs matching `utterance` and store what comes back
pub fn submit_message<C, W, F>(
    state: &mut SessionState,
    client: &C,
    weather: &W,
    mode: DeliveryMode,
    utterance: &str,
    on_partial: F,
) -> Result<SubmitReport>
where
    C: CompletionClient + ?Sized,
    W: WeatherProvider + ?Sized,
    F: FnMut(usize, &str),
{
    let utterance = utterance.trim();
    if utterance.is_empty() {
        return Err(Error::invalid_setting("message is empty"));
    }

    let weather_description = state
        .config
        .weather_city()
        .and_then(|city| weather.lookup(city));

    let liked = state.taste.liked.summarize();
    let disliked = state.taste.disliked.summarize();
    let system = PromptBuilder::new(state.config.persona, state.config.genre, state.config.song_count)
        .with_weather(weather_description.as_deref())
        .with_taste(&liked, &disliked)
        .build();

    let mut turns = state.history.clone();
    turns.push(ChatMessage::user(utterance));
    let request = CompletionRequest { system, turns };

    debug!(
        persona = ?state.config.persona,
        genre = ?state.config.genre,
        requested = state.config.song_count,
        weather = ?weather_description,
        "Submitting message"
    );

    let outcome = PlaylistGenerator::new(client, mode).generate(
        &request,
        state.config.song_count as usize,
        on_partial,
    )?;

    state.history.push(ChatMessage::user(utterance));
    state.history.push(ChatMessage::assistant(outcome.reply.clone()));

    let playlist = if outcome.songs.is_empty() {
        None
    } else {
        Some(
            state
                .playlists
                .create(&state.config.playlist_name, outcome.songs.clone()),
        )
    };

    Ok(SubmitReport {
        playlist,
        weather: weather_description,
        outcome,
    })
}

/// Like or dislike the song at 1-based `position` of the current playlist.
/// Returns the artist that was recorded, or `None` when there is no such song.
pub fn record_feedback(
    state: &mut SessionState,
    position: usize,
    feedback: Feedback,
) -> Option<String> {
    let artist = state
        .playlists
        .current()?
        .songs
        .get(position.checked_sub(1)?)?
        .artist
        .clone();
    state.taste.record(feedback, &artist);
    Some(artist)
}

/// Rename whichever playlist is current
pub fn rename_current(state: &mut SessionState, new_name: &str) -> RenameOutcome {
    match state.playlists.current_name().map(str::to_string) {
        Some(current) => state.playlists.rename(&current, new_name),
        None => RenameOutcome::NotFound,
    }
}

/// Delete the named playlist, or the current one when no name is given
pub fn delete_playlist(state: &mut SessionState, name: Option<&str>) -> Option<Playlist> {
    let target = match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => state.playlists.current_name()?.to_string(),
    };
    state.playlists.delete(&target)
}
