// End-to-end checks of a session: prompt, completion, parse, store, feedback

use crate::client::MockCompletionClient;
use crate::models::Role;
use crate::playlist::{DeliveryMode, Feedback, Genre, Persona, RenameOutcome, SessionConfig};
use crate::session::{SessionState, delete_playlist, record_feedback, rename_current, submit_message};
use crate::weather::MockWeatherProvider;

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_SONGS: &str =
        "Rainy vibes coming up!\n1. A - B\n💬 x\n2. C - D\n💬 y\n3. E - F\n💬 z\nEnjoy!";

    fn config(count: u32) -> SessionConfig {
        SessionConfig {
            persona: Persona::Chill,
            genre: Genre::Jazz,
            song_count: count,
            ..SessionConfig::default()
        }
    }

    fn no_weather() -> MockWeatherProvider {
        let mut weather = MockWeatherProvider::new();
        weather.expect_lookup().never();
        weather
    }

    fn replying(reply: &'static str) -> MockCompletionClient {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .returning(move |_| Ok(reply.to_string()));
        client
    }

    #[test]
    fn test_three_song_scenario_stores_auto_named_playlist() {
        let mut state = SessionState::new(config(3));
        let client = replying(THREE_SONGS);

        let report = submit_message(
            &mut state,
            &client,
            &no_weather(),
            DeliveryMode::Whole,
            "rainy night, alone",
            |_, _| {},
        )
        .unwrap();

        assert!(!report.needs_regenerate());
        let name = report.playlist.expect("playlist stored");
        assert!(name.ends_with(" playlist 1"), "unexpected name {name}");
        assert_eq!(state.playlists.current_name(), Some(name.as_str()));

        let songs: Vec<(&str, &str, &str)> = state
            .playlists
            .current()
            .unwrap()
            .songs
            .iter()
            .map(|s| (s.title.as_str(), s.artist.as_str(), s.description.as_str()))
            .collect();
        assert_eq!(songs, vec![("A", "B", "x"), ("C", "D", "y"), ("E", "F", "z")]);
    }

    #[test]
    fn test_prompt_carries_weather_taste_and_history() {
        let mut state = SessionState::new(SessionConfig {
            weather_enabled: true,
            city: "Seoul".to_string(),
            ..config(3)
        });
        state.taste.record_like("Norah Jones");
        state.taste.record_dislike("Nickelback");

        let mut weather = MockWeatherProvider::new();
        weather
            .expect_lookup()
            .withf(|city| city == "Seoul")
            .times(2)
            .returning(|_| Some("light rain, 11°C".to_string()));

        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .withf(|request| {
                request.system.contains("light rain, 11°C")
                    && request.system.contains("liked: Norah Jones")
                    && request.system.contains("(avoid them): Nickelback")
                    && request.system.contains("'Jazz' genre")
            })
            .returning(|_| Ok(THREE_SONGS.to_string()));

        submit_message(&mut state, &client, &weather, DeliveryMode::Whole, "first", |_, _| {})
            .unwrap();
        assert_eq!(state.history.len(), 2);

        client.checkpoint();
        client
            .expect_complete()
            .withf(|request| {
                request.turns.len() == 3
                    && request.turns[0].content == "first"
                    && request.turns[1].role == Role::Assistant
                    && request.turns[2].content == "second"
            })
            .times(1)
            .returning(|_| Ok(THREE_SONGS.to_string()));

        let report =
            submit_message(&mut state, &client, &weather, DeliveryMode::Whole, "second", |_, _| {})
                .unwrap();
        assert_eq!(report.weather.as_deref(), Some("light rain, 11°C"));
        assert_eq!(state.history.len(), 4);
        assert_eq!(state.playlists.len(), 2);
    }

    #[test]
    fn test_weather_failure_degrades_to_unknown() {
        let mut state = SessionState::new(SessionConfig {
            weather_enabled: true,
            city: "Atlantis".to_string(),
            ..config(3)
        });
        let mut weather = MockWeatherProvider::new();
        weather.expect_lookup().times(1).returning(|_| None);

        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .withf(|request| request.system.contains("listener is: unknown."))
            .times(1)
            .returning(|_| Ok(THREE_SONGS.to_string()));

        let report =
            submit_message(&mut state, &client, &weather, DeliveryMode::Whole, "hi", |_, _| {})
                .unwrap();
        assert!(report.weather.is_none());
        assert!(report.playlist.is_some());
    }

    #[test]
    fn test_short_replies_exhaust_retries_and_flag_regenerate() {
        let mut state = SessionState::new(config(3));
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .times(3)
            .returning(|_| Ok("1. A - B\n💬 x\n2. C - D\n💬 y".to_string()));

        let report =
            submit_message(&mut state, &client, &no_weather(), DeliveryMode::Whole, "go", |_, _| {})
                .unwrap();
        assert!(report.needs_regenerate());
        assert_eq!(report.outcome.attempts, 3);
        assert_eq!(state.playlists.current().unwrap().songs.len(), 2);
    }

    #[test]
    fn test_unparseable_reply_creates_no_playlist() {
        let mut state = SessionState::new(config(3));
        let client = replying("Sorry, I can only chat about music!");

        let report =
            submit_message(&mut state, &client, &no_weather(), DeliveryMode::Whole, "hey", |_, _| {})
                .unwrap();
        assert!(report.playlist.is_none());
        assert!(state.playlists.is_empty());
        assert_eq!(state.history.len(), 2);
    }

    #[test]
    fn test_empty_message_is_rejected_before_any_call() {
        let mut state = SessionState::new(config(3));
        let mut client = MockCompletionClient::new();
        client.expect_complete().never();

        let result =
            submit_message(&mut state, &client, &no_weather(), DeliveryMode::Whole, "  ", |_, _| {});
        assert!(result.is_err());
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_feedback_rename_delete_and_clear() {
        let mut state = SessionState::new(SessionConfig {
            playlist_name: "Rainy".to_string(),
            ..config(3)
        });
        let client = replying(THREE_SONGS);
        for _ in 0..2 {
            submit_message(&mut state, &client, &no_weather(), DeliveryMode::Whole, "go", |_, _| {})
                .unwrap();
        }
        assert_eq!(state.playlists.names(), vec!["Rainy", "Rainy (1)"]);

        assert_eq!(record_feedback(&mut state, 2, Feedback::Like).as_deref(), Some("D"));
        assert_eq!(record_feedback(&mut state, 2, Feedback::Like).as_deref(), Some("D"));
        assert_eq!(record_feedback(&mut state, 3, Feedback::Dislike).as_deref(), Some("F"));
        assert_eq!(record_feedback(&mut state, 0, Feedback::Like), None);
        assert_eq!(record_feedback(&mut state, 4, Feedback::Like), None);
        assert_eq!(state.taste.liked.summarize(), "D");
        assert_eq!(state.taste.disliked.summarize(), "F");

        assert_eq!(rename_current(&mut state, "  "), RenameOutcome::BlankName);
        assert_eq!(
            rename_current(&mut state, "Storm"),
            RenameOutcome::Renamed("Storm".to_string())
        );
        assert_eq!(state.playlists.current_name(), Some("Storm"));

        let removed = delete_playlist(&mut state, None).unwrap();
        assert_eq!(removed.name, "Storm");
        assert_eq!(removed.songs.len(), 3);
        assert_eq!(state.playlists.current_name(), Some("Rainy"));

        state.config.song_count = 10;
        state.clear();
        assert!(state.playlists.is_empty());
        assert!(state.taste.liked.is_empty());
        assert!(state.history.is_empty());
        assert_eq!(state.config.song_count, 3);
        assert_eq!(rename_current(&mut state, "x"), RenameOutcome::NotFound);
        assert!(delete_playlist(&mut state, None).is_none());
    }
}
