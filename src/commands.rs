use clap::ValueEnum;
use tracing::debug;

use crate::error::{Error, Result};
use crate::playlist::{Feedback, Genre, Persona, Playlist, RenameOutcome};
use crate::session::{SessionState, delete_playlist, record_feedback, rename_current};

pub const HELP: &str = "\
Type how you feel, where you are or what the weather is like, and the DJ will pick songs.

Commands:
  /like N          like song N of the current playlist
  /dislike N       dislike song N of the current playlist
  /list            list playlists (* marks the current one)
  /show [NAME]     show the current or the named playlist
  /select NAME     make NAME the current playlist
  /rename NEW      rename the current playlist
  /delete [NAME]   delete the named or the current playlist
  /persona P       hype | chill | vinyl | indie
  /genre G         any | kpop | ballad | jazz | classical | rnb | hiphop | edm | rock
  /count N         number of songs to ask for (3-30)
  /weather on|off  use the weather in your city
  /city NAME       city for the weather lookup
  /name NAME       name for the next playlist (empty for automatic)
  /taste           show liked and disliked artists
  /reset           clear playlists, feedback and conversation
  /help            show this help
  /quit            leave";

/// A slash command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Rate(Feedback, usize),
    List,
    Show(Option<String>),
    Select(String),
    Rename(String),
    Delete(Option<String>),
    Persona(Persona),
    Genre(Genre),
    Count(u32),
    Weather(bool),
    City(String),
    Name(String),
    Taste,
    Reset,
}

/// Whether the prompt loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Command {
    /// Parse the text after the leading `/`
    pub fn parse(input: &str) -> Result<Command> {
        let input = input.trim();
        let (word, rest) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
        let rest = rest.trim();
        let optional = || (!rest.is_empty()).then(|| rest.to_string());

        let command = match word.to_lowercase().as_str() {
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "like" => Command::Rate(Feedback::Like, parse_position(rest)?),
            "dislike" => Command::Rate(Feedback::Dislike, parse_position(rest)?),
            "list" | "ls" => Command::List,
            "show" => Command::Show(optional()),
            "select" => Command::Select(required(rest, "/select NAME")?),
            "rename" => Command::Rename(required(rest, "/rename NEW")?),
            "delete" | "rm" => Command::Delete(optional()),
            "persona" => Command::Persona(
                Persona::from_str(rest, true).map_err(|_| usage("/persona hype|chill|vinyl|indie"))?,
            ),
            "genre" => Command::Genre(Genre::from_str(rest, true).map_err(|_| {
                usage("/genre any|kpop|ballad|jazz|classical|rnb|hiphop|edm|rock")
            })?),
            "count" => Command::Count(rest.parse().map_err(|_| usage("/count N"))?),
            "weather" => match rest.to_lowercase().as_str() {
                "on" => Command::Weather(true),
                "off" => Command::Weather(false),
                _ => return Err(usage("/weather on|off")),
            },
            "city" => Command::City(rest.to_string()),
            "name" => Command::Name(rest.to_string()),
            "taste" => Command::Taste,
            "reset" | "clear" => Command::Reset,
            other => {
                return Err(Error::invalid_setting(format!(
                    "unknown command '/{other}', try /help"
                )));
            }
        };
        Ok(command)
    }
}

fn usage(text: &str) -> Error {
    Error::invalid_setting(format!("usage: {text}"))
}

fn required(rest: &str, usage_text: &str) -> Result<String> {
    if rest.is_empty() {
        Err(usage(usage_text))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_position(rest: &str) -> Result<usize> {
    rest.parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| usage("/like N or /dislike N, N starting at 1"))
}

/// Apply a command to the session and print what happened
pub fn execute(state: &mut SessionState, command: Command) -> Flow {
    debug!(?command, "Executing command");
    match command {
        Command::Help => println!("{HELP}"),
        Command::Quit => return Flow::Quit,
        Command::Rate(feedback, position) => match record_feedback(state, position, feedback) {
            Some(artist) => {
                let verb = match feedback {
                    Feedback::Like => "👍 Noted, more like",
                    Feedback::Dislike => "👎 Noted, less of",
                };
                println!("{verb} {artist}.");
            }
            None => println!("There is no song {position} in the current playlist."),
        },
        Command::List => {
            if state.playlists.is_empty() {
                println!("No playlists yet. Tell the DJ how you feel!");
            }
            let current = state.playlists.current_name();
            for name in state.playlists.names() {
                let marker = if Some(name) == current { "*" } else { " " };
                let count = state.playlists.get(name).map_or(0, |p| p.songs.len());
                println!("{marker} {name} ({count} songs)");
            }
        }
        Command::Show(name) => {
            let playlist = match name.as_deref() {
                Some(name) => state.playlists.get(name),
                None => state.playlists.current(),
            };
            match playlist {
                Some(playlist) => print_playlist(playlist),
                None => println!("No such playlist."),
            }
        }
        Command::Select(name) => {
            if state.playlists.select(&name) {
                println!("Now playing from '{name}'.");
            } else {
                println!("No playlist named '{name}'. Use /list to see them.");
            }
        }
        Command::Rename(new_name) => match rename_current(state, &new_name) {
            RenameOutcome::Renamed(name) => println!("Renamed to '{name}'."),
            RenameOutcome::BlankName => println!("The new name is empty, nothing changed."),
            RenameOutcome::SameName => println!("That is already its name."),
            RenameOutcome::NotFound => println!("There is no current playlist to rename."),
        },
        Command::Delete(name) => match delete_playlist(state, name.as_deref()) {
            Some(removed) => {
                println!("Deleted '{}'.", removed.name);
                match state.playlists.current_name() {
                    Some(current) => println!("Current playlist is now '{current}'."),
                    None => println!("No playlists left."),
                }
            }
            None => println!("No such playlist."),
        },
        Command::Persona(persona) => {
            state.config.persona = persona;
            println!("{} is on the decks.", persona.display_name());
        }
        Command::Genre(genre) => {
            state.config.genre = genre;
            println!("Genre set to {}.", genre.label());
        }
        Command::Count(count) => match state.config.set_song_count(count) {
            Ok(()) => println!("The DJ will pick {count} songs."),
            Err(e) => println!("{e}"),
        },
        Command::Weather(enabled) => {
            state.config.weather_enabled = enabled;
            match (enabled, state.config.weather_city()) {
                (false, _) => println!("Weather lookup off."),
                (true, Some(city)) => println!("Weather lookup on for {city}."),
                (true, None) => println!("Weather lookup on. Set a city with /city NAME."),
            }
        }
        Command::City(city) => {
            state.config.city = city;
            println!("City set to '{}'.", state.config.city);
        }
        Command::Name(name) => {
            state.config.playlist_name = name;
            if state.config.playlist_name.is_empty() {
                println!("Next playlists get automatic names.");
            } else {
                println!("Next playlist will be called '{}'.", state.config.playlist_name);
            }
        }
        Command::Taste => {
            println!("Liked:    {}", state.taste.liked.summarize());
            println!("Disliked: {}", state.taste.disliked.summarize());
        }
        Command::Reset => {
            state.clear();
            println!("Session cleared.");
        }
    }
    Flow::Continue
}

pub fn print_playlist(playlist: &Playlist) {
    println!("\n🎧 {}", playlist.name);
    println!("{}", "=".repeat(playlist.name.chars().count() + 3));
    println!(
        "   Songs: {} | Unique Artists: {}",
        playlist.songs.len(),
        playlist.artist_count()
    );
    for (i, song) in playlist.songs.iter().enumerate() {
        println!("  {:>2}. {} - {}", i + 1, song.title, song.artist);
        println!("      💬 {}", song.description);
        println!("      🔗 {}", song.search_url());
    }
}
