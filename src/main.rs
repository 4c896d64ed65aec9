use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod client;
mod commands;
mod config;
mod error;
mod models;
mod playlist;
mod session;
mod weather;

#[cfg(test)]
mod playlist_tests;

use crate::client::OpenAiClient;
use crate::commands::{Command, Flow};
use crate::config::load_config;
use crate::playlist::{
    DeliveryMode, Genre, MAX_GENERATION_ATTEMPTS, Persona, SessionConfig,
};
use crate::session::{SessionState, submit_message};
use crate::weather::WeatherClient;

#[derive(Parser)]
#[command(name = "playlist-dj")]
#[command(about = "Chat with a DJ that recommends songs and keeps your session playlists")]
#[command(version)]
struct Args {
    /// Path to a JSON file with session settings (flags below override it)
    #[arg(short = 's', long = "settings")]
    settings_file: Option<String>,

    /// DJ personality
    #[arg(short = 'p', long, value_enum)]
    persona: Option<Persona>,

    /// Genre filter
    #[arg(short = 'g', long, value_enum)]
    genre: Option<Genre>,

    /// Number of songs to ask for (3-30)
    #[arg(short = 'n', long = "count")]
    song_count: Option<u32>,

    /// Look up the weather in --city and tell the DJ about it
    #[arg(short = 'w', long = "weather")]
    weather: bool,

    /// City for the weather lookup
    #[arg(long)]
    city: Option<String>,

    /// Name for generated playlists (automatic when empty)
    #[arg(long = "name")]
    playlist_name: Option<String>,

    /// Wait for whole replies instead of streaming them
    #[arg(long = "no-stream")]
    no_stream: bool,

    /// Verbose mode - log requests and retries to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Quiet mode - only log errors
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    // Load configuration from .env
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {e}");
            eprintln!("The DJ cannot start without access to the completion API.");
            return Err(e.into());
        }
    };
    tracing::info!(model = %config.model, base_url = %config.base_url, "Configuration loaded");

    let session_config = build_session_config(&args).context("Invalid session settings")?;
    let client = OpenAiClient::new(&config);
    let weather = WeatherClient::new(config.weather_api_key.clone());
    let mode = if args.no_stream {
        DeliveryMode::Whole
    } else {
        DeliveryMode::Streaming
    };

    let mut state = SessionState::new(session_config);
    print_banner(&state);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        print!("\nyou> ");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        if let Some(command) = text.strip_prefix('/') {
            match Command::parse(command) {
                Ok(command) => {
                    if commands::execute(&mut state, command) == Flow::Quit {
                        break;
                    }
                }
                Err(e) => println!("{e}"),
            }
            continue;
        }

        run_message(&mut state, &client, &weather, mode, text);
    }

    println!("\n🎧 Thanks for listening!");
    Ok(())
}

/// Settings file first, then command-line flags on top
fn build_session_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.settings_file {
        Some(path) => SessionConfig::load_from_file(path)
            .with_context(|| format!("Failed to load settings from '{path}'"))?,
        None => SessionConfig::default(),
    };

    if let Some(persona) = args.persona {
        config.persona = persona;
    }
    if let Some(genre) = args.genre {
        config.genre = genre;
    }
    if let Some(count) = args.song_count {
        config.set_song_count(count)?;
    }
    if args.weather {
        config.weather_enabled = true;
    }
    if let Some(city) = &args.city {
        config.city = city.clone();
    }
    if let Some(name) = &args.playlist_name {
        config.playlist_name = name.clone();
    }
    Ok(config)
}

fn init_tracing(args: &Args) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_banner(state: &SessionState) {
    let config = &state.config;
    println!("🎧 {} is on the decks", config.persona.display_name());
    println!(
        "   Genre: {} | Songs: {} | Weather: {}",
        config.genre.label(),
        config.song_count,
        config.weather_city().unwrap_or("off")
    );
    println!("Tell me your mood, your situation or the weather. /help for commands.");
}

/// One message round trip; failures are reported and the session carries on
fn run_message(
    state: &mut SessionState,
    client: &OpenAiClient,
    weather: &WeatherClient,
    mode: DeliveryMode,
    text: &str,
) {
    print!("\ndj> ");
    let mut shown_attempt = 0;
    let mut shown_len = 0;
    let on_partial = |attempt: usize, partial: &str| {
        if attempt != shown_attempt {
            if shown_attempt != 0 {
                println!(
                    "\n\n↻ The DJ lost count, asking again (attempt {attempt}/{MAX_GENERATION_ATTEMPTS})...\n"
                );
            }
            shown_attempt = attempt;
            shown_len = 0;
        }
        print!("{}", &partial[shown_len..]);
        shown_len = partial.len();
        let _ = io::stdout().flush();
    };

    match submit_message(state, client, weather, mode, text, on_partial) {
        Ok(report) => {
            println!();
            if let Some(name) = &report.playlist {
                if let Some(playlist) = state.playlists.get(name) {
                    commands::print_playlist(playlist);
                }
            }
            if report.needs_regenerate() {
                println!(
                    "\n⚠️ Asked for {} songs but got {} after {} attempts. Send your message again to regenerate.",
                    report.outcome.requested,
                    report.outcome.songs.len(),
                    report.outcome.attempts
                );
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Message failed");
            eprintln!("\n✗ The DJ could not answer: {e}");
        }
    }
}
