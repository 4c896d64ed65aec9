use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MIN_SONG_COUNT: u32 = 3;
pub const MAX_SONG_COUNT: u32 = 30;

/// The DJ personalities the prompt can speak with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Trendy club DJ with a hype voice
    #[default]
    Hype,
    /// Late-night radio host for slow hours
    Chill,
    /// Veteran crate digger who loves deep cuts
    Vinyl,
    /// Friendly indie blogger
    Indie,
}

impl Persona {
    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::Hype => "DJ Hype",
            Persona::Chill => "Midnight Radio",
            Persona::Vinyl => "Crate Digger",
            Persona::Indie => "Indie Scout",
        }
    }

    /// Personality text injected into the system prompt
    pub fn description(&self) -> &'static str {
        match self {
            Persona::Hype => {
                "You are a trendy, high-energy club DJ. You talk like a hype host on the mic, \
                 friendly and playful, and you love a good drop."
            }
            Persona::Chill => {
                "You are a calm late-night radio host. You speak softly and warmly, \
                 like you are keeping someone company at 2am."
            }
            Persona::Vinyl => {
                "You are a veteran record collector and DJ. You know the history behind every track \
                 and enjoy slipping in deep cuts next to the classics."
            }
            Persona::Indie => {
                "You are an enthusiastic indie music blogger. You get excited about fresh artists \
                 and describe songs with vivid, casual language."
            }
        }
    }
}

/// Genre filter for the recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[default]
    Any,
    #[value(name = "kpop")]
    Kpop,
    Ballad,
    Jazz,
    Classical,
    #[value(name = "rnb")]
    Rnb,
    #[value(name = "hiphop")]
    Hiphop,
    Edm,
    Rock,
}

impl Genre {
    pub fn label(&self) -> &'static str {
        match self {
            Genre::Any => "any",
            Genre::Kpop => "K-Pop",
            Genre::Ballad => "Ballad",
            Genre::Jazz => "Jazz",
            Genre::Classical => "Classical",
            Genre::Rnb => "R&B",
            Genre::Hiphop => "Hip-Hop",
            Genre::Edm => "EDM",
            Genre::Rock => "Rock",
        }
    }
}

/// Everything the user can configure for one interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub persona: Persona,
    pub genre: Genre,
    pub song_count: u32, // Requested number of songs, MIN_SONG_COUNT..=MAX_SONG_COUNT
    pub weather_enabled: bool,
    pub city: String,
    pub playlist_name: String, // Blank means an automatic name
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persona: Persona::default(),
            genre: Genre::default(),
            song_count: 5,
            weather_enabled: false,
            city: String::new(),
            playlist_name: String::new(),
        }
    }
}

impl SessionConfig {
    /// Reject values outside the recognized configuration surface
    pub fn validate(&self) -> Result<()> {
        check_song_count(self.song_count)
    }

    /// Change the requested song count, leaving the config untouched when out of range
    pub fn set_song_count(&mut self, count: u32) -> Result<()> {
        check_song_count(count)?;
        self.song_count = count;
        Ok(())
    }

    /// City to look weather up for, if the lookup is enabled and a city is given
    pub fn weather_city(&self) -> Option<&str> {
        let city = self.city.trim();
        (self.weather_enabled && !city.is_empty()).then_some(city)
    }

    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn load_from_file(path: &str) -> Result<SessionConfig> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<SessionConfig> {
        let config: SessionConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_song_count(count: u32) -> Result<()> {
    if (MIN_SONG_COUNT..=MAX_SONG_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(Error::invalid_setting(format!(
            "song count must be between {MIN_SONG_COUNT} and {MAX_SONG_COUNT}, got {count}"
        )))
    }
}
