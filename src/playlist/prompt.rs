use super::parser::DESCRIPTION_MARKER;
use super::taste::NO_ARTISTS;
use super::{Genre, Persona};

/// Builder for the DJ's system instruction
///
/// ```ignore
/// let prompt = PromptBuilder::new(Persona::Chill, Genre::Jazz, 5)
///     .with_weather(Some("light rain, 11°C"))
///     .with_taste("Norah Jones", "none")
///     .build();
/// ```
pub struct PromptBuilder<'a> {
    persona: Persona,
    genre: Genre,
    song_count: u32,
    weather: Option<&'a str>,
    liked: &'a str,
    disliked: &'a str,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(persona: Persona, genre: Genre, song_count: u32) -> Self {
        Self {
            persona,
            genre,
            song_count,
            weather: None,
            liked: NO_ARTISTS,
            disliked: NO_ARTISTS,
        }
    }

    /// Current weather description, if any was found
    pub fn with_weather(mut self, weather: Option<&'a str>) -> Self {
        self.weather = weather.map(str::trim).filter(|w| !w.is_empty());
        self
    }

    /// Top liked/disliked artist summaries from the taste tracker
    pub fn with_taste(mut self, liked: &'a str, disliked: &'a str) -> Self {
        self.liked = liked;
        self.disliked = disliked;
        self
    }

    /// Example reply block that the reply parser accepts
    pub fn format_example() -> String {
        format!("1. Title - Artist\n{DESCRIPTION_MARKER} description")
    }

    pub fn build(&self) -> String {
        let genre_rule = match self.genre {
            Genre::Any => "- Any genre is fine, pick what fits the mood best".to_string(),
            genre => format!("- Stick to the '{}' genre", genre.label()),
        };

        let weather_line = match self.weather {
            Some(weather) => format!("Current weather where the listener is: {weather}."),
            None => "Current weather where the listener is: unknown.".to_string(),
        };

        format!(
            "{persona}\n\
             Recommend music that fits the listener's mood, situation and weather.\n\
             {weather_line}\n\
             \n\
             Rules:\n\
             {genre_rule}\n\
             - Recommend exactly {count} songs\n\
             - Give one short reason per song, in your DJ voice\n\
             - Never paste direct video links\n\
             - Artists the listener liked: {liked}\n\
             - Artists the listener disliked (avoid them): {disliked}\n\
             \n\
             Output format, for every song, with nothing else on these lines:\n\
             <n>. <title> - <artist>\n\
             {marker} <one-line description>\n\
             \n\
             Example:\n\
             {example}\n",
            persona = self.persona.description(),
            count = self.song_count,
            liked = self.liked,
            disliked = self.disliked,
            marker = DESCRIPTION_MARKER,
            example = Self::format_example(),
        )
    }
}
