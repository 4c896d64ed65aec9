use urlencoding::encode;

/// One recommended song as parsed from the DJ's reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongEntry {
    pub title: String,
    pub artist: String,
    pub description: String,
}

impl SongEntry {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            description: description.into(),
        }
    }

    /// YouTube search link for this song (a search, never a direct video link)
    pub fn search_url(&self) -> String {
        let query = format!("{} {}", self.title, self.artist);
        let terms: Vec<String> = query
            .split_whitespace()
            .map(|word| encode(word).into_owned())
            .collect();
        format!(
            "https://www.youtube.com/results?search_query={}",
            terms.join("+")
        )
    }
}

/// A named playlist held by the session store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub name: String,
    pub songs: Vec<SongEntry>,
}

impl Playlist {
    /// Count of distinct artists, compared case-insensitively
    pub fn artist_count(&self) -> usize {
        let mut artists: Vec<String> = self
            .songs
            .iter()
            .map(|song| song.artist.to_lowercase())
            .collect();
        artists.sort();
        artists.dedup();
        artists.len()
    }
}
