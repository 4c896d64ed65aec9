use std::sync::LazyLock;

use regex::Regex;

use super::SongEntry;

/// Marker that opens the description line under every song line
pub const DESCRIPTION_MARKER: &str = "💬";

/// `<n>. <title> - <artist>`
static SONG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.\s(?P<title>.+?)\s-\s(?P<artist>.+)$").expect("song line pattern is valid")
});

/// Where the scan is in the two-line song block
enum ScanState {
    SeekNumber,
    ExpectDescription { title: String, artist: String },
}

/// Turns the DJ's free-text reply into song entries.
///
/// A song counts only when its numbered line is immediately followed by a
/// description line starting with [`DESCRIPTION_MARKER`]. A numbered line
/// without its description is dropped, not kept as a bare entry. Everything
/// else (DJ chatter, blank lines, headings) is ignored. Parsing never fails;
/// the worst case is an empty list.
pub struct ReplyParser;

impl ReplyParser {
    pub fn parse(reply: &str) -> Vec<SongEntry> {
        let mut songs = Vec::new();
        let mut state = ScanState::SeekNumber;

        for raw in reply.lines() {
            let line = raw.trim();

            if let ScanState::ExpectDescription { title, artist } = state {
                state = ScanState::SeekNumber;
                if let Some(description) = line.strip_prefix(DESCRIPTION_MARKER) {
                    songs.push(SongEntry::new(title, artist, description.trim()));
                    continue;
                }
                // the pending song is dropped; this line gets its own chance below
            }

            if let Some((title, artist)) = Self::match_song_line(line) {
                state = ScanState::ExpectDescription { title, artist };
            }
        }

        songs
    }

    fn match_song_line(line: &str) -> Option<(String, String)> {
        let captures = SONG_LINE.captures(line)?;
        let title = captures.name("title")?.as_str().trim();
        let artist = captures.name("artist")?.as_str().trim();
        if title.is_empty() || artist.is_empty() {
            return None;
        }
        Some((title.to_string(), artist.to_string()))
    }
}
