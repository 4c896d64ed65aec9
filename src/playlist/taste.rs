use tracing::debug;

/// Summary used when nothing has been recorded yet
pub const NO_ARTISTS: &str = "none";

const SUMMARY_SIZE: usize = 5;

/// Occurrence counter over artist names, remembering first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TasteTally {
    counts: Vec<(String, usize)>,
}

impl TasteTally {
    /// Count one more occurrence of `artist`; blank names are ignored
    pub fn record(&mut self, artist: &str) {
        let artist = artist.trim();
        if artist.is_empty() {
            return;
        }
        match self.counts.iter_mut().find(|(name, _)| name == artist) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((artist.to_string(), 1)),
        }
    }

    pub fn count(&self, artist: &str) -> usize {
        self.counts
            .iter()
            .find(|(name, _)| name == artist.trim())
            .map_or(0, |(_, count)| *count)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Top artists by count, ties kept in first-seen order
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        // sort_by is stable, so insertion order survives among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Comma-joined top five, or `none`
    pub fn summarize(&self) -> String {
        if self.is_empty() {
            return NO_ARTISTS.to_string();
        }
        self.top(SUMMARY_SIZE)
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Which way the listener voted on a song
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Like,
    Dislike,
}

/// Liked and disliked artist tallies fed by feedback; they only ever grow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TasteTracker {
    pub liked: TasteTally,
    pub disliked: TasteTally,
}

impl TasteTracker {
    pub fn record_like(&mut self, artist: &str) {
        self.record(Feedback::Like, artist);
    }

    pub fn record_dislike(&mut self, artist: &str) {
        self.record(Feedback::Dislike, artist);
    }

    pub fn record(&mut self, feedback: Feedback, artist: &str) {
        debug!(?feedback, artist, "Recording feedback");
        match feedback {
            Feedback::Like => self.liked.record(artist),
            Feedback::Dislike => self.disliked.record(artist),
        }
    }
}
