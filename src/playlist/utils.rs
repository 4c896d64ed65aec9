use chrono::NaiveDate;

/// Playlist naming utilities
pub struct PlaylistNaming;

impl PlaylistNaming {
    /// Name used when the user gave none, e.g. `2026-10-19 playlist 3`
    pub fn auto_name(date: NaiveDate, counter: u32) -> String {
        format!("{} playlist {}", date.format("%Y-%m-%d"), counter)
    }

    /// Return `name`, or `name (k)` with the smallest k >= 1 that `is_taken` rejects
    pub fn uniquify<F>(name: &str, is_taken: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        if !is_taken(name) {
            return name.to_string();
        }
        (1u32..)
            .map(|k| format!("{name} ({k})"))
            .find(|candidate| !is_taken(candidate))
            .unwrap_or_else(|| name.to_string())
    }
}
