use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use super::utils::PlaylistNaming;
use super::{Playlist, SongEntry};

/// Why a rename did nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Stored under this (possibly uniquified) name
    Renamed(String),
    BlankName,
    SameName,
    NotFound,
}

/// Session-scoped playlists plus the "current" selection.
///
/// Names are unique and the current pointer is always either `None` or the
/// name of a stored playlist. Playlists keep their creation order, which is
/// the order used to pick a replacement when the current one is deleted.
#[derive(Debug, Clone, Default)]
pub struct PlaylistStore {
    playlists: Vec<Playlist>,
    current: Option<String>,
    auto_counter: u32,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a playlist and make it current, returning the name it was stored under
    pub fn create(&mut self, name_hint: &str, songs: Vec<SongEntry>) -> String {
        self.create_on(Local::now().date_naive(), name_hint, songs)
    }

    /// Like [`create`](Self::create) with an explicit date for synthesized names
    pub fn create_on(&mut self, date: NaiveDate, name_hint: &str, songs: Vec<SongEntry>) -> String {
        let hint = name_hint.trim();
        let base = if hint.is_empty() {
            self.auto_counter += 1;
            PlaylistNaming::auto_name(date, self.auto_counter)
        } else {
            hint.to_string()
        };

        let name = PlaylistNaming::uniquify(&base, |candidate| self.contains(candidate));
        info!(name = %name, songs = songs.len(), "Created playlist");

        self.playlists.push(Playlist {
            name: name.clone(),
            songs,
        });
        self.current = Some(name.clone());
        name
    }

    pub fn rename(&mut self, old: &str, new: &str) -> RenameOutcome {
        let new = new.trim();
        if new.is_empty() {
            return RenameOutcome::BlankName;
        }
        if new == old {
            return RenameOutcome::SameName;
        }
        let Some(index) = self.position(old) else {
            return RenameOutcome::NotFound;
        };

        let name = PlaylistNaming::uniquify(new, |candidate| {
            candidate != old && self.contains(candidate)
        });
        debug!(from = old, to = %name, "Renaming playlist");

        self.playlists[index].name = name.clone();
        if self.current.as_deref() == Some(old) {
            self.current = Some(name.clone());
        }
        RenameOutcome::Renamed(name)
    }

    /// Remove a playlist; deleting the current one selects the first remaining playlist
    pub fn delete(&mut self, name: &str) -> Option<Playlist> {
        let index = self.position(name)?;
        let removed = self.playlists.remove(index);

        if self.current.as_deref() == Some(name) {
            self.current = self.playlists.first().map(|p| p.name.clone());
        }
        debug!(name, current = ?self.current, "Deleted playlist");
        Some(removed)
    }

    /// Make `name` current; unknown names leave the selection as it was
    pub fn select(&mut self, name: &str) -> bool {
        if !self.contains(name) {
            return false;
        }
        self.current = Some(name.to_string());
        true
    }

    pub fn current(&self) -> Option<&Playlist> {
        let name = self.current.as_deref()?;
        self.get(name)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Names in creation order
    pub fn names(&self) -> Vec<&str> {
        self.playlists.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.playlists.iter().position(|p| p.name == name)
    }
}
