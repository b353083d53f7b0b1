use super::Provider;
use crate::error::{Error, Result};
use crate::models::SourceTrack;
use log::info;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPlaylist {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub public: bool,
}

/// In-memory provider used in tests. Searches hit a fixed catalog and every
/// call is recorded so assertions can inspect what a run did.
#[derive(Default)]
pub struct MockProvider {
    catalog: HashMap<(String, String), String>,
    failing_batches: HashSet<usize>,
    searches: RefCell<Vec<SourceTrack>>,
    created: RefCell<Vec<CreatedPlaylist>>,
    batches: RefCell<Vec<(String, Vec<String>)>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(mut self, title: &str, artist: &str, uri: &str) -> Self {
        self.catalog
            .insert((title.to_string(), artist.to_string()), uri.to_string());
        self
    }

    /// Make the n-th (zero-based) `add_tracks` call answer with a server error.
    pub fn failing_batch(mut self, index: usize) -> Self {
        self.failing_batches.insert(index);
        self
    }

    pub fn searches(&self) -> Vec<SourceTrack> {
        self.searches.borrow().clone()
    }

    pub fn created(&self) -> Vec<CreatedPlaylist> {
        self.created.borrow().clone()
    }

    /// Every `add_tracks` call as (playlist id, uris), including failed ones.
    pub fn batches(&self) -> Vec<(String, Vec<String>)> {
        self.batches.borrow().clone()
    }
}

impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn search_track_uri(&self, title: &str, artist: &str) -> Result<Option<String>> {
        info!("MockProvider: search {} - {}", title, artist);
        self.searches.borrow_mut().push(SourceTrack::new(title, artist));
        Ok(self
            .catalog
            .get(&(title.to_string(), artist.to_string()))
            .cloned())
    }

    fn create_playlist(&self, user_id: &str, name: &str, public: bool) -> Result<String> {
        info!("MockProvider: create_playlist {} for {}", name, user_id);
        let mut created = self.created.borrow_mut();
        let id = format!("mock-playlist-{}", created.len() + 1);
        created.push(CreatedPlaylist {
            id: id.clone(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            public,
        });
        Ok(id)
    }

    fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        info!("MockProvider: add_tracks {} -> {} tracks", playlist_id, uris.len());
        let mut batches = self.batches.borrow_mut();
        let index = batches.len();
        batches.push((playlist_id.to_string(), uris.to_vec()));
        if self.failing_batches.contains(&index) {
            return Err(Error::Api {
                context: "add tracks",
                status: 500,
                body: "mock failure".into(),
            });
        }
        Ok(())
    }
}
