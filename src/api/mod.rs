pub mod spotify;
pub mod mock;
pub mod spotify_auth;

use crate::error::Result;

/// Provider trait: the destination-catalog operations an import run needs.
/// Implementations: spotify::SpotifyProvider and mock::MockProvider.
pub trait Provider {
    /// Search for a track by title and artist. Return the first result's URI, if any.
    fn search_track_uri(&self, title: &str, artist: &str) -> Result<Option<String>>;

    /// Create a new playlist owned by `user_id` and return its remote id.
    fn create_playlist(&self, user_id: &str, name: &str, public: bool) -> Result<String>;

    /// Append URIs to a playlist in one request (batching done by caller).
    fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()>;

    /// Return the provider's name (for logging)
    fn name(&self) -> &str;
}
