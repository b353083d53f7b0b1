use crate::api::Provider;
use crate::error::{Error, Result};
use crate::models::{AppendReport, BatchFailure, Playlist};
use crate::util::batch_count;

/// Create a new, empty destination playlist owned by `user_id`.
///
/// No lookup for an existing playlist of the same name is made, so running
/// an import twice yields two playlists.
pub fn create(provider: &dyn Provider, user_id: &str, name: &str, public: bool) -> Result<Playlist> {
    let id = provider.create_playlist(user_id, name, public)?;
    log::info!("{}: created playlist {} ({})", provider.name(), name, id);
    Ok(Playlist {
        id,
        name: name.to_string(),
        public,
        tracks: Vec::new(),
    })
}

/// Append `uris` to `playlist` in order, at most `batch_size` per request.
///
/// A batch the server rejects is recorded in the report and the remaining
/// batches are still sent; transport errors abort the append.
pub fn append(
    provider: &dyn Provider,
    playlist: &mut Playlist,
    uris: &[String],
    batch_size: usize,
) -> Result<AppendReport> {
    let batch_size = batch_size.max(1);
    log::debug!(
        "{}: appending {} tracks to {} in {} batches",
        provider.name(),
        uris.len(),
        playlist.id,
        batch_count(uris.len(), batch_size)
    );
    let mut report = AppendReport::default();
    for (index, chunk) in uris.chunks(batch_size).enumerate() {
        report.batches += 1;
        match provider.add_tracks(&playlist.id, chunk) {
            Ok(()) => {
                report.added += chunk.len();
                playlist.tracks.extend_from_slice(chunk);
            }
            Err(e @ Error::Api { .. }) => {
                log::warn!(
                    "{}: batch {} ({} tracks) rejected for playlist {}: {}",
                    provider.name(),
                    index,
                    chunk.len(),
                    playlist.id,
                    e
                );
                report.failed.push(BatchFailure {
                    index,
                    uris: chunk.to_vec(),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }
    Ok(report)
}
