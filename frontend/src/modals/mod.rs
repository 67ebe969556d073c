//! Dialogs that perform an API call on submit.

mod add_media;
mod media;
mod playlist;

pub use add_media::AddMediaModal;
pub use media::MediaModal;
pub use playlist::PlaylistModal;
