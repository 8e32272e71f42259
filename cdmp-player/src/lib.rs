//! cdmp-player library - playback store and terminal client
//!
//! The playback store holds play status, the now-playing track, volume and
//! an ordered queue. All mutation goes through [`store::PlayerAction`].

pub mod client;
pub mod error;
pub mod queue;
pub mod session;
pub mod state;
pub mod store;
pub mod types;

pub use client::IndexClient;
pub use error::{Error, Result};
pub use session::{Command, Outcome, RemoteRequest, Session};
pub use state::PlaybackState;
pub use store::{reduce, PlayerAction, PlayerStore};
pub use types::{PlaySong, PlayStatus, QueueItem};
