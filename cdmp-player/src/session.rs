//! Terminal session: turns command lines into store actions
//!
//! The session owns the store and the loaded files index. Commands that need
//! the server (`playlist`, `newplaylist`, `albums`, `artists`) are returned
//! to the caller as [`Outcome::Remote`] so that everything here stays
//! synchronous and testable without a network.

use crate::error::{Error, Result};
use crate::queue::{library_queue, new_queue_item, playlist_queue};
use crate::store::{PlayerAction, PlayerStore};
use crate::types::{PlaySong, PlayStatus};
use cdmp_common::models::{FilesIndex, IndexFile, Playlist};
use rand::Rng;
use std::fmt::Write as _;
use tracing::{debug, info};

/// Parsed user command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    Toggle,
    Next,
    Prev,
    Stop,
    Loop(bool),
    Shuffle(bool),
    Volume(u8),
    /// Play a file from the library, queueing the whole library around it
    Song(String),
    Add(String),
    PlayNext(String),
    Jump(String),
    Remove(String),
    Playlist(String),
    NewPlaylist { name: String, file_id: String },
    Albums,
    Artists,
    Library,
    Queue,
    Status,
    Help,
    Quit,
}

/// Network work the caller must perform for a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRequest {
    LoadPlaylist(String),
    CreatePlaylist { name: String, file_id: String },
    ListAlbums,
    ListArtists,
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print
    Output(String),
    /// Needs the index client
    Remote(RemoteRequest),
    Quit,
}

pub const HELP: &str = "\
commands:
  play | pause | toggle      start, pause or flip playback
  next | prev | stop         move through the queue / stop
  loop on|off                repeat the current song on next
  shuffle on|off             pick a random song on next
  vol <0-100>                set volume
  song <file-id>             play a song, queueing the whole library
  add <file-id>              append a song to the queue
  playnext <file-id>         insert a song after the one playing
  jump <item-id>             play a queued item
  remove <item-id>           drop a queued item
  playlist <playlist-id>     replace the queue with a playlist
  newplaylist <name> <file-id>
  library | albums | artists list the index
  queue | status | help | quit";

impl Command {
    /// Parse one input line
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Err(Error::InvalidCommand("empty command".to_string()));
        };
        let args: Vec<&str> = parts.collect();

        let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("play", []) => Command::Play,
            ("pause", []) => Command::Pause,
            ("toggle" | "p", []) => Command::Toggle,
            ("next" | "n", []) => Command::Next,
            ("prev" | "previous", []) => Command::Prev,
            ("stop", []) => Command::Stop,
            ("loop", [flag]) => Command::Loop(parse_flag(flag)?),
            ("shuffle", [flag]) => Command::Shuffle(parse_flag(flag)?),
            ("vol" | "volume", [level]) => Command::Volume(
                level
                    .parse::<u8>()
                    .ok()
                    .filter(|v| *v <= 100)
                    .ok_or_else(|| Error::InvalidCommand(format!("volume must be 0-100, got {}", level)))?,
            ),
            ("song", [id]) => Command::Song(id.to_string()),
            ("add", [id]) => Command::Add(id.to_string()),
            ("playnext", [id]) => Command::PlayNext(id.to_string()),
            ("jump", [id]) => Command::Jump(id.to_string()),
            ("remove" | "rm", [id]) => Command::Remove(id.to_string()),
            ("playlist", [id]) => Command::Playlist(id.to_string()),
            ("newplaylist", [name @ .., file_id]) if !name.is_empty() => Command::NewPlaylist {
                name: name.join(" "),
                file_id: file_id.to_string(),
            },
            ("albums", []) => Command::Albums,
            ("artists", []) => Command::Artists,
            ("library" | "ls", []) => Command::Library,
            ("queue" | "q", []) => Command::Queue,
            ("status" | "s", []) => Command::Status,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => return Err(Error::InvalidCommand(line.trim().to_string())),
        };

        Ok(command)
    }
}

fn parse_flag(flag: &str) -> Result<bool> {
    match flag.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => Err(Error::InvalidCommand(format!("expected on/off, got {}", other))),
    }
}

/// One interactive player session
pub struct Session<R> {
    store: PlayerStore<R>,
    files: Vec<IndexFile>,
    populated: bool,
}

impl<R: Rng> Session<R> {
    pub fn new(store: PlayerStore<R>) -> Self {
        Self {
            store,
            files: Vec::new(),
            populated: false,
        }
    }

    pub fn store(&self) -> &PlayerStore<R> {
        &self.store
    }

    pub fn files(&self) -> &[IndexFile] {
        &self.files
    }

    /// Load the files index; only the first call has any effect
    ///
    /// Returns whether this call populated the session.
    pub fn populate(&mut self, index: &FilesIndex) -> Result<bool> {
        if self.populated {
            debug!("Files index already loaded, ignoring");
            return Ok(false);
        }

        self.files = index.entries()?;
        self.populated = true;
        info!("Loaded {} indexed files", self.files.len());
        Ok(true)
    }

    /// Execute a parsed command
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let status = self.store.state().play_status;

        match command {
            Command::Play if status != PlayStatus::Playing => self.dispatch(PlayerAction::TogglePlay),
            Command::Pause if status == PlayStatus::Playing => self.dispatch(PlayerAction::TogglePlay),
            Command::Play | Command::Pause => Ok(Outcome::Output(self.status_line())),
            Command::Toggle => self.dispatch(PlayerAction::TogglePlay),
            Command::Next => self.dispatch(PlayerAction::NextSong),
            Command::Prev => self.dispatch(PlayerAction::PrevSong),
            Command::Stop => self.dispatch(PlayerAction::StopSong),
            Command::Loop(on) => self.dispatch(PlayerAction::SetIsLoop(on)),
            Command::Shuffle(on) => self.dispatch(PlayerAction::SetIsShuffle(on)),
            Command::Volume(level) => self.dispatch(PlayerAction::SetVolume(level)),
            Command::Song(id) => {
                let file = self.find_file(&id)?.clone();
                let queue = library_queue(&self.files, &file.id, self.store.token());
                self.store.dispatch(PlayerAction::SetQueue(queue));
                self.dispatch(PlayerAction::PlaySong(PlaySong {
                    id: file.id,
                    title: file.file_metadata.song_title,
                    artist: file.file_metadata.song_artist,
                }))
            }
            Command::Add(id) => {
                let item = new_queue_item(self.store.token(), self.find_file(&id)?);
                self.dispatch(PlayerAction::AddToQueue(item))
            }
            Command::PlayNext(id) => {
                let item = new_queue_item(self.store.token(), self.find_file(&id)?);
                let before = self.store.state().queue.len();
                self.store.dispatch(PlayerAction::PlayNext(item));
                if self.store.state().queue.len() == before {
                    return Ok(Outcome::Output("nothing from the queue is playing".to_string()));
                }
                Ok(Outcome::Output(self.queue_listing()))
            }
            Command::Jump(item_id) => self.dispatch(PlayerAction::ChangeSongInQueue(item_id)),
            Command::Remove(item_id) => self.dispatch(PlayerAction::RemoveFromQueue(item_id)),
            Command::Playlist(id) => Ok(Outcome::Remote(RemoteRequest::LoadPlaylist(id))),
            Command::NewPlaylist { name, file_id } => {
                self.find_file(&file_id)?;
                Ok(Outcome::Remote(RemoteRequest::CreatePlaylist { name, file_id }))
            }
            Command::Albums => Ok(Outcome::Remote(RemoteRequest::ListAlbums)),
            Command::Artists => Ok(Outcome::Remote(RemoteRequest::ListArtists)),
            Command::Library => Ok(Outcome::Output(self.library_listing())),
            Command::Queue => Ok(Outcome::Output(self.queue_listing())),
            Command::Status => Ok(Outcome::Output(self.status_line())),
            Command::Help => Ok(Outcome::Output(HELP.to_string())),
            Command::Quit => Ok(Outcome::Quit),
        }
    }

    /// Replace the queue with a playlist's tracks and start from the top
    pub fn load_playlist(&mut self, playlist: &Playlist) -> String {
        let queue = playlist_queue(&self.files, &playlist.playlist_tracks, self.store.token());
        if queue.is_empty() {
            return format!("playlist '{}' has no playable tracks", playlist.playlist_name);
        }

        self.store.dispatch(PlayerAction::SetQueue(queue));
        self.store.dispatch(PlayerAction::SetNowPlayingUrl(String::new()));
        self.store.dispatch(PlayerAction::SetPlayStatus(PlayStatus::Stopped));
        self.store.dispatch(PlayerAction::TogglePlay);
        self.status_line()
    }

    /// One-line summary of the playback state
    pub fn status_line(&self) -> String {
        let state = self.store.state();
        let mut line = format!("[{}]", state.play_status);
        if !state.song_title_label.is_empty() {
            let _ = write!(line, " {} - {}", state.song_title_label, state.song_artist_label);
        }
        let _ = write!(
            line,
            " | vol {} | loop {} | shuffle {}",
            state.volume,
            on_off(state.is_loop),
            on_off(state.is_shuffle)
        );
        line
    }

    /// Queue listing with the current item marked
    pub fn queue_listing(&self) -> String {
        let queue = &self.store.state().queue;
        if queue.is_empty() {
            return "queue is empty".to_string();
        }

        queue
            .iter()
            .enumerate()
            .map(|(i, item)| {
                format!(
                    "{} {:>3}. {} - {} ({})",
                    if item.current { ">" } else { " " },
                    i + 1,
                    item.song_title,
                    item.song_artist,
                    item.item_id
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn library_listing(&self) -> String {
        if self.files.is_empty() {
            return "library is empty".to_string();
        }

        self.files
            .iter()
            .map(|f| {
                format!(
                    "{}  {} - {} [{}]",
                    f.id, f.file_metadata.song_title, f.file_metadata.song_artist, f.file_metadata.song_album
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn find_file(&self, id: &str) -> Result<&IndexFile> {
        self.files
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| Error::UnknownFile(id.to_string()))
    }

    fn dispatch(&mut self, action: PlayerAction) -> Result<Outcome> {
        self.store.dispatch(action);
        Ok(Outcome::Output(self.status_line()))
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
