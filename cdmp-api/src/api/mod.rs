//! HTTP API handlers for cdmp-api

pub mod auth;
pub mod buildinfo;
pub mod health;
pub mod indexes;
pub mod playlists;
pub mod schema;

pub use auth::auth_middleware;
pub use buildinfo::{get_build_info, BuildInfo};
pub use health::health_routes;
pub use indexes::{get_album, get_albums, get_artists, get_files, get_playlist, get_playlists};
pub use playlists::post_playlists;
pub use schema::{FieldKind, RequestSchema, SchemaError};
