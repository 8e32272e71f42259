//! cdmp-player - terminal playback client
//!
//! Fetches the files index from the API server once, then reads commands
//! from stdin and dispatches them to the playback store.

use anyhow::{Context, Result};
use cdmp_player::session::HELP;
use cdmp_player::{Command, IndexClient, Outcome, PlayerStore, RemoteRequest, Session};
use clap::Parser;
use rand::Rng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Command-line arguments for cdmp-player
#[derive(Parser, Debug)]
#[command(name = "cdmp-player")]
#[command(about = "Terminal music player for a cdmp index server")]
#[command(version)]
struct Args {
    /// API server base URL
    #[arg(short, long, default_value = "http://127.0.0.1:5780", env = "CDMP_SERVER")]
    server: String,

    /// Bearer token issued by `cdmp-api --issue-token`
    #[arg(short, long, env = "CDMP_TOKEN")]
    token: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cdmp_player=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Connecting to {}", args.server);

    let client = IndexClient::new(&args.server, &args.token);
    let mut session = Session::new(PlayerStore::new(&args.token));

    let index = client
        .fetch_files()
        .await
        .context("Failed to load the files index")?;
    session.populate(&index)?;

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let outcome = match Command::parse(&line).and_then(|command| session.execute(command)) {
            Ok(outcome) => outcome,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match outcome {
            Outcome::Output(text) => println!("{}", text),
            Outcome::Remote(request) => match run_remote(&client, &mut session, request).await {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    warn!("Request failed: {}", e);
                    println!("{}", e);
                }
            },
            Outcome::Quit => break,
        }
    }

    info!("Session ended");
    Ok(())
}

/// Perform the network part of a command and report the result
async fn run_remote<R: Rng>(
    client: &IndexClient,
    session: &mut Session<R>,
    request: RemoteRequest,
) -> cdmp_player::Result<String> {
    match request {
        RemoteRequest::LoadPlaylist(id) => {
            match client.fetch_playlist(&id).await? {
                Some(playlist) => Ok(session.load_playlist(&playlist)),
                None => Ok("no playlists saved yet".to_string()),
            }
        }
        RemoteRequest::CreatePlaylist { name, file_id } => {
            let playlist = client.create_playlist(&name, vec![file_id]).await?;
            Ok(format!(
                "created playlist '{}' ({})",
                playlist.playlist_name, playlist.playlistid
            ))
        }
        RemoteRequest::ListAlbums => {
            let albums = client.fetch_albums().await?;
            Ok(list_entries(&albums, "album_name"))
        }
        RemoteRequest::ListArtists => {
            let artists = client.fetch_artists().await?;
            Ok(list_entries(&artists, "artist_name"))
        }
    }
}

fn list_entries(entries: &serde_json::Map<String, serde_json::Value>, name_field: &str) -> String {
    if entries.is_empty() {
        return "nothing indexed".to_string();
    }

    entries
        .iter()
        .map(|(id, entry)| {
            let name = entry.get(name_field).and_then(|v| v.as_str()).unwrap_or("?");
            format!("{}  {}", id, name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
