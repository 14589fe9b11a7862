//! Listening-history endpoints backed by the Spotify Web API.
//!
//! Every request exchanges the stored refresh token for a fresh access token
//! first; no token caching. The upstream track objects are trimmed down to
//! the handful of fields the frontend renders.

use crate::api::utils::json_response;
use crate::errors::GatewayError;
use crate::http::{fetch_typed, upstream_host};
use crate::{AppState, GatewayBody};
use hyper::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Artist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AlbumImage {
    url: String,
}

#[derive(Debug, Deserialize)]
struct Album {
    #[serde(default)]
    images: Vec<AlbumImage>,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    #[serde(default)]
    spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TrackObject {
    name: String,
    #[serde(default)]
    artists: Vec<Artist>,
    album: Album,
    external_urls: ExternalUrls,
}

#[derive(Debug, Deserialize)]
struct PlayHistoryItem {
    track: TrackObject,
    played_at: String,
}

#[derive(Debug, Deserialize)]
struct RecentlyPlayedResponse {
    #[serde(default)]
    items: Vec<PlayHistoryItem>,
}

#[derive(Debug, Deserialize)]
struct TopTracksResponse {
    #[serde(default)]
    items: Vec<TrackObject>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Track {
    title: String,
    artist: String,
    album_image_url: Option<String>,
    song_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    played_at: Option<String>,
}

fn map_track(track: TrackObject, played_at: Option<String>) -> Track {
    Track {
        title: track.name,
        artist: track
            .artists
            .into_iter()
            .map(|a| a.name)
            .collect::<Vec<_>>()
            .join(", "),
        album_image_url: track.album.images.into_iter().next().map(|i| i.url),
        song_url: track.external_urls.spotify,
        played_at,
    }
}

async fn access_token(state: &AppState) -> Result<String, GatewayError> {
    let spotify = &state.config.spotify;
    let upstream = upstream_host(&spotify.token_url);
    let timeout = Duration::from_secs(spotify.timeout_secs);
    let builder = state
        .http
        .post(&spotify.token_url)
        .basic_auth(&spotify.client_id, Some(&spotify.client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", spotify.refresh_token.as_str()),
        ]);
    let token: TokenResponse = fetch_typed(builder, &upstream, timeout).await?;
    Ok(token.access_token)
}

fn failure_response(error: &GatewayError) -> Result<Response<GatewayBody>, GatewayError> {
    tracing::error!(%error, "spotify request failed");
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &json!({"error": "Failed to fetch Spotify data"}),
    )
}

pub async fn recently_played(state: &AppState) -> Result<Response<GatewayBody>, GatewayError> {
    let spotify = &state.config.spotify;
    let url = format!("{}/me/player/recently-played?limit=20", spotify.api_url);
    let upstream = upstream_host(&url);
    let timeout = Duration::from_secs(spotify.timeout_secs);

    let result: Result<RecentlyPlayedResponse, GatewayError> = async {
        let token = access_token(state).await?;
        fetch_typed(state.http.get(&url).bearer_auth(token), &upstream, timeout).await
    }
    .await;

    match result {
        Ok(data) => {
            let tracks: Vec<Track> = data
                .items
                .into_iter()
                .map(|item| map_track(item.track, Some(item.played_at)))
                .collect();
            json_response(StatusCode::OK, &json!({"tracks": tracks}))
        }
        Err(error) => failure_response(&error),
    }
}

pub async fn top_tracks(state: &AppState) -> Result<Response<GatewayBody>, GatewayError> {
    let spotify = &state.config.spotify;
    let url = format!(
        "{}/me/top/tracks?limit=20&time_range=short_term",
        spotify.api_url
    );
    let upstream = upstream_host(&url);
    let timeout = Duration::from_secs(spotify.timeout_secs);

    let result: Result<TopTracksResponse, GatewayError> = async {
        let token = access_token(state).await?;
        fetch_typed(state.http.get(&url).bearer_auth(token), &upstream, timeout).await
    }
    .await;

    match result {
        Ok(data) => {
            let tracks: Vec<Track> = data
                .items
                .into_iter()
                .map(|track| map_track(track, None))
                .collect();
            json_response(StatusCode::OK, &json!({"tracks": tracks}))
        }
        Err(error) => failure_response(&error),
    }
}
