//! Song catalog handlers.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};

use super::{ErrorResponse, HandlerError, bad_request, db_error, enrichment_error};
use crate::api::AppState;
use crate::db::utils::format_release_date;
use crate::db::{Database, NewSong, PageRequest, Song, SongFilter, SongPatch, SongRepository};
use crate::enrichment::MetadataApi;

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Identifies one song by group and title
#[derive(Debug, Deserialize, ToSchema)]
pub struct SongRequest {
    #[schema(example = "Muse")]
    pub group: String,
    #[schema(example = "Supermassive Black Hole")]
    pub song: String,
}

/// Partial update of a song. Omitted fields keep their stored value.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditSongRequest {
    #[schema(example = "Muse")]
    pub group: String,
    #[schema(example = "Supermassive Black Hole")]
    pub song: String,
    /// Release date in format DD.MM.YYYY
    #[schema(example = "16.07.2006")]
    pub release_date: Option<String>,
    /// Lyrics with couplets separated by a blank line
    pub text: Option<String>,
    #[schema(example = "https://www.youtube.com/watch?v=Xsp3_a-PMTw")]
    pub link: Option<String>,
}

impl EditSongRequest {
    fn into_patch(self) -> (String, String, SongPatch) {
        (
            self.group,
            self.song,
            SongPatch {
                release_date: self.release_date,
                text: self.text,
                link: self.link,
            },
        )
    }
}

/// Paging and filters for the song listing
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SongListQuery {
    /// Current page, starting at 1
    #[param(example = 1)]
    pub page: i64,
    /// Number of songs on the page
    #[param(example = 10)]
    pub items: i64,
    #[param(example = "Muse")]
    pub group: Option<String>,
    #[param(example = "Supermassive Black Hole")]
    pub song: Option<String>,
    /// Release date in format DD.MM.YYYY
    #[param(example = "16.07.2006")]
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl SongListQuery {
    fn into_parts(self) -> (SongFilter, PageRequest) {
        (
            SongFilter {
                group: self.group,
                song: self.song,
                release_date: self.release_date,
                text: self.text,
                link: self.link,
            },
            PageRequest::new(self.page, self.items),
        )
    }
}

/// Selects one couplet of a song
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CoupletQuery {
    #[param(example = "Muse")]
    pub group: String,
    #[param(example = "Supermassive Black Hole")]
    pub song: String,
    /// Couplet number, starting at 1
    #[param(example = 1)]
    pub couplet: i64,
}

/// Song row as returned by the listing
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SongResponse {
    #[schema(example = "Muse")]
    pub group: String,
    #[schema(example = "Supermassive Black Hole")]
    pub song: String,
    #[schema(example = "16.07.2006")]
    pub release_date: String,
    pub text: String,
    #[schema(example = "https://www.youtube.com/watch?v=Xsp3_a-PMTw")]
    pub link: String,
}

impl From<Song> for SongResponse {
    fn from(s: Song) -> Self {
        Self {
            group: s.group,
            song: s.song,
            release_date: format_release_date(s.release_date),
            text: s.text,
            link: s.link,
        }
    }
}

/// One page of songs
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemsResponse {
    pub items: Vec<SongResponse>,
}

/// Text of a single couplet
#[derive(Debug, Serialize, ToSchema)]
pub struct CoupletResponse {
    #[schema(example = "Ooh\nYou set my soul alight")]
    pub text: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Add a song
///
/// Fetches release date, lyrics and link from the metadata API and stores
/// the song. The group is created on first use.
#[utoipa::path(
    post,
    path = "/addsong",
    tag = "songs",
    request_body = SongRequest,
    responses(
        (status = 200, description = "Song added"),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 500, description = "Metadata API or storage failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn add_song<D: Database, M: MetadataApi + 'static>(
    State(state): State<AppState<D, M>>,
    payload: Result<Json<SongRequest>, JsonRejection>,
) -> Result<StatusCode, HandlerError> {
    let Json(req) = payload.map_err(bad_request)?;

    let meta = state
        .metadata()
        .fetch(&req.group, &req.song)
        .await
        .map_err(enrichment_error)?;

    let song = NewSong {
        group: req.group,
        song: req.song,
        release_date: meta.release_date,
        text: meta.text,
        link: meta.link,
    };
    state.db().songs().insert(&song).await.map_err(db_error)?;

    info!(group = %song.group, song = %song.song, "Added song");
    Ok(StatusCode::OK)
}

/// Delete a song
///
/// Deleting a song that does not exist succeeds as long as the group exists.
#[utoipa::path(
    post,
    path = "/deletesong",
    tag = "songs",
    request_body = SongRequest,
    responses(
        (status = 200, description = "Song deleted"),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_song<D: Database, M: MetadataApi + 'static>(
    State(state): State<AppState<D, M>>,
    payload: Result<Json<SongRequest>, JsonRejection>,
) -> Result<StatusCode, HandlerError> {
    let Json(req) = payload.map_err(bad_request)?;

    state
        .db()
        .songs()
        .delete(&req.group, &req.song)
        .await
        .map_err(db_error)?;

    info!(group = %req.group, song = %req.song, "Deleted song");
    Ok(StatusCode::OK)
}

/// Edit a song
///
/// Overwrites release date, text and link with whichever of them are given.
#[utoipa::path(
    post,
    path = "/editsong",
    tag = "songs",
    request_body = EditSongRequest,
    responses(
        (status = 200, description = "Song edited"),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn edit_song<D: Database, M: MetadataApi + 'static>(
    State(state): State<AppState<D, M>>,
    payload: Result<Json<EditSongRequest>, JsonRejection>,
) -> Result<StatusCode, HandlerError> {
    let Json(req) = payload.map_err(bad_request)?;
    let (group, song, patch) = req.into_patch();

    state
        .db()
        .songs()
        .edit(&group, &song, &patch)
        .await
        .map_err(db_error)?;

    info!(%group, %song, "Edited song");
    Ok(StatusCode::OK)
}

/// List songs
///
/// Returns one page of songs matching every given filter.
#[utoipa::path(
    get,
    path = "/getdata",
    tag = "songs",
    params(SongListQuery),
    responses(
        (status = 200, description = "Page of songs", body = ItemsResponse),
        (status = 400, description = "Malformed query", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_data<D: Database, M: MetadataApi + 'static>(
    State(state): State<AppState<D, M>>,
    query: Result<Query<SongListQuery>, QueryRejection>,
) -> Result<Json<ItemsResponse>, HandlerError> {
    let Query(query) = query.map_err(bad_request)?;
    let (filter, page) = query.into_parts();

    let songs = state
        .db()
        .songs()
        .list(&filter, page)
        .await
        .map_err(db_error)?;

    info!(count = songs.len(), "Listed songs");
    Ok(Json(ItemsResponse {
        items: songs.into_iter().map(SongResponse::from).collect(),
    }))
}

/// Get one couplet of a song's lyrics
#[utoipa::path(
    get,
    path = "/getsongtext",
    tag = "songs",
    params(CoupletQuery),
    responses(
        (status = 200, description = "Couplet text", body = CoupletResponse),
        (status = 400, description = "Malformed query", body = ErrorResponse),
        (status = 404, description = "Group or song not found", body = ErrorResponse),
        (status = 500, description = "Couplet out of range or storage failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_song_text<D: Database, M: MetadataApi + 'static>(
    State(state): State<AppState<D, M>>,
    query: Result<Query<CoupletQuery>, QueryRejection>,
) -> Result<Json<CoupletResponse>, HandlerError> {
    let Query(query) = query.map_err(bad_request)?;

    let text = state
        .db()
        .songs()
        .couplet(&query.group, &query.song, query.couplet)
        .await
        .map_err(db_error)?;

    Ok(Json(CoupletResponse { text }))
}
