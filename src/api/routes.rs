//! API route configuration.

use axum::Router;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, CoupletResponse, EditSongRequest, ErrorResponse, HealthResponse, ItemsResponse,
    SongRequest, SongResponse,
};
use super::state::AppState;
use crate::db::Database;
use crate::enrichment::MetadataApi;

/// Register handlers that are generic over the storage backend and the
/// metadata client, applying the turbofish to each of them.
macro_rules! routes {
    ($D:ty, $M:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D, $M>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Song Catalog API",
        version = "0.1.0",
        description = "Music library with lyrics enrichment and couplet lookup",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::add_song,
        handlers::delete_song,
        handlers::edit_song,
        handlers::get_data,
        handlers::get_song_text,
    ),
    components(
        schemas(
            HealthResponse,
            SongRequest,
            EditSongRequest,
            SongResponse,
            ItemsResponse,
            CoupletResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "Liveness"),
        (name = "songs", description = "Song catalog")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D, M>(state: AppState<D, M>) -> Router
where
    D: Database,
    M: MetadataApi + 'static,
{
    let api = ApiDoc::openapi();

    let system_routes = Router::new().route("/health", get(handlers::health));

    let song_routes = routes!(D, M => {
        post "/addsong" => handlers::add_song,
        post "/deletesong" => handlers::delete_song,
        post "/editsong" => handlers::edit_song,
        get "/getdata" => handlers::get_data,
        get "/getsongtext" => handlers::get_song_text,
    });

    system_routes
        .merge(song_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
