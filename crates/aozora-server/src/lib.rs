//! `aozora-server` (library surface).
//!
//! The primary entrypoint is the `aozora-server` binary. The router and
//! application state live here so integration tests can stand up the full
//! app against fixture catalogs without going through the binary.

use std::sync::Arc;

use aozora_core::{ErrorBody, PassageBody, TextSource};
use aozora_local::{select_passage, TextLoader};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

pub mod catalog;

pub use catalog::Catalog;

/// Substituted whenever the pipeline yields nothing usable, so the player
/// always gets a prompt. Opening lines of 吾輩は猫である.
pub const FALLBACK_PASSAGE: &str = "吾輩は猫である。名前はまだ無い。どこで生れたかとんと見当がつかぬ。何でも薄暗いじめじめした所でニャーニャー泣いていた事だけは記憶している。";

/// Loaded texts shorter than this are treated as failed extractions and
/// replaced by [`FALLBACK_PASSAGE`].
const MIN_TEXT_CHARS: usize = 100;

pub struct AppState<S> {
    pub catalog: Catalog,
    pub loader: TextLoader<S>,
}

pub fn app<S: TextSource + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/game", get(game_page))
        .route("/api/text", get(api_text::<S>))
        .with_state(state)
}

async fn index_page() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn game_page() -> Html<&'static str> {
    Html(include_str!("../assets/game.html"))
}

#[derive(Debug, Deserialize)]
struct TextParams {
    book: Option<String>,
}

/// `GET /api/text?book=<key>`: a short sentence-aligned passage as JSON.
///
/// `book` defaults to `random`; `random` resolves to a uniformly chosen
/// catalog key. Unknown keys get a structured 404. Fetch failures never
/// surface to the player: the fallback passage is substituted instead.
async fn api_text<S: TextSource>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<TextParams>,
) -> Response {
    let mut key = params.book.unwrap_or_else(|| "random".to_string());
    if key == "random" {
        if let Some(picked) = state.catalog.random_key() {
            key = picked.to_string();
        }
    }
    let Some(url) = state.catalog.url_for(&key) else {
        return (StatusCode::NOT_FOUND, Json(ErrorBody::unknown_book(&key))).into_response();
    };

    let text = match state.loader.load(url).await {
        Some(text) if text.chars().count() >= MIN_TEXT_CHARS => text,
        _ => FALLBACK_PASSAGE.to_string(),
    };

    Json(PassageBody {
        text: select_passage(&text),
    })
    .into_response()
}
