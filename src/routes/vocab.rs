use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::response::{ok, paginated, AppError};
use crate::state::AppState;
use crate::validation::validate_max_rank;
use crate::vocab::{RankBounds, VocabEntry};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vocab))
        .route("/stats", get(vocab_stats))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListVocabQuery {
    page: Option<u64>,
    per_page: Option<u64>,
    max_rank: Option<u32>,
}

impl ListVocabQuery {
    fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    fn per_page(&self) -> u64 {
        self.per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

async fn list_vocab(
    Query(query): Query<ListVocabQuery>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    validate_max_rank(query.max_rank)
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", msg))?;

    let page = query.page();
    let per_page = query.per_page();
    let offset = (page - 1).saturating_mul(per_page);

    let vocab = state.vocab();
    let total = vocab.pool_size(query.max_rank) as u64;

    let items: Vec<VocabEntry> = vocab
        .iter_within(query.max_rank)
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(per_page as usize)
        .cloned()
        .collect();

    Ok(paginated(items, total, page, per_page))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VocabStats {
    total: usize,
    #[serde(flatten)]
    bounds: Option<RankBounds>,
}

async fn vocab_stats(State(state): State<AppState>) -> impl IntoResponse {
    ok(VocabStats {
        total: state.vocab().len(),
        bounds: state.vocab().rank_bounds(),
    })
}
