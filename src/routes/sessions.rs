use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::Router;
use serde::{Deserialize, Deserializer, Serialize};

use crate::extractors::{JsonBody, OptionalJsonBody};
use crate::response::{created, ok, AppError};
use crate::session::scoring::xp_gain;
use crate::session::stats::{level, progress_to_next_level, SessionStats};
use crate::session::{SessionEntry, SessionState};
use crate::state::AppState;
use crate::validation::{is_valid_session_id, validate_max_rank};
use crate::vocab::VocabEntry;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/:id", get(get_session).delete(end_session))
        .route("/:id/reveal", post(reveal_card))
        .route("/:id/answer", post(answer_card))
        .route("/:id/filter", put(update_filter))
        .route("/:id/reset", post(reset_session))
        .route("/:id/stats", get(session_stats))
        .route("/:id/history", get(session_history))
}

/// The shown card. The translation is withheld until the card is revealed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CardView {
    rank: u32,
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
}

impl CardView {
    fn of(card: &VocabEntry, revealed: bool) -> Self {
        Self {
            rank: card.rank,
            source: card.source_word.clone(),
            target: revealed.then(|| card.target_word.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView {
    session_id: String,
    card: CardView,
    revealed: bool,
    xp_total: u64,
    level: u64,
    progress_to_next_level: f64,
    max_rank: Option<u32>,
}

impl SessionView {
    fn of(session_id: &str, entry: &SessionEntry) -> Self {
        let state = &entry.state;
        Self {
            session_id: session_id.to_string(),
            card: CardView::of(state.current_card(), state.is_revealed()),
            revealed: state.is_revealed(),
            xp_total: state.xp_total(),
            level: level(state.xp_total()),
            progress_to_next_level: progress_to_next_level(state.xp_total()),
            max_rank: entry.max_rank,
        }
    }
}

fn checked_id(id: String) -> Result<String, AppError> {
    if is_valid_session_id(&id) {
        Ok(id)
    } else {
        Err(AppError::not_found("SESSION_NOT_FOUND", "Session not found"))
    }
}

fn checked_max_rank(max_rank: Option<u32>) -> Result<Option<u32>, AppError> {
    validate_max_rank(max_rank)
        .map(|_| max_rank)
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", msg))
}

/// `maxRank` absent: the configured default. `maxRank: null`: unbounded.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CreateSessionRequest {
    #[serde(deserialize_with = "present")]
    max_rank: Option<Option<u32>>,
}

// Only runs when the field is present, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

async fn create_session(
    State(state): State<AppState>,
    OptionalJsonBody(req): OptionalJsonBody<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let max_rank = checked_max_rank(req.max_rank.unwrap_or(state.config().max_rank))?;

    let first = SessionState::start(state.vocab(), max_rank, &mut rand::thread_rng())?;
    let entry = SessionEntry::new(first, max_rank);
    let session_id = state.sessions().insert(entry.clone()).await;

    tracing::info!(session_id = %session_id, ?max_rank, "Session started");
    Ok(created(SessionView::of(&session_id, &entry)))
}

async fn get_session(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let id = checked_id(id)?;
    let view = state
        .sessions()
        .with_session(&id, |entry| Ok(SessionView::of(&id, entry)))
        .await?;
    Ok(ok(view))
}

async fn reveal_card(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let id = checked_id(id)?;
    let view = state
        .sessions()
        .with_session(&id, |entry| {
            entry.state.reveal();
            Ok(SessionView::of(&id, entry))
        })
        .await?;
    Ok(ok(view))
}

#[derive(Debug, Deserialize)]
struct AnswerRequest {
    known: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnswerResponse {
    answered: CardView,
    known: bool,
    xp_gain: u64,
    session: SessionView,
}

async fn answer_card(
    Path(id): Path<String>,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = checked_id(id)?;
    let vocab = state.vocab();
    let response = state
        .sessions()
        .with_session(&id, |entry| {
            let answered = entry.answer(req.known, vocab, &mut rand::thread_rng())?;
            Ok(AnswerResponse {
                answered: CardView::of(&answered, true),
                known: req.known,
                xp_gain: xp_gain(req.known),
                session: SessionView::of(&id, entry),
            })
        })
        .await?;

    tracing::debug!(
        session_id = %id,
        known = req.known,
        xp_total = response.session.xp_total,
        "Answer scored"
    );
    Ok(ok(response))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FilterRequest {
    max_rank: Option<u32>,
}

async fn update_filter(
    Path(id): Path<String>,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<FilterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = checked_id(id)?;
    let max_rank = checked_max_rank(req.max_rank)?;
    let vocab = state.vocab();
    let view = state
        .sessions()
        .with_session(&id, |entry| {
            entry.set_filter(max_rank, vocab)?;
            Ok(SessionView::of(&id, entry))
        })
        .await?;

    tracing::info!(session_id = %id, ?max_rank, "Rank filter updated");
    Ok(ok(view))
}

async fn reset_session(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let id = checked_id(id)?;
    let vocab = state.vocab();
    let view = state
        .sessions()
        .with_session(&id, |entry| {
            entry.reset(vocab, &mut rand::thread_rng())?;
            Ok(SessionView::of(&id, entry))
        })
        .await?;

    tracing::info!(session_id = %id, "Session reset");
    Ok(ok(view))
}

async fn session_stats(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let id = checked_id(id)?;
    let stats = state
        .sessions()
        .with_session(&id, |entry| Ok(SessionStats::from_state(&entry.state)))
        .await?;
    Ok(ok(stats))
}

async fn session_history(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let id = checked_id(id)?;
    let history = state
        .sessions()
        .with_session(&id, |entry| Ok(entry.state.history().to_vec()))
        .await?;
    Ok(ok(history))
}

async fn end_session(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let id = checked_id(id)?;
    if state.sessions().remove(&id).await {
        tracing::info!(session_id = %id, "Session ended");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("SESSION_NOT_FOUND", "Session not found"))
    }
}
