use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use connector_booking::{BookingOptions, BookingWidget, Lang, TimeSlot};
use std::sync::Arc;
use uuid::Uuid;

use crate::{models::*, AppState};

type ApiError = (StatusCode, Json<ApiResponse<()>>);
type SessionResult = Result<Json<ApiResponse<SessionView>>, ApiError>;

fn session_not_found(id: Uuid) -> ApiError {
    tracing::debug!(%id, "unknown booking session");
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Booking session not found")),
    )
}

fn bad_request(msg: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(msg)))
}

// Extractor rejections are answered inside the JSON envelope like every other error.

fn session_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| bad_request(&rejection.body_text()))
}

fn lang(query: Result<Query<LangQuery>, QueryRejection>) -> Result<Lang, ApiError> {
    query
        .map(|Query(query)| query.lang)
        .map_err(|rejection| bad_request(&rejection.body_text()))
}

fn body<T>(json: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    json.map(|Json(body)| body)
        .map_err(|rejection| bad_request(&rejection.body_text()))
}

/// Apply one widget event and render the result.
///
/// Events that do not apply in the current state still answer with the
/// current view; `applied` tells the caller whether anything changed.
fn apply_event(
    state: &AppState,
    id: Uuid,
    lang: Lang,
    event: &'static str,
    f: impl FnOnce(&mut BookingWidget, NaiveDate) -> bool,
) -> SessionResult {
    let today = state.clock.today();
    let (applied, view) = state
        .sessions
        .with(id, |widget| {
            let applied = f(widget, today);
            (applied, widget.snapshot(lang, today))
        })
        .ok_or_else(|| session_not_found(id))?;

    if applied {
        tracing::debug!(%id, event, "booking event applied");
    } else {
        tracing::debug!(%id, event, "booking event ignored");
    }

    Ok(Json(ApiResponse::success(SessionView {
        id,
        applied: Some(applied),
        view,
    })))
}

// ── Endpoints ──

/// GET /api/booking/options: offered time slots and timezones.
pub async fn options(State(state): State<Arc<AppState>>) -> Json<ApiResponse<BookingOptions>> {
    Json(ApiResponse::success(state.options.as_ref().clone()))
}

/// POST /api/booking/sessions: enter the booking flow with a fresh calendar.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LangQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ApiResponse<SessionView>>), ApiError> {
    let lang = lang(query)?;
    let today = state.clock.today();
    let widget = BookingWidget::enter(state.options.clone(), today);
    let view = widget.snapshot(lang, today);
    let id = state.sessions.insert(widget);

    tracing::info!(%id, sessions = state.sessions.len(), "booking session started");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SessionView {
            id,
            applied: None,
            view,
        })),
    ))
}

/// GET /api/booking/sessions/{id}: current widget view.
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<LangQuery>, QueryRejection>,
) -> SessionResult {
    let id = session_id(path)?;
    let lang = lang(query)?;
    let today = state.clock.today();
    let view = state
        .sessions
        .with(id, |widget| widget.snapshot(lang, today))
        .ok_or_else(|| session_not_found(id))?;

    Ok(Json(ApiResponse::success(SessionView {
        id,
        applied: None,
        view,
    })))
}

/// DELETE /api/booking/sessions/{id}: leave the booking flow.
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = session_id(path)?;
    if !state.sessions.remove(id) {
        return Err(session_not_found(id));
    }
    tracing::info!(%id, "booking session closed");
    Ok(Json(ApiResponse::success(())))
}

/// POST /api/booking/sessions/{id}/prev-month
pub async fn prev_month(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<LangQuery>, QueryRejection>,
) -> SessionResult {
    apply_event(&state, session_id(path)?, lang(query)?, "prev_month", |widget, _| {
        widget.navigate_prev_month();
        true
    })
}

/// POST /api/booking/sessions/{id}/next-month
pub async fn next_month(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<LangQuery>, QueryRejection>,
) -> SessionResult {
    apply_event(&state, session_id(path)?, lang(query)?, "next_month", |widget, _| {
        widget.navigate_next_month();
        true
    })
}

/// POST /api/booking/sessions/{id}/date: click a day in the calendar.
pub async fn choose_date(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<LangQuery>, QueryRejection>,
    json: Result<Json<ChooseDateRequest>, JsonRejection>,
) -> SessionResult {
    let id = session_id(path)?;
    let lang = lang(query)?;
    let request = body(json)?;
    let date = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d")
        .map_err(|_| bad_request("Invalid date format, expected YYYY-MM-DD"))?;

    apply_event(&state, id, lang, "choose_date", |widget, today| {
        widget.choose_date(date, today)
    })
}

/// POST /api/booking/sessions/{id}/back: return from the time view to the calendar.
pub async fn go_back(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<LangQuery>, QueryRejection>,
) -> SessionResult {
    apply_event(&state, session_id(path)?, lang(query)?, "go_back", |widget, _| {
        widget.go_back()
    })
}

/// POST /api/booking/sessions/{id}/time
pub async fn choose_time(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<LangQuery>, QueryRejection>,
    json: Result<Json<ChooseTimeRequest>, JsonRejection>,
) -> SessionResult {
    let id = session_id(path)?;
    let lang = lang(query)?;
    let slot: TimeSlot = body(json)?
        .time
        .parse()
        .map_err(|_| bad_request("Invalid time format, expected HH:MM"))?;

    apply_event(&state, id, lang, "choose_time", |widget, _| {
        widget.choose_time(slot)
    })
}

/// POST /api/booking/sessions/{id}/timezone
pub async fn set_timezone(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<LangQuery>, QueryRejection>,
    json: Result<Json<SetTimezoneRequest>, JsonRejection>,
) -> SessionResult {
    let id = session_id(path)?;
    let lang = lang(query)?;
    let request = body(json)?;

    apply_event(&state, id, lang, "set_timezone", |widget, _| {
        widget.set_timezone(&request.timezone)
    })
}

// ── Tests ──
