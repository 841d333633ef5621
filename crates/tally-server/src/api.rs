use crate::dashboard;
use crate::logging::TraceId;
use crate::state::AppState;
use axum::extract::{Extension, Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use tally_common::error::MetricError;
use tally_common::types::{MetricKind, MetricValue};

/// A [`MetricError`] on its way to the wire. The body is the error message
/// as plain text.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: MetricError,
}

impl ApiError {
    pub fn not_found(error: MetricError) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error,
        }
    }
}

/// Validation failures become `400 Bad Request`, unknown metrics and
/// malformed routes `404 Not Found`.
impl From<MetricError> for ApiError {
    fn from(error: MetricError) -> Self {
        let status = if error.is_bad_request() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::NOT_FOUND
        };
        Self { status, error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.error.to_string()).into_response()
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_metrics))
        .route("/update/{*path}", post(update_metric))
        .route("/value/{kind}/{name}", get(get_metric))
}

/// Splits the raw, still percent-encoded `{kind}/{name}/{value}` tail and
/// validates it in wire order: kind, then name, then path shape, then
/// value. Segments are decoded only after splitting, so an encoded `/`
/// (`%2F`) stays part of the name. Nothing is applied here.
pub fn parse_update_path(path: &str) -> Result<(MetricKind, String, MetricValue), MetricError> {
    if path.is_empty() {
        return Err(MetricError::MalformedPath);
    }
    let mut segments = path.split('/');

    let raw_kind = segments.next().unwrap_or_default();
    let kind: MetricKind = decode_segment(raw_kind)
        .map_err(|_| MetricError::InvalidKind(raw_kind.to_string()))?
        .parse()?;

    let name = decode_segment(segments.next().unwrap_or_default())?;
    if name.is_empty() {
        return Err(MetricError::MissingName);
    }

    let raw = match (segments.next(), segments.next()) {
        (Some(raw), None) => raw,
        _ => return Err(MetricError::MalformedPath),
    };
    let value = match decode_segment(raw) {
        Ok(decoded) => MetricValue::parse(kind, &decoded)?,
        Err(_) => {
            return Err(MetricError::InvalidValue {
                kind,
                raw: raw.to_string(),
            })
        }
    };

    Ok((kind, name.into_owned(), value))
}

fn decode_segment(raw: &str) -> Result<Cow<'_, str>, MetricError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| MetricError::MalformedPath)
}

async fn update_metric(
    State(state): State<AppState>,
    trace_id: Option<Extension<TraceId>>,
    uri: Uri,
) -> Result<&'static str, ApiError> {
    // The matched wildcard is already decoded; split the raw path instead.
    let tail = uri
        .path()
        .strip_prefix("/update/")
        .ok_or(MetricError::MalformedPath)?;
    let (kind, name, value) = parse_update_path(tail)?;
    let stored = state.store.update(&name, value);

    let trace_id = trace_id.map(|Extension(id)| id.0);
    tracing::debug!(
        trace_id = trace_id.as_deref().unwrap_or("-"),
        kind = %kind,
        name = %name,
        value = %value,
        stored = %stored,
        "Metric updated"
    );

    Ok("OK")
}

async fn get_metric(
    State(state): State<AppState>,
    Path((kind, name)): Path<(String, String)>,
) -> Result<String, ApiError> {
    // An unknown kind on the read side is reported like an unknown metric.
    let kind: MetricKind = kind.parse().map_err(ApiError::not_found)?;

    state
        .store
        .get(kind, &name)
        .map(|value| value.to_string())
        .ok_or_else(|| MetricError::NotFound { kind, name }.into())
}

async fn list_metrics(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.store.snapshot();
    Html(dashboard::render_index(&snapshot, state.start_time))
}
