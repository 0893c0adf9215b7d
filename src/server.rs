use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::Config;
use crate::data::{Day, GenerateRequest, GenerationOutput, TimeSlot, WorkloadRow};
use crate::error::GenerationError;
use crate::pairing::RotationStrategy;
use crate::session::GenerationSession;
use crate::theory::WEEKLY_THEORY_SESSIONS;

/// Live generation sessions keyed by the id in the request path.
pub struct AppState {
    sessions: Mutex<HashMap<String, GenerationSession>>,
    seed: Option<u64>,
    rotation: RotationStrategy,
}

impl AppState {
    pub fn new(seed: Option<u64>, rotation: RotationStrategy) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            seed,
            rotation,
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, GenerationSession>> {
        // a panicked run leaves the ledger as it was when it panicked
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

type SharedState = Arc<AppState>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Layout {
    days: Vec<Day>,
    lab_days: Vec<Day>,
    columns: Vec<TimeSlot>,
    teaching_slots: Vec<TimeSlot>,
    lab_blocks: Vec<(TimeSlot, TimeSlot)>,
    weekly_theory_sessions: usize,
}

#[derive(Serialize)]
struct ResetResponse {
    cleared: usize,
}

#[derive(Deserialize)]
struct WorkloadQuery {
    /// Comma separated faculty names.
    faculty: Option<String>,
}

fn error_response(e: GenerationError) -> (StatusCode, String) {
    let status = match e {
        GenerationError::NoMappings => StatusCode::UNPROCESSABLE_ENTITY,
        GenerationError::UnknownSemester(_) => StatusCode::NOT_FOUND,
    };
    warn!("Generation refused: {}", e);
    (status, e.to_string())
}

async fn layout_handler() -> Json<Layout> {
    Json(Layout {
        days: Day::ALL.to_vec(),
        lab_days: Day::LAB_DAYS.to_vec(),
        columns: TimeSlot::COLUMNS.to_vec(),
        teaching_slots: TimeSlot::TEACHING.to_vec(),
        lab_blocks: TimeSlot::LAB_BLOCKS.to_vec(),
        weekly_theory_sessions: WEEKLY_THEORY_SESSIONS,
    })
}

async fn generate_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerationOutput>, (StatusCode, String)> {
    let mut sessions = state.sessions();
    let session = sessions
        .entry(id)
        .or_insert_with(|| GenerationSession::new(state.seed, state.rotation));
    match session.generate(&request) {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(error_response(e)),
    }
}

async fn reset_handler(State(state): State<SharedState>, Path(id): Path<String>) -> Json<ResetResponse> {
    let cleared = state
        .sessions()
        .get_mut(&id)
        .map(GenerationSession::reset)
        .unwrap_or(0);
    Json(ResetResponse { cleared })
}

async fn workload_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<WorkloadQuery>,
) -> Result<Json<Vec<WorkloadRow>>, (StatusCode, String)> {
    let names: Option<Vec<String>> = query.faculty.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    });
    let sessions = state.sessions();
    let session = sessions
        .get(&id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("no generation session '{}'", id)))?;
    Ok(Json(session.workload(names.as_deref())))
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/v1/timetable/layout", get(layout_handler))
        .route("/v1/sessions/:id/timetable", post(generate_handler))
        .route("/v1/sessions/:id/ledger", delete(reset_handler))
        .route("/v1/sessions/:id/workload", get(workload_handler))
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(config.seed, config.rotation));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await
}
