//! Vacancy catalog HTTP API
//!
//! Read and delete access to the JSON catalog over axum. Store calls are
//! blocking file I/O and run on tokio's blocking pool.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::selection::{find_by_url, matching_keyword, top_by_salary};
use common::{StorageError, Vacancy, VacancyStorage};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::error;

pub type SharedStorage = Arc<dyn VacancyStorage>;

const DEFAULT_TOP: usize = 10;

/// Shared application state
#[derive(Clone)]
struct AppState {
    storage: SharedStorage,
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("no vacancy with url '{0}'")]
    NotFound(String),
    #[error("storage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Storage(_) | ServerError::Join(_) => {
                error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Query parameters for `GET /vacancies`
#[derive(Debug, Deserialize)]
struct ListParams {
    min_salary: Option<u64>,
}

/// Query parameters for `GET /vacancies/top`
#[derive(Debug, Deserialize)]
struct TopParams {
    n: Option<usize>,
}

/// Query parameters for `GET /vacancies/search`
#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// Query parameters for `DELETE /vacancies`
#[derive(Debug, Deserialize)]
struct DeleteParams {
    url: String,
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    url: String,
    removed: usize,
}

pub fn router(storage: SharedStorage) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/vacancies", get(list_handler).delete(delete_handler))
        .route("/vacancies/top", get(top_handler))
        .route("/vacancies/search", get(search_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { storage })
}

/// Runs `op` against the store on the blocking pool.
async fn with_storage<T, F>(state: &AppState, op: F) -> Result<T, ServerError>
where
    F: FnOnce(&dyn VacancyStorage) -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    let storage = Arc::clone(&state.storage);
    let result = tokio::task::spawn_blocking(move || op(storage.as_ref())).await?;
    Ok(result?)
}

/// Handler for GET / (root)
async fn root_handler() -> &'static str {
    "Vacancy Catalog API\n\nEndpoints:\n  GET    /vacancies?min_salary=<rub>\n  GET    /vacancies/top?n=<count>\n  GET    /vacancies/search?q=<keyword>\n  DELETE /vacancies?url=<vacancy url>\n"
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for GET /vacancies?min_salary=<rub>
async fn list_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Vacancy>>, ServerError> {
    let vacancies = with_storage(&state, move |storage| {
        storage.vacancies_by_criteria(params.min_salary)
    })
    .await?;
    Ok(Json(vacancies))
}

/// Handler for GET /vacancies/top?n=<count>
async fn top_handler(
    State(state): State<AppState>,
    Query(params): Query<TopParams>,
) -> Result<Json<Vec<Vacancy>>, ServerError> {
    let all = with_storage(&state, |storage| storage.vacancies_by_criteria(None)).await?;
    Ok(Json(top_by_salary(all, params.n.unwrap_or(DEFAULT_TOP))))
}

/// Handler for GET /vacancies/search?q=<keyword>
async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Vacancy>>, ServerError> {
    let keyword = params.q.unwrap_or_default();
    if keyword.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }

    let all = with_storage(&state, |storage| storage.vacancies_by_criteria(None)).await?;
    Ok(Json(matching_keyword(all, &keyword)))
}

/// Handler for DELETE /vacancies?url=<vacancy url>
///
/// Removes the first vacancy listed under the url together with every record
/// sharing its title and url.
async fn delete_handler(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<DeleteResponse>, ServerError> {
    let url = params.url;
    let lookup = url.clone();
    let removed = with_storage(&state, move |storage| {
        let all = storage.vacancies_by_criteria(None)?;
        match find_by_url(&all, &lookup) {
            Some(target) => storage.delete_vacancy(target).map(Some),
            None => Ok(None),
        }
    })
    .await?;

    match removed {
        Some(removed) => Ok(Json(DeleteResponse { url, removed })),
        None => Err(ServerError::NotFound(url)),
    }
}
