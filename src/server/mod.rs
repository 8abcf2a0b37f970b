//! Reference implementation of the remote record store.
//!
//! Serves the `record` resource from memory, for local development and for
//! exercising the client end to end. Nothing is persisted.
//!
//! # Endpoints
//!
//! - `GET /health`: Health check
//! - `GET /record`: All records, in insertion order
//! - `GET /record/{id}`: One record, or `null` when the id is unknown
//! - `POST /record`: Store a record under a new id (`201`)
//! - `PATCH /record/{id}`: Merge the given fields (`404` when unknown)
//! - `DELETE /record/{id}`: Remove a record (`404` when unknown)

mod memory;

pub use memory::MemoryStore;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{Level, Record, RecordId, RecordPatch};

/// Application state shared across handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub records: Arc<RwLock<MemoryStore>>,
}

impl AppState {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            records: Arc::new(RwLock::new(store)),
        }
    }
}

/// Builds the store's router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/record", get(list_records).post(create_record))
        .route(
            "/record/{id}",
            get(get_record).patch(update_record).delete(delete_record),
        )
        .with_state(state)
}

/// Error body for rejected requests
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

fn reject(status: StatusCode, error: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error,
            message: message.into(),
        }),
    )
        .into_response()
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_records(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.records.read().await.list())
}

async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Option<Record>> {
    Json(state.records.read().await.get(&RecordId::from(id)))
}

async fn create_record(State(state): State<AppState>, Json(record): Json<Record>) -> Response {
    let saved = state.records.write().await.insert(record);
    tracing::info!("Created record {}", saved.id.as_ref().map(|id| id.as_str()).unwrap_or("?"));
    (StatusCode::CREATED, Json(saved)).into_response()
}

/// Update body. Absent keys are left untouched; `level` may be `""`.
#[derive(Debug, Deserialize)]
struct UpdateBody {
    name: Option<String>,
    position: Option<String>,
    level: Option<String>,
}

impl UpdateBody {
    fn into_patch(self) -> Result<RecordPatch, String> {
        let level = match self.level.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<Level>()?),
        };
        Ok(RecordPatch {
            name: self.name,
            position: self.position,
            level,
        })
    }
}

async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateBody>,
) -> Response {
    let patch = match body.into_patch() {
        Ok(patch) => patch,
        Err(message) => return reject(StatusCode::UNPROCESSABLE_ENTITY, "invalid_level", message),
    };

    let id = RecordId::from(id);
    match state.records.write().await.update(&id, patch) {
        Some(record) => {
            tracing::info!("Updated record {}", id);
            Json(record).into_response()
        }
        None => reject(StatusCode::NOT_FOUND, "not_found", format!("No record {}", id)),
    }
}

async fn delete_record(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = RecordId::from(id);
    match state.records.write().await.remove(&id) {
        Some(_) => {
            tracing::info!("Deleted record {}", id);
            StatusCode::OK.into_response()
        }
        None => reject(StatusCode::NOT_FOUND, "not_found", format!("No record {}", id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::lifetime::ViewToken;
    use crate::store::{RecordStore, StoreError};
    use crate::sync::{Navigation, RecordCollection, RecordEditor};

    async fn serve(state: AppState) -> RecordStore {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        RecordStore::new(&Config::with_base_url(format!("http://{}", addr))).unwrap()
    }

    #[tokio::test]
    async fn test_crud_through_client() {
        let store = serve(AppState::default()).await;

        store
            .create(&Record::new("Ada", "Engineer", Level::Senior))
            .await
            .unwrap();
        let records = store.list().await.unwrap();
        assert_eq!(records.len(), 1);
        let id = records[0].id.clone().unwrap();

        let mut changed = store.get(&id).await.unwrap();
        changed.position = "Staff Engineer".to_string();
        store.update(&id, &changed).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap().position, "Staff Engineer");

        store.delete(&id).await.unwrap();
        assert!(store.get(&id).await.unwrap_err().is_not_found());
        assert!(matches!(
            store.delete(&id).await.unwrap_err(),
            StoreError::Status(StatusCode::NOT_FOUND)
        ));
    }

    #[tokio::test]
    async fn test_serves_prefilled_store() {
        let mut memory = MemoryStore::new();
        let ada = memory.insert(Record::new("Ada", "Engineer", Level::Senior));
        let store = serve(AppState::new(memory)).await;

        let records = store.list().await.unwrap();

        assert_eq!(records, vec![ada.clone()]);
        let id = ada.id.unwrap();
        assert_eq!(store.get(&id).await.unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_level() {
        let store = serve(AppState::default()).await;
        store
            .create(&Record::new("Ada", "Engineer", Level::Senior))
            .await
            .unwrap();
        let id = store.list().await.unwrap()[0].id.clone().unwrap();

        let response = reqwest::Client::new()
            .patch(format!("{}/record/{}", store.base_url(), id))
            .json(&serde_json::json!({"level": "Principal"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(store.get(&id).await.unwrap().level, Some(Level::Senior));
    }

    #[tokio::test]
    async fn test_views_against_reference_store() {
        let store = serve(AppState::default()).await;

        // Create from a fresh editor.
        let mut editor = RecordEditor::new(store.clone(), ViewToken::detached());
        editor.initialize(None).await;
        editor.update_field(
            RecordPatch::new()
                .name("Ada")
                .position("Engineer")
                .level(Level::Junior),
        );
        assert_eq!(editor.submit().await, Navigation::Collection);

        let mut collection = RecordCollection::new(store.clone(), ViewToken::detached());
        assert!(collection.load().await.is_applied());
        assert_eq!(collection.len(), 1);
        let id = collection.records()[0].id.clone().unwrap();

        // Promote through an editor bound to the saved record.
        let mut editor = RecordEditor::new(store.clone(), ViewToken::detached());
        editor.initialize(Some(id.clone())).await;
        assert_eq!(editor.draft().name, "Ada");
        editor.update_field(RecordPatch::new().level(Level::Senior));
        assert_eq!(editor.submit().await, Navigation::Collection);

        assert!(collection.load().await.is_applied());
        assert_eq!(collection.get(&id).unwrap().level, Some(Level::Senior));

        assert!(collection.remove(&id).await.is_applied());
        assert!(collection.is_empty());
        assert!(store.list().await.unwrap().is_empty());
    }
}
