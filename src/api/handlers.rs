//! API Handlers
//!
//! HTTP request handlers for each student endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::error::{Result, StudentError};
use crate::models::{CreateStudentRequest, Student};
use crate::store::StudentStore;

/// Application state shared across all handlers.
///
/// Holds the one store handle; redb's transactions provide all the
/// coordination between concurrent requests.
#[derive(Clone)]
pub struct AppState {
    /// Shared student store
    pub store: Arc<StudentStore>,
}

impl AppState {
    /// Creates a new AppState owning the given store.
    pub fn new(store: StudentStore) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Creates a new AppState around an already shared store.
    pub fn from_shared(store: Arc<StudentStore>) -> Self {
        Self { store }
    }

    /// Runs a store operation on the blocking thread pool.
    async fn with_store<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&StudentStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| StudentError::Internal(format!("store task failed: {}", e)))?
    }
}

/// Handler for GET /students
///
/// Returns every decodable stored student, in id order.
pub async fn list_students_handler(State(state): State<AppState>) -> Result<Json<Vec<Student>>> {
    let students = state.with_store(|store| store.list_students()).await?;
    Ok(Json(students))
}

/// Handler for GET /students/:id
pub async fn get_student_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>> {
    let student = state.with_store(move |store| store.get_student(&id)).await?;
    Ok(Json(student))
}

/// Handler for POST /students
///
/// Decodes the body, assigns a fresh id (ignoring any the client sent)
/// and stores the record. Malformed JSON is rejected with 400.
pub async fn create_student_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Student>> {
    let req: CreateStudentRequest = serde_json::from_slice(&body)
        .map_err(|e| StudentError::InvalidRequest(format!("Malformed student body: {}", e)))?;

    let student = state
        .with_store(move |store| store.insert_new(req.into_student()))
        .await?;

    info!("Created student {}", student.id);
    Ok(Json(student))
}
