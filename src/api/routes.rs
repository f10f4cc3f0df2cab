//! API Routes
//!
//! Configures the Axum router with the student endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_student_handler, get_student_handler, list_students_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /students` - List all students
/// - `GET /students/:id` - Fetch one student
/// - `POST /students` - Create a student
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/students",
            get(list_students_handler).post(create_student_handler),
        )
        .route("/students/:id", get(get_student_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
