//! API Module
//!
//! HTTP handlers and routing for the student REST API.
//!
//! # Endpoints
//! - `GET /students` - List all students
//! - `GET /students/:id` - Fetch a student by id
//! - `POST /students` - Create a student with a generated id

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
