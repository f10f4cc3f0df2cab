//! Data models for the student service
//!
//! This module defines the stored `Student` record and the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;
pub mod student;

// Re-export commonly used types
pub use requests::CreateStudentRequest;
pub use responses::ErrorResponse;
pub use student::Student;
