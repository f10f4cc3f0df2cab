//! Request DTOs for the student API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use super::Student;

/// Request body for creating a student (POST /students)
///
/// Any `id` in the body is ignored; the store assigns one. Missing fields
/// take their zero values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateStudentRequest {
    pub name: String,
    pub age: i64,
    pub grade: String,
}

impl CreateStudentRequest {
    /// Builds the record to insert, with no id yet.
    pub fn into_student(self) -> Student {
        Student {
            id: String::new(),
            name: self.name,
            age: self.age,
            grade: self.grade,
        }
    }
}
