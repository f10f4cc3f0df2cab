//! Store Module
//!
//! Durable persistence for student records in a single-file embedded database.

mod id;
mod student_store;


// Re-export public types
pub use id::generate_id;
pub use student_store::StudentStore;

// == Public Constants ==
/// Name of the table holding student records
pub const STUDENTS_TABLE: &str = "students";

/// Upper bound on id draws for a single insert before giving up
pub const MAX_ID_ATTEMPTS: usize = 16;
