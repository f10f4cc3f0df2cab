//! Student Store Module
//!
//! Wraps a redb database holding one table of id -> encoded student pairs.
//! Every operation runs in its own transaction; redb serializes writers and
//! lets readers proceed concurrently, so the store adds no locking of its own.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use redb::backends::InMemoryBackend;
use redb::{Database, DatabaseError, ReadableTable, ReadableTableMetadata, TableDefinition};
use tracing::{debug, info, warn};

use crate::error::{Result, StudentError};
use crate::models::Student;
use crate::store::{generate_id, MAX_ID_ATTEMPTS, STUDENTS_TABLE};

const STUDENTS: TableDefinition<&str, &[u8]> = TableDefinition::new(STUDENTS_TABLE);

/// Pause between attempts to acquire a locked database file
const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(50);

// == Storage Error Conversions ==
macro_rules! storage_error_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for StudentError {
                fn from(err: $ty) -> Self {
                    StudentError::Storage(err.into())
                }
            }
        )*
    };
}

storage_error_from!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

// == Student Store ==
/// Owns the database handle. Dropping the store closes the file.
pub struct StudentStore {
    db: Database,
    /// Where the data lives, for log messages
    location: String,
}

impl StudentStore {
    // == Constructors ==
    /// Opens or creates the database file at `path`.
    ///
    /// If another handle holds the file lock, retries until `lock_timeout`
    /// elapses and then fails with `LockTimeout`. Creates the students table
    /// when it does not exist yet.
    pub fn open(path: impl AsRef<Path>, lock_timeout: Duration) -> Result<Self> {
        let path = path.as_ref();
        let location = path.display().to_string();
        let deadline = Instant::now() + lock_timeout;

        let db = loop {
            match Database::create(path) {
                Ok(db) => break db,
                Err(DatabaseError::DatabaseAlreadyOpen) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(StudentError::LockTimeout(location));
                    }
                    debug!("Database {} is locked, retrying", location);
                    thread::sleep(LOCK_RETRY_INTERVAL.min(deadline - now));
                }
                Err(err) => return Err(err.into()),
            }
        };

        Self::init(db, location)
    }

    /// Creates a store backed by memory only. Nothing touches disk.
    pub fn open_in_memory() -> Result<Self> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        Self::init(db, "memory".to_string())
    }

    fn init(db: Database, location: String) -> Result<Self> {
        let txn = db.begin_write()?;
        txn.open_table(STUDENTS)?;
        txn.commit()?;

        info!("Database initialized at {}", location);
        Ok(Self { db, location })
    }

    // == Close ==
    /// Releases the database file.
    pub fn close(self) {
        let location = self.location;
        drop(self.db);
        info!("Database at {} closed", location);
    }

    // == Put ==
    /// Writes or overwrites the record for `id` in one write transaction.
    pub fn put(&self, id: &str, bytes: &[u8]) -> Result<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STUDENTS)?;
            table.insert(id, bytes)?;
        }
        txn.commit()?;
        Ok(())
    }

    // == Get ==
    /// Returns the stored bytes for `id`, or `NotFound`.
    pub fn get(&self, id: &str) -> Result<Vec<u8>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(STUDENTS)?;
        let bytes = table.get(id)?.map(|guard| guard.value().to_vec());
        bytes.ok_or_else(|| StudentError::NotFound(id.to_string()))
    }

    // == List All ==
    /// Returns every stored record in key order, collected eagerly.
    pub fn list_all(&self) -> Result<Vec<Vec<u8>>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(STUDENTS)?;

        let mut records = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            records.push(value.value().to_vec());
        }
        Ok(records)
    }

    // == Length ==
    /// Number of stored records.
    pub fn len(&self) -> Result<u64> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(STUDENTS)?;
        Ok(table.len()?)
    }

    /// Returns true if no records are stored.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    // == Insert New ==
    /// Assigns a fresh id to `student` and stores it.
    ///
    /// The id is drawn and checked against existing keys inside the same
    /// write transaction as the insert, so an existing record is never
    /// overwritten.
    pub fn insert_new(&self, student: Student) -> Result<Student> {
        self.insert_with_ids(student, generate_id)
    }

    pub(crate) fn insert_with_ids<F>(&self, mut student: Student, mut next_id: F) -> Result<Student>
    where
        F: FnMut() -> String,
    {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STUDENTS)?;

            let mut attempts = 0;
            student.id = loop {
                let candidate = next_id();
                if table.get(candidate.as_str())?.is_none() {
                    break candidate;
                }
                attempts += 1;
                if attempts >= MAX_ID_ATTEMPTS {
                    return Err(StudentError::Internal(format!(
                        "no free id after {} attempts",
                        attempts
                    )));
                }
                warn!("Generated id {} already in use, drawing again", candidate);
            };

            let bytes = student
                .to_bytes()
                .map_err(|e| StudentError::Internal(e.to_string()))?;
            table.insert(student.id.as_str(), bytes.as_slice())?;
        }
        txn.commit()?;

        debug!("Stored student {}", student.id);
        Ok(student)
    }

    // == Typed Reads ==
    /// Fetches and decodes one student.
    ///
    /// A record that fails to decode is reported as `Corrupt`.
    pub fn get_student(&self, id: &str) -> Result<Student> {
        let bytes = self.get(id)?;
        Student::from_bytes(&bytes).map_err(|e| {
            warn!("Record {} failed to decode: {}", id, e);
            StudentError::Corrupt(id.to_string())
        })
    }

    /// Fetches and decodes all students in key order.
    ///
    /// Records that fail to decode are logged and skipped.
    pub fn list_students(&self) -> Result<Vec<Student>> {
        let records = self.list_all()?;
        let total = records.len();

        let students: Vec<Student> = records
            .iter()
            .enumerate()
            .filter_map(|(index, bytes)| match Student::from_bytes(bytes) {
                Ok(student) => Some(student),
                Err(e) => {
                    warn!("Skipping undecodable record at position {}: {}", index, e);
                    None
                }
            })
            .collect();

        if students.len() < total {
            warn!("Skipped {} of {} records", total - students.len(), total);
        }
        Ok(students)
    }
}
