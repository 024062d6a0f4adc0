use agenda_core::{Agenda, AgendaBuilder, Database};
use tempfile::{NamedTempFile, TempDir};

/// Helper function to create a test agenda
#[allow(dead_code)]
pub async fn create_test_agenda() -> (TempDir, Agenda) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let agenda = AgendaBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create agenda");
    (temp_dir, agenda)
}

/// Helper function to create a temporary database for testing
#[allow(dead_code)]
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}
