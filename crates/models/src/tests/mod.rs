/// Schema-level checks against a fresh in-memory SQLite database
pub mod schema_tests;
