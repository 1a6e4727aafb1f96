// Public API - what other modules can use
pub use draft::TableDraft;
pub use errors::TableError;
pub use handlers::{create_table, delete_table, get_table, list_tables, update_scores};
pub use layout::{default_players, DEFAULT_PLAYERS};
pub use models::*;
pub use repository::{InMemoryTableRepository, PostgresTableRepository, TableRepository};
pub use service::TableService;

// Internal modules
mod draft;
mod errors;
mod handlers;
mod layout;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
