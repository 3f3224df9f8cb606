//! Database module for PostgreSQL connection and operations

pub mod connection;
pub mod language_repo;

pub use connection::init_pool;
pub use language_repo::LanguageRepository;
