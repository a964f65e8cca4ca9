/// Database connection and schema creation
pub mod database;

/// Language packs holding display labels
pub mod strings;
