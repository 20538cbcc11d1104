/// Database configuration and connection management
pub mod database;

/// Contract template seeding from templates.toml
pub mod templates;
