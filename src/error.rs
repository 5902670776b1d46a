//! Error types for Campus Assist.
//!
//! Dialogue outcomes (entity not found, ambiguous alias) are not errors —
//! they are normal variants of the resolution result. The taxonomy here
//! covers configuration, catalog compilation, and outbound delivery.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Catalog compilation errors.
///
/// Catalogs are author-defined data; these fire at build time, never during
/// a turn.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid pattern for entry {name}: {source}")]
    InvalidPattern { name: String, source: regex::Error },

    #[error("Conflict group {group} has {count} member(s), needs at least 2")]
    DegenerateGroup { group: String, count: usize },

    #[error("Conflict group {group} references unknown entry {member}")]
    UnknownMember { group: String, member: String },

    #[error("Entry {member} must be declared after the {group} conflict marker")]
    MemberBeforeMarker { group: String, member: String },
}

/// Outbound delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to send response to {recipient}: {reason}")]
    SendFailed { recipient: String, reason: String },

    #[error("Send API rejected message for {recipient}: {status}")]
    ApiRejected { recipient: String, status: String },
}

/// Result type alias for the bot.
pub type Result<T> = std::result::Result<T, Error>;
