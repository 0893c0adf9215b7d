use thiserror::Error;

/// Conditions that stop a generation run before any scheduling happens.
///
/// Placement trouble inside a run never ends up here. Dropped and
/// under-filled sessions are reported in the run's output instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no subject mappings found, add mappings before generating a timetable")]
    NoMappings,
    #[error("semester '{0}' has no subject mappings")]
    UnknownSemester(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
