// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PoseError {
    ConfigError(String),
    IoError(String),
    SchemaError(String),
    RecordWriteError(String),
    RecordReadError(String),
    DirError(String),
    OtherError(String),
}

impl PoseError {
    /// True for errors that should abort an entire run rather than a single file
    pub fn is_fatal(&self) -> bool {
        matches!(self, PoseError::ConfigError(_) | PoseError::DirError(_))
    }
}

impl fmt::Display for PoseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PoseError::ConfigError(message) => {
                write!(
                    f,
                    "[morphpose::ConfigError] Bone vocabulary could not be loaded. {}",
                    message
                )
            }
            PoseError::IoError(message) => {
                write!(f, "[morphpose::IoError] File could not be read or written. {}", message)
            }
            PoseError::SchemaError(message) => {
                write!(
                    f,
                    "[morphpose::SchemaError] Table is missing required columns. {}",
                    message
                )
            }
            PoseError::RecordWriteError(message) => {
                write!(
                    f,
                    "[morphpose::RecordWriteError] Failed to write datapoint record. {}",
                    message
                )
            }
            PoseError::RecordReadError(message) => {
                write!(
                    f,
                    "[morphpose::RecordReadError] Failed to read datapoint record. {}",
                    message
                )
            }
            PoseError::DirError(message) => {
                write!(
                    f,
                    "[morphpose::DirError] Directory could not be created or read. {}",
                    message
                )
            }
            PoseError::OtherError(message) => {
                write!(f, "[morphpose::OtherError] Error: {}.", message)
            }
        }
    }
}

impl std::error::Error for PoseError {}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    pub fn test_display_prefix() {
        let error = PoseError::SchemaError("missing: z".to_string());
        assert!(error.to_string().starts_with("[morphpose::SchemaError]"));
        assert!(error.to_string().ends_with("missing: z"));
    }

    #[test]
    pub fn test_fatal_errors() {
        assert!(PoseError::ConfigError(String::new()).is_fatal());
        assert!(!PoseError::SchemaError(String::new()).is_fatal());
        assert!(!PoseError::IoError(String::new()).is_fatal());
    }
}
