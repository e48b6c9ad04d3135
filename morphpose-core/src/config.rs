// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::{Path, PathBuf};

use crate::constant::{RECORD_DIRECTORY, VOCABULARY_ENV, VOCABULARY_FILE, VOCABULARY_KEY};
use crate::io::RecordFormat;

/// Default location of the bone vocabulary file
///
/// Uses `MORPHPOSE_BONES` when set and non-empty, otherwise `bones.json`
/// in the working directory.
pub fn get_vocabulary_path() -> PathBuf {
    if let Ok(bones) = std::env::var(VOCABULARY_ENV) {
        if !bones.is_empty() {
            return PathBuf::from(bones);
        }
    }

    PathBuf::from(VOCABULARY_FILE)
}

/// Settings shared by every export pair in an assembly run
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    /// Root of the rendered image tree
    pub base_dir: PathBuf,
    /// Directory receiving one record per datapoint
    pub output_dir: PathBuf,
    /// Key of the vocabulary list inside the vocabulary file
    pub vocabulary_key: String,
    pub format: RecordFormat,
}

impl AssembleConfig {
    /// Configuration writing json records to `{base_dir}/datapoints`
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use morphpose_core::config::AssembleConfig;
    ///
    /// let config = AssembleConfig::new("renders");
    /// assert_eq!(config.output_dir, Path::new("renders").join("datapoints"));
    /// ```
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let output_dir = base_dir.join(RECORD_DIRECTORY);

        Self {
            base_dir,
            output_dir,
            vocabulary_key: VOCABULARY_KEY.to_string(),
            format: RecordFormat::Json,
        }
    }

    pub fn with_output_dir<P: AsRef<Path>>(mut self, output_dir: P) -> Self {
        self.output_dir = output_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_vocabulary_key(mut self, key: &str) -> Self {
        self.vocabulary_key = key.to_string();
        self
    }

    pub fn with_format(mut self, format: RecordFormat) -> Self {
        self.format = format;
        self
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    pub fn test_config_builders() {
        let config = AssembleConfig::new("base")
            .with_output_dir("elsewhere")
            .with_vocabulary_key("dogs")
            .with_format(RecordFormat::Zip);

        assert_eq!(config.base_dir, PathBuf::from("base"));
        assert_eq!(config.output_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.vocabulary_key, "dogs");
        assert_eq!(config.format, RecordFormat::Zip);
    }
}
