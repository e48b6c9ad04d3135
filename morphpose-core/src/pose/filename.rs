// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::{Path, PathBuf};

use crate::constant::{DIMENSION_MARKERS, EXPORT_PREFIX_2D, EXPORT_PREFIX_3D};

/// Extract subject and action from an export filename
///
/// The base name is split on `_`. The token after the first `2d`/`3d` marker
/// is the subject and every later token, rejoined with `_` and stripped of
/// its extension, is the action. Filenames without a marker yield no
/// metadata.
///
/// # Arguments
///
/// * `filename` - File name or path of a pose export
///
/// # Examples
///
/// ```
/// use morphpose_core::pose::parse_filename;
///
/// let (subject, action) = parse_filename("coordinates_2d_Akita_Albedo_A_Pose.csv");
/// assert_eq!(subject.as_deref(), Some("Akita"));
/// assert_eq!(action.as_deref(), Some("Albedo_A_Pose"));
///
/// assert_eq!(parse_filename("renders.csv"), (None, None));
/// ```
pub fn parse_filename<P: AsRef<Path>>(filename: P) -> (Option<String>, Option<String>) {
    let base = filename
        .as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let parts: Vec<&str> = base.split('_').collect();

    let Some(marker) = parts.iter().position(|part| {
        DIMENSION_MARKERS
            .iter()
            .any(|marker| part.eq_ignore_ascii_case(marker))
    }) else {
        return (None, None);
    };

    let Some(subject) = parts.get(marker + 1).filter(|subject| !subject.is_empty()) else {
        return (None, None);
    };

    // A trailing subject still carries the extension; strip it so
    // `coordinates_2d_Akita.csv` yields `Akita` rather than `Akita.csv`
    if marker + 2 >= parts.len() {
        return (Some(strip_extension(subject).to_string()), None);
    }

    let action = strip_extension(&parts[marker + 2..].join("_")).to_string();
    let action = if action.is_empty() { None } else { Some(action) };

    (Some(subject.to_string()), action)
}

fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name,
    }
}

/// Path of the 3D export that accompanies a 2D export
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use morphpose_core::pose::companion_3d_path;
///
/// let path = companion_3d_path("output_akita/coordinates_2d_Akita_Walk.csv").unwrap();
/// assert_eq!(path, Path::new("output_akita/coordinates_3d_Akita_Walk.csv"));
///
/// assert!(companion_3d_path("output_akita/bones.csv").is_none());
/// ```
pub fn companion_3d_path<P: AsRef<Path>>(path_2d: P) -> Option<PathBuf> {
    let path_2d = path_2d.as_ref();
    let name = path_2d.file_name()?.to_str()?;

    if !name.contains(EXPORT_PREFIX_2D) {
        return None;
    }

    Some(path_2d.with_file_name(name.replace(EXPORT_PREFIX_2D, EXPORT_PREFIX_3D)))
}

/// Identity of one export file as carried into datapoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMetadata {
    pub file_name: String,
    pub subject: Option<String>,
    pub action: Option<String>,
}

impl SourceMetadata {
    /// Parse metadata from an export path
    ///
    /// # Examples
    ///
    /// ```
    /// use morphpose_core::pose::SourceMetadata;
    ///
    /// let meta = SourceMetadata::from_path("data/coordinates_3d_Husky_Run.csv");
    /// assert_eq!(meta.file_name, "coordinates_3d_Husky_Run.csv");
    /// assert_eq!(meta.subject.as_deref(), Some("Husky"));
    /// assert_eq!(meta.action.as_deref(), Some("Run"));
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let (subject, action) = parse_filename(path);

        Self {
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default(),
            subject,
            action,
        }
    }

    /// File name without its extension
    pub fn stem(&self) -> &str {
        strip_extension(&self.file_name)
    }
}
