// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::{Path, PathBuf};

use crate::error::PoseError;

/// Ensures a directory exists, creating missing parents.
///
/// Creating a directory that already exists, including one created
/// concurrently by another worker, succeeds.
///
/// # Arguments
///
/// * `directory` - Path to directory
///
/// # Examples
///
/// ```
/// use morphpose_core::ut::path::ensure_directory;
///
/// let base = std::env::temp_dir().join("TEST_ENSURE_DIRECTORY/nested");
///
/// ensure_directory(&base).unwrap();
/// ensure_directory(&base).unwrap();
/// assert!(base.is_dir());
///
/// std::fs::remove_dir_all(base.parent().unwrap()).unwrap();
/// ```
pub fn ensure_directory<P: AsRef<Path>>(directory: P) -> Result<PathBuf, PoseError> {
    let directory = directory.as_ref();

    std::fs::create_dir_all(directory).map_err(|err| {
        PoseError::DirError(format!("{}: {}", directory.display(), err))
    })?;

    Ok(directory.to_path_buf())
}

/// Recursively collect file paths under a directory with an optional substring filter
///
/// The substring is matched case-insensitively against the file name only.
/// Paths are returned sorted.
///
/// # Arguments
///
/// * `directory` - Path to directory containing files
/// * `valid_ext` - Accepted extensions without the leading dot
/// * `substring` - Only include files whose name contains this substring
///
/// # Examples
///
/// ```no_run
/// use morphpose_core::ut::path::collect_file_paths;
/// let files = collect_file_paths("renders/", &["csv"], Some("coordinates_2d_".to_string()));
/// ```
pub fn collect_file_paths<P: AsRef<Path>>(
    directory: P,
    valid_ext: &[&str],
    substring: Option<String>,
) -> Result<Vec<PathBuf>, PoseError> {
    let directory = directory.as_ref();
    let substring = substring.map(|s| s.to_lowercase());

    let mut files: Vec<PathBuf> = Vec::new();
    let mut pending: Vec<PathBuf> = vec![directory.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = std::fs::read_dir(&current)
            .map_err(|err| PoseError::DirError(format!("{}: {}", current.display(), err)))?;

        for path in entries.filter_map(Result::ok).map(|entry| entry.path()) {
            if path.is_dir() {
                pending.push(path);
                continue;
            }

            let has_ext = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| valid_ext.contains(&ext.to_lowercase().as_str()));

            let has_substring = match &substring {
                Some(substring) => path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_lowercase())
                    .is_some_and(|name| name.contains(substring.as_str())),
                None => true,
            };

            if path.is_file() && has_ext && has_substring {
                files.push(path);
            }
        }
    }

    files.sort_unstable();

    Ok(files)
}
