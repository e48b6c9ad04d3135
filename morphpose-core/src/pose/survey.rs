// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::error::PoseError;
use crate::pose::PoseTable;
use crate::ut;

/// Every `.csv` file with `3d` in its (case-insensitive) name under a directory
pub fn collect_3d_exports<P: AsRef<Path>>(directory: P) -> Result<Vec<PathBuf>, PoseError> {
    ut::path::collect_file_paths(directory, &["csv"], Some("3d".to_string()))
}

/// Union of bone names across exports
///
/// Files that cannot be read or have no bone column are reported and
/// skipped.
///
/// # Arguments
///
/// * `paths` - Pose export files
pub fn bone_superset(paths: &[PathBuf]) -> BTreeSet<String> {
    let mut bones = BTreeSet::new();

    for path in paths {
        match PoseTable::open(path).and_then(|table| table.bones()) {
            Ok(found) => bones.extend(found),
            Err(err) => ut::track::progress_warn(&format!(
                "Could not read {}: {}",
                path.display(),
                err
            )),
        }
    }

    bones
}

/// Occurrence count of every bone across exports, most common first
///
/// Bones with equal counts keep the order in which they were first seen.
///
/// # Arguments
///
/// * `paths` - Pose export files
pub fn bone_counts(paths: &[PathBuf]) -> Vec<(String, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for path in paths {
        let values = match PoseTable::open(path).and_then(|table| table.bone_values()) {
            Ok(values) => values,
            Err(err) => {
                ut::track::progress_warn(&format!("Could not read {}: {}", path.display(), err));
                continue;
            }
        };

        for bone in values {
            match index.get(&bone) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(bone.clone(), counts.len());
                    counts.push((bone, 1));
                }
            }
        }
    }

    // Stable sort keeps first-seen order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
