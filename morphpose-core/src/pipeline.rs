// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::{Path, PathBuf};

use kdam::TqdmIterator;
use rayon::prelude::*;

use crate::config::AssembleConfig;
use crate::constant::{EXPORT_PREFIX_2D, REQUIRED_2D_COLUMNS};
use crate::error::PoseError;
use crate::io::{self, IndexRow};
use crate::pose::{
    BoneVocabulary, ImageResolver, PoseTable, PresenceMask, SourceMetadata, companion_3d_path,
    merge,
};
use crate::ut;

/// Outcome of assembling one 2D/3D export pair
#[derive(Debug, Clone)]
pub struct PairSummary {
    pub path_2d: PathBuf,
    pub path_3d: PathBuf,
    /// Datapoints produced by the merge
    pub datapoints: usize,
    /// Records successfully written
    pub written: usize,
    /// Datapoints whose render was found
    pub images: usize,
    pub index: Vec<IndexRow>,
}

/// Outcome of a batch; failed pairs are kept alongside their error
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub pairs: Vec<PairSummary>,
    pub failures: Vec<(PathBuf, PoseError)>,
}

impl BatchSummary {
    pub fn datapoints(&self) -> usize {
        self.pairs.iter().map(|pair| pair.datapoints).sum()
    }

    pub fn written(&self) -> usize {
        self.pairs.iter().map(|pair| pair.written).sum()
    }

    pub fn images(&self) -> usize {
        self.pairs.iter().map(|pair| pair.images).sum()
    }

    /// Index rows of every successful pair in processing order
    pub fn index(&self) -> Vec<IndexRow> {
        self.pairs
            .iter()
            .flat_map(|pair| pair.index.iter().cloned())
            .collect()
    }
}

/// 2D exports to assemble from a file or directory input
///
/// A file is returned as is. A directory is searched recursively for
/// `coordinates_2d_*.csv` files.
pub fn discover_2d_exports<P: AsRef<Path>>(input: P) -> Result<Vec<PathBuf>, PoseError> {
    let input = input.as_ref();

    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    if !input.is_dir() {
        return Err(PoseError::DirError(format!(
            "{} is neither a file nor a directory",
            input.display()
        )));
    }

    ut::path::collect_file_paths(input, &["csv"], Some(EXPORT_PREFIX_2D.to_string()))
}

/// Assemble, resolve and persist every datapoint of one 2D export
///
/// The 3D companion is expected next to the 2D export. The presence mask is
/// computed from the 2D bone set and shared by every datapoint of the pair.
///
/// # Arguments
///
/// * `path_2d` - Path to a `coordinates_2d_*.csv` export
/// * `vocabulary` - Canonical bone order for the presence mask
/// * `resolver` - Image layouts probed under the base directory
/// * `config` - Base directory, output directory and record format
///
/// # Examples
///
/// ```no_run
/// use morphpose_core::config::AssembleConfig;
/// use morphpose_core::pipeline::assemble_pair;
/// use morphpose_core::pose::{BoneVocabulary, ImageResolver};
///
/// let vocabulary = BoneVocabulary::open("bones.json").unwrap();
/// let config = AssembleConfig::new("renders");
///
/// let summary = assemble_pair(
///     "renders/output_akita/coordinates_2d_Akita_Sit.csv",
///     &vocabulary,
///     &ImageResolver::default(),
///     &config,
/// )
/// .unwrap();
/// ```
pub fn assemble_pair<P: AsRef<Path>>(
    path_2d: P,
    vocabulary: &BoneVocabulary,
    resolver: &ImageResolver,
    config: &AssembleConfig,
) -> Result<PairSummary, PoseError> {
    let path_2d = path_2d.as_ref();

    let path_3d = companion_3d_path(path_2d).ok_or_else(|| {
        PoseError::IoError(format!(
            "{} does not contain '{}'; cannot locate its 3D export",
            path_2d.display(),
            EXPORT_PREFIX_2D
        ))
    })?;

    let table_2d = PoseTable::open(path_2d)?;
    let table_3d = PoseTable::open(&path_3d)?;

    table_2d.require(&REQUIRED_2D_COLUMNS)?;

    let mask = PresenceMask::generate(vocabulary, &table_2d.bones()?);

    let meta_2d = SourceMetadata::from_path(path_2d);
    let meta_3d = SourceMetadata::from_path(&path_3d);

    let mut datapoints = merge(&table_2d, &table_3d, &meta_2d, &meta_3d, &mask)?;

    datapoints.par_iter_mut().for_each(|datapoint| {
        datapoint.image_path = resolver.resolve(datapoint, &config.base_dir);
    });

    let written = io::persist(
        &mut datapoints,
        &config.output_dir,
        meta_2d.stem(),
        config.format,
    )?;

    let index = datapoints
        .iter()
        .map(|datapoint| {
            IndexRow::new(
                datapoint,
                datapoint.record_name(meta_2d.stem(), config.format.extension()),
            )
        })
        .collect();

    Ok(PairSummary {
        path_2d: path_2d.to_path_buf(),
        path_3d,
        datapoints: datapoints.len(),
        written,
        images: datapoints.iter().filter(|d| d.image_path.is_some()).count(),
        index,
    })
}

/// Assemble a batch of 2D exports one after another
///
/// A pair that fails is reported and recorded in the summary without
/// stopping the batch. Fatal errors (vocabulary or output directory
/// problems) abort the whole batch.
///
/// # Arguments
///
/// * `paths` - 2D exports
/// * `vocabulary` - Canonical bone order for the presence mask
/// * `resolver` - Image layouts probed under the base directory
/// * `config` - Base directory, output directory and record format
/// * `verbose` - Show a progress bar
pub fn assemble_batch(
    paths: &[PathBuf],
    vocabulary: &BoneVocabulary,
    resolver: &ImageResolver,
    config: &AssembleConfig,
    verbose: bool,
) -> Result<BatchSummary, PoseError> {
    let pb = ut::track::progress_bar(paths.len(), "Assembling", verbose);

    let mut summary = BatchSummary::default();

    for path in paths.iter().tqdm_with_bar(pb) {
        match assemble_pair(path, vocabulary, resolver, config) {
            Ok(pair) => summary.pairs.push(pair),
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                ut::track::progress_warn(&format!("Skipping {}: {}", path.display(), err));
                summary.failures.push((path.clone(), err));
            }
        }
    }

    Ok(summary)
}
