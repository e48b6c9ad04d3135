// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use rayon::prelude::*;
use zip::result::ZipError;
use zip::write::ExtendedFileOptions;

use crate::constant::{SUPPORTED_RECORD_FORMATS, ZIP_IMAGE_ENTRY, ZIP_RECORD_ENTRY};
use crate::error::PoseError;
use crate::pose::Datapoint;
use crate::ut;

/// On-disk layout of a datapoint record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordFormat {
    /// One json document, image bytes inlined as a byte array
    #[default]
    Json,
    /// Archive holding the json document and the raw image as separate entries
    Zip,
}

impl RecordFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            RecordFormat::Json => "json",
            RecordFormat::Zip => "zip",
        }
    }

    /// Detect a record format from a path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse().ok())
    }
}

impl FromStr for RecordFormat {
    type Err = PoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(RecordFormat::Json),
            "zip" => Ok(RecordFormat::Zip),
            _ => Err(PoseError::OtherError(format!(
                "Invalid record format '{}'. Must be one of: {:?}",
                s, SUPPORTED_RECORD_FORMATS
            ))),
        }
    }
}

/// Read a datapoint's render into its image bytes
///
/// A missing path or unreadable file leaves `image_bytes` empty and emits a
/// warning; it is never an error.
pub fn attach_image_bytes(datapoint: &mut Datapoint) {
    datapoint.image_bytes = match &datapoint.image_path {
        Some(path) => match std::fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                ut::track::progress_warn(&format!(
                    "Could not read image {}: {}",
                    path.display(),
                    err
                ));
                None
            }
        },
        None => None,
    };
}

/// Attach image bytes and write one record per datapoint
///
/// Records are named `{stem}_frame{frame}_cam{camera}_focal{focal}.{ext}`
/// and overwrite any existing file of the same name. A record that fails to
/// write is reported and skipped.
///
/// # Arguments
///
/// * `datapoints` - Datapoints with resolved image paths
/// * `output_dir` - Record directory, created if absent
/// * `stem` - Stem of the 2D source file
/// * `format` - Record format
///
/// # Returns
///
/// Number of records written
pub fn persist<P: AsRef<Path>>(
    datapoints: &mut [Datapoint],
    output_dir: P,
    stem: &str,
    format: RecordFormat,
) -> Result<usize, PoseError> {
    let output_dir = ut::path::ensure_directory(output_dir)?;

    let results: Vec<Result<(), PoseError>> = datapoints
        .par_iter_mut()
        .map(|datapoint| {
            attach_image_bytes(datapoint);
            let path = output_dir.join(datapoint.record_name(stem, format.extension()));
            write_record(datapoint, path, format)
        })
        .collect();

    let mut written = 0;
    for result in results {
        match result {
            Ok(()) => written += 1,
            Err(err) => ut::track::progress_warn(&err.to_string()),
        }
    }

    Ok(written)
}

/// Write a datapoint record
///
/// # Arguments
///
/// * `datapoint` - Datapoint to write
/// * `path` - Output path
/// * `format` - Record format
pub fn write_record<P: AsRef<Path>>(
    datapoint: &Datapoint,
    path: P,
    format: RecordFormat,
) -> Result<(), PoseError> {
    match format {
        RecordFormat::Json => write_record_json(datapoint, path),
        RecordFormat::Zip => write_record_zip(datapoint, path),
    }
}

/// Read a datapoint record, detecting the format from the extension
///
/// # Examples
///
/// ```no_run
/// use morphpose_core::io::read_record;
/// let datapoint = read_record("coordinates_2d_Akita_Sit_frame0_camA_focal50.json").unwrap();
/// ```
pub fn read_record<P: AsRef<Path>>(path: P) -> Result<Datapoint, PoseError> {
    match RecordFormat::from_path(&path) {
        Some(RecordFormat::Json) => read_record_json(path),
        Some(RecordFormat::Zip) => read_record_zip(path),
        None => Err(PoseError::RecordReadError(format!(
            "{} has no supported record extension ({:?})",
            path.as_ref().display(),
            SUPPORTED_RECORD_FORMATS
        ))),
    }
}

fn write_error(path: &Path, err: impl std::fmt::Display) -> PoseError {
    PoseError::RecordWriteError(format!("{}: {}", path.display(), err))
}

fn read_error(path: &Path, err: impl std::fmt::Display) -> PoseError {
    PoseError::RecordReadError(format!("{}: {}", path.display(), err))
}

fn write_record_json<P: AsRef<Path>>(datapoint: &Datapoint, path: P) -> Result<(), PoseError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| write_error(path, err))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, datapoint).map_err(|err| write_error(path, err))?;
    writer.flush().map_err(|err| write_error(path, err))
}

fn read_record_json<P: AsRef<Path>>(path: P) -> Result<Datapoint, PoseError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| read_error(path, err))?;

    serde_json::from_reader(BufReader::new(file)).map_err(|err| read_error(path, err))
}

fn write_record_zip<P: AsRef<Path>>(datapoint: &Datapoint, path: P) -> Result<(), PoseError> {
    let path = path.as_ref();
    let file = BufWriter::new(File::create(path).map_err(|err| write_error(path, err))?);

    let mut zip = zip::ZipWriter::new(file);

    // The image travels as its own entry rather than inside the json
    let header = Datapoint {
        subject: datapoint.subject.clone(),
        file_name_2d: datapoint.file_name_2d.clone(),
        file_name_3d: datapoint.file_name_3d.clone(),
        action: datapoint.action.clone(),
        camera: datapoint.camera.clone(),
        frame: datapoint.frame,
        focal_length: datapoint.focal_length.clone(),
        pose_2d: datapoint.pose_2d.clone(),
        pose_3d: datapoint.pose_3d.clone(),
        joint_presence_mask: datapoint.joint_presence_mask.clone(),
        image_path: datapoint.image_path.clone(),
        image_bytes: None,
    };

    zip.start_file::<_, ExtendedFileOptions>(ZIP_RECORD_ENTRY, Default::default())
        .map_err(|err| write_error(path, err))?;

    serde_json::to_writer(&mut zip, &header).map_err(|err| write_error(path, err))?;

    if let Some(bytes) = &datapoint.image_bytes {
        zip.start_file::<_, ExtendedFileOptions>(ZIP_IMAGE_ENTRY, Default::default())
            .map_err(|err| write_error(path, err))?;

        zip.write_all(bytes).map_err(|err| write_error(path, err))?;
    }

    zip.finish().map_err(|err| write_error(path, err))?;

    Ok(())
}

fn read_record_zip<P: AsRef<Path>>(path: P) -> Result<Datapoint, PoseError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| read_error(path, err))?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file)).map_err(|err| read_error(path, err))?;

    let mut datapoint: Datapoint = {
        let entry = archive
            .by_name(ZIP_RECORD_ENTRY)
            .map_err(|err| read_error(path, err))?;

        serde_json::from_reader(entry).map_err(|err| read_error(path, err))?
    };

    datapoint.image_bytes = match archive.by_name(ZIP_IMAGE_ENTRY) {
        Ok(mut entry) => {
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            entry
                .read_to_end(&mut bytes)
                .map_err(|err| read_error(path, err))?;
            Some(bytes)
        }
        Err(ZipError::FileNotFound) => None,
        Err(err) => return Err(read_error(path, err)),
    };

    Ok(datapoint)
}
