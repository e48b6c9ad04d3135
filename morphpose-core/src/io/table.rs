// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::constant::SUPPORTED_TABLE_FORMATS;
use crate::error::PoseError;
use crate::pose::Datapoint;

/// One row of the record index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRow {
    pub record: String,
    pub subject: Option<String>,
    pub action: Option<String>,
    pub frame: i64,
    pub camera: String,
    pub focal_length: String,
    pub joints_2d: u32,
    pub joints_3d: u32,
    pub image_path: Option<String>,
}

impl IndexRow {
    /// Describe a datapoint written under `record`
    pub fn new(datapoint: &Datapoint, record: String) -> Self {
        IndexRow {
            record,
            subject: datapoint.subject.clone(),
            action: datapoint.action.clone(),
            frame: datapoint.frame,
            camera: datapoint.camera.clone(),
            focal_length: datapoint.focal_length.clone(),
            joints_2d: datapoint.pose_2d.len() as u32,
            joints_3d: datapoint.pose_3d.len() as u32,
            image_path: datapoint
                .image_path
                .as_ref()
                .map(|path| path.display().to_string()),
        }
    }
}

/// Collect index rows into a table with one row per record
///
/// # Examples
///
/// ```
/// use morphpose_core::io::index_table;
///
/// let df = index_table(&[]).unwrap();
/// assert_eq!(df.height(), 0);
/// assert_eq!(df.width(), 9);
/// ```
pub fn index_table(rows: &[IndexRow]) -> Result<DataFrame, PoseError> {
    let record: Vec<String> = rows.iter().map(|r| r.record.clone()).collect();
    let subject: Vec<Option<String>> = rows.iter().map(|r| r.subject.clone()).collect();
    let action: Vec<Option<String>> = rows.iter().map(|r| r.action.clone()).collect();
    let frame: Vec<i64> = rows.iter().map(|r| r.frame).collect();
    let camera: Vec<String> = rows.iter().map(|r| r.camera.clone()).collect();
    let focal_length: Vec<String> = rows.iter().map(|r| r.focal_length.clone()).collect();
    let joints_2d: Vec<u32> = rows.iter().map(|r| r.joints_2d).collect();
    let joints_3d: Vec<u32> = rows.iter().map(|r| r.joints_3d).collect();
    let image_path: Vec<Option<String>> = rows.iter().map(|r| r.image_path.clone()).collect();

    DataFrame::new(vec![
        Column::new("record".into(), record),
        Column::new("subject".into(), subject),
        Column::new("action".into(), action),
        Column::new("frame".into(), frame),
        Column::new("camera".into(), camera),
        Column::new("focal_length".into(), focal_length),
        Column::new("joints_2d".into(), joints_2d),
        Column::new("joints_3d".into(), joints_3d),
        Column::new("image_path".into(), image_path),
    ])
    .map_err(|err| PoseError::OtherError(format!("Failed to build index table: {}", err)))
}

fn create<P: AsRef<Path>>(path: P) -> Result<File, PoseError> {
    File::create(&path).map_err(|err| {
        PoseError::IoError(format!(
            "Failed to create table {}: {}",
            path.as_ref().display(),
            err
        ))
    })
}

/// Write a table to a CSV file
///
/// # Arguments
///
/// * `df` - A DataFrame
/// * `path` - Output path
/// * `header` - Whether the output file should contain a header
pub fn write_table_csv<P: AsRef<Path>>(
    df: &mut DataFrame,
    path: P,
    header: bool,
) -> Result<(), PoseError> {
    let mut output = create(&path)?;

    CsvWriter::new(&mut output)
        .include_header(header)
        .finish(df)
        .map_err(|err| PoseError::IoError(format!("Failed to write CSV file: {}", err)))
}

/// Write a table to a TSV file
///
/// # Arguments
///
/// * `df` - A DataFrame
/// * `path` - Output path
/// * `header` - Whether the output file should contain a header
pub fn write_table_tsv<P: AsRef<Path>>(
    df: &mut DataFrame,
    path: P,
    header: bool,
) -> Result<(), PoseError> {
    let mut output = create(&path)?;

    CsvWriter::new(&mut output)
        .include_header(header)
        .with_separator(b'\t')
        .finish(df)
        .map_err(|err| PoseError::IoError(format!("Failed to write TSV file: {}", err)))
}

/// Write a table to a parquet file
pub fn write_table_pq<P: AsRef<Path>>(df: &mut DataFrame, path: P) -> Result<(), PoseError> {
    let mut output = create(&path)?;

    ParquetWriter::new(&mut output)
        .finish(df)
        .map(|_| ())
        .map_err(|err| PoseError::IoError(format!("Failed to write parquet file: {}", err)))
}

/// Write a DataFrame to disk, choosing the format from the extension
///
/// # Arguments
///
/// * `df` - A DataFrame
/// * `path` - Output path ending in csv, tsv, txt, parquet or pq
///
/// # Examples
///
/// ```no_run
/// use polars::prelude::*;
/// use morphpose_core::io::write_table;
///
/// let column = vec![Column::new("frame".into(), [0i64, 1, 2])];
/// let mut df: DataFrame = DataFrame::new(column).unwrap();
///
/// write_table(&mut df, "index.csv").unwrap()
/// ```
pub fn write_table<P: AsRef<Path>>(df: &mut DataFrame, path: P) -> Result<(), PoseError> {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some("csv") => write_table_csv(df, path, true),
        Some("tsv") | Some("txt") => write_table_tsv(df, path, true),
        Some("parquet") | Some("pq") => write_table_pq(df, path),
        _ => Err(PoseError::IoError(format!(
            "Provided table path has an invalid extension. Must be one of: {:?}",
            SUPPORTED_TABLE_FORMATS
        ))),
    }
}
