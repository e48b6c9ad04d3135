// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use polars::prelude::*;

use crate::constant::{BONE, FOCAL_LENGTH, FOCAL_LENGTH_HEADERS};
use crate::error::PoseError;

/// A pose export loaded into memory with lowercased column names
///
/// Values are passed through exactly as the CSV reader inferred them. Typed
/// views over logical columns are produced on demand by casting, so a
/// numeric `camera` column reads back as strings and an integer `x` column
/// reads back as floats. Row order is always file order.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use morphpose_core::pose::PoseTable;
///
/// let df = df!(
///     "Frame" => [0i64, 0],
///     "Bone" => ["Head", "Tail"],
///     "Focal Length" => [50i64, 50],
/// ).unwrap();
///
/// let table = PoseTable::from_dataframe("pose.csv", df).unwrap();
/// assert!(table.has_column("frame"));
/// assert!(table.has_column("focal_length"));
/// assert_eq!(table.bones().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PoseTable {
    name: String,
    data: DataFrame,
}

impl PoseTable {
    /// Wrap a DataFrame, lowercasing its column names
    ///
    /// # Arguments
    ///
    /// * `name` - Name used when reporting problems with this table
    /// * `data` - Raw table as read from an export
    pub fn from_dataframe(name: &str, mut data: DataFrame) -> Result<Self, PoseError> {
        let names: Vec<String> = data
            .get_column_names()
            .iter()
            .map(|column| column.to_lowercase())
            .collect();

        let mut seen: HashSet<&str> = HashSet::with_capacity(names.len());
        for column in names.iter() {
            if !seen.insert(column.as_str()) {
                return Err(PoseError::SchemaError(format!(
                    "{} has more than one column named '{}' after lowercasing",
                    name, column
                )));
            }
        }

        data.set_column_names(names)
            .map_err(|err| PoseError::SchemaError(format!("{}: {}", name, err)))?;

        Ok(Self {
            name: name.to_string(),
            data,
        })
    }
}

// >>> I/O METHODS

impl PoseTable {
    /// Open a pose export from a CSV file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a CSV file with a header row
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use morphpose_core::pose::PoseTable;
    /// let table = PoseTable::open("coordinates_2d_Akita_Sit.csv").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PoseError> {
        let path = path.as_ref();

        // Infer over every row so a late float does not break an integer-looking column
        let data = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .map_err(|err| PoseError::IoError(format!("{}: {}", path.display(), err)))?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Self::from_dataframe(&name, data)
    }
}

// <<< I/O METHODS

// >>> PROPERTY METHODS

impl PoseTable {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.data.height()
    }

    /// Lowercased column names in file order
    pub fn columns(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|column| column.to_string())
            .collect()
    }

    /// Check if a logical column is present
    pub fn has_column(&self, logical: &str) -> bool {
        self.column(logical).is_some()
    }

    /// Fail with a schema error naming every missing logical column
    ///
    /// # Arguments
    ///
    /// * `logical` - Logical column names required for the table's role
    pub fn require(&self, logical: &[&str]) -> Result<(), PoseError> {
        let missing: Vec<&str> = logical
            .iter()
            .copied()
            .filter(|column| !self.has_column(column))
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(PoseError::SchemaError(format!(
            "{} is missing [{}]. Columns present: [{}]",
            self.name,
            missing.join(", "),
            self.columns().join(", ")
        )))
    }

    /// Return a reference to the underlying DataFrame
    pub fn as_dataframe(&self) -> &DataFrame {
        &self.data
    }
}

// <<< PROPERTY METHODS

// >>> TYPED COLUMN METHODS

impl PoseTable {
    /// Physical column backing a logical column name
    fn column(&self, logical: &str) -> Option<&Column> {
        let headers: &[&str] = if logical == FOCAL_LENGTH {
            &FOCAL_LENGTH_HEADERS
        } else {
            std::slice::from_ref(&logical)
        };

        headers
            .iter()
            .find_map(|header| self.data.column(header).ok())
    }

    fn cast(&self, logical: &str, dtype: &DataType) -> Result<Series, PoseError> {
        let column = self.column(logical).ok_or_else(|| {
            PoseError::SchemaError(format!("{} is missing [{}]", self.name, logical))
        })?;

        column
            .as_materialized_series()
            .cast(dtype)
            .map_err(|err| PoseError::SchemaError(format!("{}.{}: {}", self.name, logical, err)))
    }

    /// Values of a logical column as integers, null where absent or unparseable
    pub fn integers(&self, logical: &str) -> Result<Vec<Option<i64>>, PoseError> {
        let series = self.cast(logical, &DataType::Int64)?;
        let values = series
            .i64()
            .map_err(|err| PoseError::SchemaError(format!("{}.{}: {}", self.name, logical, err)))?;

        Ok(values.into_iter().collect())
    }

    /// Values of a logical column as floats, null where absent or unparseable
    pub fn floats(&self, logical: &str) -> Result<Vec<Option<f64>>, PoseError> {
        let series = self.cast(logical, &DataType::Float64)?;
        let values = series
            .f64()
            .map_err(|err| PoseError::SchemaError(format!("{}.{}: {}", self.name, logical, err)))?;

        Ok(values.into_iter().collect())
    }

    /// Values of a logical column rendered as strings
    pub fn strings(&self, logical: &str) -> Result<Vec<Option<String>>, PoseError> {
        let series = self.cast(logical, &DataType::String)?;
        let values = series
            .str()
            .map_err(|err| PoseError::SchemaError(format!("{}.{}: {}", self.name, logical, err)))?;

        Ok(values
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect())
    }

    /// Non-null bone names in row order, repeats included
    pub fn bone_values(&self) -> Result<Vec<String>, PoseError> {
        self.require(&[BONE])?;
        Ok(self.strings(BONE)?.into_iter().flatten().collect())
    }

    /// Distinct non-null bone names
    pub fn bones(&self) -> Result<BTreeSet<String>, PoseError> {
        Ok(self.bone_values()?.into_iter().collect())
    }
}

// <<< TYPED COLUMN METHODS

#[cfg(test)]
mod test {

    use super::*;

    fn pose_df() -> DataFrame {
        df!(
            "Frame" => [0i64, 0, 1],
            "Camera" => [1i64, 1, 2],
            "Bone" => [Some("Head"), None, Some("Tail")],
            "X" => [1i64, 2, 3],
            "Y" => [0.5f64, 1.5, 2.5],
            "Focal Length" => [50.0f64, 50.0, 35.0],
        )
        .unwrap()
    }

    #[test]
    pub fn test_lowercase_columns() {
        let table = PoseTable::from_dataframe("pose.csv", pose_df()).unwrap();
        assert_eq!(
            table.columns(),
            vec!["frame", "camera", "bone", "x", "y", "focal length"]
        );
    }

    #[test]
    pub fn test_duplicate_lowercase_columns() {
        let df = df!("Bone" => ["Head"], "bone" => ["Tail"]).unwrap();
        let table = PoseTable::from_dataframe("pose.csv", df);
        assert!(matches!(table, Err(PoseError::SchemaError(_))));
    }

    #[test]
    pub fn test_require_reports_missing() {
        let table = PoseTable::from_dataframe("pose.csv", pose_df()).unwrap();
        assert!(table.require(&["frame", "bone", "focal_length"]).is_ok());

        let error = table.require(&["frame", "z"]).unwrap_err();
        assert!(error.to_string().contains("[z]"));
    }

    #[test]
    pub fn test_focal_length_underscore_header() {
        let df = df!("focal_length" => [50i64]).unwrap();
        let table = PoseTable::from_dataframe("pose.csv", df).unwrap();
        assert_eq!(
            table.strings("focal_length").unwrap(),
            vec![Some("50".to_string())]
        );
    }

    #[test]
    pub fn test_typed_columns() {
        let table = PoseTable::from_dataframe("pose.csv", pose_df()).unwrap();

        assert_eq!(table.integers("frame").unwrap(), vec![Some(0), Some(0), Some(1)]);
        assert_eq!(
            table.strings("camera").unwrap(),
            vec![Some("1".to_string()), Some("1".to_string()), Some("2".to_string())]
        );
        assert_eq!(table.floats("x").unwrap(), vec![Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(table.strings("bone").unwrap()[1], None);
    }

    #[test]
    pub fn test_bones_skip_nulls() {
        let table = PoseTable::from_dataframe("pose.csv", pose_df()).unwrap();
        let bones = table.bones().unwrap();
        assert_eq!(bones.into_iter().collect::<Vec<_>>(), vec!["Head", "Tail"]);
    }

    #[test]
    pub fn test_bones_requires_bone_column() {
        let df = df!("frame" => [0i64]).unwrap();
        let table = PoseTable::from_dataframe("pose.csv", df).unwrap();
        assert!(matches!(table.bones(), Err(PoseError::SchemaError(_))));
    }

    #[test]
    pub fn test_open_csv() {
        let path = std::env::temp_dir().join(format!(
            "morphpose_table_open_{}.csv",
            std::process::id()
        ));

        std::fs::write(
            &path,
            "Frame,Camera,Bone,X,Y,Focal Length\n0,Cam_A,Head,1.0,2.0,50\n0,Cam_A,Tail,3.0,4.0,50\n",
        )
        .unwrap();

        let table = PoseTable::open(&path).unwrap();
        assert_eq!(table.height(), 2);
        assert!(table.require(&["frame", "camera", "bone", "x", "y", "focal_length"]).is_ok());
        assert_eq!(
            table.strings("focal_length").unwrap(),
            vec![Some("50".to_string()), Some("50".to_string())]
        );

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    pub fn test_open_infers_schema_over_every_row() {
        let path = std::env::temp_dir().join(format!(
            "morphpose_table_late_float_{}.csv",
            std::process::id()
        ));

        let mut contents = String::from("Frame,Camera,Bone,X,Y,Focal Length\n");
        for frame in 0..150 {
            contents.push_str(&format!("{},A,Head,{},{},50\n", frame, frame, frame * 2));
        }
        contents.push_str("150,A,Head,12.5,3.25,35.5\n");
        std::fs::write(&path, contents).unwrap();

        let table = PoseTable::open(&path).unwrap();
        assert_eq!(table.height(), 151);

        let xs = table.floats("x").unwrap();
        assert_eq!(xs[149], Some(149.0));
        assert_eq!(xs[150], Some(12.5));
        assert_eq!(
            table.strings("focal_length").unwrap()[150].as_deref(),
            Some("35.5")
        );

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    pub fn test_open_missing_file() {
        let table = PoseTable::open("does_not_exist/coordinates_2d_Akita_Sit.csv");
        assert!(matches!(table, Err(PoseError::IoError(_))));
    }
}
