// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

// Logical column names after lowercasing
pub const FRAME: &str = "frame";
pub const CAMERA: &str = "camera";
pub const BONE: &str = "bone";
pub const X: &str = "x";
pub const Y: &str = "y";
pub const Z: &str = "z";
pub const FOCAL_LENGTH: &str = "focal_length";

// Headers accepted for the focal length column, in lookup order
pub const FOCAL_LENGTH_HEADERS: [&str; 2] = ["focal length", "focal_length"];

// Columns required to merge a 2D export
pub const REQUIRED_2D_COLUMNS: [&str; 6] = [FRAME, CAMERA, BONE, X, Y, FOCAL_LENGTH];

// Columns required to merge a 3D export (camera and focal length can be backfilled)
pub const REQUIRED_3D_COLUMNS: [&str; 5] = [FRAME, BONE, X, Y, Z];

// Columns a 3D export must have to skip camera/focal length backfill
pub const RENDER_KEY_COLUMNS: [&str; 2] = [CAMERA, FOCAL_LENGTH];

// Default key in the bone vocabulary file
pub const VOCABULARY_KEY: &str = "all";

// Default bone vocabulary file name
pub const VOCABULARY_FILE: &str = "bones.json";

// Environment variable overriding the default bone vocabulary path
pub const VOCABULARY_ENV: &str = "MORPHPOSE_BONES";

// Filename markers for pose exports
pub const EXPORT_PREFIX_2D: &str = "coordinates_2d_";
pub const EXPORT_PREFIX_3D: &str = "coordinates_3d_";
pub const DIMENSION_MARKERS: [&str; 2] = ["2d", "3d"];

// Action label used in image paths when a filename carries no action
pub const MISSING_ACTION: &str = "unknown";

// Extension of rendered images
pub const IMAGE_EXTENSION: &str = "png";

// Default output directory for records under the base directory
pub const RECORD_DIRECTORY: &str = "datapoints";

// Supported datapoint record formats
pub const SUPPORTED_RECORD_FORMATS: [&str; 2] = ["json", "zip"];

// Entry names inside zip records
pub const ZIP_RECORD_ENTRY: &str = "datapoint.json";
pub const ZIP_IMAGE_ENTRY: &str = "image.png";

// Supported index table formats
pub const SUPPORTED_TABLE_FORMATS: [&str; 5] = ["csv", "tsv", "txt", "parquet", "pq"];
