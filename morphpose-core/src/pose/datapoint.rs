// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::pose::PresenceMask;

/// A bone position in image coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joint2d {
    pub bone: String,
    pub x: f64,
    pub y: f64,
}

/// A bone position in world coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joint3d {
    pub bone: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Identity of a datapoint within one subject's exports
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatapointKey {
    pub subject: Option<String>,
    pub frame: i64,
    pub camera: String,
    pub focal_length: String,
}

/// One assembled training record for a single frame, camera and focal length
///
/// Built by the merger, then completed in place with the resolved image path
/// and finally the raw image bytes before it is written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    pub subject: Option<String>,
    pub file_name_2d: String,
    pub file_name_3d: String,
    pub action: Option<String>,
    pub camera: String,
    pub frame: i64,
    pub focal_length: String,
    pub pose_2d: Vec<Joint2d>,
    pub pose_3d: Vec<Joint3d>,
    pub joint_presence_mask: PresenceMask,
    #[serde(default)]
    pub image_path: Option<PathBuf>,
    #[serde(default)]
    pub image_bytes: Option<Vec<u8>>,
}

impl Datapoint {
    pub fn key(&self) -> DatapointKey {
        DatapointKey {
            subject: self.subject.clone(),
            frame: self.frame,
            camera: self.camera.clone(),
            focal_length: self.focal_length.clone(),
        }
    }

    /// Record file name for this datapoint
    ///
    /// # Arguments
    ///
    /// * `stem` - Stem of the 2D source file
    /// * `extension` - Record extension without a leading dot
    ///
    /// # Examples
    ///
    /// ```
    /// use morphpose_core::pose::{Datapoint, PresenceMask};
    ///
    /// let datapoint = Datapoint {
    ///     subject: Some("Akita".to_string()),
    ///     file_name_2d: "coordinates_2d_Akita_Sit.csv".to_string(),
    ///     file_name_3d: "coordinates_3d_Akita_Sit.csv".to_string(),
    ///     action: Some("Sit".to_string()),
    ///     camera: "Cam_A".to_string(),
    ///     frame: 7,
    ///     focal_length: "50".to_string(),
    ///     pose_2d: vec![],
    ///     pose_3d: vec![],
    ///     joint_presence_mask: PresenceMask::default(),
    ///     image_path: None,
    ///     image_bytes: None,
    /// };
    ///
    /// assert_eq!(
    ///     datapoint.record_name("coordinates_2d_Akita_Sit", "json"),
    ///     "coordinates_2d_Akita_Sit_frame7_camCam_A_focal50.json"
    /// );
    /// ```
    pub fn record_name(&self, stem: &str, extension: &str) -> String {
        format!(
            "{}_frame{}_cam{}_focal{}.{}",
            stem, self.frame, self.camera, self.focal_length, extension
        )
    }

    /// Check if image bytes have been attached
    pub fn has_image(&self) -> bool {
        self.image_bytes.is_some()
    }
}
