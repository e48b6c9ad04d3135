// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::{Path, PathBuf};

use crate::constant::{IMAGE_EXTENSION, MISSING_ACTION};
use crate::pose::Datapoint;
use crate::ut;

/// Expected file name of the render behind a datapoint
///
/// Returns `None` when the datapoint has no subject.
///
/// # Examples
///
/// ```
/// use morphpose_core::pose::{Datapoint, PresenceMask, image_file_name};
///
/// let datapoint = Datapoint {
///     subject: Some("Akita".to_string()),
///     file_name_2d: String::new(),
///     file_name_3d: String::new(),
///     action: None,
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
///     image_file_name(&datapoint).unwrap(),
///     "render_Akita_unknown_Cam_A_f50_frame0007.png"
/// );
/// ```
pub fn image_file_name(datapoint: &Datapoint) -> Option<String> {
    let subject = datapoint.subject.as_deref()?;

    Some(format!(
        "render_{}_{}_{}_f{}_frame{:04}.{}",
        subject,
        action(datapoint),
        datapoint.camera,
        datapoint.focal_length,
        datapoint.frame,
        IMAGE_EXTENSION
    ))
}

fn action(datapoint: &Datapoint) -> &str {
    datapoint.action.as_deref().unwrap_or(MISSING_ACTION)
}

/// A directory layout that may hold the render of a datapoint
pub trait ImageLayout: Send + Sync {
    /// Candidate directory for a datapoint's render under a base directory
    fn directory(&self, base_dir: &Path, datapoint: &Datapoint) -> Option<PathBuf>;
}

/// `{base}/output_{subject}_{action}/focal_{focal}/{camera}/`
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatLayout;

impl ImageLayout for FlatLayout {
    fn directory(&self, base_dir: &Path, datapoint: &Datapoint) -> Option<PathBuf> {
        let subject = datapoint.subject.as_deref()?;

        Some(
            base_dir
                .join(format!("output_{}_{}", subject, action(datapoint)))
                .join(format!("focal_{}", datapoint.focal_length))
                .join(&datapoint.camera),
        )
    }
}

/// `{base}/output_{subject lowercase}/output_{subject}_{action}/focal_{focal}/{camera}/`
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectNestedLayout;

impl ImageLayout for SubjectNestedLayout {
    fn directory(&self, base_dir: &Path, datapoint: &Datapoint) -> Option<PathBuf> {
        let subject = datapoint.subject.as_deref()?;

        FlatLayout.directory(
            &base_dir.join(format!("output_{}", subject.to_lowercase())),
            datapoint,
        )
    }
}

/// Ordered fallback chain of image layouts
///
/// The first layout whose composed path exists wins.
///
/// # Examples
///
/// ```
/// use morphpose_core::pose::{FlatLayout, ImageResolver};
///
/// let resolver = ImageResolver::default();
/// assert_eq!(resolver.len(), 2);
///
/// let resolver = ImageResolver::empty().with_layout(FlatLayout);
/// assert_eq!(resolver.len(), 1);
/// ```
pub struct ImageResolver {
    layouts: Vec<Box<dyn ImageLayout>>,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self {
            layouts: vec![Box::new(FlatLayout), Box::new(SubjectNestedLayout)],
        }
    }
}

impl ImageResolver {
    /// Resolver with no layouts
    pub fn empty() -> Self {
        Self { layouts: vec![] }
    }

    /// Append a layout tried after all existing ones
    pub fn with_layout<L: ImageLayout + 'static>(mut self, layout: L) -> Self {
        self.layouts.push(Box::new(layout));
        self
    }

    /// Number of layouts tried
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Every path the resolver would probe, in order
    pub fn candidates(&self, datapoint: &Datapoint, base_dir: &Path) -> Vec<PathBuf> {
        let Some(file_name) = image_file_name(datapoint) else {
            return vec![];
        };

        self.layouts
            .iter()
            .filter_map(|layout| layout.directory(base_dir, datapoint))
            .map(|directory| directory.join(&file_name))
            .collect()
    }

    /// First existing render path of a datapoint
    ///
    /// A missing render is not an error; a warning is emitted and `None`
    /// returned.
    ///
    /// # Arguments
    ///
    /// * `datapoint` - Datapoint to locate
    /// * `base_dir` - Root of the render output tree
    pub fn resolve(&self, datapoint: &Datapoint, base_dir: &Path) -> Option<PathBuf> {
        let candidates = self.candidates(datapoint, base_dir);

        if let Some(path) = candidates.iter().find(|path| path.is_file()) {
            return Some(path.clone());
        }

        if candidates.is_empty() {
            ut::track::progress_warn(&format!(
                "No image path can be built for frame {} of {} (missing subject).",
                datapoint.frame, datapoint.file_name_2d
            ));
        } else {
            ut::track::progress_warn(&format!(
                "Image not found for frame {} camera {} focal {}. Tried: {}",
                datapoint.frame,
                datapoint.camera,
                datapoint.focal_length,
                candidates
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        None
    }
}
