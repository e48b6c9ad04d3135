// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;

use serde_json::Value;

use crate::constant::VOCABULARY_KEY;
use crate::error::PoseError;

/// Canonical ordered set of bone names
///
/// The order defines the layout of every presence mask. Membership is an
/// exact string match; bone names are never case folded here.
///
/// # Examples
///
/// ```
/// use morphpose_core::pose::BoneVocabulary;
///
/// let vocabulary = BoneVocabulary::new(vec!["Head", "Spine", "Tail"]).unwrap();
/// assert_eq!(vocabulary.len(), 3);
/// assert_eq!(vocabulary.index_of("Tail"), Some(2));
/// assert!(!vocabulary.contains("head"));
///
/// assert!(BoneVocabulary::new(vec!["Head", "Head"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoneVocabulary {
    bones: Vec<String>,
    index: HashMap<String, usize>,
}

impl BoneVocabulary {
    /// Initialize a vocabulary from ordered, unique bone names
    pub fn new<S: Into<String>>(bones: Vec<S>) -> Result<Self, PoseError> {
        let bones: Vec<String> = bones.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(bones.len());

        for (i, bone) in bones.iter().enumerate() {
            if index.insert(bone.clone(), i).is_some() {
                return Err(PoseError::ConfigError(format!(
                    "Duplicate bone name in vocabulary: {}",
                    bone
                )));
            }
        }

        Ok(Self { bones, index })
    }

    /// Build a vocabulary from any collection of bone names, sorted
    ///
    /// This is the offline superset construction; the runtime pipeline only
    /// ever loads a saved vocabulary.
    pub fn from_bones<I, S>(bones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = bones.into_iter().map(Into::into).collect();
        let bones: Vec<String> = unique.into_iter().collect();
        let index = bones
            .iter()
            .enumerate()
            .map(|(i, bone)| (bone.clone(), i))
            .collect();

        Self { bones, index }
    }
}

// >>> I/O METHODS

impl BoneVocabulary {
    /// Open the vocabulary stored under the `all` key
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a json vocabulary file
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use morphpose_core::pose::BoneVocabulary;
    /// let vocabulary = BoneVocabulary::open("bones.json").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PoseError> {
        Self::open_key(path, VOCABULARY_KEY)
    }

    /// Open the vocabulary stored under a specific key
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a json vocabulary file
    /// * `key` - Key holding the ordered list of bone names
    pub fn open_key<P: AsRef<Path>>(path: P, key: &str) -> Result<Self, PoseError> {
        let path = path.as_ref();
        let mut contents = String::new();

        File::open(path)
            .map_err(|err| PoseError::ConfigError(format!("{}: {}", path.display(), err)))?
            .read_to_string(&mut contents)
            .map_err(|err| PoseError::ConfigError(format!("{}: {}", path.display(), err)))?;

        let data: Value = serde_json::from_str(&contents)
            .map_err(|err| PoseError::ConfigError(format!("{}: {}", path.display(), err)))?;

        let entries = data.get(key).and_then(|v| v.as_array()).ok_or_else(|| {
            PoseError::ConfigError(format!(
                "{} does not contain a list under key '{}'",
                path.display(),
                key
            ))
        })?;

        let bones: Vec<String> = entries
            .iter()
            .map(|entry| {
                entry.as_str().map(str::to_string).ok_or_else(|| {
                    PoseError::ConfigError(format!("Non-string bone name under '{}'", key))
                })
            })
            .collect::<Result<_, _>>()?;

        Self::new(bones)
    }

    /// Save the vocabulary under the `all` key
    ///
    /// # Arguments
    ///
    /// * `path` - Path to output json file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PoseError> {
        let file = File::create(path.as_ref())
            .map_err(|err| PoseError::OtherError(format!("Failed to create vocabulary: {}", err)))?;
        let writer = BufWriter::new(file);

        let mut data = serde_json::Map::new();
        data.insert(VOCABULARY_KEY.to_string(), serde_json::json!(self.bones));

        serde_json::to_writer_pretty(writer, &data)
            .map_err(|err| PoseError::OtherError(format!("Failed to write vocabulary: {}", err)))
    }
}

// <<< I/O METHODS

// >>> PROPERTY METHODS

impl BoneVocabulary {
    /// Number of bones
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Check if the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Position of a bone in mask order
    pub fn index_of(&self, bone: &str) -> Option<usize> {
        self.index.get(bone).copied()
    }

    pub fn contains(&self, bone: &str) -> bool {
        self.index.contains_key(bone)
    }

    /// Bone names in mask order
    pub fn as_slice(&self) -> &[String] {
        &self.bones
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.bones.iter().map(String::as_str)
    }
}

// <<< PROPERTY METHODS
