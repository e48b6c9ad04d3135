// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::pose::BoneVocabulary;

/// Fixed-order joint presence vector over a bone vocabulary
///
/// Position `i` is 1 exactly when the i-th vocabulary bone appears in the
/// pose. Downstream model inputs rely on this order.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use morphpose_core::pose::{BoneVocabulary, PresenceMask};
///
/// let vocabulary = BoneVocabulary::new(vec!["Head", "Spine", "Tail"]).unwrap();
/// let bones: BTreeSet<String> = ["Head", "Tail"].iter().map(|b| b.to_string()).collect();
///
/// let mask = PresenceMask::generate(&vocabulary, &bones);
/// assert_eq!(mask.as_slice(), &[1, 0, 1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresenceMask(Vec<u8>);

impl PresenceMask {
    /// Compute the mask of a pose's bone set
    ///
    /// # Arguments
    ///
    /// * `vocabulary` - Canonical bone order
    /// * `bones` - Bones present in a pose, matched exactly
    pub fn generate(vocabulary: &BoneVocabulary, bones: &BTreeSet<String>) -> Self {
        Self(
            vocabulary
                .iter()
                .map(|bone| u8::from(bones.contains(bone)))
                .collect(),
        )
    }

    /// Mask length
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of vocabulary bones present
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&bit| bit == 1).count()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for PresenceMask {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let bits: Vec<String> = self.0.iter().map(|bit| bit.to_string()).collect();
        write!(f, "[{}]", bits.join(", "))
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn bone_set(bones: &[&str]) -> BTreeSet<String> {
        bones.iter().map(|bone| bone.to_string()).collect()
    }

    #[test]
    pub fn test_mask_length_matches_vocabulary() {
        let vocabulary = BoneVocabulary::new(vec!["A", "B", "C", "D"]).unwrap();

        for bones in [vec![], vec!["A"], vec!["B", "D"], vec!["A", "B", "C", "D", "E"]] {
            let mask = PresenceMask::generate(&vocabulary, &bone_set(&bones));
            assert_eq!(mask.len(), vocabulary.len());

            for (i, bone) in vocabulary.iter().enumerate() {
                assert_eq!(mask.as_slice()[i] == 1, bones.contains(&bone));
            }
        }
    }

    #[test]
    pub fn test_mask_is_case_sensitive() {
        let vocabulary = BoneVocabulary::new(vec!["Head", "Tail"]).unwrap();
        let mask = PresenceMask::generate(&vocabulary, &bone_set(&["head", "Tail"]));
        assert_eq!(mask.as_slice(), &[0, 1]);
        assert_eq!(mask.count(), 1);
    }

    #[test]
    pub fn test_mask_display() {
        let vocabulary = BoneVocabulary::new(vec!["Head", "Spine", "Tail"]).unwrap();
        let mask = PresenceMask::generate(&vocabulary, &bone_set(&["Head", "Tail"]));
        assert_eq!(mask.to_string(), "[1, 0, 1]");
    }

    #[test]
    pub fn test_mask_serializes_as_list() {
        let vocabulary = BoneVocabulary::new(vec!["Head", "Spine"]).unwrap();
        let mask = PresenceMask::generate(&vocabulary, &bone_set(&["Spine"]));
        assert_eq!(serde_json::to_string(&mask).unwrap(), "[0,1]");
    }
}
