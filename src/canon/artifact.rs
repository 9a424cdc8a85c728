use crate::algebra::FloatT;
use crate::canon::formats::CanonicalFormat;
use crate::canon::{
    Canonicalizer, SettingDescriptor, SparsityPattern, StructuralConstants,
};
use std::iter::zip;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// One canonical array as consumed by downstream code emitters: its
/// solver-facing label, fixed structure, initial values and invariance
/// flag.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct ArrayArtifact<T: FloatT> {
    pub label: String,
    pub shape: (usize, usize),
    /// fixed sparsity structure; present for matrix-shaped arrays
    pub pattern: Option<SparsityPattern>,
    /// values at the generation-time parameter assignment
    pub values: Vec<T>,
    /// false if the array never needs recomputation
    pub is_parametric: bool,
}

/// One parameter's outdated set, by name and array labels.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutdatedEntry {
    pub parameter: String,
    pub arrays: Vec<String>,
}

/// The complete generation output handed to downstream collaborators:
/// per-array encodings, dependency sets, structural constants and native
/// solver settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct CanonArtifact<T: FloatT> {
    /// canonical layout name ("qp" or "conic")
    pub format: String,
    pub constants: StructuralConstants,
    pub arrays: Vec<ArrayArtifact<T>>,
    pub outdated: Vec<OutdatedEntry>,
    pub settings: Vec<SettingDescriptor<T>>,
}

impl<T> Canonicalizer<T>
where
    T: FloatT,
{
    /// Assemble the artifact bundle from the generated state.
    pub fn artifact(&self) -> CanonArtifact<T> {
        let arrays = zip(&self.arrays, &self.data)
            .map(|(array, data)| ArrayArtifact {
                label: array.id.label().to_string(),
                shape: array.shape,
                pattern: array.pattern.clone(),
                values: data.values().to_vec(),
                is_parametric: array.is_parametric,
            })
            .collect();

        let outdated = self
            .params
            .iter()
            .enumerate()
            .map(|(j, p)| OutdatedEntry {
                parameter: p.name.clone(),
                arrays: self
                    .deps
                    .outdated(j)
                    .iter()
                    .map(|id| id.label().to_string())
                    .collect(),
            })
            .collect();

        CanonArtifact {
            format: self.format.name().to_string(),
            constants: self.constants.clone(),
            arrays,
            outdated,
            settings: self.format.setting_descriptors(),
        }
    }
}
