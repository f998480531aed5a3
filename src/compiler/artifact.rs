//! Persistence helpers for compiled graphs.
//!
//! The runtime graph travels as plain JSON between the authoring service,
//! storage and the survey runner, so the artifact format is JSON too.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::CompiledGraph;
use crate::error::ArtifactError;

/// A compiled workflow ready to hand to the survey runner, together with the
/// schema version it was written with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledArtifact {
    pub version: u32,
    pub graph: CompiledGraph,
}

/// Current artifact schema version.
pub const ARTIFACT_VERSION: u32 = 1;

impl CompiledArtifact {
    pub fn new(graph: CompiledGraph) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            graph,
        }
    }

    /// Saves the artifact to a file as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        let path = path.as_ref();
        let json = serde_json::to_vec(self)?;
        fs::write(path, json).map_err(|e| ArtifactError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Loads an artifact from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| ArtifactError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes an artifact from a JSON byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serializes the artifact to JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        Ok(serde_json::to_vec(self)?)
    }
}
