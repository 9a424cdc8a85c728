use crate::algebra::FloatT;
use crate::canon::{CanonArtifact, CanonError};

use serde::{de::DeserializeOwned, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

impl<T> CanonArtifact<T>
where
    T: FloatT + Serialize + DeserializeOwned,
{
    /// Write the artifact to a file as JSON.
    pub fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json = serde_json::to_string(&self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Read an artifact back from a JSON file.
    ///
    /// The recorded layout name must be one this engine defines; anything
    /// else is an unsupported layout.
    pub fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let artifact: CanonArtifact<T> = serde_json::from_str(&buffer)?;

        match artifact.format.as_str() {
            "qp" | "conic" => Ok(artifact),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                CanonError::UnsupportedLayout(other.to_string()),
            )),
        }
    }
}
