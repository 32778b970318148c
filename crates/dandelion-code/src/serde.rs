use dandelion_core::{Code, DandelionError, ErrorInfo, KTreeCode, NodeId, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::params::CodecParams;
use crate::validate::{validate_code, validate_root_set};

#[derive(Debug, Serialize, Deserialize)]
struct SerializableCode {
    #[serde(default)]
    schema_version: SchemaVersion,
    n: usize,
    k: usize,
    q: Vec<NodeId>,
    code: Code,
}

impl SerializableCode {
    fn from_code(code: &KTreeCode) -> Self {
        Self {
            schema_version: SchemaVersion::default(),
            n: code.n,
            k: code.k,
            q: code.q.clone(),
            code: code.code.clone(),
        }
    }

    fn into_code(self) -> Result<KTreeCode, DandelionError> {
        if !self.schema_version.is_compatible_with(&SchemaVersion::default()) {
            return Err(DandelionError::Serde(
                ErrorInfo::new("schema-mismatch", "unsupported code schema version")
                    .with_context("major", self.schema_version.major),
            ));
        }
        let params = CodecParams::new(self.n, self.k)?;
        validate_root_set(&self.q, &params)?;
        validate_code(&self.code, &params)?;
        Ok(KTreeCode {
            n: self.n,
            k: self.k,
            q: self.q,
            code: self.code,
        })
    }
}

/// Serializes a complete code to a JSON string.
pub fn to_json(code: &KTreeCode) -> Result<String, DandelionError> {
    serde_json::to_string_pretty(&SerializableCode::from_code(code))
        .map_err(|err| DandelionError::Serde(ErrorInfo::new("json-serialize", err.to_string())))
}

/// Restores a complete code from a JSON string, validating it on the way.
pub fn from_json(data: &str) -> Result<KTreeCode, DandelionError> {
    let payload: SerializableCode = serde_json::from_str(data)
        .map_err(|err| DandelionError::Serde(ErrorInfo::new("json-deserialize", err.to_string())))?;
    payload.into_code()
}

/// Serializes a complete code into a binary blob.
pub fn to_bytes(code: &KTreeCode) -> Result<Vec<u8>, DandelionError> {
    bincode::serialize(&SerializableCode::from_code(code)).map_err(|err| {
        DandelionError::Serde(ErrorInfo::new("bincode-serialize", err.to_string()))
    })
}

/// Rehydrates a complete code from a binary blob.
pub fn from_bytes(bytes: &[u8]) -> Result<KTreeCode, DandelionError> {
    let payload: SerializableCode = bincode::deserialize(bytes).map_err(|err| {
        DandelionError::Serde(ErrorInfo::new("bincode-deserialize", err.to_string()))
    })?;
    payload.into_code()
}
