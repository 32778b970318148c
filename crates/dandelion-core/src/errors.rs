//! Structured error types shared across the dandelion crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`DandelionError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (node labels, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for encoding and decoding k-trees.
///
/// Every variant except [`DandelionError::Serde`] describes a problem with the
/// caller's input. The coding scheme is deterministic, so none of them can be
/// cured by retrying with the same input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", content = "detail")]
pub enum DandelionError {
    /// A code element is not an integer pair or lies outside the pair alphabet.
    #[error("invalid code shape: {0}")]
    InvalidCodeShape(ErrorInfo),
    /// A code does not have `n - k - 2` pairs.
    #[error("invalid code length: {0}")]
    InvalidCodeLength(ErrorInfo),
    /// The argument does not look like a graph at all.
    #[error("not a graph: {0}")]
    NotAGraph(ErrorInfo),
    /// No node of degree `k` exists, so no leaf can anchor the relabeling.
    #[error("degree-k node not found: {0}")]
    DegreeKNodeNotFound(ErrorInfo),
    /// The graph has the wrong size or neighbourhood shape for the given `(n, k)`.
    #[error("invalid k-tree shape: {0}")]
    InvalidKTreeShape(ErrorInfo),
    /// Degree-k elimination stopped before removing `n - k` nodes.
    #[error("pruning stalled: {0}")]
    PruningStalled(ErrorInfo),
    /// Two adjacent cliques do not differ in exactly one node.
    #[error("invalid clique structure: {0}")]
    InvalidCliqueStructure(ErrorInfo),
    /// The generated code length disagrees with `n - k - 2`.
    #[error("code length mismatch: {0}")]
    CodeLengthMismatch(ErrorInfo),
    /// An operation was requested before its input was provided.
    #[error("missing input: {0}")]
    MissingInput(ErrorInfo),
    /// The `(n, k)` parameter pair cannot describe a codable k-tree.
    #[error("invalid parameters: {0}")]
    InvalidParameters(ErrorInfo),
    /// Structural misuse of a graph or tree (unknown node, self-loop, ...).
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl DandelionError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            DandelionError::InvalidCodeShape(info)
            | DandelionError::InvalidCodeLength(info)
            | DandelionError::NotAGraph(info)
            | DandelionError::DegreeKNodeNotFound(info)
            | DandelionError::InvalidKTreeShape(info)
            | DandelionError::PruningStalled(info)
            | DandelionError::InvalidCliqueStructure(info)
            | DandelionError::CodeLengthMismatch(info)
            | DandelionError::MissingInput(info)
            | DandelionError::InvalidParameters(info)
            | DandelionError::Graph(info)
            | DandelionError::Serde(info) => info,
        }
    }

    /// Returns whether the error should be reported back as bad caller input.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, DandelionError::Serde(_))
    }

    /// Adds a context entry to the payload, keeping the variant.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.map_info(|info| info.with_context(key, value))
    }

    /// Attaches a remediation hint to the payload, keeping the variant.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        self.map_info(|info| info.with_hint(hint))
    }

    fn map_info(self, f: impl FnOnce(ErrorInfo) -> ErrorInfo) -> Self {
        match self {
            DandelionError::InvalidCodeShape(info) => DandelionError::InvalidCodeShape(f(info)),
            DandelionError::InvalidCodeLength(info) => DandelionError::InvalidCodeLength(f(info)),
            DandelionError::NotAGraph(info) => DandelionError::NotAGraph(f(info)),
            DandelionError::DegreeKNodeNotFound(info) => {
                DandelionError::DegreeKNodeNotFound(f(info))
            }
            DandelionError::InvalidKTreeShape(info) => DandelionError::InvalidKTreeShape(f(info)),
            DandelionError::PruningStalled(info) => DandelionError::PruningStalled(f(info)),
            DandelionError::InvalidCliqueStructure(info) => {
                DandelionError::InvalidCliqueStructure(f(info))
            }
            DandelionError::CodeLengthMismatch(info) => {
                DandelionError::CodeLengthMismatch(f(info))
            }
            DandelionError::MissingInput(info) => DandelionError::MissingInput(f(info)),
            DandelionError::InvalidParameters(info) => DandelionError::InvalidParameters(f(info)),
            DandelionError::Graph(info) => DandelionError::Graph(f(info)),
            DandelionError::Serde(info) => DandelionError::Serde(f(info)),
        }
    }
}
