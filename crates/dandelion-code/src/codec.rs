use dandelion_core::{Code, DandelionError, ErrorInfo, KTreeCode, NodeId, UndirectedGraph};
use dandelion_graph::KTree;

use crate::params::CodecParams;
use crate::validate::{validate_code, validate_ktree, validate_root_set};

/// Codec value bound to one `(n, k)` pair.
///
/// Holds at most one k-tree and one code; each setter validates its input
/// before storing it, so a rejected value leaves the previous state intact.
#[derive(Debug, Clone)]
pub struct Dandelion {
    params: CodecParams,
    ktree: Option<KTree>,
    q: Option<Vec<NodeId>>,
    code: Option<Code>,
}

impl Dandelion {
    /// Creates an empty codec for the given parameters.
    pub fn new(params: CodecParams) -> Self {
        Self {
            params,
            ktree: None,
            q: None,
            code: None,
        }
    }

    /// Creates a codec holding a validated code.
    pub fn with_code(params: CodecParams, code: Code) -> Result<Self, DandelionError> {
        let mut codec = Self::new(params);
        codec.set_code(code)?;
        Ok(codec)
    }

    /// Parameters the codec was created with.
    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    /// Stored code, `None` when no code has been set or produced yet.
    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    /// Stored root set `Q`, `None` when unknown.
    pub fn root_set(&self) -> Option<&[NodeId]> {
        self.q.as_deref()
    }

    /// Stored k-tree, `None` when no k-tree has been set or decoded yet.
    pub fn ktree(&self) -> Option<&KTree> {
        self.ktree.as_ref()
    }

    /// Validates and stores a code. A previously stored root set is kept.
    pub fn set_code(&mut self, code: Code) -> Result<(), DandelionError> {
        validate_code(&code, &self.params)?;
        self.code = Some(code);
        Ok(())
    }

    /// Validates and stores the root set `Q` needed for decoding.
    pub fn set_root_set(&mut self, q: Vec<NodeId>) -> Result<(), DandelionError> {
        validate_root_set(&q, &self.params)?;
        self.q = Some(q);
        Ok(())
    }

    /// Validates the minimal shape of a k-tree and stores a copy of it.
    pub fn set_ktree<G>(&mut self, ktree: &G) -> Result<(), DandelionError>
    where
        G: UndirectedGraph + ?Sized,
    {
        validate_ktree(ktree)?;
        if ktree.node_count() != self.params.n() {
            return Err(DandelionError::InvalidKTreeShape(
                ErrorInfo::new("node-count", "k-tree size differs from n")
                    .with_context("expected", self.params.n())
                    .with_context("actual", ktree.node_count()),
            ));
        }
        self.ktree = Some(KTree::copy_of(ktree)?);
        Ok(())
    }

    /// Encodes the stored k-tree and keeps the result as the stored code.
    pub fn encode(&mut self) -> Result<&Code, DandelionError> {
        let ktree = self.ktree.as_ref().ok_or_else(|| {
            DandelionError::MissingInput(
                ErrorInfo::new("missing-ktree", "no k-tree to encode")
                    .with_hint("call set_ktree first"),
            )
        })?;
        let full = crate::encode_with_root_set(ktree, self.params.n(), self.params.k())?;
        self.q = Some(full.q);
        Ok(self.code.insert(full.code))
    }

    /// Decodes the stored code and root set and keeps the result as the
    /// stored k-tree.
    pub fn decode(&mut self) -> Result<&KTree, DandelionError> {
        let full = self.full_code()?;
        let ktree = crate::decode(&full)?;
        Ok(self.ktree.insert(ktree))
    }

    /// Returns the stored code together with its root set.
    pub fn full_code(&self) -> Result<KTreeCode, DandelionError> {
        let (Some(q), Some(code)) = (&self.q, &self.code) else {
            return Err(DandelionError::MissingInput(
                ErrorInfo::new("missing-code", "decoding needs both a code and its root set")
                    .with_context("has_code", self.code.is_some())
                    .with_context("has_root_set", self.q.is_some()),
            ));
        };
        Ok(KTreeCode {
            n: self.params.n(),
            k: self.params.k(),
            q: q.clone(),
            code: code.clone(),
        })
    }
}
