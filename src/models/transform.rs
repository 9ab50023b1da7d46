use serde::{Deserialize, Serialize};

use crate::common::DEFAULT_FRAME_DELAY_MS;

/// One named operation of a transform chain, with ordered `key:value`
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOp {
    name: String,
    params: Vec<(String, String)>,
}

impl TransformOp {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encode as one URL path segment: `name` or `name=k:v,k:v`.
    pub fn url_segment(&self) -> String {
        if self.params.is_empty() {
            return self.name.clone();
        }
        let params = self
            .params
            .iter()
            .map(|(key, value)| format!("{key}:{value}"))
            .collect::<Vec<_>>()
            .join(",");
        format!("{}={}", self.name, params)
    }
}

/// Ordered chain of transform operations applied server-side to the
/// uploaded handles. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSpec {
    ops: Vec<TransformOp>,
}

impl TransformSpec {
    pub fn new(ops: Vec<TransformOp>) -> Self {
        Self { ops }
    }

    /// The baseline chain: a single `animate` operation compositing the
    /// handles into an animation with the given frame delay in milliseconds.
    pub fn animate(delay_ms: u64) -> Self {
        Self::new(vec![TransformOp::new("animate").param("delay", delay_ms)])
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }
}

impl Default for TransformSpec {
    fn default() -> Self {
        Self::animate(DEFAULT_FRAME_DELAY_MS)
    }
}
