// Scene loading: a JSON element tree plus an ordered rule set
use crate::css::RuleDef;
use crate::dom::ElementDef;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum SceneError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SceneError::Io(msg) => write!(f, "Scene read error: {}", msg),
            SceneError::Parse(msg) => write!(f, "Scene parse error: {}", msg),
        }
    }
}

impl std::error::Error for SceneError {}

/// A complete page description: the element tree and its style rules
///
/// The rules are an ordered array; later entries win ties during the
/// cascade, so the serialized order is meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub tree: ElementDef,
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        serde_json::from_str(json).map_err(|err| SceneError::Parse(err.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        tracing::debug!("Loading scene from {}", path.display());
        let json = fs::read_to_string(path)
            .map_err(|err| SceneError::Io(format!("{}: {}", path.display(), err)))?;
        Self::from_json(&json)
    }
}
