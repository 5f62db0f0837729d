use serde::Serialize;
use serde_json::{Map, Value};

pub const UNKNOWN_SOURCE: &str = "unknown";

const SOURCE_KEY: &str = "source";

/// A retrieved text fragment together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextPassage {
    pub text: String,
    pub provenance: Provenance,
}

impl ContextPassage {
    pub fn new(text: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            text: text.into(),
            provenance,
        }
    }
}

/// Origin document name plus loader-supplied metadata. The metadata is opaque:
/// it is forwarded to the client as-is and never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provenance {
    pub source: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Provenance {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            metadata: Map::new(),
        }
    }

    /// Builds provenance from a raw metadata map, lifting its `source` entry out.
    /// A missing or non-string source becomes [`UNKNOWN_SOURCE`].
    pub fn from_metadata(mut metadata: Map<String, Value>) -> Self {
        let source = match metadata.remove(SOURCE_KEY) {
            Some(Value::String(source)) if !source.is_empty() => source,
            _ => UNKNOWN_SOURCE.to_string(),
        };

        Self { source, metadata }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if key != SOURCE_KEY {
            self.metadata.insert(key, value);
        }
        self
    }
}
