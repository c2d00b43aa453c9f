//! Protocol descriptors: what callers register and what selection hands back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::protocol::version::{BINARY_MARKER, VERSION_SEPARATOR};

/// Version assigned to protocols registered without one.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Keys owned by the descriptor itself; never kept as passthrough fields.
const RESERVED_FIELDS: [&str; 4] = ["name", "binary", "version", "id"];

/// Caller-supplied description of a protocol, before normalization.
///
/// Everything except `binary` and `version` is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolSpec {
    /// Whether the protocol uses a binary wire encoding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<bool>,
    /// Version string in `MAJOR.MINOR[.PATCH]` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Arbitrary passthrough fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProtocolSpec {
    /// An empty spec: text encoding, version `0.0.0`, no extra fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the binary flag.
    pub fn with_binary(mut self, binary: bool) -> Self {
        self.binary = Some(binary);
        self
    }

    /// Set the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Attach a passthrough field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A registered protocol with its normalized fields and derived id.
///
/// The id is computed once at construction; fields are read-only afterwards
/// so the id can never drift from `name`, `binary` and `version`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolDescriptor {
    name: String,
    binary: bool,
    version: String,
    id: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ProtocolDescriptor {
    /// Normalize a spec under the given name.
    pub fn new(name: impl Into<String>, spec: ProtocolSpec) -> Self {
        let name = name.into();
        let binary = spec.binary.unwrap_or(false);
        let version = spec
            .version
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());
        let id = format_id(&name, binary, &version);

        let mut extra = spec.extra;
        for key in RESERVED_FIELDS {
            extra.remove(key);
        }

        Self {
            name,
            binary,
            version,
            id,
            extra,
        }
    }

    /// Protocol name as registered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the protocol uses a binary wire encoding.
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Normalized version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Derived id, `name[:b]@version`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// A passthrough field by key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// All passthrough fields.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Build the id string for a protocol: `foo@1.2.3` or `foo:b@1.2.3`.
pub fn format_id(name: &str, binary: bool, version: &str) -> String {
    let marker = if binary { BINARY_MARKER } else { "" };
    format!("{name}{marker}{VERSION_SEPARATOR}{version}")
}
