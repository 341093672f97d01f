use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("unknown protection level: {0}")]
    UnknownLevel(String),
}

/// Caller-selected aggressiveness tier. Each level maps to exactly one
/// override fragment in the catalog below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtectionLevel {
    Low,
    Medium,
    High,
}

impl ProtectionLevel {
    pub const ALL: [ProtectionLevel; 3] = [
        ProtectionLevel::Low,
        ProtectionLevel::Medium,
        ProtectionLevel::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectionLevel::Low => "low",
            ProtectionLevel::Medium => "medium",
            ProtectionLevel::High => "high",
        }
    }
}

impl fmt::Display for ProtectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtectionLevel {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(ProtectionLevel::Low),
            "medium" => Ok(ProtectionLevel::Medium),
            "high" => Ok(ProtectionLevel::High),
            other => Err(PresetError::UnknownLevel(other.to_string())),
        }
    }
}

/// Fully composed option set handed to the transformation engine,
/// serialized as-is into the engine request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ObfuscationConfig {
    options: Map<String, Value>,
}

impl ObfuscationConfig {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

// Applies to every level; level fragments are merged over this.
fn base_fragment() -> Map<String, Value> {
    object(json!({
        "target": "node",
        "compact": true,
        "minify": true,
        "renameVariables": true,
        "renameGlobals": true,
        "stringEncoding": true,
        "stringConcealing": true,
        "stringCompression": true,
        "duplicateLiteralsRemoval": 1.0,
        "hexadecimalNumbers": true,
        "identifierGenerator": "branded",
    }))
}

fn override_fragment(level: ProtectionLevel) -> Map<String, Value> {
    match level {
        ProtectionLevel::Low => object(json!({
            "controlFlowFlattening": 0.3,
            "opaquePredicates": 0.2,
        })),
        ProtectionLevel::Medium => object(json!({
            "controlFlowFlattening": 0.7,
            "opaquePredicates": 0.5,
            "flatten": true,
        })),
        ProtectionLevel::High => object(json!({
            "controlFlowFlattening": 1.0,
            "opaquePredicates": 0.9,
            "flatten": true,
            "stack": true,
            "dispatcher": true,
            "calculator": true,
            "movedDeclarations": true,
            "objectExtraction": true,
            "globalConcealing": true,
        })),
    }
}

/// Overlay the level's fragment onto the base fragment, later-wins on
/// key collision. Pure and total over the enum.
pub fn compose(level: ProtectionLevel) -> ObfuscationConfig {
    let mut options = base_fragment();
    for (key, value) in override_fragment(level) {
        options.insert(key, value);
    }
    ObfuscationConfig { options }
}

/// Parse-then-compose for callers holding the raw level string; anything
/// outside the enumerated set is an error, never a silent default.
pub fn compose_named(level: &str) -> Result<ObfuscationConfig, PresetError> {
    Ok(compose(level.parse()?))
}
