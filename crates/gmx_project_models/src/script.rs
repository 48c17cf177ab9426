use serde::Serialize;
use smol_str::SmolStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Script {
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Shader {
    pub kind: SmolStr, // `type` attribute of the manifest entry, e.g. GLSLES
    pub vertex: String,
    pub fragment: String,
}
