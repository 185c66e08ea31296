use std::fmt;

/// Identifies which shader stage a compile diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStageKind {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStageKind::Vertex => f.write_str("vertex"),
            ShaderStageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// Failures that can occur while bringing up a background renderer.
///
/// All three variants are terminal for the instance: the shader sources are
/// compile-time constants, so retrying would reproduce the same failure. The
/// host is expected to log the error and carry on without the effect.
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("gpu drawing context unavailable: {reason}")]
    ContextUnavailable { reason: String },
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStageKind, log: String },
    #[error("shader program failed to link: {log}")]
    ProgramLink { log: String },
}
