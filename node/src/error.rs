use thiserror::Error;

/// Errors raised while assembling or running a node.
///
/// Request-level failures never surface here: the verification service
/// reports those inside its response envelope. A `NodeError` means the
/// process itself is misassembled and should not be serving traffic.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("config error: {0}")]
    Config(String),
}
