use thiserror::Error;

use super::render::Slot;

/// Failures that can happen inside a countdown tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CountdownError {
    /// The page has no slot for this output. Expected on page variants
    /// without a countdown block.
    #[error("render slot {0} is not present")]
    MissingRenderTarget(Slot),
    /// A read or write failed but the next tick may succeed.
    #[error("transient render failure: {0}")]
    TransientRender(String),
    /// The controller cannot continue; it destroys itself.
    #[error("fatal countdown error: {0}")]
    FatalInternal(String),
}

impl CountdownError {
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::FatalInternal(_))
    }
}
