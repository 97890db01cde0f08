//! Seam to the host platform the storefront runs inside.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("host bridge I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("host rejected the payload: {0}")]
    Rejected(String),
}

/// Identity the host hands to the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostUser {
    pub id: i64,
    pub first_name: Option<String>,
}

/// Tactile feedback kinds the host may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Haptic {
    Success,
    Error,
}

pub trait HostBridge {
    /// The signed-in user, when the host provides one.
    fn user(&self) -> Option<HostUser>;

    fn haptic(&self, kind: Haptic);

    /// Submits the serialized order. The host does not answer; a returned
    /// error means the payload never left.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] when the payload could not be handed over.
    fn send_data(&self, payload: &str) -> Result<(), BridgeError>;
}
