//! Host bridge for the terminal: the order payload goes to a file or stdout.

use std::path::PathBuf;

use cafemenu_core::{AppConfig, BridgeError, Haptic, HostBridge, HostUser};

pub(crate) struct CliBridge {
    user: HostUser,
    out: Option<PathBuf>,
}

impl CliBridge {
    pub fn new(config: &AppConfig, out: Option<PathBuf>) -> Self {
        Self {
            user: HostUser {
                id: config.user_id,
                first_name: config.user_name.clone(),
            },
            out,
        }
    }
}

impl HostBridge for CliBridge {
    fn user(&self) -> Option<HostUser> {
        Some(self.user.clone())
    }

    fn haptic(&self, kind: Haptic) {
        tracing::debug!(?kind, "haptic feedback");
    }

    fn send_data(&self, payload: &str) -> Result<(), BridgeError> {
        match &self.out {
            Some(path) => std::fs::write(path, payload)?,
            None => println!("{payload}"),
        }
        Ok(())
    }
}
