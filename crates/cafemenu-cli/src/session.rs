//! Cart and promo state carried between CLI invocations.

use anyhow::Context;
use cafemenu_core::{Cart, Checkout, ClientStorage, KeyValueStore};
use serde::{Deserialize, Serialize};

const SESSION_KEY: &str = "cafemenu_session";

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Session {
    #[serde(default)]
    pub cart: Cart,
    #[serde(default)]
    pub checkout: Checkout,
}

impl Session {
    /// The stored session, or an empty one when none is stored or it is
    /// unreadable.
    pub fn load<S: KeyValueStore>(storage: &ClientStorage<S>) -> Self {
        storage.read_json(SESSION_KEY).unwrap_or_default()
    }

    pub fn save<S: KeyValueStore>(&self, storage: &mut ClientStorage<S>) -> anyhow::Result<()> {
        storage
            .write_json(SESSION_KEY, self)
            .context("failed to save the cart")
    }
}
