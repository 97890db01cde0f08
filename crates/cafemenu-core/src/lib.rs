pub mod app_config;
pub mod bridge;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod columns;
mod config;
pub mod menu;
pub mod order;
pub mod price;
pub mod pricing;
pub mod product;
pub mod repeat;
pub mod row;
pub mod selection;
pub mod settings;
pub mod storage;

pub use app_config::AppConfig;
pub use bridge::{BridgeError, Haptic, HostBridge, HostUser};
pub use cart::{Cart, CartError, CartLine, CartOptions};
pub use catalog::{Catalog, FAVORITES_CATEGORY};
pub use checkout::{Checkout, PromoError, PromoRequest, PromoResponse, PromoStatus};
pub use config::{load_app_config, load_app_config_from_env};
pub use menu::{parse_menu, parse_product, Menu, MenuError};
pub use order::{
    Fulfillment, OrderError, OrderForm, OrderInfo, OrderPayload, OrderSubmitter, OrderTime,
    PaymentMethod,
};
pub use price::parse_price;
pub use pricing::compute_price;
pub use product::{BadgeStyle, DisplayPrice, ModifierPrice, Product, ProductKind, Volume};
pub use repeat::RepeatOrder;
pub use row::Row;
pub use selection::{AddOn, MilkChoice, Selection, SelectionError};
pub use settings::{is_pizza_time, parse_settings, MenuSettings, PriceTable, NONE_OPTION};
pub use storage::{
    ClientStorage, Customer, JsonFileStore, KeyValueStore, MemoryStore, StorageError,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
