//! Candidate column names for every field of the menu feed.
//!
//! The sheet is edited by staff in either language, so each field lists its
//! English header first and the Russian one after it. Order matters: see
//! [`crate::Row::resolve`].

pub const ID: &[&str] = &["id", "Идентификатор"];
pub const CATEGORY: &[&str] = &["category", "Категория"];
pub const NAME: &[&str] = &["name", "Название"];
pub const PRICE: &[&str] = &["price", "Цена"];
pub const SHORT_DESCRIPTION: &[&str] = &["description", "Короткое описание"];
pub const FULL_DESCRIPTION: &[&str] = &[
    "fullDesc",
    "Описание",
    "full_description",
    "Полное описание",
];
pub const AVAILABLE: &[&str] = &["available", "В наличии"];
pub const IMAGE: &[&str] = &["image", "Фото"];
pub const POPULAR: &[&str] = &["popular", "Популярный товар"];
pub const VOLUMES: &[&str] = &["volumes", "Варианты", "Volumes"];
pub const BADGE: &[&str] = &["badge", "Метка"];
pub const MODIFIERS: &[&str] = &["modifiers", "Модификаторы", "mods"];

/// Where the settings row keeps its `key=value` list.
pub const SETTINGS_DESCRIPTION: &[&str] = &["description", "Описание"];

/// Identifier of the row that carries global settings instead of a product.
pub const SETTINGS_ID: &str = "SETTINGS";
