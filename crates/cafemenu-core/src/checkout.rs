//! Checkout state: the applied promo code and the discounted total.
//!
//! The remote promo check itself lives in the client crate; this module
//! owns the wire types and how a check outcome changes the discount.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;
use crate::settings::MenuSettings;

/// Upper bound for an applied discount; a promo never makes an order free.
const MAX_DISCOUNT: f64 = 0.99;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromoError {
    #[error("promo codes are disabled")]
    Disabled,

    #[error("promo code is empty")]
    EmptyCode,
}

/// Verdict of the promo endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum PromoStatus {
    Ok,
    /// This user already redeemed the code.
    Used,
    /// The code's redemption cap is reached.
    Limit,
    /// Unknown code, or any status this client does not recognise.
    Invalid,
}

impl From<String> for PromoStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "OK" => PromoStatus::Ok,
            "USED" => PromoStatus::Used,
            "LIMIT" => PromoStatus::Limit,
            _ => PromoStatus::Invalid,
        }
    }
}

impl std::fmt::Display for PromoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromoStatus::Ok => write!(f, "promo code applied"),
            PromoStatus::Used => write!(f, "you have already used this code"),
            PromoStatus::Limit => write!(f, "this promo code has run out"),
            PromoStatus::Invalid => write!(f, "promo code not found"),
        }
    }
}

/// Body of `POST /api/check_promo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromoRequest {
    pub code: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

impl PromoRequest {
    /// Builds a request with the code trimmed and uppercased.
    ///
    /// # Errors
    ///
    /// [`PromoError::EmptyCode`] when nothing is left after trimming.
    pub fn new(code: &str, user_id: i64) -> Result<Self, PromoError> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(PromoError::EmptyCode);
        }
        Ok(Self { code, user_id })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PromoResponse {
    pub status: PromoStatus,
    /// Fraction in `[0, 1)`; only meaningful with [`PromoStatus::Ok`].
    #[serde(default)]
    pub discount: Option<f64>,
}

/// Discount currently applied to the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkout {
    discount: f64,
    promo_code: Option<String>,
}

impl Checkout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepares a promo check for `code`.
    ///
    /// # Errors
    ///
    /// - [`PromoError::Disabled`] when the menu settings turn promos off.
    /// - [`PromoError::EmptyCode`] for a blank code.
    pub fn promo_request(
        &self,
        settings: &MenuSettings,
        code: &str,
        user_id: i64,
    ) -> Result<PromoRequest, PromoError> {
        if !settings.promos_enabled() {
            return Err(PromoError::Disabled);
        }
        PromoRequest::new(code, user_id)
    }

    /// Applies the outcome of a promo check.
    ///
    /// `OK` sets the discount and code, any other status clears them, and a
    /// transport error leaves both as they were and is handed back.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub fn apply_promo<E>(
        &mut self,
        code: &str,
        outcome: Result<PromoResponse, E>,
    ) -> Result<PromoStatus, E> {
        let response = outcome?;
        match response.status {
            PromoStatus::Ok => {
                self.discount = clamp_discount(response.discount);
                self.promo_code = Some(code.trim().to_uppercase());
            }
            PromoStatus::Used | PromoStatus::Limit | PromoStatus::Invalid => self.reset(),
        }
        tracing::info!(
            code,
            status = ?response.status,
            discount = self.discount,
            "promo check completed"
        );
        Ok(response.status)
    }

    pub fn reset(&mut self) {
        self.discount = 0.0;
        self.promo_code = None;
    }

    #[must_use]
    pub fn discount(&self) -> f64 {
        self.discount
    }

    #[must_use]
    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code.as_deref()
    }

    /// Discount as a whole percentage, for display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn discount_percent(&self) -> u32 {
        (self.discount * 100.0).round() as u32
    }

    /// Amount taken off the cart total, rounded to whole tenge.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn discount_amount(&self, cart: &Cart) -> u32 {
        let amount = (f64::from(cart.total()) * self.discount).round() as u32;
        amount.min(cart.total())
    }

    /// Cart total after the discount.
    #[must_use]
    pub fn total(&self, cart: &Cart) -> u32 {
        cart.total() - self.discount_amount(cart)
    }
}

fn clamp_discount(discount: Option<f64>) -> f64 {
    discount
        .filter(|d| d.is_finite())
        .map_or(0.0, |d| d.clamp(0.0, MAX_DISCOUNT))
}
