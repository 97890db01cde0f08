//! Order form validation, payload assembly and submission.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::bridge::{BridgeError, Haptic, HostBridge};
use crate::cart::{Cart, CartLine};
use crate::checkout::Checkout;
use crate::storage::{ClientStorage, Customer, KeyValueStore};

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("choose a time for the scheduled order")]
    MissingTime,

    #[error("name and phone are required")]
    MissingContact,

    #[error("a delivery address is required")]
    MissingAddress,

    #[error("a {0} account phone is required")]
    MissingPaymentPhone(PaymentMethod),

    #[error("the cart is empty")]
    EmptyCart,

    #[error("unknown {field}: {value}")]
    UnknownChoice { field: &'static str, value: String },

    #[error("failed to encode order: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fulfillment {
    #[default]
    Pickup,
    Delivery,
    DineIn,
}

impl Fulfillment {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Fulfillment::Pickup => "Pickup",
            Fulfillment::Delivery => "Delivery",
            Fulfillment::DineIn => "Dine-in",
        }
    }
}

impl std::fmt::Display for Fulfillment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Fulfillment {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pickup" => Ok(Fulfillment::Pickup),
            "delivery" => Ok(Fulfillment::Delivery),
            "dinein" | "dine-in" => Ok(Fulfillment::DineIn),
            _ => Err(OrderError::UnknownChoice {
                field: "fulfillment",
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Kaspi,
    Halyk,
}

impl PaymentMethod {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Kaspi => "Kaspi",
            PaymentMethod::Halyk => "Halyk",
        }
    }

    /// E-wallet payments are billed to a phone number.
    #[must_use]
    pub fn is_e_wallet(self) -> bool {
        matches!(self, PaymentMethod::Kaspi | PaymentMethod::Halyk)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "kaspi" => Ok(PaymentMethod::Kaspi),
            "halyk" => Ok(PaymentMethod::Halyk),
            _ => Err(OrderError::UnknownChoice {
                field: "payment method",
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OrderTime {
    #[default]
    Asap,
    /// Ready by the given time; `None` until the buyer picks one.
    Scheduled(Option<String>),
}

/// What the buyer filled in at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub name: String,
    pub phone: String,
    pub fulfillment: Fulfillment,
    pub address: String,
    pub payment: PaymentMethod,
    pub payment_phone: String,
    pub time: OrderTime,
    pub comment: String,
}

/// Customer block of the order payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfo {
    pub name: String,
    pub phone: String,
    pub delivery_type: String,
    pub address: String,
    pub payment_type: String,
    pub payment_phone: String,
    pub comment: String,
    pub discount: f64,
    pub promo_code: String,
}

/// JSON document handed to the host bridge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPayload {
    pub cart: Vec<CartLine>,
    pub total: u32,
    pub info: OrderInfo,
}

impl OrderForm {
    /// A blank form with the remembered contact details filled in.
    #[must_use]
    pub fn prefilled(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone().unwrap_or_default(),
            phone: customer.phone.clone().unwrap_or_default(),
            address: customer.address.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Checks required fields in the order the buyer is told about them.
    ///
    /// # Errors
    ///
    /// Returns the first missing field as an [`OrderError`].
    pub fn validate(&self) -> Result<(), OrderError> {
        if let OrderTime::Scheduled(time) = &self.time {
            let picked = time.as_deref().is_some_and(|t| !t.trim().is_empty());
            if !picked {
                return Err(OrderError::MissingTime);
            }
        }
        if self.name.trim().is_empty() || self.phone.trim().is_empty() {
            return Err(OrderError::MissingContact);
        }
        if self.fulfillment == Fulfillment::Delivery && self.address.trim().is_empty() {
            return Err(OrderError::MissingAddress);
        }
        if self.payment.is_e_wallet() && self.payment_phone.trim().is_empty() {
            return Err(OrderError::MissingPaymentPhone(self.payment));
        }
        Ok(())
    }

    /// The buyer's comment, prefixed with when the order is wanted.
    #[must_use]
    pub fn timed_comment(&self) -> String {
        let prefix = match &self.time {
            OrderTime::Scheduled(Some(time)) => format!("By {}.", time.trim()),
            OrderTime::Asap | OrderTime::Scheduled(None) => "ASAP.".to_owned(),
        };
        let comment = self.comment.trim();
        if comment.is_empty() {
            prefix
        } else {
            format!("{prefix} {comment}")
        }
    }

    /// Validates the form and assembles the payload for `cart`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] when a field is missing or the cart is empty.
    pub fn build_payload(&self, cart: &Cart, checkout: &Checkout) -> Result<OrderPayload, OrderError> {
        self.validate()?;
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let address = if self.fulfillment == Fulfillment::Delivery {
            self.address.trim().to_owned()
        } else {
            String::new()
        };

        Ok(OrderPayload {
            cart: cart.snapshot(),
            total: checkout.total(cart),
            info: OrderInfo {
                name: self.name.trim().to_owned(),
                phone: self.phone.trim().to_owned(),
                delivery_type: self.fulfillment.label().to_owned(),
                address,
                payment_type: self.payment.label().to_owned(),
                payment_phone: self.payment_phone.trim().to_owned(),
                comment: self.timed_comment(),
                discount: checkout.discount(),
                promo_code: checkout.promo_code().unwrap_or_default().to_owned(),
            },
        })
    }
}

/// Sends finished orders to the host and keeps the client-side records.
pub struct OrderSubmitter<'a, S, B> {
    storage: &'a mut ClientStorage<S>,
    bridge: &'a B,
}

impl<'a, S: KeyValueStore, B: HostBridge> OrderSubmitter<'a, S, B> {
    pub fn new(storage: &'a mut ClientStorage<S>, bridge: &'a B) -> Self {
        Self { storage, bridge }
    }

    /// Submits the cart.
    ///
    /// On success the customer's contact details and the cart snapshot are
    /// stored, the payload is handed to the host, and then the cart and
    /// promo are cleared. Nothing is sent when validation fails, and a
    /// bridge failure leaves the cart as it was.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] for validation, encoding or bridge failures.
    pub fn submit(
        &mut self,
        form: &OrderForm,
        cart: &mut Cart,
        checkout: &mut Checkout,
    ) -> Result<OrderPayload, OrderError> {
        let payload = match form.build_payload(cart, checkout) {
            Ok(payload) => payload,
            Err(e) => {
                self.bridge.haptic(Haptic::Error);
                return Err(e);
            }
        };
        let json = serde_json::to_string(&payload)?;

        self.storage
            .remember_customer(&form.name, &form.phone, &form.address);
        if let Err(e) = self.storage.save_last_order(&payload.cart) {
            tracing::warn!(error = %e, "failed to store last order");
        }

        if let Err(e) = self.bridge.send_data(&json) {
            self.bridge.haptic(Haptic::Error);
            return Err(e.into());
        }

        tracing::info!(
            lines = payload.cart.len(),
            total = payload.total,
            promo = %payload.info.promo_code,
            "order submitted"
        );
        self.bridge.haptic(Haptic::Success);
        cart.clear();
        checkout.reset();
        Ok(payload)
    }
}

#[cfg(test)]
#[path = "order_test.rs"]
mod tests;
