//! Promo code and checkout command handlers.

use std::path::PathBuf;

use anyhow::Context;
use cafemenu_client::{ClientError, PromoClient};
use cafemenu_core::{
    is_pizza_time, AppConfig, Cart, ClientStorage, Fulfillment, HostBridge, KeyValueStore, Menu,
    MenuSettings, OrderForm, OrderSubmitter, OrderTime, PaymentMethod, PromoStatus,
};
use chrono::{Local, Timelike};
use clap::Args;

use crate::bridge::CliBridge;
use crate::cart::print_cart;
use crate::session::Session;

const PIZZA_MARKERS: &[&str] = &["PIZZA", "ПИЦЦА"];

/// Checkout form. Name, phone and address default to the remembered ones.
#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// pickup, delivery or dinein
    #[arg(long, default_value = "pickup")]
    pub fulfillment: Fulfillment,
    /// Required for delivery
    #[arg(long)]
    pub address: Option<String>,
    /// cash, card, kaspi or halyk
    #[arg(long, default_value = "cash")]
    pub payment: PaymentMethod,
    /// Wallet phone, required for kaspi and halyk
    #[arg(long)]
    pub payment_phone: Option<String>,
    /// Ready-by time such as 18:30; omit for as soon as possible
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub comment: Option<String>,
    /// Write the order payload to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl OrderArgs {
    /// Fills the form from the flags over the remembered contact details.
    /// With nothing remembered the name falls back to the host user's.
    pub fn form<S: KeyValueStore>(
        &self,
        storage: &ClientStorage<S>,
        bridge: &impl HostBridge,
    ) -> OrderForm {
        let mut form = OrderForm::prefilled(&storage.customer());
        if form.name.is_empty() {
            if let Some(first_name) = bridge.user().and_then(|u| u.first_name) {
                form.name = first_name;
            }
        }

        if let Some(name) = &self.name {
            form.name.clone_from(name);
        }
        if let Some(phone) = &self.phone {
            form.phone.clone_from(phone);
        }
        if let Some(address) = &self.address {
            form.address.clone_from(address);
        }
        form.fulfillment = self.fulfillment;
        form.payment = self.payment;
        form.payment_phone = self.payment_phone.clone().unwrap_or_default();
        form.time = match &self.time {
            Some(time) => OrderTime::Scheduled(Some(time.clone())),
            None => OrderTime::Asap,
        };
        form.comment = self.comment.clone().unwrap_or_default();
        form
    }
}

fn has_pizza(cart: &Cart) -> bool {
    cart.lines().iter().any(|line| {
        let category = line.category().to_uppercase();
        PIZZA_MARKERS.iter().any(|m| category.contains(m))
    })
}

/// Warnings shown before submitting; they never block the order.
fn checkout_warnings(settings: &MenuSettings, cart: &Cart, hour: u32) -> Vec<String> {
    let mut warnings = Vec::new();
    if !settings.is_open(hour) {
        warnings.push(format!(
            "we are closed right now (open {}), the order will be handled when we open",
            settings.hours_label()
        ));
    }
    if has_pizza(cart) && !is_pizza_time(hour) {
        warnings.push("pizza is baked from 11:00, it will be ready after that".to_owned());
    }
    warnings
}

/// Checks a promo code with the backend and applies the outcome.
///
/// # Errors
///
/// Returns an error when promos are off, the code is blank, the backend is
/// unreachable, or the session cannot be saved. A transport error leaves
/// any earlier discount in place.
pub(crate) async fn run_promo<S: KeyValueStore>(
    config: &AppConfig,
    menu: &Menu,
    storage: &mut ClientStorage<S>,
    code: &str,
) -> anyhow::Result<()> {
    let mut session = Session::load(storage);
    let request = session
        .checkout
        .promo_request(&menu.settings, code, config.user_id)?;

    let client = PromoClient::new(
        &config.backend_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let outcome: Result<_, ClientError> = client.check(&request).await;
    let status = session
        .checkout
        .apply_promo(&request.code, outcome)
        .context("could not check the promo code, try again")?;
    session.save(storage)?;

    match status {
        PromoStatus::Ok => println!(
            "{status} -{}% applied, total {} ₸",
            session.checkout.discount_percent(),
            session.checkout.total(&session.cart)
        ),
        _ => println!("{status}"),
    }
    Ok(())
}

/// Submits the stored cart through the terminal bridge.
///
/// # Errors
///
/// Returns an error when a required field is missing, the cart is empty, or
/// the payload cannot be delivered. The cart is kept on failure.
pub(crate) fn run_order<S: KeyValueStore>(
    config: &AppConfig,
    menu: &Menu,
    storage: &mut ClientStorage<S>,
    args: &OrderArgs,
) -> anyhow::Result<()> {
    let bridge = CliBridge::new(config, args.out.clone());
    let form = args.form(storage, &bridge);
    let mut session = Session::load(storage);

    for warning in checkout_warnings(&menu.settings, &session.cart, Local::now().hour()) {
        eprintln!("warning: {warning}");
    }

    let payload = OrderSubmitter::new(storage, &bridge).submit(
        &form,
        &mut session.cart,
        &mut session.checkout,
    )?;
    session.save(storage)?;

    tracing::info!(
        lines = payload.cart.len(),
        total = payload.total,
        delivery_type = %payload.info.delivery_type,
        "order submitted"
    );
    if let Some(path) = &args.out {
        eprintln!("order written to {}", path.display());
    }
    print_cart(&session.cart, &session.checkout);
    Ok(())
}
