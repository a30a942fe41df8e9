//! Session configuration served by the backend and local checkout settings.

use serde::{Deserialize, Deserializer, Serialize};

/// `GET /config` response: `{ publicKey, amount, currency }`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Stripe publishable key (`pk_...`).
    #[serde(rename = "publicKey")]
    pub public_key: String,
    /// Order total in minor currency units (e.g. sen for MYR).
    #[serde(deserialize_with = "minor_units")]
    pub amount: u64,
    /// ISO 4217 currency code, e.g. `"myr"`.
    pub currency: String,
}

/// Servers that read the amount from the environment send it as a string.
fn minor_units<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(u64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("amount is not an integer: {s:?}"))),
    }
}

/// Client-side knobs for the checkout flow.
///
/// Every field has a default, so a host page only needs to supply the ones
/// it wants to change.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckoutSettings {
    /// Prefix for the backend endpoints. Empty means same origin.
    pub api_base: String,
    pub config_path: String,
    pub payment_intent_path: String,
    /// Stripe.js beta flags passed to `Stripe(key, { betas })`.
    pub betas: Vec<String>,
    /// Locale for `stripe.elements({ locale })`.
    pub locale: String,
    /// CSS selector the bank element is mounted into.
    pub mount_selector: String,
    /// `accountHolderType` for the `fpxBank` element.
    pub account_holder_type: String,
    /// How long an inline payment error stays visible.
    pub error_display_ms: u32,
    /// Delay before the result panel gets its `expand` class.
    pub result_expand_delay_ms: u32,
    /// How long to wait for the bank redirect to leave the page before
    /// showing the PaymentIntent in place.
    pub redirect_timeout_ms: u32,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            config_path: "/config".into(),
            payment_intent_path: "/create-payment-intent".into(),
            betas: vec!["fpx_bank_beta_1".into()],
            locale: "MS".into(),
            mount_selector: "#fpx-bank-element".into(),
            account_holder_type: "individual".into(),
            error_display_ms: 4000,
            result_expand_delay_ms: 200,
            redirect_timeout_ms: 10_000,
        }
    }
}

impl CheckoutSettings {
    pub fn config_url(&self) -> String {
        join(&self.api_base, &self.config_path)
    }

    pub fn payment_intent_url(&self) -> String {
        join(&self.api_base, &self.payment_intent_path)
    }
}

fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
