//! Detecting the return leg of a bank redirect.

use std::fmt;

use url::Url;

/// Query parameter Stripe appends to `return_url` after the bank redirect.
pub const CLIENT_SECRET_PARAM: &str = "payment_intent_client_secret";

/// Opaque token scoping client-side actions to one PaymentIntent.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// `None` for an empty (or all-whitespace) token.
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            None
        } else {
            Some(Self(secret))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Client secrets end up in logs; only the intent id prefix is printed.
impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let intent = self.0.split("_secret").next().unwrap_or_default();
        write!(f, "ClientSecret({intent}_secret_…)")
    }
}

/// The client secret carried by a redirect-return URL, if any.
pub fn client_secret_from_url(href: &str) -> Option<ClientSecret> {
    let url = Url::parse(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == CLIENT_SECRET_PARAM)
        .and_then(|(_, value)| ClientSecret::new(value.into_owned()))
}

/// Where Stripe should send the customer back to: the page they are on.
pub fn return_url(href: &str) -> String {
    href.to_string()
}
