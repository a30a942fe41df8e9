//! Backend calls: session config and PaymentIntent creation.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::{CheckoutSettings, SessionConfig};
use crate::error::CheckoutError;
use crate::order::Order;
use crate::redirect::ClientSecret;

/// The two server endpoints the flow depends on.
#[async_trait(?Send)]
pub trait CheckoutApi {
    /// `GET /config`
    async fn fetch_config(&self) -> Result<SessionConfig, CheckoutError>;

    /// `POST /create-payment-intent` with the order as JSON body.
    async fn create_payment_intent(&self, order: &Order) -> Result<ClientSecret, CheckoutError>;
}

/// `POST /create-payment-intent` response. The sample server also echoes the
/// publishable key, which is ignored here.
#[derive(Debug, Deserialize)]
struct CreatePaymentIntentResponse {
    #[serde(rename = "clientSecret")]
    client_secret: String,
}

/// [`CheckoutApi`] over `fetch`, via `gloo-net`.
#[derive(Clone, Debug)]
pub struct HttpCheckoutApi {
    config_url: String,
    payment_intent_url: String,
}

impl HttpCheckoutApi {
    pub fn new(settings: &CheckoutSettings) -> Self {
        Self {
            config_url: settings.config_url(),
            payment_intent_url: settings.payment_intent_url(),
        }
    }
}

#[async_trait(?Send)]
impl CheckoutApi for HttpCheckoutApi {
    async fn fetch_config(&self) -> Result<SessionConfig, CheckoutError> {
        let resp = Request::get(&self.config_url)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;
        read_json(&self.config_url, resp).await
    }

    async fn create_payment_intent(&self, order: &Order) -> Result<ClientSecret, CheckoutError> {
        let resp = Request::post(&self.payment_intent_url)
            .json(order)
            .map_err(|e| CheckoutError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;
        let body: CreatePaymentIntentResponse = read_json(&self.payment_intent_url, resp).await?;
        ClientSecret::new(body.client_secret).ok_or_else(|| CheckoutError::Decode {
            endpoint: self.payment_intent_url.clone(),
            reason: "empty clientSecret".into(),
        })
    }
}

async fn read_json<T: DeserializeOwned>(endpoint: &str, resp: Response) -> Result<T, CheckoutError> {
    if !resp.ok() {
        return Err(CheckoutError::Status {
            endpoint: endpoint.to_string(),
            status: resp.status(),
        });
    }
    resp.json::<T>().await.map_err(|e| CheckoutError::Decode {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_follow_settings() {
        let settings = CheckoutSettings {
            api_base: "https://api.example".into(),
            ..CheckoutSettings::default()
        };
        let api = HttpCheckoutApi::new(&settings);
        assert_eq!(api.config_url, "https://api.example/config");
        assert_eq!(api.payment_intent_url, "https://api.example/create-payment-intent");
    }

    #[test]
    fn intent_response_requires_client_secret() {
        let ok: CreatePaymentIntentResponse =
            serde_json::from_str(r#"{"publicKey":"pk","clientSecret":"pi_1_secret_2"}"#).unwrap();
        assert_eq!(ok.client_secret, "pi_1_secret_2");
        assert!(serde_json::from_str::<CreatePaymentIntentResponse>(r#"{"publicKey":"pk"}"#).is_err());
    }
}
