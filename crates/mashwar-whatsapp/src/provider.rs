// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider backends for direct WhatsApp delivery.
//!
//! Each variant of [`Provider`] wraps one vendor API with its own
//! authentication scheme and payload shape. Selection happens once, from
//! configured credentials, in fixed priority order.

use mashwar_config::WhatsAppConfig;
use mashwar_core::MashwarError;
use serde::Serialize;
use tracing::debug;

const TWILIO_BASE_URL: &str = "https://api.twilio.com";
const MESSAGEBIRD_BASE_URL: &str = "https://conversations.messagebird.com";
const CLOUD_API_BASE_URL: &str = "https://graph.facebook.com";

/// Sandbox sender shared by the Twilio and MessageBird defaults.
const DEFAULT_SENDER: &str = "whatsapp:+14155238886";

#[derive(Serialize)]
struct BirdMessage<'a> {
    to: String,
    from: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    content: BirdContent<'a>,
}

#[derive(Serialize)]
struct BirdContent<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct CloudMessage<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: CloudText<'a>,
}

#[derive(Serialize)]
struct CloudText<'a> {
    body: &'a str,
}

/// A configured direct-send backend.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Twilio messaging API, basic auth with account SID and token.
    Twilio {
        account_sid: String,
        auth_token: String,
        from: String,
        base_url: String,
    },
    /// MessageBird conversations API, `AccessKey` header auth.
    MessageBird {
        api_key: String,
        from: String,
        base_url: String,
    },
    /// WhatsApp Business Cloud API, bearer token plus phone-number id.
    CloudApi {
        token: String,
        phone_id: String,
        base_url: String,
    },
}

impl Provider {
    /// Selects a provider from configured credentials.
    ///
    /// Priority order: Twilio, MessageBird, Cloud API. Returns `None` when
    /// no complete credential set exists, which routes every message to the
    /// manual-link fallback.
    pub fn from_config(config: &WhatsAppConfig) -> Option<Self> {
        if let (Some(sid), Some(token)) =
            (&config.twilio_account_sid, &config.twilio_auth_token)
        {
            return Some(Provider::Twilio {
                account_sid: sid.clone(),
                auth_token: token.clone(),
                from: config
                    .twilio_from
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SENDER.to_string()),
                base_url: TWILIO_BASE_URL.to_string(),
            });
        }

        if let Some(key) = &config.messagebird_api_key {
            return Some(Provider::MessageBird {
                api_key: key.clone(),
                from: config
                    .messagebird_from
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SENDER.to_string()),
                base_url: MESSAGEBIRD_BASE_URL.to_string(),
            });
        }

        if let (Some(token), Some(phone_id)) =
            (&config.business_token, &config.business_phone_id)
        {
            return Some(Provider::CloudApi {
                token: token.clone(),
                phone_id: phone_id.clone(),
                base_url: CLOUD_API_BASE_URL.to_string(),
            });
        }

        None
    }

    /// Provider name for logs and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Twilio { .. } => "twilio",
            Provider::MessageBird { .. } => "messagebird",
            Provider::CloudApi { .. } => "cloud-api",
        }
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        match &mut self {
            Provider::Twilio { base_url, .. }
            | Provider::MessageBird { base_url, .. }
            | Provider::CloudApi { base_url, .. } => *base_url = url,
        }
        self
    }

    /// Sends one text message to `phone` through the provider API.
    pub async fn send_text(
        &self,
        client: &reqwest::Client,
        phone: &str,
        message: &str,
    ) -> Result<(), MashwarError> {
        match self {
            Provider::Twilio {
                account_sid,
                auth_token,
                from,
                base_url,
            } => {
                let url = format!("{base_url}/2010-04-01/Accounts/{account_sid}/Messages.json");
                let to = format!("whatsapp:{phone}");
                let params = [("From", from.as_str()), ("To", to.as_str()), ("Body", message)];

                let response = client
                    .post(&url)
                    .basic_auth(account_sid, Some(auth_token))
                    .form(&params)
                    .send()
                    .await
                    .map_err(|e| MashwarError::Provider {
                        message: format!("Twilio request failed: {e}"),
                        source: Some(Box::new(e)),
                    })?;

                let status = response.status();
                debug!(status = %status, "twilio response received");
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(MashwarError::Provider {
                        message: format!("Twilio API returned {status}: {body}"),
                        source: None,
                    });
                }
                Ok(())
            }

            Provider::MessageBird {
                api_key,
                from,
                base_url,
            } => {
                let url = format!("{base_url}/v1/send");
                let body = BirdMessage {
                    to: format!("whatsapp:{phone}"),
                    from,
                    kind: "text",
                    content: BirdContent { text: message },
                };

                let response = client
                    .post(&url)
                    .header("Authorization", format!("AccessKey {api_key}"))
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| MashwarError::Provider {
                        message: format!("MessageBird request failed: {e}"),
                        source: Some(Box::new(e)),
                    })?;

                let status = response.status();
                debug!(status = %status, "messagebird response received");
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(MashwarError::Provider {
                        message: format!("MessageBird API returned {status}: {body}"),
                        source: None,
                    });
                }
                Ok(())
            }

            Provider::CloudApi {
                token,
                phone_id,
                base_url,
            } => {
                let url = format!("{base_url}/v18.0/{phone_id}/messages");
                let body = CloudMessage {
                    messaging_product: "whatsapp",
                    to: phone,
                    kind: "text",
                    text: CloudText { body: message },
                };

                let response = client
                    .post(&url)
                    .bearer_auth(token)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| MashwarError::Provider {
                        message: format!("WhatsApp Business API request failed: {e}"),
                        source: Some(Box::new(e)),
                    })?;

                let status = response.status();
                debug!(status = %status, "cloud api response received");
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(MashwarError::Provider {
                        message: format!("WhatsApp Business API returned {status}: {body}"),
                        source: None,
                    });
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn twilio_config() -> WhatsAppConfig {
        WhatsAppConfig {
            twilio_account_sid: Some("AC123".into()),
            twilio_auth_token: Some("secret".into()),
            ..WhatsAppConfig::default()
        }
    }

    #[test]
    fn selection_prefers_twilio_over_others() {
        let config = WhatsAppConfig {
            twilio_account_sid: Some("AC123".into()),
            twilio_auth_token: Some("secret".into()),
            messagebird_api_key: Some("live_key".into()),
            business_token: Some("token".into()),
            business_phone_id: Some("1055".into()),
            ..WhatsAppConfig::default()
        };
        let provider = Provider::from_config(&config).unwrap();
        assert_eq!(provider.name(), "twilio");
    }

    #[test]
    fn selection_falls_through_priority_order() {
        let config = WhatsAppConfig {
            messagebird_api_key: Some("live_key".into()),
            business_token: Some("token".into()),
            business_phone_id: Some("1055".into()),
            ..WhatsAppConfig::default()
        };
        assert_eq!(Provider::from_config(&config).unwrap().name(), "messagebird");

        let config = WhatsAppConfig {
            business_token: Some("token".into()),
            business_phone_id: Some("1055".into()),
            ..WhatsAppConfig::default()
        };
        assert_eq!(Provider::from_config(&config).unwrap().name(), "cloud-api");
    }

    #[test]
    fn no_credentials_selects_nothing() {
        assert!(Provider::from_config(&WhatsAppConfig::default()).is_none());
    }

    #[test]
    fn incomplete_twilio_pair_is_skipped() {
        let config = WhatsAppConfig {
            twilio_account_sid: Some("AC123".into()),
            ..WhatsAppConfig::default()
        };
        assert!(Provider::from_config(&config).is_none());
    }

    #[test]
    fn custom_sender_overrides_sandbox_default() {
        let config = WhatsAppConfig {
            twilio_account_sid: Some("AC123".into()),
            twilio_auth_token: Some("secret".into()),
            twilio_from: Some("whatsapp:+20212345678".into()),
            ..WhatsAppConfig::default()
        };
        match Provider::from_config(&config).unwrap() {
            Provider::Twilio { from, .. } => assert_eq!(from, "whatsapp:+20212345678"),
            other => panic!("expected twilio, got {}", other.name()),
        }
    }

    #[tokio::test]
    async fn twilio_sends_basic_auth_form() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
            .and(header("authorization", "Basic QUMxMjM6c2VjcmV0"))
            .and(body_string_contains("From=whatsapp%3A%2B14155238886"))
            .and(body_string_contains("To=whatsapp%3A%2B201001234567"))
            .and(body_string_contains("Body=Your+ride+is+booked"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "sid": "SM123"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = Provider::from_config(&twilio_config())
            .unwrap()
            .with_base_url(server.uri());
        let client = reqwest::Client::new();
        provider
            .send_text(&client, "+201001234567", "Your ride is booked")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn messagebird_sends_access_key_json() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/send"))
            .and(header("authorization", "AccessKey live_key"))
            .and(body_partial_json(serde_json::json!({
                "to": "whatsapp:201283051333",
                "from": "whatsapp:+14155238886",
                "type": "text",
                "content": {"text": "Hi"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "mb-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = WhatsAppConfig {
            messagebird_api_key: Some("live_key".into()),
            ..WhatsAppConfig::default()
        };
        let provider = Provider::from_config(&config)
            .unwrap()
            .with_base_url(server.uri());
        let client = reqwest::Client::new();
        provider.send_text(&client, "201283051333", "Hi").await.unwrap();
    }

    #[tokio::test]
    async fn cloud_api_sends_bearer_json() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v18.0/1055/messages"))
            .and(header("authorization", "Bearer business-token"))
            .and(body_partial_json(serde_json::json!({
                "messaging_product": "whatsapp",
                "to": "201283051333",
                "type": "text",
                "text": {"body": "Hi"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "messages": [{"id": "wamid.1"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = WhatsAppConfig {
            business_token: Some("business-token".into()),
            business_phone_id: Some("1055".into()),
            ..WhatsAppConfig::default()
        };
        let provider = Provider::from_config(&config)
            .unwrap()
            .with_base_url(server.uri());
        let client = reqwest::Client::new();
        provider.send_text(&client, "201283051333", "Hi").await.unwrap();
    }

    #[tokio::test]
    async fn rejected_send_surfaces_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
            .mount(&server)
            .await;

        let provider = Provider::from_config(&twilio_config())
            .unwrap()
            .with_base_url(server.uri());
        let client = reqwest::Client::new();
        let err = provider
            .send_text(&client, "201283051333", "Hi")
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("401"), "got: {msg}");
        assert!(msg.contains("invalid credentials"), "got: {msg}");
    }
}
