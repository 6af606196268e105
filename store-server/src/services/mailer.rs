//! Transactional mail dispatch
//!
//! Speaks to an HTTP mail API (any transactional provider with a JSON send
//! endpoint). Every convenience sender is best effort: failures are logged
//! and swallowed so mail can never fail the triggering request. The client
//! carries an explicit timeout so a slow transport cannot hang a task.

use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::core::Config;

/// Outbound request timeout
const MAIL_TIMEOUT: Duration = Duration::from_secs(10);

/// Mail dispatch failure
#[derive(Debug, Error)]
pub enum MailError {
    /// No MAIL_API_URL configured (development / tests)
    #[error("mail transport not configured")]
    NotConfigured,

    #[error("mail transport error: {0}")]
    Transport(String),

    #[error("mail API rejected the message: HTTP {0}")]
    Rejected(u16),
}

/// Mail API client
#[derive(Clone, Debug)]
pub struct MailerService {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
    from_address: String,
}

impl MailerService {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(MAIL_TIMEOUT)
            .build()
            .expect("Failed to build mail HTTP client");

        Self {
            client,
            api_url: config.mail_api_url.clone(),
            api_token: config.mail_api_token.clone(),
            from_address: config.mail_from.clone(),
        }
    }

    /// Send a single transactional email
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        if self.api_url.is_empty() {
            return Err(MailError::NotConfigured);
        }

        let payload = json!({
            "from": self.from_address,
            "to": [to],
            "subject": subject,
            "html": html,
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailError::Rejected(response.status().as_u16()));
        }
        Ok(())
    }

    /// Order status notification (best effort)
    pub async fn send_order_status(&self, to: &str, order_number: &str, status_label: &str) {
        let subject = format!("Order #{} Status Update", order_number);
        let html = format!(
            "<p>Your order <b>#{}</b> status is now: <b>{}</b>.</p>",
            order_number, status_label
        );
        self.send_best_effort(to, &subject, &html, "order_status").await;
    }

    /// Signup verification code (best effort)
    pub async fn send_verification_code(&self, to: &str, code: &str) {
        let html = format!(
            "<p>Your verification code is: <strong>{}</strong></p>",
            code
        );
        self.send_best_effort(to, "Verify Your Email", &html, "verification")
            .await;
    }

    /// Password reset link (best effort)
    pub async fn send_password_reset(&self, to: &str, reset_link: &str) {
        let html = format!(
            "<p>Click the link to reset your password: <a href=\"{}\">{}</a></p>",
            reset_link, reset_link
        );
        self.send_best_effort(to, "Password Reset Request", &html, "password_reset")
            .await;
    }

    async fn send_best_effort(&self, to: &str, subject: &str, html: &str, kind: &str) {
        match self.send(to, subject, html).await {
            Ok(()) => {
                tracing::debug!(kind, to, "Mail dispatched");
            }
            Err(MailError::NotConfigured) => {
                tracing::debug!(kind, to, "Mail transport not configured, skipping");
            }
            Err(e) => {
                tracing::warn!(kind, to, error = %e, "Mail dispatch failed");
            }
        }
    }
}
