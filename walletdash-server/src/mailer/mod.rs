//! Outbound reservation notices
//!
//! Provides a trait for sending email, with:
//! - HTTP relay implementation (posts JSON to a mail relay)
//! - Log-only implementation when no relay is configured
//! - Mock implementation for testing

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::models::{ReservationConfirmation, ReservationStatus};

/// One outgoing message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Error while handing a message to the relay
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail relay request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail relay returned {0}")]
    Status(u16),

    #[error("mail delivery failed: {0}")]
    Rejected(String),
}

/// Trait for email delivery (testable)
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), MailError>;
}

/// Build the confirmation notice for a new reservation.
pub fn confirmation_email(from: &str, notice: &ReservationConfirmation) -> Email {
    Email {
        from: from.to_owned(),
        to: notice.contact_email.clone(),
        subject: "Tenant reservation received".to_owned(),
        body: format!(
            "Your tenant reservation has been received.\n\n\
             Reservation ID: {}\n\n\
             Keep this ID; you will need it to check in once the reservation is approved.",
            notice.reservation_id
        ),
    }
}

/// Build the notice for a reservation state change.
pub fn status_email(from: &str, notice: &ReservationStatus) -> Email {
    Email {
        from: from.to_owned(),
        to: notice.contact_email.clone(),
        subject: format!("Tenant reservation {}", notice.state),
        body: format!(
            "The status of your tenant reservation has changed.\n\n\
             Reservation ID: {}\n\
             Status: {}",
            notice.reservation_id, notice.state
        ),
    }
}

/// Mailer posting messages to an HTTP mail relay
pub struct HttpRelayMailer {
    client: Client,
    relay_url: String,
}

impl HttpRelayMailer {
    pub fn new(relay_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            relay_url: relay_url.into(),
        }
    }
}

#[async_trait]
impl Mailer for HttpRelayMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        let response = self.client.post(&self.relay_url).json(&email).send().await?;
        if !response.status().is_success() {
            return Err(MailError::Status(response.status().as_u16()));
        }
        tracing::info!(to = %email.to, subject = %email.subject, "email handed to relay");
        Ok(())
    }
}

/// Mailer that only logs (no relay configured)
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "no mail relay configured, email logged only"
        );
        tracing::debug!(body = %email.body, "email body");
        Ok(())
    }
}

/// Mock mailer for testing
#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<Email>>,
    failure: Option<String>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(reason.into()),
        }
    }

    /// Messages sent so far
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        if let Some(reason) = &self.failure {
            return Err(MailError::Rejected(reason.clone()));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(email);
        }
        Ok(())
    }
}
