// Thin client for the SendGrid v3 mail-send API.
// https://www.twilio.com/docs/sendgrid/api-reference/mail-send/mail-send

pub mod models;

use reqwest::{header, Client};

use crate::models::{Content, MailAddress, MailMessage, Personalization, SendPayload};

const MAIL_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

#[derive(Debug, Clone)]
pub struct SendGridOptions {
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct SendGridService {
    options: SendGridOptions,
}

impl SendGridService {
    pub fn new(options: SendGridOptions) -> Self {
        Self { options }
    }

    /// Send a single HTML email. SendGrid replies 202 Accepted on success
    /// with an empty body.
    pub async fn send(&self, message: &MailMessage) -> Result<(), &'static str> {
        let payload = SendPayload {
            personalizations: vec![Personalization {
                to: vec![message.to.clone()],
            }],
            from: message.from.clone(),
            subject: message.subject.clone(),
            content: vec![Content {
                content_type: "text/html".to_string(),
                value: message.html_body.clone(),
            }],
        };

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "Content-Type",
            "application/json"
                .parse()
                .expect("Header value should parse correctly"),
        );

        let client = Client::new();
        let res = client
            .post(MAIL_SEND_URL)
            .bearer_auth(&self.options.api_key)
            .headers(headers)
            .json(&payload)
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    // Log the error response from SendGrid
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("SendGrid error ({}): {}", status, error_body);
                    return Err("SendGrid returned an error");
                }
                Ok(())
            }
            Err(e) => {
                eprintln!("Request to SendGrid failed: {}", e);
                Err("Error sending email")
            }
        }
    }
}

impl MailMessage {
    /// Build a single-recipient HTML email, mirroring the common case of one
    /// transactional message per API call.
    pub fn single(from: MailAddress, subject: &str, to: MailAddress, html_body: &str) -> Self {
        Self {
            from,
            to,
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        }
    }
}
