use serde::{Deserialize, Serialize};

/// A named email address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailAddress {
    pub email: String,
    pub name: String,
}

impl MailAddress {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            email: email.to_string(),
            name: name.to_string(),
        }
    }
}

/// A single outbound HTML email.
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub from: MailAddress,
    pub to: MailAddress,
    pub subject: String,
    pub html_body: String,
}

/// Wire payload for the v3 mail-send endpoint.
#[derive(Debug, Serialize)]
pub struct SendPayload {
    pub personalizations: Vec<Personalization>,
    pub from: MailAddress,
    pub subject: String,
    pub content: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub struct Personalization {
    pub to: Vec<MailAddress>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}
