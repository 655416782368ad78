//! Contact and event sign-up forms.
//!
//! Validation stops at the first problem and reports it with the wording the
//! site shows next to the form.

use super::validation::is_valid_email;
use crate::error::{DonationError, Result};
use serde::{Deserialize, Serialize};

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DonationError::UserInput(
            "Please enter your full name.".to_string(),
        ));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() || !is_valid_email(email) {
        return Err(DonationError::UserInput(
            "Please enter a valid email address.".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub const MIN_MESSAGE_LEN: usize = 10;

    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        require_email(&self.email)?;

        let message = self.message.trim();
        if message.is_empty() {
            return Err(DonationError::UserInput(
                "Please enter your message.".to_string(),
            ));
        }
        if message.chars().count() < Self::MIN_MESSAGE_LEN {
            return Err(DonationError::UserInput(
                "Message must be at least 10 characters long.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn confirmation(&self) -> &'static str {
        "Message sent successfully! We will get back to you within 24 hours."
    }
}

/// Events that accept sign-ups, keyed by their page slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    StemWorkshop,
    WomenEntrepreneurs,
    MentalHealthForum,
    Other,
}

impl EventKind {
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "stem-workshop" => EventKind::StemWorkshop,
            "women-entrepreneurs" => EventKind::WomenEntrepreneurs,
            "mental-health-forum" => EventKind::MentalHealthForum,
            _ => EventKind::Other,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EventKind::StemWorkshop => "STEM Youth Workshop: AI & Robotics",
            EventKind::WomenEntrepreneurs => "Women Entrepreneurs Networking Event",
            EventKind::MentalHealthForum => "Mental Health & Wellness Community Forum",
            EventKind::Other => "Event",
        }
    }

    pub fn signup_title(&self) -> String {
        format!("Sign Up for {}", self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSignup {
    pub event: EventKind,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub attendees: Option<u32>,
    pub comments: Option<String>,
}

impl EventSignup {
    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        require_email(&self.email)
    }

    pub fn confirmation(&self) -> &'static str {
        "Registration successful! We will contact you soon with event details."
    }
}
