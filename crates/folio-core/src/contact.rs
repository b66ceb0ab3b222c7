//! Local contact form.
//!
//! Collects name, email and message. Submission validates synchronously and
//! hands the values back to the caller; nothing is transmitted. After a
//! successful submission the form shows a confirmation for
//! [`CONFIRMATION_DURATION`] and then clears itself.

use std::{fmt, time::Duration};

use crate::{env::Timestamp, error::FormError};

/// How long the "message sent" confirmation stays up.
pub const CONFIRMATION_DURATION: Duration = Duration::from_secs(3);

/// Contact form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Sender name.
    Name,
    /// Sender email address.
    Email,
    /// Message body.
    Message,
}

impl Field {
    /// Fields in form order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// Field label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Your Name",
            Self::Email => "Email Address",
            Self::Message => "Your Message",
        }
    }

    /// Next field in form order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Message,
            Self::Message => Self::Name,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        })
    }
}

/// Values of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Message body.
    pub message: String,
}

/// Form status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus<I> {
    /// Accepting input.
    Editing,
    /// Confirmation showing until `reset_at`.
    Submitted {
        /// When the fields clear and editing resumes.
        reset_at: I,
    },
}

/// Contact form state machine.
#[derive(Debug, Clone)]
pub struct ContactForm<I> {
    name: String,
    email: String,
    message: String,
    status: FormStatus<I>,
    confirmation: Duration,
}

impl<I: Timestamp> Default for ContactForm<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Timestamp> ContactForm<I> {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::with_confirmation(CONFIRMATION_DURATION)
    }

    /// Create an empty form with a custom confirmation duration.
    pub fn with_confirmation(confirmation: Duration) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            status: FormStatus::Editing,
            confirmation,
        }
    }

    /// Current value of `field`.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    /// Current status.
    pub fn status(&self) -> FormStatus<I> {
        self.status
    }

    /// Whether the confirmation is showing.
    pub fn is_submitted(&self) -> bool {
        matches!(self.status, FormStatus::Submitted { .. })
    }

    /// Replace a field value. Ignored while the confirmation is showing.
    ///
    /// Returns true if the value was accepted.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.is_submitted() {
            return false;
        }
        *self.field_mut(field) = value.into();
        true
    }

    /// Append a character to a field. Ignored while the confirmation is
    /// showing.
    pub fn push_char(&mut self, field: Field, c: char) -> bool {
        if self.is_submitted() {
            return false;
        }
        self.field_mut(field).push(c);
        true
    }

    /// Remove the last character of a field.
    pub fn pop_char(&mut self, field: Field) -> bool {
        if self.is_submitted() {
            return false;
        }
        self.field_mut(field).pop().is_some()
    }

    /// Check required fields and the email shape.
    ///
    /// # Errors
    ///
    /// - `FormError::MissingField` for the first blank field, in form order
    /// - `FormError::InvalidEmail` if the email does not look like an address
    pub fn validate(&self) -> Result<(), FormError> {
        if let Some(field) = Field::ALL.into_iter().find(|f| self.field(*f).trim().is_empty()) {
            return Err(FormError::MissingField(field));
        }

        if !looks_like_email(self.email.trim()) {
            return Err(FormError::InvalidEmail { value: self.email.clone() });
        }

        Ok(())
    }

    /// Submit the form at `now`.
    ///
    /// On success the confirmation shows until `now + confirmation` and the
    /// submitted values are returned for the caller to hand off.
    ///
    /// # Errors
    ///
    /// - `FormError::ConfirmationPending` while a previous confirmation shows
    /// - Any validation error from [`Self::validate`]
    pub fn submit(&mut self, now: I) -> Result<ContactSubmission, FormError> {
        if self.is_submitted() {
            return Err(FormError::ConfirmationPending);
        }
        self.validate()?;

        self.status = FormStatus::Submitted { reset_at: now + self.confirmation };
        Ok(ContactSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.clone(),
        })
    }

    /// Clear the form once the confirmation has expired.
    ///
    /// Returns true if the form was reset.
    pub fn tick(&mut self, now: I) -> bool {
        match self.status {
            FormStatus::Submitted { reset_at } if now >= reset_at => {
                self.name.clear();
                self.email.clear();
                self.message.clear();
                self.status = FormStatus::Editing;
                tracing::debug!("contact form reset after confirmation");
                true
            },
            FormStatus::Submitted { .. } | FormStatus::Editing => false,
        }
    }

    /// When the confirmation expires. `None` while editing.
    pub fn next_deadline(&self) -> Option<I> {
        match self.status {
            FormStatus::Submitted { reset_at } => Some(reset_at),
            FormStatus::Editing => None,
        }
    }
}

/// One `@`, non-empty local part, dotted domain with no empty labels.
fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !value.contains(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
