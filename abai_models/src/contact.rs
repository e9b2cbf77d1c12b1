use nutype::nutype;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::email_address::EmailAddress;

/// Raw contact form input as entered by the user.
///
/// Nothing about the values is guaranteed. Use [`ContactForm::validate`] or
/// [`ContactSubmission::try_from`] to obtain a [`ContactSubmission`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

/// A contact form submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub first_name: ContactName,
    pub last_name: ContactName,
    pub email: EmailAddress,
    pub message: ContactMessageContent,
}

#[nutype(
    validate(len_char_min = 2, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    validate(len_char_min = 10, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::FirstName, Self::LastName, Self::Email, Self::Message];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("Name, email, and message are required")]
    Missing,
    #[error("First name must be at least 2 characters")]
    FirstNameTooShort,
    #[error("First name must be at most 256 characters")]
    FirstNameTooLong,
    #[error("Last name must be at least 2 characters")]
    LastNameTooShort,
    #[error("Last name must be at most 256 characters")]
    LastNameTooLong,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
    #[error("Message must be at most 4096 characters")]
    MessageTooLong,
}

impl ContactValidationError {
    /// The form field this error belongs to, `None` for form level errors.
    pub fn field(self) -> Option<ContactField> {
        match self {
            Self::Missing => None,
            Self::FirstNameTooShort | Self::FirstNameTooLong => Some(ContactField::FirstName),
            Self::LastNameTooShort | Self::LastNameTooLong => Some(ContactField::LastName),
            Self::InvalidEmail => Some(ContactField::Email),
            Self::MessageTooShort | Self::MessageTooLong => Some(ContactField::Message),
        }
    }
}

/// Field level validation errors, at most one per field, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormErrors(Vec<ContactValidationError>);

impl ContactFormErrors {
    pub fn get(&self, field: ContactField) -> Option<ContactValidationError> {
        self.0.iter().copied().find(|err| err.field() == Some(field))
    }

    /// Replace the error shown for `field`.
    pub fn set(&mut self, field: ContactField, error: Option<ContactValidationError>) {
        self.0.retain(|err| err.field() != Some(field));
        self.0.extend(error);
        self.0.sort_by_key(|err| err.field());
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ContactValidationError> + '_ {
        self.0.iter().copied()
    }
}

impl ContactForm {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::FirstName => self.first_name = value,
            ContactField::LastName => self.last_name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }

    /// Whether every field contains something other than whitespace.
    pub fn is_complete(&self) -> bool {
        ContactField::ALL
            .into_iter()
            .all(|field| !self.get(field).trim().is_empty())
    }

    pub fn validate_field(&self, field: ContactField) -> Option<ContactValidationError> {
        match field {
            ContactField::FirstName => parse_first_name(&self.first_name).err(),
            ContactField::LastName => parse_last_name(&self.last_name).err(),
            ContactField::Email => parse_email(&self.email).err(),
            ContactField::Message => parse_message(&self.message).err(),
        }
    }

    /// Validate all fields and collect every field level error.
    pub fn validate(&self) -> Result<ContactSubmission, ContactFormErrors> {
        match (
            parse_first_name(&self.first_name),
            parse_last_name(&self.last_name),
            parse_email(&self.email),
            parse_message(&self.message),
        ) {
            (Ok(first_name), Ok(last_name), Ok(email), Ok(message)) => Ok(ContactSubmission {
                first_name,
                last_name,
                email,
                message,
            }),
            (first_name, last_name, email, message) => Err(ContactFormErrors(
                [first_name.err(), last_name.err(), email.err(), message.err()]
                    .into_iter()
                    .flatten()
                    .collect(),
            )),
        }
    }
}

impl TryFrom<ContactForm> for ContactSubmission {
    type Error = ContactValidationError;

    /// Presence is checked first, then the field rules. The first failing
    /// field determines the error.
    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        if !form.is_complete() {
            return Err(ContactValidationError::Missing);
        }

        form.validate().map_err(|errors| {
            errors
                .iter()
                .next()
                .unwrap_or(ContactValidationError::Missing)
        })
    }
}

impl ContactSubmission {
    pub fn full_name(&self) -> String {
        format!("{} {}", *self.first_name, *self.last_name)
    }
}

fn parse_first_name(value: &str) -> Result<ContactName, ContactValidationError> {
    ContactName::try_new(value.to_owned()).map_err(|err| match err {
        ContactNameError::LenCharMinViolated => ContactValidationError::FirstNameTooShort,
        ContactNameError::LenCharMaxViolated => ContactValidationError::FirstNameTooLong,
    })
}

fn parse_last_name(value: &str) -> Result<ContactName, ContactValidationError> {
    ContactName::try_new(value.to_owned()).map_err(|err| match err {
        ContactNameError::LenCharMinViolated => ContactValidationError::LastNameTooShort,
        ContactNameError::LenCharMaxViolated => ContactValidationError::LastNameTooLong,
    })
}

fn parse_email(value: &str) -> Result<EmailAddress, ContactValidationError> {
    value
        .parse()
        .map_err(|_| ContactValidationError::InvalidEmail)
}

fn parse_message(value: &str) -> Result<ContactMessageContent, ContactValidationError> {
    ContactMessageContent::try_new(value.to_owned()).map_err(|err| match err {
        ContactMessageContentError::LenCharMinViolated => ContactValidationError::MessageTooShort,
        ContactMessageContentError::LenCharMaxViolated => ContactValidationError::MessageTooLong,
    })
}
