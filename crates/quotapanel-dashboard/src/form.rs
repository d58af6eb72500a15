//! Create/edit form logic for client records
//!
//! The form speaks operator units: traffic in gigabytes, expiry as a day
//! count from today. Conversions to wire units happen on submit.

use chrono::Local;
use quotapanel_client::{ApiClient, Error as ClientError, user::UserWrite};
use quotapanel_core::{ClientRecord, units};
use std::{error::Error as StdError, fmt};

/// Minimum traffic quota in gigabytes the backend accepts
pub const MIN_TRAFFIC_GB: f64 = 0.1;

/// Error type for form validation and submission
#[derive(Debug)]
pub enum FormError {
    /// A field failed validation before any request was made
    Invalid {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// The API rejected the submission
    Api(ClientError),
}

impl FormError {
    fn invalid<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { field, message } => write!(f, "{field}: {message}"),
            Self::Api(err) => write!(f, "{err}"),
        }
    }
}

impl StdError for FormError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Api(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<ClientError> for FormError {
    fn from(err: ClientError) -> Self {
        Self::Api(err)
    }
}

/// Operator-facing create/edit form for a client
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    /// Username (email); immutable when editing
    pub email: String,

    /// Traffic quota in gigabytes
    pub traffic_gb: f64,

    /// Days until expiry; `None` or `Some(0)` means no expiry
    pub expiry_days: Option<i64>,
}

impl UserForm {
    /// Prefill the form from an existing record.
    ///
    /// The byte quota converts back to gigabytes and the expiry timestamp
    /// to a day count. `now_ms` must be today's local midnight — pass
    /// [`units::local_midnight_ms`] — so the count stays whole-day exact
    /// all day; a wall-clock timestamp would read one day high from the
    /// ceiling. An already-expired account prefilled here reads as zero
    /// days, hiding the overdue state; submitting it unchanged writes a
    /// fresh no-expiry sentinel.
    #[must_use]
    pub fn for_edit(user: &ClientRecord, now_ms: i64) -> Self {
        Self {
            email: user.username.clone(),
            traffic_gb: units::bytes_to_gb(user.data_limit),
            expiry_days: user
                .expiry_date_unix
                .filter(|ms| *ms > 0)
                .map(|ms| units::days_until_expiry(ms, now_ms)),
        }
    }

    /// Validate the form fields
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.email.trim().is_empty() {
            return Err(FormError::invalid("email", "Username is required"));
        }
        if !self.traffic_gb.is_finite() || self.traffic_gb < MIN_TRAFFIC_GB {
            return Err(FormError::invalid(
                "traffic_gb",
                "Traffic quota must be at least 0.1 GB",
            ));
        }
        if let Some(days) = self.expiry_days
            && days < 0
        {
            return Err(FormError::invalid(
                "expiry_days",
                "Expiry days cannot be negative",
            ));
        }
        Ok(())
    }

    /// Submit the form, creating a new client or updating `existing`.
    ///
    /// On edit the stored username, subscription id and flow are carried
    /// over from the existing record; only quota and expiry come from the
    /// form, and the enabled flag is always set, so editing a disabled
    /// client re-enables it. Success leaves refreshing and closing to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the API error on
    /// rejection.
    pub async fn submit(
        &self,
        client: &ApiClient,
        existing: Option<&ClientRecord>,
    ) -> Result<(), FormError> {
        self.validate()?;

        let expiry_date = self
            .expiry_days
            .filter(|days| *days > 0)
            .map(|days| units::expiry_date_from_days(days, Local::now().date_naive()));

        match existing {
            None => {
                let form = UserWrite {
                    email: self.email.clone(),
                    total_gb: self.traffic_gb,
                    expiry_date,
                    enable: true,
                    sub_id: None,
                    flow: String::new(),
                };
                client.create_user(&form).await?;
            }
            Some(user) => {
                let form = UserWrite {
                    email: user.username.clone(),
                    total_gb: self.traffic_gb,
                    expiry_date,
                    // Saving the form always enables the client
                    enable: true,
                    sub_id: user.sub_id.clone(),
                    flow: user.flow.clone().unwrap_or_default(),
                };
                client.update_user(&user.write_identifier(), &form).await?;
            }
        }
        Ok(())
    }
}
