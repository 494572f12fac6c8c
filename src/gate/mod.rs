//! # Access Gate
//!
//! Blocks checkout for guests and for B2B buyers outside the required company location.
//!
//! The gate has no error path: missing identity data yields a deterministic message. It is
//! stateless, so calling it twice with the same identity gives the same answer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::Identity;

/// Shown to guests.
pub const LOGIN_REQUIRED_MESSAGE: &str =
    "You must be logged in to complete this purchase. Please sign in to continue.";

/// Location required when none is configured.
pub const DEFAULT_REQUIRED_LOCATION: &str = "Location Admins";

/// Target path of cart-level validation errors.
pub const CART_TARGET: &str = "$.cart";

/// What the gate knows about the buyer, captured once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    pub is_logged_in: bool,
    pub location_name: Option<String>,
}

impl ValidationState {
    pub fn from_identity(identity: Option<&Identity>) -> Self {
        match identity {
            Some(identity) => Self {
                is_logged_in: true,
                location_name: identity.location_name().map(str::to_string),
            },
            None => Self::default(),
        }
    }

    /// The blocking message for this state, `None` when checkout may proceed.
    pub fn message(&self, required_location: &str) -> Option<String> {
        if !self.is_logged_in {
            return Some(LOGIN_REQUIRED_MESSAGE.to_string());
        }
        let location = self.location_name.as_deref().unwrap_or_default().trim();
        if location != required_location {
            debug!(location, required_location, "Location mismatch");
            return Some(wrong_location_message(required_location));
        }
        None
    }
}

fn wrong_location_message(required_location: &str) -> String {
    format!(
        "Only customers in the '{required_location}' location are allowed to place orders. \
         Please contact your administrator."
    )
}

/// A checkout-function style validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub message: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGate {
    required_location: String,
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_LOCATION)
    }
}

impl AccessGate {
    pub fn new(required_location: impl Into<String>) -> Self {
        Self {
            required_location: required_location.into().trim().to_string(),
        }
    }

    pub fn required_location(&self) -> &str {
        &self.required_location
    }

    /// Validation message for `identity`; `None` means no validation error.
    pub fn check(&self, identity: Option<&Identity>) -> Option<String> {
        ValidationState::from_identity(identity).message(&self.required_location)
    }

    /// The same check as [`AccessGate::check`], as a list of cart-level errors (empty when valid).
    pub fn validate_cart(&self, identity: Option<&Identity>) -> Vec<ValidationError> {
        self.check(identity)
            .into_iter()
            .map(|message| ValidationError {
                message,
                target: CART_TARGET.to_string(),
            })
            .collect()
    }
}
