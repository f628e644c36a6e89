//! One canonical form per step. Each page owns its field values, a loading
//! flag and a banner; `submit` validates, dispatches once and navigates on
//! success.

mod otp;
mod payment;
mod registration;

pub use otp::{OtpFields, OtpPage, ResendOutcome, ResendPrompt};
pub use payment::{PaymentFields, PaymentPage};
pub use registration::{RegistrationFields, RegistrationPage};

use crate::{error::ValidationError, navigator::Location};

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The request succeeded and the navigator moved here.
    Navigated(Location),
    /// Blocked before dispatch; nothing was sent.
    Invalid(ValidationError),
    /// The request failed; the page shows this message.
    Failed(String),
    /// A request from this page is still in flight.
    Busy,
}

impl SubmitOutcome {
    pub fn is_navigated(&self) -> bool {
        matches!(self, SubmitOutcome::Navigated(_))
    }
}
