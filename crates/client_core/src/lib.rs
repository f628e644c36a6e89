//! Client side of the remittance onboarding flow: registration, payment and
//! OTP verification pages over HTTP.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod form;
pub mod navigator;
pub mod notification;
pub mod pages;
pub mod validation;

pub use config::{load_settings_from, FlowSettings, PaymentEncoding, RouteTable};
pub use dispatch::Dispatcher;
pub use error::{ConfigError, DispatchError, ErrorCategory, ValidationError};
pub use form::{FormStatus, LoadingFlag};
pub use navigator::{Location, Navigator};
pub use notification::{Banner, BannerKind, Toast};
pub use pages::{
    OtpFields, OtpPage, PaymentFields, PaymentPage, RegistrationFields, RegistrationPage,
    ResendOutcome, ResendPrompt, SubmitOutcome,
};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
