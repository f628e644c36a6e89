use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend services the flow talks to. The user service takes registration
/// and payment; the verification service owns OTPs and checkout sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Users,
    Verification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    RegisterUser,
    ProcessPayment,
    VerifyOtp,
    CreateCheckoutSession,
    ResendOtp,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::RegisterUser => "/users/",
            Endpoint::ProcessPayment => "/process-payment/",
            Endpoint::VerifyOtp => "/verify-otp/",
            Endpoint::CreateCheckoutSession => "/create-checkout-session/",
            Endpoint::ResendOtp => "/resend-otp/",
        }
    }

    pub fn service(self) -> Service {
        match self {
            Endpoint::RegisterUser | Endpoint::ProcessPayment => Service::Users,
            Endpoint::VerifyOtp | Endpoint::CreateCheckoutSession | Endpoint::ResendOtp => {
                Service::Verification
            }
        }
    }

    /// Shown when a failure carries no server-provided detail.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Endpoint::RegisterUser => "Failed to create user",
            Endpoint::ProcessPayment => "Failed to process payment",
            Endpoint::VerifyOtp => "Invalid OTP or payment record not found.",
            Endpoint::CreateCheckoutSession => "Something went wrong. Please try again.",
            Endpoint::ResendOtp => "Failed to resend OTP. Please check the provided details.",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::RegisterUser => "register_user",
            Endpoint::ProcessPayment => "process_payment",
            Endpoint::VerifyOtp => "verify_otp",
            Endpoint::CreateCheckoutSession => "create_checkout_session",
            Endpoint::ResendOtp => "resend_otp",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionResponse {
    pub checkout_url: String,
}

/// `/verify-otp/` answers either with a checkout URL directly or with a plain
/// confirmation message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub checkout_url: Option<String>,
}

/// Registration replies with whatever the user service chooses to echo back.
pub type RegistrationResponse = serde_json::Value;
