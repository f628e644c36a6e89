use serde::{Deserialize, Serialize};

/// Pages of the onboarding flow, in the order a user walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Register,
    Payment,
    VerifyOtp,
}

impl Step {
    pub fn title(self) -> &'static str {
        match self {
            Step::Register => "Registration",
            Step::Payment => "Payment",
            Step::VerifyOtp => "OTP verification",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub document: Option<Attachment>,
    pub picture: Option<Attachment>,
    pub is_registered: bool,
}

/// Sent as a JSON body or as query parameters depending on configuration.
/// The paying user is resolved server-side from the session opened at
/// registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: String,
    pub description: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpVerification {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResendOtpRequest {
    pub first_name: String,
    pub last_name: String,
}
