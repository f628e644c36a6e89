use shared::{
    domain::{OtpVerification, ResendOtpRequest},
    protocol::Endpoint,
};
use tracing::info;

use super::SubmitOutcome;
use crate::{
    dispatch::Dispatcher,
    error::{DispatchError, ValidationError},
    form::{FormStatus, LoadingFlag},
    navigator::Navigator,
    notification::Toast,
    validation,
};

const RESENT_MESSAGE: &str = "OTP sent successfully!";

#[derive(Debug, Clone, Default)]
pub struct OtpFields {
    pub email: String,
    pub otp: String,
}

impl OtpFields {
    pub fn validate(&self) -> Result<OtpVerification, ValidationError> {
        Ok(OtpVerification {
            email: validation::email("email", &self.email)?,
            otp: validation::required("otp", &self.otp)?,
        })
    }
}

#[derive(Debug)]
pub enum ResendOutcome {
    Sent(Toast),
    Invalid(ValidationError),
    Failed(String),
    Busy,
}

/// The "resend OTP" modal. It has its own loading flag and inline error,
/// separate from the verification form behind it.
#[derive(Debug, Clone, Default)]
pub struct ResendPrompt {
    pub first_name: String,
    pub last_name: String,
    error: Option<String>,
    loading: LoadingFlag,
}

impl ResendPrompt {
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn loading_flag(&self) -> LoadingFlag {
        self.loading.clone()
    }

    pub async fn submit(&mut self, dispatcher: &Dispatcher) -> ResendOutcome {
        if self.loading.is_set() {
            return ResendOutcome::Busy;
        }
        self.error = None;

        let request = match self.validate() {
            Ok(request) => request,
            Err(err) => {
                self.error = Some(err.to_string());
                return ResendOutcome::Invalid(err);
            }
        };

        let Some(guard) = self.loading.begin() else {
            return ResendOutcome::Busy;
        };
        let result = dispatcher.resend_otp(&request).await;
        drop(guard);

        match result {
            Ok(_) => {
                info!("otp resent");
                ResendOutcome::Sent(Toast::new(RESENT_MESSAGE))
            }
            Err(err) => {
                let message = err.user_message();
                self.error = Some(message.clone());
                ResendOutcome::Failed(message)
            }
        }
    }

    fn validate(&self) -> Result<ResendOtpRequest, ValidationError> {
        Ok(ResendOtpRequest {
            first_name: validation::required("first_name", &self.first_name)?,
            last_name: validation::required("last_name", &self.last_name)?,
        })
    }
}

#[derive(Debug, Default)]
pub struct OtpPage {
    pub fields: OtpFields,
    status: FormStatus,
    loading: LoadingFlag,
    resend: Option<ResendPrompt>,
    toast: Option<Toast>,
}

impl OtpPage {
    pub fn new(fields: OtpFields) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn loading_flag(&self) -> LoadingFlag {
        self.loading.clone()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn dismiss_toast(&mut self) -> Option<Toast> {
        self.toast.take()
    }

    pub fn resend_prompt(&self) -> Option<&ResendPrompt> {
        self.resend.as_ref()
    }

    pub fn resend_prompt_mut(&mut self) -> Option<&mut ResendPrompt> {
        self.resend.as_mut()
    }

    /// Opens the resend modal, keeping whatever was typed into it before.
    pub fn open_resend(&mut self) -> &mut ResendPrompt {
        self.resend.get_or_insert_with(ResendPrompt::default)
    }

    pub fn close_resend(&mut self) {
        self.resend = None;
    }

    /// Verifies the code and sends the browser to checkout. When
    /// `/verify-otp/` answers without a checkout URL, a checkout session is
    /// created with the same code. Any failure opens the resend modal.
    pub async fn submit(
        &mut self,
        dispatcher: &Dispatcher,
        navigator: &mut Navigator,
    ) -> SubmitOutcome {
        if self.loading.is_set() {
            return SubmitOutcome::Busy;
        }
        self.status.clear();

        let verification = match self.fields.validate() {
            Ok(verification) => verification,
            Err(err) => {
                self.status.fail(err.to_string());
                return SubmitOutcome::Invalid(err);
            }
        };

        let Some(guard) = self.loading.begin() else {
            return SubmitOutcome::Busy;
        };
        let result = checkout_url(dispatcher, &verification).await;
        drop(guard);

        match result {
            Ok(url) => {
                self.resend = None;
                SubmitOutcome::Navigated(navigator.redirect(url).clone())
            }
            Err(err) => {
                let message = err.user_message();
                self.status.fail(message.clone());
                self.open_resend();
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Submits the resend modal if it is open. A sent OTP closes the modal
    /// and raises the toast.
    pub async fn submit_resend(&mut self, dispatcher: &Dispatcher) -> Option<ResendOutcome> {
        let prompt = self.resend.as_mut()?;
        let outcome = prompt.submit(dispatcher).await;
        if let ResendOutcome::Sent(toast) = &outcome {
            self.toast = Some(toast.clone());
            self.resend = None;
        }
        Some(outcome)
    }
}

async fn checkout_url(
    dispatcher: &Dispatcher,
    verification: &OtpVerification,
) -> Result<String, DispatchError> {
    let verified = dispatcher.verify_otp(verification).await?;
    if let Some(url) = verified.checkout_url.filter(|url| !url.is_empty()) {
        return Ok(url);
    }

    let session = dispatcher.create_checkout_session(verification).await?;
    if session.checkout_url.is_empty() {
        return Err(DispatchError::MalformedBody {
            endpoint: Endpoint::CreateCheckoutSession,
            reason: "empty checkout_url".into(),
        });
    }
    // Relative or absolute, the URL is followed exactly as the server sent it.
    Ok(session.checkout_url)
}
