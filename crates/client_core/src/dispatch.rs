use std::sync::Arc;

use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder,
};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Attachment, OtpVerification, PaymentRequest, RegistrationRecord, ResendOtpRequest},
    error::describe_error_body,
    protocol::{
        CheckoutSessionResponse, Endpoint, MessageResponse, RegistrationResponse,
        VerifyOtpResponse,
    },
};
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    config::{FlowSettings, PaymentEncoding},
    error::{ConfigError, DispatchError},
};

/// Issues one request per call against the configured services. Cloning is
/// cheap and clones share the connection pool and cookie jar, which is what
/// carries the server session from one step to the next.
#[derive(Clone)]
pub struct Dispatcher {
    http: Client,
    settings: Arc<FlowSettings>,
}

impl Dispatcher {
    pub fn new(settings: FlowSettings) -> Result<Self, ConfigError> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ConfigError::HttpClient)?;
        Ok(Self {
            http,
            settings: Arc::new(settings),
        })
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    pub fn url(&self, endpoint: Endpoint) -> Url {
        let mut url = self.settings.base_url(endpoint.service()).clone();
        let path = format!("{}{}", url.path().trim_end_matches('/'), endpoint.path());
        url.set_path(&path);
        url
    }

    /// Takes the record by value: its files are handed to the request body.
    pub async fn register(
        &self,
        record: RegistrationRecord,
    ) -> Result<RegistrationResponse, DispatchError> {
        let endpoint = Endpoint::RegisterUser;
        let mut form = Form::new()
            .text("first_name", record.first_name)
            .text("last_name", record.last_name)
            .text("email", record.email)
            .text("address", record.address)
            .text("is_registered", record.is_registered.to_string());
        if let Some(document) = record.document {
            form = form.part("document", file_part(endpoint, document)?);
        }
        if let Some(picture) = record.picture {
            form = form.part("picture", file_part(endpoint, picture)?);
        }

        let request = self.http.post(self.url(endpoint)).multipart(form);
        self.send(endpoint, request).await
    }

    pub async fn process_payment(
        &self,
        payment: &PaymentRequest,
    ) -> Result<MessageResponse, DispatchError> {
        let endpoint = Endpoint::ProcessPayment;
        let request = self.http.post(self.url(endpoint));
        let request = match self.settings.payment_encoding {
            PaymentEncoding::Json => request.json(payment),
            PaymentEncoding::Query => request.query(payment),
        };
        debug!(amount = %payment.amount, "payment payload prepared");
        self.send(endpoint, request).await
    }

    pub async fn verify_otp(
        &self,
        verification: &OtpVerification,
    ) -> Result<VerifyOtpResponse, DispatchError> {
        let endpoint = Endpoint::VerifyOtp;
        let request = self.http.post(self.url(endpoint)).json(verification);
        self.send(endpoint, request).await
    }

    pub async fn create_checkout_session(
        &self,
        verification: &OtpVerification,
    ) -> Result<CheckoutSessionResponse, DispatchError> {
        let endpoint = Endpoint::CreateCheckoutSession;
        let request = self.http.post(self.url(endpoint)).json(verification);
        self.send(endpoint, request).await
    }

    /// The resend service reads the names from the query string; they are
    /// sent in the body as well.
    pub async fn resend_otp(
        &self,
        resend: &ResendOtpRequest,
    ) -> Result<MessageResponse, DispatchError> {
        let endpoint = Endpoint::ResendOtp;
        let request = self
            .http
            .post(self.url(endpoint))
            .query(resend)
            .json(resend);
        self.send(endpoint, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<T, DispatchError> {
        info!(%endpoint, "dispatching request");
        let response = request.send().await.map_err(|source| {
            warn!(%endpoint, error = %source, "request did not complete");
            DispatchError::Transport { endpoint, source }
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| DispatchError::Transport { endpoint, source })?;

        if !status.is_success() {
            let detail = describe_error_body(&body);
            warn!(%endpoint, status = status.as_u16(), ?detail, "request rejected");
            return Err(DispatchError::Status {
                endpoint,
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_slice(&body).map_err(|err| {
            warn!(%endpoint, error = %err, "response body did not parse");
            DispatchError::MalformedBody {
                endpoint,
                reason: err.to_string(),
            }
        })
    }
}

fn file_part(endpoint: Endpoint, attachment: Attachment) -> Result<Part, DispatchError> {
    Part::bytes(attachment.bytes)
        .file_name(attachment.file_name)
        .mime_str(&attachment.content_type)
        .map_err(|source| DispatchError::Encode { endpoint, source })
}
