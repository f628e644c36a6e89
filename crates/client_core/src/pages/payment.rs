use shared::domain::{PaymentRequest, Step};

use super::SubmitOutcome;
use crate::{
    dispatch::Dispatcher,
    error::ValidationError,
    form::{FormStatus, LoadingFlag},
    navigator::Navigator,
    validation,
};

const PAYMENT_ACCEPTED: &str = "Payment processing initiated.";

#[derive(Debug, Clone, Default)]
pub struct PaymentFields {
    pub amount: String,
    pub description: String,
    pub first_name: String,
    pub last_name: String,
}

impl PaymentFields {
    pub fn validate(&self) -> Result<PaymentRequest, ValidationError> {
        Ok(PaymentRequest {
            amount: validation::amount("amount", &self.amount)?,
            description: validation::required("description", &self.description)?,
            first_name: validation::required("first_name", &self.first_name)?,
            last_name: validation::required("last_name", &self.last_name)?,
        })
    }
}

#[derive(Debug, Default)]
pub struct PaymentPage {
    pub fields: PaymentFields,
    status: FormStatus,
    loading: LoadingFlag,
}

impl PaymentPage {
    pub fn new(fields: PaymentFields) -> Self {
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

    pub async fn submit(
        &mut self,
        dispatcher: &Dispatcher,
        navigator: &mut Navigator,
    ) -> SubmitOutcome {
        if self.loading.is_set() {
            return SubmitOutcome::Busy;
        }
        self.status.clear();

        let payment = match self.fields.validate() {
            Ok(payment) => payment,
            Err(err) => {
                self.status.fail(err.to_string());
                return SubmitOutcome::Invalid(err);
            }
        };

        let Some(guard) = self.loading.begin() else {
            return SubmitOutcome::Busy;
        };
        let result = dispatcher.process_payment(&payment).await;
        drop(guard);

        match result {
            Ok(response) => {
                self.status
                    .succeed(response.message.unwrap_or_else(|| PAYMENT_ACCEPTED.into()));
                SubmitOutcome::Navigated(navigator.push_route(Step::VerifyOtp).clone())
            }
            Err(err) => {
                let message = err.user_message();
                self.status.fail(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
