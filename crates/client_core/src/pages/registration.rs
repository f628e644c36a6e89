use std::path::PathBuf;

use shared::domain::{RegistrationRecord, Step};
use tracing::info;

use super::SubmitOutcome;
use crate::{
    dispatch::Dispatcher,
    error::ValidationError,
    form::{FormStatus, LoadingFlag},
    navigator::Navigator,
    validation::{self, DOCUMENT_ACCEPT, PICTURE_ACCEPT},
};

const REGISTERED_MESSAGE: &str = "User registered successfully!";

#[derive(Debug, Clone, Default)]
pub struct RegistrationFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub document: Option<PathBuf>,
    pub picture: Option<PathBuf>,
    pub is_registered: bool,
}

impl RegistrationFields {
    /// Checks every field and reads the attached files.
    pub async fn validate(&self) -> Result<RegistrationRecord, ValidationError> {
        let first_name = validation::required("first_name", &self.first_name)?;
        let last_name = validation::required("last_name", &self.last_name)?;
        let email = validation::email("email", &self.email)?;
        let address = validation::required("address", &self.address)?;

        let document = match &self.document {
            Some(path) => Some(validation::attachment("document", path, DOCUMENT_ACCEPT).await?),
            None => None,
        };
        let picture = match &self.picture {
            Some(path) => Some(validation::attachment("picture", path, PICTURE_ACCEPT).await?),
            None => None,
        };

        Ok(RegistrationRecord {
            first_name,
            last_name,
            email,
            address,
            document,
            picture,
            is_registered: self.is_registered,
        })
    }
}

#[derive(Debug, Default)]
pub struct RegistrationPage {
    pub fields: RegistrationFields,
    status: FormStatus,
    loading: LoadingFlag,
}

impl RegistrationPage {
    pub fn new(fields: RegistrationFields) -> Self {
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

        let record = match self.fields.validate().await {
            Ok(record) => record,
            Err(err) => {
                self.status.fail(err.to_string());
                return SubmitOutcome::Invalid(err);
            }
        };

        let Some(guard) = self.loading.begin() else {
            return SubmitOutcome::Busy;
        };
        let result = dispatcher.register(record).await;
        drop(guard);

        match result {
            Ok(_) => {
                info!("registration accepted");
                self.status.succeed(REGISTERED_MESSAGE);
                SubmitOutcome::Navigated(navigator.push_route(Step::Payment).clone())
            }
            Err(err) => {
                let message = err.user_message();
                self.status.fail(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
