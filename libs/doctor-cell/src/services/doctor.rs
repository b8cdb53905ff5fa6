use async_trait::async_trait;
use tracing::{debug, error};

use shared_backend::{BackendClient, BackendError};
use shared_config::AppConfig;

use crate::models::{DoctorLookupError, DoctorRecord};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    async fn fetch_doctor(&self, doctor_id: &str) -> Result<DoctorRecord, DoctorLookupError>;
}

/// Doctor lookup against the clinic backend.
pub struct HttpDoctorDirectory {
    backend: BackendClient,
}

impl HttpDoctorDirectory {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }
}

#[async_trait]
impl DoctorDirectory for HttpDoctorDirectory {
    /// GET /doctors/appointment/{id}
    async fn fetch_doctor(&self, doctor_id: &str) -> Result<DoctorRecord, DoctorLookupError> {
        debug!("Fetching doctor details for: {}", doctor_id);

        let path = format!("/doctors/appointment/{}", urlencoding::encode(doctor_id));

        self.backend
            .get_json::<DoctorRecord>(&path)
            .await
            .map_err(|e| {
                error!("Error fetching doctor details: {}", e);
                match e {
                    BackendError::NotFound(_) => DoctorLookupError::NotFound,
                    other => DoctorLookupError::FetchFailed(other),
                }
            })
    }
}
