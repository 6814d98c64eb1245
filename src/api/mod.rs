//! Typed HTTP client over the clinical backend.
//!
//! One method per backend endpoint; the bearer token is read from the
//! [`TokenStore`] at request-send time, never cached on the client. All
//! non-auth endpoints require the token — the backend performs the
//! authoritative role check on every mutating call, the client only mirrors
//! it in the dashboards.
//!
//! Controllers depend on the [`WorkflowApi`] / [`AuthApi`] traits rather
//! than on `ApiClient`, so tests can substitute an in-memory backend.

pub mod error;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config;
use crate::models::{
    Account, Appointment, AppointmentStatus, LabReport, LabRequest, NewAccount, NewAppointment,
    NewLabRequest, NewPrescription, Prescription, PublicStats, SystemStats, TokenResponse,
};
use crate::token_store::TokenStore;

pub use error::{ApiError, Remedy};

// ═══════════════════════════════════════════════════════════
// Transport seams
// ═══════════════════════════════════════════════════════════

/// Authentication surface consumed by the session store.
pub trait AuthApi {
    fn login(
        &self,
        identifier: &str,
        secret: &str,
    ) -> impl std::future::Future<Output = Result<TokenResponse, ApiError>> + Send;
    fn me(&self) -> impl std::future::Future<Output = Result<Account, ApiError>> + Send;
    fn register(
        &self,
        input: &NewAccount,
    ) -> impl std::future::Future<Output = Result<Account, ApiError>> + Send;
}

/// Workflow surface consumed by the per-role dashboard controllers.
pub trait WorkflowApi {
    fn list_appointments(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Appointment>, ApiError>> + Send;
    fn create_appointment(
        &self,
        input: &NewAppointment,
    ) -> impl std::future::Future<Output = Result<Appointment, ApiError>> + Send;
    fn update_appointment_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> impl std::future::Future<Output = Result<Appointment, ApiError>> + Send;

    fn list_prescriptions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Prescription>, ApiError>> + Send;
    fn create_prescription(
        &self,
        input: &NewPrescription,
    ) -> impl std::future::Future<Output = Result<Prescription, ApiError>> + Send;
    fn dispense_prescription(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Prescription, ApiError>> + Send;

    fn list_lab_requests(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<LabRequest>, ApiError>> + Send;
    fn create_lab_request(
        &self,
        input: &NewLabRequest,
    ) -> impl std::future::Future<Output = Result<LabRequest, ApiError>> + Send;
    fn upload_lab_report(
        &self,
        request_id: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<LabReport, ApiError>> + Send;
    fn get_lab_report(
        &self,
        result_id: &str,
    ) -> impl std::future::Future<Output = Result<LabReport, ApiError>> + Send;

    fn list_doctors(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Account>, ApiError>> + Send;
    fn list_users(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Account>, ApiError>> + Send;
    fn delete_user(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;
    fn register_account(
        &self,
        input: &NewAccount,
    ) -> impl std::future::Future<Output = Result<Account, ApiError>> + Send;

    fn get_stats(
        &self,
    ) -> impl std::future::Future<Output = Result<SystemStats, ApiError>> + Send;
    fn get_public_stats(
        &self,
    ) -> impl std::future::Future<Output = Result<PublicStats, ApiError>> + Send;
}

/// Shared references delegate, so one transport can serve several
/// controllers at once.
impl<T: WorkflowApi + Sync> WorkflowApi for &T {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        (**self).list_appointments().await
    }
    async fn create_appointment(&self, input: &NewAppointment) -> Result<Appointment, ApiError> {
        (**self).create_appointment(input).await
    }
    async fn update_appointment_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError> {
        (**self).update_appointment_status(id, status).await
    }
    async fn list_prescriptions(&self) -> Result<Vec<Prescription>, ApiError> {
        (**self).list_prescriptions().await
    }
    async fn create_prescription(&self, input: &NewPrescription) -> Result<Prescription, ApiError> {
        (**self).create_prescription(input).await
    }
    async fn dispense_prescription(&self, id: &str) -> Result<Prescription, ApiError> {
        (**self).dispense_prescription(id).await
    }
    async fn list_lab_requests(&self) -> Result<Vec<LabRequest>, ApiError> {
        (**self).list_lab_requests().await
    }
    async fn create_lab_request(&self, input: &NewLabRequest) -> Result<LabRequest, ApiError> {
        (**self).create_lab_request(input).await
    }
    async fn upload_lab_report(
        &self,
        request_id: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<LabReport, ApiError> {
        (**self).upload_lab_report(request_id, filename, bytes).await
    }
    async fn get_lab_report(&self, result_id: &str) -> Result<LabReport, ApiError> {
        (**self).get_lab_report(result_id).await
    }
    async fn list_doctors(&self) -> Result<Vec<Account>, ApiError> {
        (**self).list_doctors().await
    }
    async fn list_users(&self) -> Result<Vec<Account>, ApiError> {
        (**self).list_users().await
    }
    async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        (**self).delete_user(id).await
    }
    async fn register_account(&self, input: &NewAccount) -> Result<Account, ApiError> {
        (**self).register_account(input).await
    }
    async fn get_stats(&self) -> Result<SystemStats, ApiError> {
        (**self).get_stats().await
    }
    async fn get_public_stats(&self) -> Result<PublicStats, ApiError> {
        (**self).get_public_stats().await
    }
}

// ═══════════════════════════════════════════════════════════
// ApiClient
// ═══════════════════════════════════════════════════════════

/// HTTP client for the clinical backend.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    tokens: TokenStore,
}

impl ApiClient {
    /// Client against an explicit base URL.
    pub fn new(base_url: &str, tokens: TokenStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            tokens,
        }
    }

    /// Client against the configured backend (`CAREFLOW_API_URL` or default).
    pub fn from_config(tokens: TokenStore) -> Self {
        Self::new(&config::api_base_url(), tokens)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the stored bearer token, if any. An unreadable store is
    /// treated as "no token" — the backend answers 401 and the session
    /// store resolves it from there.
    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.tokens.load() {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(e) => {
                tracing::warn!("Token store unreadable, sending unauthenticated: {e}");
                builder
            }
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&self.base_url, e))?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.authorized(self.http.get(self.url(path)))).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.authorized(self.http.post(self.url(path)).json(body)))
            .await
    }

    /// Multipart form for registration — patient profile fields or staff
    /// verification document, matching the backend's `/auth/register`.
    fn registration_form(input: &NewAccount) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new()
            .text("email", input.email.clone())
            .text("password", input.password.clone())
            .text("full_name", input.full_name.clone())
            .text("role", input.role.as_str().to_string());
        if let Some(gender) = &input.gender {
            form = form.text("gender", gender.clone());
        }
        if let Some(height) = &input.height {
            form = form.text("height", height.clone());
        }
        if let Some(weight) = &input.weight {
            form = form.text("weight", weight.clone());
        }
        if let Some(sleep) = &input.sleep_routine {
            form = form.text("sleep_routine", sleep.clone());
        }
        if let Some((filename, bytes)) = &input.verification_document {
            let part = reqwest::multipart::Part::bytes(bytes.clone())
                .file_name(filename.clone());
            form = form.part("verification_document", part);
        }
        form
    }

    async fn register_multipart(&self, input: &NewAccount) -> Result<Account, ApiError> {
        if !input.is_complete() {
            return Err(ApiError::Validation(
                "Staff registration requires a verification document".into(),
            ));
        }
        let form = Self::registration_form(input);
        self.execute::<Account>(self.http.post(self.url("/auth/register")).multipart(form))
            .await
    }
}

// ── AuthApi ─────────────────────────────────────────────────

impl AuthApi for ApiClient {
    /// OAuth2 password exchange. Form-encoded, no bearer attached.
    async fn login(&self, identifier: &str, secret: &str) -> Result<TokenResponse, ApiError> {
        let form = [
            ("username", identifier),
            ("password", secret),
            ("grant_type", "password"),
            ("scope", ""),
        ];
        self.execute(self.http.post(self.url("/auth/login")).form(&form))
            .await
    }

    async fn me(&self) -> Result<Account, ApiError> {
        self.get_json("/users/me").await
    }

    async fn register(&self, input: &NewAccount) -> Result<Account, ApiError> {
        self.register_multipart(input).await
    }
}

// ── WorkflowApi ─────────────────────────────────────────────

impl WorkflowApi for ApiClient {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.get_json("/appointments/").await
    }

    async fn create_appointment(&self, input: &NewAppointment) -> Result<Appointment, ApiError> {
        self.post_json("/appointments/", input).await
    }

    async fn update_appointment_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError> {
        let builder = self
            .http
            .put(self.url(&format!("/appointments/{id}/status")))
            .query(&[("status", status.as_str())]);
        self.execute(self.authorized(builder)).await
    }

    async fn list_prescriptions(&self) -> Result<Vec<Prescription>, ApiError> {
        self.get_json("/medical/prescriptions").await
    }

    async fn create_prescription(
        &self,
        input: &NewPrescription,
    ) -> Result<Prescription, ApiError> {
        self.post_json("/medical/prescriptions", input).await
    }

    async fn dispense_prescription(&self, id: &str) -> Result<Prescription, ApiError> {
        let builder = self
            .http
            .put(self.url(&format!("/medical/prescriptions/{id}/dispense")));
        self.execute(self.authorized(builder)).await
    }

    async fn list_lab_requests(&self) -> Result<Vec<LabRequest>, ApiError> {
        self.get_json("/medical/lab-requests").await
    }

    async fn create_lab_request(&self, input: &NewLabRequest) -> Result<LabRequest, ApiError> {
        self.post_json("/medical/lab-requests", input).await
    }

    /// Upload the report file; the backend stores it, runs the external AI
    /// analysis, and atomically completes the request with a new result id.
    async fn upload_lab_report(
        &self,
        request_id: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<LabReport, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("ai_analysis", "true");
        let builder = self
            .http
            .post(self.url(&format!("/medical/lab-requests/{request_id}/upload")))
            .multipart(form);
        self.execute(self.authorized(builder)).await
    }

    async fn get_lab_report(&self, result_id: &str) -> Result<LabReport, ApiError> {
        self.get_json(&format!("/medical/lab-reports/{result_id}")).await
    }

    async fn list_doctors(&self) -> Result<Vec<Account>, ApiError> {
        self.get_json("/users/doctors").await
    }

    async fn list_users(&self) -> Result<Vec<Account>, ApiError> {
        self.get_json("/users/").await
    }

    async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let builder = self.http.delete(self.url(&format!("/users/{id}")));
        // Body is a `{"message": ...}` acknowledgement; discarded.
        let _: serde_json::Value = self.execute(self.authorized(builder)).await?;
        Ok(())
    }

    async fn register_account(&self, input: &NewAccount) -> Result<Account, ApiError> {
        self.register_multipart(input).await
    }

    async fn get_stats(&self) -> Result<SystemStats, ApiError> {
        self.get_json("/admin/stats").await
    }

    /// Landing-page subset; deliberately sent without a bearer token.
    async fn get_public_stats(&self) -> Result<PublicStats, ApiError> {
        self.execute(self.http.get(self.url("/admin/public-stats"))).await
    }
}
