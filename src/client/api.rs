//! HTTP client for the ShiftSync API

use super::error::{ClientError, ClientResult};
use super::session::RequestContext;
use crate::api::responses::{
    CurrentUserResponse, ErrorBody, HandoffListResponse, HandoffResponse, HealthResponse,
    LoginResponse, PatientListResponse, PatientResponse, RegisterResponse,
};
use crate::config::ClientConfig;
use crate::domain::{
    HandoffId, HandoffView, LoginRequest, NewHandoff, NewPatient, Patient, PatientId, PatientPatch,
    RegisterUser, Result, ShiftSyncError, UserProfile,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Thin typed wrapper over the REST routes
///
/// Credentials come from the [`RequestContext`] passed to each call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for `client.api_base_url`
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unparseable base URL
    pub fn new(config: &ClientConfig) -> Result<Self> {
        url::Url::parse(&config.api_base_url).map_err(|e| {
            ShiftSyncError::Configuration(format!(
                "Invalid API base URL '{}': {e}",
                config.api_base_url
            ))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(10)))
            .build()
            .map_err(|e| {
                ShiftSyncError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client for `base_url` with default timeouts
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(&ClientConfig {
            api_base_url: base_url.into(),
            ..ClientConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        let request = match ctx.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return response.json::<T>().await.map_err(|e| ClientError::Server {
                status: status.as_u16(),
                message: format!("Unexpected response body: {e}"),
            });
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        };
        tracing::debug!(status = status.as_u16(), message = %message, "API call rejected");
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn health(&self, ctx: &RequestContext) -> ClientResult<HealthResponse> {
        self.send(ctx, self.client.get(self.url("/health"))).await
    }

    pub async fn register(
        &self,
        ctx: &RequestContext,
        input: &RegisterUser,
    ) -> ClientResult<RegisterResponse> {
        self.send(ctx, self.client.post(self.url("/api/auth/register")).json(input))
            .await
    }

    pub async fn login(
        &self,
        ctx: &RequestContext,
        input: &LoginRequest,
    ) -> ClientResult<LoginResponse> {
        self.send(ctx, self.client.post(self.url("/api/auth/login")).json(input))
            .await
    }

    pub async fn current_user(&self, ctx: &RequestContext) -> ClientResult<UserProfile> {
        let response: CurrentUserResponse = self
            .send(ctx, self.client.get(self.url("/api/auth/me")))
            .await?;
        Ok(response.user)
    }

    /// Active patients, room-sorted
    pub async fn list_patients(&self, ctx: &RequestContext) -> ClientResult<Vec<Patient>> {
        let response: PatientListResponse = self
            .send(ctx, self.client.get(self.url("/api/patients")))
            .await?;
        Ok(response.patients)
    }

    pub async fn create_patient(
        &self,
        ctx: &RequestContext,
        input: &NewPatient,
    ) -> ClientResult<Patient> {
        let response: PatientResponse = self
            .send(ctx, self.client.post(self.url("/api/patients")).json(input))
            .await?;
        Ok(response.patient)
    }

    pub async fn get_patient(&self, ctx: &RequestContext, id: PatientId) -> ClientResult<Patient> {
        let response: PatientResponse = self
            .send(ctx, self.client.get(self.url(&format!("/api/patients/{id}"))))
            .await?;
        Ok(response.patient)
    }

    pub async fn update_patient(
        &self,
        ctx: &RequestContext,
        id: PatientId,
        patch: &PatientPatch,
    ) -> ClientResult<Patient> {
        let request = self
            .client
            .put(self.url(&format!("/api/patients/{id}")))
            .json(patch);
        let response: PatientResponse = self.send(ctx, request).await?;
        Ok(response.patient)
    }

    pub async fn deactivate_patient(
        &self,
        ctx: &RequestContext,
        id: PatientId,
    ) -> ClientResult<Patient> {
        let response: PatientResponse = self
            .send(ctx, self.client.delete(self.url(&format!("/api/patients/{id}"))))
            .await?;
        Ok(response.patient)
    }

    pub async fn create_handoff(
        &self,
        ctx: &RequestContext,
        input: &NewHandoff,
    ) -> ClientResult<HandoffView> {
        let response: HandoffResponse = self
            .send(ctx, self.client.post(self.url("/api/handoffs")).json(input))
            .await?;
        Ok(response.handoff)
    }

    /// Every handoff, newest first
    pub async fn list_handoffs(&self, ctx: &RequestContext) -> ClientResult<Vec<HandoffView>> {
        let response: HandoffListResponse = self
            .send(ctx, self.client.get(self.url("/api/handoffs")))
            .await?;
        Ok(response.handoffs)
    }

    pub async fn list_patient_handoffs(
        &self,
        ctx: &RequestContext,
        patient: PatientId,
    ) -> ClientResult<Vec<HandoffView>> {
        let url = self.url(&format!("/api/handoffs/patient/{patient}"));
        let response: HandoffListResponse = self.send(ctx, self.client.get(url)).await?;
        Ok(response.handoffs)
    }

    pub async fn get_handoff(
        &self,
        ctx: &RequestContext,
        id: HandoffId,
    ) -> ClientResult<HandoffView> {
        let response: HandoffResponse = self
            .send(ctx, self.client.get(self.url(&format!("/api/handoffs/{id}"))))
            .await?;
        Ok(response.handoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let client = ApiClient::with_base_url("http://localhost:5000/").unwrap();
        assert_eq!(client.url("/api/patients"), "http://localhost:5000/api/patients");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::with_base_url("not a url"),
            Err(ShiftSyncError::Configuration(_))
        ));
    }
}
