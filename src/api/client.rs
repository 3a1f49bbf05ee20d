//! HTTP implementation of [`AppointmentApi`] over `reqwest`.
//!
//! Every request attaches `Authorization: Bearer <token>` from the
//! [`TokenStore`]; a missing token aborts before any network traffic.
//! Calls are not cancellable once started — callers that lose interest
//! simply drop the future's result.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::auth::TokenStore;
use crate::config;
use crate::models::{Appointment, AppointmentFilter, DeletedFilter, Doctor, Page};

use super::error::ApiError;
use super::types::{
    Ack, AppointmentUpdate, CheckRequest, DataEnvelope, DoctorQuery, ErrorBody, NewVitals,
    PageEnvelope, PatientRegistration, StatusOption, VitalsUpdate,
};
use super::AppointmentApi;

/// Remote HIMS client.
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
    tokens: Arc<dyn TokenStore>,
    timeout_secs: u64,
}

impl HttpApi {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_timeout(base_url, tokens, config::REQUEST_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, tokens: Arc<dyn TokenStore>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            tokens,
            timeout_secs,
        }
    }

    /// Client against the configured backend (`FRONTDESK_API_URL` or the
    /// built-in staging endpoint).
    pub fn from_env(tokens: Arc<dyn TokenStore>) -> Self {
        Self::new(&config::base_url(), tokens)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.tokens.token().ok_or(ApiError::AuthRequired)?;
        let url = format!("{}{path}", self.base_url);
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, self.timeout_secs))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthRequired);
        }
        if !status.is_success() {
            let message = server_message(response).await;
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Send and check only the HTTP status.
    async fn send_for_status(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    /// Send, then require an `isSuccess: true` acknowledgment body.
    async fn send_for_ack(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let ack: Ack = parse_json(self.send(request).await?).await?;
        if ack.is_success {
            Ok(())
        } else {
            Err(ApiError::Rejected(
                ack.message
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            ))
        }
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json().await.map_err(|e| {
        tracing::warn!(error = %e, "response body did not match expected shape");
        ApiError::UnexpectedFormat
    })
}

/// Best-effort extraction of the server's error message.
async fn server_message(response: Response) -> String {
    match response.json::<ErrorBody>().await {
        Ok(ErrorBody { message: Some(m) }) if !m.is_empty() => m,
        _ => "Request failed".to_string(),
    }
}

fn appointment_query(filter: &AppointmentFilter) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("count", filter.count.to_string()),
        ("pageNo", filter.page_no.to_string()),
        ("sort", filter.sort.as_str().to_string()),
        ("checkStatus", filter.check_status.as_str().to_string()),
    ];
    for doctor_id in &filter.doctor_ids {
        params.push(("doctorIds", doctor_id.clone()));
    }
    if let Some(date) = filter.appointment_date {
        params.push(("appointmentDate", date.format("%Y-%m-%d").to_string()));
    }
    if let Some(search) = &filter.search {
        let trimmed = search.trim();
        if !trimmed.is_empty() {
            params.push(("search", trimmed.to_string()));
        }
    }
    params
}

fn deleted_query(filter: &DeletedFilter) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("count", filter.count.to_string()),
        ("pageNo", filter.page_no.to_string()),
        ("sort", filter.sort.as_str().to_string()),
    ];
    if let Some(doctor_id) = &filter.doctor_id {
        params.push(("doctorId", doctor_id.clone()));
    }
    if let Some(date) = filter.appointment_date {
        params.push(("appointmentDate", date.format("%Y-%m-%d").to_string()));
    }
    if let Some(search) = &filter.search {
        params.push(("search", search.clone()));
    }
    params
}

impl<T> From<PageEnvelope<T>> for Page<T> {
    fn from(envelope: PageEnvelope<T>) -> Self {
        Page {
            items: envelope.data,
            total_count: envelope.total_count,
            current_page: envelope.current_page,
        }
    }
}

impl AppointmentApi for HttpApi {
    async fn submit_vitals(&self, vitals: &NewVitals) -> Result<(), ApiError> {
        let request = self.request(Method::POST, "/vitals/addVitals")?.json(vitals);
        self.send_for_status(request).await
    }

    async fn update_vitals(&self, vitals_id: &str, update: &VitalsUpdate) -> Result<(), ApiError> {
        let request = self
            .request(Method::PUT, &format!("/vitals/updateVitalById/{vitals_id}"))?
            .json(update);
        self.send_for_status(request).await
    }

    async fn list_status_options(&self) -> Result<Vec<StatusOption>, ApiError> {
        let request = self.request(Method::GET, "/checked-status-options/getAllByPagination")?;
        let envelope: DataEnvelope<Vec<StatusOption>> = parse_json(self.send(request).await?).await?;
        Ok(envelope.data)
    }

    async fn check_appointment(&self, id: &str, request: &CheckRequest) -> Result<(), ApiError> {
        let req = self
            .request(Method::POST, &format!("/appointments/checkAppointment/{id}"))?
            .json(request);
        self.send_for_ack(req).await
    }

    async fn uncheck_appointment(&self, id: &str) -> Result<(), ApiError> {
        let req = self.request(
            Method::GET,
            &format!("/appointments/unCheckAppointment/{id}"),
        )?;
        self.send_for_ack(req).await
    }

    async fn update_appointment(
        &self,
        id: &str,
        update: &AppointmentUpdate,
    ) -> Result<(), ApiError> {
        let req = self
            .request(
                Method::PUT,
                &format!("/appointments/updateAppointment/{id}"),
            )?
            .json(update);
        self.send_for_status(req).await
    }

    async fn delete_appointment(&self, id: &str, reason: &str) -> Result<(), ApiError> {
        // DELETE carries the reason in the request body.
        let req = self
            .request(
                Method::DELETE,
                &format!("/appointments/deleteAppointment/{id}"),
            )?
            .json(&json!({ "deleteReason": reason }));
        self.send_for_status(req).await
    }

    async fn restore_appointment(&self, id: &str) -> Result<(), ApiError> {
        // Status-only check: a 200 "already active" response counts as
        // restored. There is no version token on the record.
        let req = self
            .request(
                Method::PUT,
                &format!("/appointments/restoreDeletedAppointment/{id}"),
            )?
            .json(&json!({}));
        self.send_for_status(req).await
    }

    async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Page<Appointment>, ApiError> {
        let req = self
            .request(Method::GET, "/appointments/getAllAppointments")?
            .query(&appointment_query(filter));
        let envelope: PageEnvelope<Appointment> = parse_json(self.send(req).await?).await?;
        Ok(envelope.into())
    }

    async fn list_deleted_appointments(
        &self,
        filter: &DeletedFilter,
    ) -> Result<Page<Appointment>, ApiError> {
        let req = self
            .request(Method::GET, "/appointments/getAllDeletedAppointments")?
            .query(&deleted_query(filter));
        // The history endpoint double-wraps: { data: { data, totalCount, … } }.
        let envelope: DataEnvelope<PageEnvelope<Appointment>> =
            parse_json(self.send(req).await?).await?;
        Ok(envelope.data.into())
    }

    async fn list_doctors(&self, query: &DoctorQuery) -> Result<Page<Doctor>, ApiError> {
        let req = self.request(Method::GET, "/users/getAllDoctors")?.query(&[
            ("count", query.count.unwrap_or(10).to_string()),
            ("pageNo", query.page_no.unwrap_or(1).to_string()),
            ("sort", "accending".to_string()),
        ]);
        let envelope: PageEnvelope<Doctor> = parse_json(self.send(req).await?).await?;
        Ok(envelope.into())
    }

    async fn register_patient(&self, registration: &PatientRegistration) -> Result<(), ApiError> {
        let req = self
            .request(Method::POST, "/patient-registration/registerPatient")?
            .json(registration);
        self.send_for_ack(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use crate::models::{CheckFilter, SortOrder};

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpApi::new(
            "https://example.test/api/",
            Arc::new(MemoryTokenStore::with_token("t")),
        );
        assert_eq!(api.base_url, "https://example.test/api");
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_request() {
        let api = HttpApi::new("https://example.invalid", Arc::new(MemoryTokenStore::new()));
        let err = api.list_status_options().await.unwrap_err();
        assert!(matches!(err, ApiError::AuthRequired));
    }

    #[test]
    fn appointment_query_includes_filters() {
        let filter = AppointmentFilter {
            check_status: CheckFilter::Checked,
            doctor_ids: vec!["d1".into(), "d2".into()],
            search: Some("  khan  ".into()),
            ..Default::default()
        };
        let params = appointment_query(&filter);
        assert!(params.contains(&("checkStatus", "checked".to_string())));
        assert!(params.contains(&("sort", "accending".to_string())));
        assert!(params.contains(&("doctorIds", "d1".to_string())));
        assert!(params.contains(&("doctorIds", "d2".to_string())));
        assert!(params.contains(&("search", "khan".to_string())));
    }

    #[test]
    fn deleted_query_defaults() {
        let filter = DeletedFilter {
            sort: SortOrder::Descending,
            ..Default::default()
        };
        let params = deleted_query(&filter);
        assert!(params.contains(&("sort", "descending".to_string())));
        assert!(params.iter().all(|(k, _)| *k != "search"));
    }
}
