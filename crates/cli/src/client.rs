// SPDX-License-Identifier: MIT

//! HTTP client for talking to `ralphd`.

use ralph_core::Job;
use ralph_wire::{
    CreateJobRequest, ErrorResponse, JobListResponse, LogsResponse, PatchJobRequest,
    ReorderRequest,
};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{0}")]
    Server(String),
    #[error("job not found")]
    NotFound,
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: std::time::Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        ApiClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        if !status.is_success() {
            let body: ErrorResponse = response
                .json()
                .await
                .unwrap_or_else(|_| ErrorResponse::new(format!("request failed with {status}")));
            return Err(ClientError::Server(body.error));
        }
        response
            .json()
            .await
            .map_err(|source| ClientError::Decode { url, source })
    }

    pub async fn health(&self) -> Result<(), ClientError> {
        let url = self.url("/health");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;
        self.handle::<serde_json::Value>(url, response).await?;
        Ok(())
    }

    pub async fn create_job(&self, request: &CreateJobRequest) -> Result<Job, ClientError> {
        let url = self.url("/api/jobs");
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;
        self.handle(url, response).await
    }

    pub async fn list_jobs(&self, status: Option<&str>) -> Result<JobListResponse, ClientError> {
        let url = self.url("/api/jobs");
        let mut req = self.http.get(&url);
        if let Some(status) = status {
            req = req.query(&[("status", status)]);
        }
        let response = req
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;
        self.handle(url, response).await
    }

    pub async fn get_job(&self, id: i64) -> Result<Job, ClientError> {
        let url = self.url(&format!("/api/jobs/{id}"));
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;
        self.handle(url, response).await
    }

    pub async fn cancel_job(&self, id: i64) -> Result<Job, ClientError> {
        let url = self.url(&format!("/api/jobs/{id}"));
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;
        self.handle(url, response).await
    }

    pub async fn patch_job(&self, id: i64, patch: &PatchJobRequest) -> Result<Job, ClientError> {
        let url = self.url(&format!("/api/jobs/{id}"));
        let response = self
            .http
            .patch(&url)
            .json(patch)
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;
        self.handle(url, response).await
    }

    pub async fn pause_job(&self, id: i64) -> Result<Job, ClientError> {
        let url = self.url(&format!("/api/jobs/{id}/pause"));
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;
        self.handle(url, response).await
    }

    pub async fn resume_job(&self, id: i64) -> Result<Job, ClientError> {
        let url = self.url(&format!("/api/jobs/{id}/resume"));
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;
        self.handle(url, response).await
    }

    pub async fn reorder_jobs(&self, job_ids: Vec<i64>) -> Result<(), ClientError> {
        let url = self.url("/api/jobs/order");
        let response = self
            .http
            .put(&url)
            .json(&ReorderRequest { job_ids })
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;
        self.handle::<serde_json::Value>(url, response).await?;
        Ok(())
    }

    pub async fn job_logs(&self, id: i64) -> Result<LogsResponse, ClientError> {
        let url = self.url(&format!("/api/jobs/{id}/logs"));
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;
        self.handle(url, response).await
    }

    pub async fn get_config(&self) -> Result<ralph_core::ServerConfig, ClientError> {
        let url = self.url("/api/config");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;
        self.handle(url, response).await
    }

    pub async fn patch_config(
        &self,
        patch: &serde_json::Value,
    ) -> Result<ralph_core::ServerConfig, ClientError> {
        let url = self.url("/api/config");
        let response = self
            .http
            .patch(&url)
            .json(patch)
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;
        self.handle(url, response).await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
