use reqwest::header::ACCEPT;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::ServiceConfig;
use crate::model::{DeleteNote, NewNote, Note, Profile, RecordId, TaskToggle};

/// Every way a call to the service can fail. Callers usually only care that it did.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    notes_url: String,
    profile_url: String,
}

impl ApiClient {
    pub fn new(service: &ServiceConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = service.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            notes_url: service.notes_url(),
            profile_url: service.profile_url(),
        })
    }

    async fn request<T: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&T>,
    ) -> Result<Response, ApiError> {
        let mut builder = self
            .client
            .request(method.clone(), url)
            .header(ACCEPT, "application/json");
        if let Some(b) = body {
            builder = builder.json(b);
        }

        let resp = builder.send().await?;
        if !resp.status().is_success() {
            crate::logger::log(&format!("{} {} -> {}", method, url, resp.status()));
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp)
    }

    async fn read_json<R: DeserializeOwned>(resp: Response) -> Result<R, ApiError> {
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let resp = self
            .request::<()>(Method::GET, &self.notes_url, None)
            .await?;
        Self::read_json(resp).await
    }

    pub async fn create_note(&self, note: &NewNote) -> Result<(), ApiError> {
        self.request(Method::POST, &self.notes_url, Some(note))
            .await?;
        Ok(())
    }

    pub async fn delete_note(&self, id: &RecordId) -> Result<(), ApiError> {
        self.request(Method::DELETE, &self.notes_url, Some(&DeleteNote { id }))
            .await?;
        Ok(())
    }

    pub async fn toggle_task(&self, id: &RecordId, is_completed: bool) -> Result<(), ApiError> {
        let body = TaskToggle { id, is_completed };
        self.request(Method::PUT, &self.notes_url, Some(&body))
            .await?;
        Ok(())
    }

    pub async fn get_profile(&self) -> Result<Profile, ApiError> {
        let resp = self
            .request::<()>(Method::GET, &self.profile_url, None)
            .await?;
        Self::read_json(resp).await
    }

    pub async fn save_profile(&self, profile: &Profile) -> Result<(), ApiError> {
        self.request(Method::POST, &self.profile_url, Some(profile))
            .await?;
        Ok(())
    }
}
