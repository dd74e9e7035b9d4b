use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;

use crate::ais::AisIngest;
use crate::config::{Config, DataMode};
use crate::elset::ElsetIngest;
use crate::udl::error::TransportError;
use crate::udl::{AIS_PATH, ELSET_PATH, EPHEMERIS_PATH};

/// Query string of an ephemeris filedrop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EphemerisParams {
    pub id_on_orbit: String,
    pub classification: String,
    pub data_mode: DataMode,
    pub has_mnvr: bool,
    #[serde(rename = "type")]
    pub ephem_type: String,
    pub category: String,
    pub ephem_format_type: String,
    pub source: String,
}

impl EphemerisParams {
    /// Routine, externally sourced, no-manoeuvre NASA ephemeris from Spire.
    pub fn routine(id_on_orbit: &str, classification: &str, data_mode: DataMode) -> Self {
        Self {
            id_on_orbit: id_on_orbit.to_string(),
            classification: classification.to_string(),
            data_mode,
            has_mnvr: false,
            ephem_type: "ROUTINE".to_string(),
            category: "EXTERNAL".to_string(),
            ephem_format_type: "NASA".to_string(),
            source: "Spire".to_string(),
        }
    }
}

#[async_trait]
pub trait UdlClient: Send + Sync {
    async fn post_ais(&self, body: &[AisIngest]) -> Result<(), TransportError>;

    async fn post_elsets(&self, body: &[ElsetIngest]) -> Result<(), TransportError>;

    async fn post_ephemeris(
        &self,
        params: &EphemerisParams,
        body: String,
    ) -> Result<(), TransportError>;
}

/// `reqwest` client authenticating every request with HTTP Basic Auth.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    username: String,
    password: String,
}

impl HttpClient {
    pub fn new(
        base_url: &str,
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let mut url = Url::parse(base_url).map_err(|e| TransportError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        // Endpoint paths are joined relative to the base.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: url,
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        Self::new(
            &config.base_url,
            &config.http_basic_auth_username,
            &config.http_basic_auth_password,
            config.request_timeout,
        )
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                message: e.to_string(),
            })
    }

    fn post(&self, path: &str) -> Result<RequestBuilder, TransportError> {
        Ok(self
            .client
            .post(self.endpoint(path)?)
            .basic_auth(&self.username, Some(&self.password)))
    }
}

async fn check_status(response: Response) -> Result<(), TransportError> {
    let status = response.status();
    let url = response.url().clone();
    if status.as_u16() >= 300 {
        let body = response.text().await.unwrap_or_default();
        log::error!("UDL request to {} failed: {} - {}", url.path(), status, body);
        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        });
    }
    log::debug!("UDL {} responded {}", url.path(), status);
    Ok(())
}

#[async_trait]
impl UdlClient for HttpClient {
    async fn post_ais(&self, body: &[AisIngest]) -> Result<(), TransportError> {
        let response = self.post(AIS_PATH)?.json(body).send().await?;
        check_status(response).await
    }

    async fn post_elsets(&self, body: &[ElsetIngest]) -> Result<(), TransportError> {
        let response = self.post(ELSET_PATH)?.json(body).send().await?;
        check_status(response).await
    }

    async fn post_ephemeris(
        &self,
        params: &EphemerisParams,
        body: String,
    ) -> Result<(), TransportError> {
        let response = self
            .post(EPHEMERIS_PATH)?
            .query(params)
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await?;
        check_status(response).await
    }
}
