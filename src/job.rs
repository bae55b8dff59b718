use crate::config::{self, Config};
use crate::error::{ClientError, Result};
use crate::http;
use std::path::Path;
use url::Url;

pub const API_SERVER: &str = "bf-api";

pub struct JobClient {
    url: Url,
    auth: String,
}

impl JobClient {
    pub fn new(url: Url, auth: &str) -> Self {
        Self {
            url,
            auth: auth.to_owned(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let url = http::service_url(API_SERVER, config.require(config::DOMAIN)?)?;
        Ok(Self::new(url, config.require(config::AUTH)?))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::read(path, &[config::DOMAIN, config::AUTH])?;
        Self::from_config(&config)
    }

    pub async fn info_for_jobs(&self) -> Result<String> {
        tracing::info!("Job.GetInfoForJobs");
        let url = http::with_segments(&self.url, &["v0", "job"])?;
        http::get_json(&url, http::DEFAULT_TIMEOUT, Some(&self.auth)).await
    }

    pub async fn info_for_job(&self, id: &str) -> Result<String> {
        tracing::info!("Job.GetInfoForJob");
        let url = http::with_segments(&self.url, &["v0", "job", id])?;
        http::get_json(&url, http::DEFAULT_TIMEOUT, Some(&self.auth)).await
    }

    pub async fn submit(&self) -> Result<()> {
        tracing::info!("Job.DoJobSubmit");
        Err(ClientError::Unsupported("job: --submit"))
    }

    pub async fn delete(&self, _id: &str) -> Result<()> {
        tracing::info!("Job.DoJobDelete");
        Err(ClientError::Unsupported("job: --delete"))
    }
}
