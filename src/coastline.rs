use crate::config::{self, Config};
use crate::error::{ClientError, Result};
use crate::http;
use crate::job::API_SERVER;
use reqwest::StatusCode;
use std::path::Path;
use url::Url;

pub struct CoastlineClient {
    url: Url,
    auth: String,
}

impl CoastlineClient {
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

    /// Saves the coastline produced by job `id` to `dir/<id>.geojson` and
    /// returns its size in bytes.
    pub async fn download(&self, id: &str, dir: &Path) -> Result<u64> {
        tracing::info!("DoCoastlineDownload");
        validate_job_id(id)?;
        let file_name = format!("{id}.geojson");
        let url = http::with_segments(&self.url, &["v0", "job", file_name.as_str()])?;

        http::get(&url, http::DEFAULT_TIMEOUT, Some(&self.auth))
            .await?
            .expect_status(StatusCode::OK)?
            .write_to(dir.join(file_name))
            .await
    }
}

/// The id names the written file, so it must not reach outside the target
/// directory.
fn validate_job_id(id: &str) -> Result<()> {
    if id.is_empty() || id == "." || id == ".." || id.contains(|c: char| c == '/' || c == '\\') {
        return Err(ClientError::JobId(id.to_owned()));
    }
    Ok(())
}
