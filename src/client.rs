use crate::algorithm::AlgorithmClient;
use crate::catalog::CatalogClient;
use crate::coastline::CoastlineClient;
use crate::config::{self, Config};
use crate::error::Result;
use crate::job::JobClient;
use std::path::Path;

/// Every service client, built from a single read of the configuration file.
pub struct Client {
    pub catalog: CatalogClient,
    pub job: JobClient,
    pub coastline: CoastlineClient,
    pub algorithm: AlgorithmClient,
}

impl Client {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            catalog: CatalogClient::from_config(config)?,
            job: JobClient::from_config(config)?,
            coastline: CoastlineClient::from_config(config)?,
            algorithm: AlgorithmClient::from_config(config)?,
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::read(path, &[config::DOMAIN, config::AUTH, config::PLANET_KEY])?;
        Self::from_config(&config)
    }
}
