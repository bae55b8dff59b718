use crate::config::{self, Config};
use crate::download;
use crate::error::{ClientError, Result};
use crate::http;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

const CATALOG_SERVER: &str = "bf-ia-broker";
const KEY_PARAM: &str = "PL_API_KEY";

pub const CATALOG_TIMEOUT: Duration = http::DEFAULT_TIMEOUT;

/// A scene reference of the form `<catalog>:<scene>`,
/// e.g. `landsat:LC80480102017209LGN00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneId {
    pub catalog: String,
    pub scene: String,
}

impl FromStr for SceneId {
    type Err = ClientError;

    fn from_str(id: &str) -> Result<Self> {
        match id.split(':').collect::<Vec<_>>().as_slice() {
            [catalog, scene] if !catalog.is_empty() && !scene.is_empty() => Ok(Self {
                catalog: catalog.to_string(),
                scene: scene.to_string(),
            }),
            _ => Err(ClientError::SceneId(id.to_owned())),
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.catalog, self.scene)
    }
}

#[derive(Deserialize, Debug)]
struct SceneFeature {
    properties: SceneInfo,
}

/// The `properties` of a catalog scene feature.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SceneInfo {
    pub bands: BTreeMap<String, String>,
    pub acquired_date: Option<String>,
    pub cloud_cover: Option<f64>,
    pub file_format: Option<String>,
    pub resolution: Option<f64>,
    pub sensor_name: Option<String>,
}

impl SceneInfo {
    pub fn parse(body: &str) -> Result<Self> {
        let feature: SceneFeature = serde_json::from_str(body)?;
        Ok(feature.properties)
    }
}

pub struct CatalogClient {
    url: Url,
    api_key: String,
}

impl CatalogClient {
    pub fn new(url: Url, api_key: &str) -> Self {
        Self {
            url,
            api_key: api_key.to_owned(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let url = http::service_url(CATALOG_SERVER, config.require(config::DOMAIN)?)?;
        Ok(Self::new(url, config.require(config::PLANET_KEY)?))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::read(path, &[config::DOMAIN, config::PLANET_KEY])?;
        Self::from_config(&config)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = http::with_segments(&self.url, segments)?;
        url.query_pairs_mut().append_pair(KEY_PARAM, &self.api_key);
        Ok(url)
    }

    pub async fn info_for_catalogs(&self) -> Result<String> {
        tracing::info!("Catalog.GetInfoForCatalogs");
        Err(ClientError::Unsupported("catalog: --info for catalogs"))
    }

    /// Returns the discovery document of the catalog `name`, as received.
    pub async fn info_for_catalog(&self, name: &str) -> Result<String> {
        tracing::info!("Catalog.GetInfoForCatalog");
        let url = self.endpoint(&["planet", "discover", name])?;
        http::get_json(&url, CATALOG_TIMEOUT, None).await
    }

    /// Returns the feature describing the scene `id`, as received.
    pub async fn info_for_scene(&self, id: &str) -> Result<String> {
        tracing::info!("Catalog.GetInfoForScene");
        let id: SceneId = id.parse()?;
        let url = self.endpoint(&["planet", id.catalog.as_str(), id.scene.as_str()])?;
        http::get_json(&url, CATALOG_TIMEOUT, None).await
    }

    /// Downloads every band of the scene `id` into `dir`. Returns a map of file
    /// name to file size.
    pub async fn download_scene(&self, id: &str, dir: &Path) -> Result<BTreeMap<String, u64>> {
        tracing::info!("Catalog.DoSceneDownload");
        let body = self.info_for_scene(id).await?;
        let info = SceneInfo::parse(&body)?;

        let total = info.bands.len();
        let mut files = BTreeMap::new();
        for (i, (band, href)) in info.bands.iter().enumerate() {
            let (file_name, size) = download::download_to_dir(href, CATALOG_TIMEOUT, dir).await?;
            tracing::info!("{}/{}: {}", i + 1, total, band);
            files.insert(file_name, size);
        }
        Ok(files)
    }
}
