use crate::config::{self, Config};
use crate::error::Result;
use crate::http;
use crate::job::API_SERVER;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use url::Url;

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Algorithm {
    #[serde(alias = "Description")]
    pub description: String,
    #[serde(alias = "Interface")]
    pub interface: String,
    #[serde(alias = "MaxCloudCover")]
    pub max_cloud_cover: i64,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "ServiceId")]
    pub service_id: String,
    #[serde(alias = "Version")]
    pub version: String,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[algorithm {}]", self.service_id)
    }
}

#[derive(Deserialize, Debug)]
struct AlgorithmList {
    #[serde(alias = "Algorithms")]
    algorithms: Vec<Algorithm>,
}

#[derive(Deserialize, Debug)]
struct AlgorithmEnvelope {
    #[serde(alias = "Algorithm")]
    algorithm: Algorithm,
}

pub struct AlgorithmClient {
    url: Url,
    auth: String,
}

impl AlgorithmClient {
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

    pub async fn info_for_all(&self) -> Result<Vec<Algorithm>> {
        tracing::info!("Algorithm.GetInfoForAll");
        let url = http::with_segments(&self.url, &["v0", "algorithm"])?;
        let body = http::get_json(&url, http::DEFAULT_TIMEOUT, Some(&self.auth)).await?;
        let list: AlgorithmList = serde_json::from_str(&body)?;
        Ok(list.algorithms)
    }

    pub async fn info_for_one(&self, id: &str) -> Result<Algorithm> {
        tracing::info!("Algorithm.GetInfoForOne");
        let url = http::with_segments(&self.url, &["v0", "algorithm", id])?;
        let body = http::get_json(&url, http::DEFAULT_TIMEOUT, Some(&self.auth)).await?;
        let envelope: AlgorithmEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mock_client(server: &MockServer) -> AlgorithmClient {
        AlgorithmClient::new(Url::parse(&server.uri()).unwrap(), "secret")
    }

    fn shoreline() -> serde_json::Value {
        serde_json::json!({
            "description": "Shoreline extraction",
            "interface": "pzsvc-ossim",
            "max_cloud_cover": 10,
            "name": "BF_Algo_NDWI_PY",
            "service_id": "a9c7ef0d-1fdb-4a67-9c2f-3c4e8d3b0b7a",
            "version": "0.0"
        })
    }

    #[test]
    fn test_display() {
        let algorithm = Algorithm {
            service_id: "abc".to_string(),
            ..Default::default()
        };
        assert_eq!(algorithm.to_string(), "[algorithm abc]");
    }

    #[test]
    fn test_capitalised_keys() {
        let body = r#"{
            "Algorithms": [{
                "Description": "Shoreline extraction",
                "Interface": "pzsvc-ossim",
                "MaxCloudCover": 10,
                "Name": "BF_Algo_NDWI_PY",
                "ServiceId": "abc",
                "Version": "0.0"
            }]
        }"#;
        let list: AlgorithmList = serde_json::from_str(body).unwrap();
        let algorithm = &list.algorithms[0];
        assert_eq!(algorithm.description, "Shoreline extraction");
        assert_eq!(algorithm.max_cloud_cover, 10);
        assert_eq!(algorithm.to_string(), "[algorithm abc]");
    }

    #[tokio::test]
    async fn test_info_for_all() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/algorithm"))
            .and(header("Authorization", "Basic c2VjcmV0Og=="))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"algorithms": [shoreline(), {"service_id": "b"}]})),
            )
            .mount(&server)
            .await;

        let algorithms = mock_client(&server).info_for_all().await.unwrap();
        assert_eq!(algorithms.len(), 2);
        assert_eq!(algorithms[0].name, "BF_Algo_NDWI_PY");
        assert_eq!(algorithms[0].max_cloud_cover, 10);
        assert_eq!(algorithms[1].to_string(), "[algorithm b]");
    }

    #[tokio::test]
    async fn test_info_for_one() {
        let server = MockServer::start().await;
        let id = "a9c7ef0d-1fdb-4a67-9c2f-3c4e8d3b0b7a";
        Mock::given(method("GET"))
            .and(path(format!("/v0/algorithm/{id}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"algorithm": shoreline()})),
            )
            .mount(&server)
            .await;

        let algorithm = mock_client(&server).info_for_one(id).await.unwrap();
        assert_eq!(algorithm.service_id, id);
        assert_eq!(algorithm.interface, "pzsvc-ossim");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = mock_client(&server).info_for_all().await.unwrap_err();
        assert!(matches!(err, ClientError::Body(_)));
    }
}
