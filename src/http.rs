//! Utility functions for issuing GET requests and consuming their responses
use crate::error::{ClientError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures_util::TryStreamExt;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::{Position, Url};

/// Deadline applied to every request made by the service clients.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2 * 60);

/// Builds the value of a Basic `Authorization` header for `credential`.
///
/// The services expect the credential as a username with an empty password, so a
/// trailing colon is appended when it is missing. Empty credentials yield `None`.
pub fn basic_auth(credential: &str) -> Option<String> {
    if credential.is_empty() {
        return None;
    }
    let encoded = if credential.ends_with(':') {
        STANDARD.encode(credential)
    } else {
        STANDARD.encode(format!("{credential}:"))
    };
    Some(format!("Basic {encoded}"))
}

/// `https://<server>.<domain>`
pub fn service_url(server: &str, domain: &str) -> Result<Url> {
    Ok(Url::parse(&format!("https://{server}.{domain}"))?)
}

/// Appends `segments` to the path of `base`. Each segment is percent-encoded.
pub fn with_segments(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Performs a single GET against `url`. No retries are attempted; a connection
/// failure or an elapsed `timeout` surfaces as `ClientError::Transport`.
pub async fn get(url: &Url, timeout: Duration, credential: Option<&str>) -> Result<Response> {
    // The query string may carry an api key
    tracing::info!("URL: GET {}", &url[..Position::AfterPath]);

    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let mut request = client
        .get(url.clone())
        .header(CONTENT_TYPE, "application/json");
    if let Some(header) = credential.and_then(basic_auth) {
        request = request.header(AUTHORIZATION, header);
    }

    let inner = request.send().await?;
    tracing::debug!(status = inner.status().as_u16(), "Response received");
    Ok(Response { inner })
}

/// GET `url`, require a 200 and return the body as text.
pub async fn get_json(url: &Url, timeout: Duration, credential: Option<&str>) -> Result<String> {
    get(url, timeout, credential)
        .await?
        .expect_status(StatusCode::OK)?
        .text()
        .await
}

#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    pub fn expect_status(self, expected: StatusCode) -> Result<Self> {
        let status = self.inner.status();
        if status != expected {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }
        Ok(self)
    }

    pub async fn text(self) -> Result<String> {
        Ok(self.inner.text().await?)
    }

    pub async fn bytes(self) -> Result<Vec<u8>> {
        Ok(self.inner.bytes().await?.to_vec())
    }

    /// Streams the body into a new file at `dst` and returns the number of bytes
    /// written. An existing `dst` is never overwritten. The body lands in
    /// `<dst>.partial` first and is linked into place once complete, which
    /// fails if `dst` appeared in the meantime.
    pub async fn write_to<P: AsRef<Path>>(self, dst: P) -> Result<u64> {
        let dst = dst.as_ref();
        if dst.exists() {
            return Err(ClientError::Write {
                path: dst.to_path_buf(),
                source: io::Error::new(io::ErrorKind::AlreadyExists, "file already exists"),
            });
        }

        let partial = partial_path(dst);
        let mut file = create_file(&partial).map_err(|source| ClientError::Write {
            path: partial.clone(),
            source,
        })?;

        let copied = copy_body(self.inner, &mut file, &partial).await;
        drop(file);
        let committed = copied.and_then(|byte_count| {
            fs::hard_link(&partial, dst).map_err(|source| ClientError::Write {
                path: dst.to_path_buf(),
                source,
            })?;
            Ok(byte_count)
        });

        let _ = fs::remove_file(&partial);
        committed
    }
}

async fn copy_body(response: reqwest::Response, file: &mut File, path: &Path) -> Result<u64> {
    let write_err = |source| ClientError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut byte_count: u64 = 0;
    let stream = response.bytes_stream();
    futures_util::pin_mut!(stream);
    while let Some(bytes) = stream.try_next().await? {
        file.write_all(&bytes).map_err(write_err)?;
        byte_count += bytes.len() as u64;
    }
    file.flush().map_err(write_err)?;
    Ok(byte_count)
}

fn partial_path(dst: &Path) -> PathBuf {
    let mut name = OsString::from(dst.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

fn create_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}
