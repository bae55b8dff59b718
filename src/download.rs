use crate::error::{ClientError, Result};
use crate::http;
use reqwest::StatusCode;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Returns the last path segment of `url`, which names the downloaded file.
/// Query strings (e.g. presigned parameters) are not part of the name.
pub fn file_name_from_url(url: &Url) -> Result<&str> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .ok_or_else(|| ClientError::FileName(url.to_string()))
}

/// Downloads the file at `url` into `dir`, named after the url's last path
/// segment. Returns the file name and its size in bytes.
pub async fn download_to_dir(url: &str, timeout: Duration, dir: &Path) -> Result<(String, u64)> {
    let url = Url::parse(url)?;
    let file_name = file_name_from_url(&url)?.to_owned();
    let dst = dir.join(&file_name);

    let byte_count = http::get(&url, timeout, None)
        .await?
        .expect_status(StatusCode::OK)?
        .write_to(&dst)
        .await?;

    tracing::debug!(file = %dst.display(), bytes = byte_count, "Download complete");
    Ok((file_name, byte_count))
}
