use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("upload error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("storage rejected key: {0}")]
    RejectedKey(String),
}

/// Transformed output plus the metadata a sink needs to persist it.
/// Write-once: created on a successful transform, never mutated.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub content: Vec<u8>,
    pub content_type: String,
    pub suggested_key: String,
}

/// Opaque reference (relative path or absolute URL) by which the caller
/// retrieves a stored artifact. Valid as long as the sink retains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator(String);

impl Locator {
    pub fn new(locator: impl Into<String>) -> Self {
        Locator(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable storage for artifacts. The orchestrator picks one
/// implementation at construction and is otherwise unaware of which.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn store(&self, artifact: &Artifact) -> Result<Locator, StorageError>;
}

static LAST_ISSUED_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Millisecond timestamp that never repeats within the process, so
/// concurrent uploads of the same filename still get distinct keys.
fn monotonic_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let prev = LAST_ISSUED_MILLIS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(last.max(now - 1) + 1)
        })
        .unwrap_or(now - 1);
    prev.max(now - 1) + 1
}

/// Strip everything a filesystem or URL path could misread; an empty
/// result falls back to a fixed name.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    if cleaned.is_empty() {
        "upload.js".to_string()
    } else {
        cleaned
    }
}

pub fn timestamped_key(filename: &str) -> String {
    format!("{}-{}", monotonic_millis(), sanitize_filename(filename))
}

/// Writes artifacts under a fixed output directory and hands back the
/// file path as the locator. No expiry; files stay until removed
/// externally.
pub struct LocalSink {
    output_dir: PathBuf,
}

impl LocalSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }
}

#[async_trait]
impl ArtifactSink for LocalSink {
    async fn store(&self, artifact: &Artifact) -> Result<Locator, StorageError> {
        if artifact.suggested_key.is_empty()
            || artifact.suggested_key.contains(|c| c == '/' || c == '\\')
        {
            return Err(StorageError::RejectedKey(artifact.suggested_key.clone()));
        }
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(&artifact.suggested_key);
        tokio::fs::write(&path, &artifact.content).await?;
        info!(key = %artifact.suggested_key, "artifact written to local sink");
        Ok(Locator(path.to_string_lossy().into_owned()))
    }
}

const REMOTE_EXTENSION: &str = ".js";

/// Uploads artifacts as single objects to a remote bucket and returns the
/// object's public URL. The upload is atomic from the caller's view: a
/// non-success status exposes no locator.
pub struct RemoteSink {
    client: Client,
    endpoint: String,
    bucket: String,
}

impl RemoteSink {
    pub fn new(endpoint: String, bucket: String) -> Self {
        Self { client: Client::new(), endpoint, bucket }
    }
}

#[async_trait]
impl ArtifactSink for RemoteSink {
    async fn store(&self, artifact: &Artifact) -> Result<Locator, StorageError> {
        let key = format!("{}{}", monotonic_millis(), REMOTE_EXTENSION);
        let url = format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.bucket,
            key
        );
        self.client
            .put(&url)
            .header(CONTENT_TYPE, &artifact.content_type)
            .body(artifact.content.clone())
            .send()
            .await?
            .error_for_status()?;
        info!(%key, bucket = %self.bucket, "artifact uploaded to remote sink");
        Ok(Locator(url))
    }
}
