use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::engine::{CodeTransformer, TransformError};
use crate::identifier::IdentifierNamer;
use crate::presets::{self, PresetError, ProtectionLevel};
use crate::sink::{timestamped_key, Artifact, ArtifactSink, Locator, StorageError};

pub const MAX_SUBMISSION_BYTES: usize = 5 * 1024 * 1024;
pub const ALLOWED_MEDIA_TYPES: [&str; 2] = ["application/javascript", "text/javascript"];
pub const OUTPUT_MEDIA_TYPE: &str = "application/javascript";

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("only JavaScript files (.js) are allowed, got {0}")]
    UnsupportedMediaType(String),
    #[error("submission of {size} bytes exceeds the {limit} byte limit")]
    Oversized { size: usize, limit: usize },
    #[error("unknown protection level: {0}")]
    UnknownLevel(String),
    #[error("missing anti-forgery token")]
    MissingToken,
}

impl From<PresetError> for ValidationError {
    fn from(err: PresetError) -> Self {
        match err {
            PresetError::UnknownLevel(level) => ValidationError::UnknownLevel(level),
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("transformation failed: {0}")]
    Transform(#[source] TransformError),
    #[error("storage failed: {0}")]
    Storage(#[from] StorageError),
}

impl PipelineError {
    /// Validation reasons are safe to echo; transform and storage detail
    /// stays in the logs and the caller gets a generic message.
    pub fn caller_message(&self) -> String {
        match self {
            PipelineError::Validation(err) => err.to_string(),
            PipelineError::Transform(_) | PipelineError::Storage(_) => {
                "Obfuscation failed. Please try again.".to_string()
            }
        }
    }
}

/// Temporary on-disk representation of an upload. Unlinked when dropped,
/// which covers every pipeline exit path, success and failure alike.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %err, "failed to remove upload temp file");
            }
        }
    }
}

/// Uploads arrive either buffered in memory or spooled to a temp file by
/// the body decoder.
#[derive(Debug)]
pub enum SubmissionBody {
    InMemory(Vec<u8>),
    OnDisk(TempUpload),
}

impl SubmissionBody {
    async fn read(&self) -> std::io::Result<Vec<u8>> {
        match self {
            SubmissionBody::InMemory(bytes) => Ok(bytes.clone()),
            SubmissionBody::OnDisk(upload) => tokio::fs::read(upload.path()).await,
        }
    }
}

#[derive(Debug)]
pub struct Submission {
    pub body: SubmissionBody,
    pub media_type: String,
    pub filename: String,
    pub level: String,
    pub token: String,
}

/// Per-request lifecycle. One terminal success state, one terminal
/// failure state reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Received,
    Validated,
    Transformed,
    Stored,
    Completed,
    Failed,
}

#[derive(Debug)]
pub struct PipelineOutcome {
    pub locator: Locator,
    pub original_filename: String,
    pub state: RequestState,
}

/// Runs one submission through validate, transform, store. Stateless
/// across requests; the engine, sink, and namer are chosen once at
/// construction.
pub struct Orchestrator {
    engine: Arc<dyn CodeTransformer>,
    sink: Arc<dyn ArtifactSink>,
    namer: Arc<dyn IdentifierNamer>,
}

impl Orchestrator {
    pub fn new(
        engine: Arc<dyn CodeTransformer>,
        sink: Arc<dyn ArtifactSink>,
        namer: Arc<dyn IdentifierNamer>,
    ) -> Self {
        Self { engine, sink, namer }
    }

    fn validate(submission: &Submission) -> Result<ProtectionLevel, ValidationError> {
        if !ALLOWED_MEDIA_TYPES.contains(&submission.media_type.as_str()) {
            return Err(ValidationError::UnsupportedMediaType(
                submission.media_type.clone(),
            ));
        }
        let level: ProtectionLevel = submission.level.parse().map_err(ValidationError::from)?;
        if submission.token.trim().is_empty() {
            return Err(ValidationError::MissingToken);
        }
        Ok(level)
    }

    /// The submission is consumed so any temp-file guard it carries is
    /// dropped (and the file unlinked) on every exit from this function.
    pub async fn run(&self, submission: Submission) -> Result<PipelineOutcome, PipelineError> {
        let mut state = RequestState::Received;
        info!(
            ?state,
            filename = %submission.filename,
            level = %submission.level,
            "submission received"
        );

        let level = Self::validate(&submission)?;
        let raw = submission.body.read().await.map_err(StorageError::Io)?;
        if raw.len() > MAX_SUBMISSION_BYTES {
            return Err(ValidationError::Oversized {
                size: raw.len(),
                limit: MAX_SUBMISSION_BYTES,
            }
            .into());
        }
        state = RequestState::Validated;
        debug!(?state, size = raw.len(), "submission validated");

        let source = String::from_utf8_lossy(&raw).into_owned();
        let config = presets::compose(level);
        let transformed = self
            .engine
            .transform(&source, &config, self.namer.as_ref())
            .await
            .map_err(|err| {
                error!(%err, "transformation engine failure");
                PipelineError::Transform(err)
            })?;
        state = RequestState::Transformed;
        debug!(?state, output_bytes = transformed.len(), "source transformed");

        let artifact = Artifact {
            content: transformed.into_bytes(),
            content_type: OUTPUT_MEDIA_TYPE.to_string(),
            suggested_key: format!("obfuscated-{}", timestamped_key(&submission.filename)),
        };
        let locator = self.sink.store(&artifact).await?;
        state = RequestState::Stored;
        debug!(?state, "artifact stored");

        info!(%locator, filename = %submission.filename, "submission completed");
        Ok(PipelineOutcome {
            locator,
            original_filename: submission.filename.clone(),
            state: RequestState::Completed,
        })
    }
}
