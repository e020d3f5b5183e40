use std::io::{self, Read};
use std::path::PathBuf;

use paypalc_config::SourceSettings;
use paypalc_core::ExitCode;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, info};

/// Where the event catalog HTML comes from.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    Remote(String),
    File(PathBuf),
    Stdin,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

impl SourceError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Read { .. } | Self::Stdin(_) => ExitCode::Io,
            Self::Request { .. } | Self::Status { .. } => ExitCode::Network,
        }
    }
}

impl DocumentSource {
    /// A local path wins over the configured URL; `-` means stdin.
    pub fn select(local: Option<PathBuf>, url: &str) -> Self {
        match local {
            Some(path) if path.as_os_str() == "-" => DocumentSource::Stdin,
            Some(path) => DocumentSource::File(path),
            None => DocumentSource::Remote(url.to_string()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DocumentSource::Remote(url) => url.clone(),
            DocumentSource::File(path) => path.display().to_string(),
            DocumentSource::Stdin => "<stdin>".to_string(),
        }
    }

    pub fn load(&self, settings: &SourceSettings) -> Result<String, SourceError> {
        info!(source = %self.describe(), "loading event catalog");
        let text = match self {
            DocumentSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| SourceError::Read {
                    path: path.clone(),
                    source,
                })?
            }
            DocumentSource::Stdin => {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(SourceError::Stdin)?;
                buffer
            }
            DocumentSource::Remote(url) => fetch(url, settings)?,
        };
        info!(bytes = text.len(), "read event catalog");
        Ok(text)
    }
}

fn fetch(url: &str, settings: &SourceSettings) -> Result<String, SourceError> {
    let request_error = |source| SourceError::Request {
        url: url.to_string(),
        source,
    };

    let client = Client::builder()
        .timeout(settings.timeout)
        .user_agent(settings.user_agent.as_str())
        .build()
        .map_err(request_error)?;

    let response = client.get(url).send().map_err(request_error)?;
    let status = response.status();
    debug!(%status, "catalog response");
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().map_err(request_error)
}
