use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    NotFound = 1,
    TooManyMatches = 2,
    InvalidArguments = 3,
    Io = 4,
    InvalidContent = 5,
    Network = 6,
    Config = 7,
}

impl ExitCode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Success),
            1 => Some(Self::NotFound),
            2 => Some(Self::TooManyMatches),
            3 => Some(Self::InvalidArguments),
            4 => Some(Self::Io),
            5 => Some(Self::InvalidContent),
            6 => Some(Self::Network),
            7 => Some(Self::Config),
            _ => None,
        }
    }
}

/// Point in the document structure where parsing broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Title,
    Description,
    Version,
    Webhooks,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Title => "title",
            Stage::Description => "description",
            Stage::Version => "version",
            Stage::Webhooks => "webhooks",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("not found: {pattern}")]
    NotFound { pattern: &'static str },

    // Reserved; no parser reports ambiguous matches yet.
    #[error("too many matches for {pattern} ({count})")]
    TooManyMatches { pattern: &'static str, count: usize },

    #[error("row {index} does not match the webhook row layout")]
    MalformedRow { index: usize },

    #[error("event name '{event}' has an empty segment")]
    MalformedEvent { event: String },

    #[error("{stage}: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    pub fn at(self, stage: Stage) -> Self {
        ParseError::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// Stage label of the outermost wrapper, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ParseError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::NotFound { .. } => ExitCode::NotFound,
            Self::TooManyMatches { .. } => ExitCode::TooManyMatches,
            Self::MalformedRow { .. } | Self::MalformedEvent { .. } => ExitCode::InvalidContent,
            Self::Stage { source, .. } => source.exit_code(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
