use std::error::Error;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type TransformError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // missing field, wrong type or wrong position arity
    #[error("{}`{field}` {problem}", feature_prefix(*feature))]
    Structure {
        feature: Option<usize>,
        field: String,
        problem: String,
    },

    #[error("cannot build transform from {from} to {to}: {source}")]
    Projection {
        from: String,
        to: String,
        #[source]
        source: TransformError,
    },

    #[error("cannot transform ({x}, {y}): {source}")]
    Transform {
        x: f64,
        y: f64,
        #[source]
        source: TransformError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn feature_prefix(feature: Option<usize>) -> String {
    match feature {
        Some(index) => format!("feature {}: ", index),
        None => String::new(),
    }
}

impl ConvertError {
    pub(crate) fn structure(field: impl Into<String>, problem: impl Into<String>) -> Self {
        ConvertError::Structure {
            feature: None,
            field: field.into(),
            problem: problem.into(),
        }
    }

    // structural errors are raised below the feature loop, which knows the index
    pub(crate) fn in_feature(self, index: usize) -> Self {
        match self {
            ConvertError::Structure { feature: None, field, problem } => ConvertError::Structure {
                feature: Some(index),
                field,
                problem,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
