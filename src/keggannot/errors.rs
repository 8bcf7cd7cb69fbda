use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to read {path}: {source}")]
    InputUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("request to the pathway service failed for {id}: {message}")]
    RemoteService { id: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),
}

impl AnnotationError {
    pub fn remote(id: &str, message: impl ToString) -> AnnotationError {
        AnnotationError::RemoteService {
            id: id.to_owned(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnnotationError>;
