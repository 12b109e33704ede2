use thiserror::Error;

/// Everything that can go wrong between the form and the task service.
#[derive(Debug, Error)]
pub enum Error {
    #[error("title is required")]
    TitleRequired,

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    #[error("invalid service url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Validation failures are caught before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::TitleRequired | Error::SubmissionInFlight)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(err) if err.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_classified() {
        assert!(Error::TitleRequired.is_validation());
        assert!(Error::SubmissionInFlight.is_validation());

        let status = Error::Status {
            endpoint: "POST /predict".to_string(),
            status: 503,
            body: "model offline".to_string(),
        };
        assert!(!status.is_validation());
        assert!(!status.is_timeout());
        assert_eq!(
            status.to_string(),
            "POST /predict returned status 503: model offline"
        );
    }
}
