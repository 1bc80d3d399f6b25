//! Failures a weather fetch can end in.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The provider answered with a non-success status.
    #[error("City not found")]
    CityNotFound,

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Message shown to the user in place of the weather card.
    pub fn user_message(&self) -> String {
        match self {
            Self::CityNotFound => "City not found".to_string(),
            Self::NetworkFailure(_) => "Network error. Check your connection.".to_string(),
            Self::MalformedResponse(_) => {
                "Unexpected response from the weather service".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::NetworkFailure(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages() {
        assert_eq!(FetchError::CityNotFound.user_message(), "City not found");
        assert!(FetchError::NetworkFailure("dns".into()).user_message().contains("Network"));
        assert!(
            FetchError::MalformedResponse("missing field".into())
                .user_message()
                .contains("Unexpected response")
        );
    }

    #[test]
    fn json_errors_become_malformed_response() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(FetchError::from(err), FetchError::MalformedResponse(_)));
    }
}
