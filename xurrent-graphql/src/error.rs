use crate::ErrorEntry;
use std::{error::Error, fmt};

/// The two-tier failure surface of a client call.
///
/// `Api` carries the errors the server put in the response envelope; every
/// other variant is a failure on the way there or back.
#[derive(Debug)]
pub enum ClientError {
    /// The server answered, but the envelope carried errors instead of data.
    Api(Vec<ErrorEntry>),
    /// The request never produced a usable response.
    Network(Box<dyn Error + Send + Sync>),
    /// The response body could not be decoded into the expected shape.
    Decode(Box<dyn Error + Send + Sync>),
    /// The request was rejected before anything was sent.
    InvalidRequest(String),
    /// No client is registered under the requested handle, or none at all.
    NoClient(String)
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClientError::Network(e) => Some(e.as_ref()),
            ClientError::Decode(e) => Some(e.as_ref()),
            _ => None
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Api(errors) => {
                write!(f, "api error")?;
                for error in errors {
                    write!(f, ": {}", error)?;
                }
                Ok(())
            }
            ClientError::Network(e) => write!(f, "network error: {}", e),
            ClientError::Decode(e) => write!(f, "decoding error: {}", e),
            ClientError::InvalidRequest(msg) => write!(f, "invalid request: {}", msg),
            ClientError::NoClient(msg) => write!(f, "no client: {}", msg)
        }
    }
}

#[cfg(test)]
mod test {
    use super::ClientError;
    use crate::ErrorEntry;

    #[test]
    fn api_errors_keep_their_messages() {
        let error = ClientError::Api(vec![ErrorEntry {
            message: "Record not found".to_string(),
            locations: None,
            path: None
        }]);
        assert_eq!(
            error.to_string(),
            "api error: <document>:0:0: Record not found"
        );
    }

    #[test]
    fn invalid_request_displays_reason() {
        let error = ClientError::InvalidRequest("itemsPerRequest must be between 1 and 100".into());
        assert_eq!(
            error.to_string(),
            "invalid request: itemsPerRequest must be between 1 and 100"
        );
    }
}
