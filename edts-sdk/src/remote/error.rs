use super::FailureKind;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("error: {0}")]
    Common(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("request api failed: {code}, message: {message}, url: {request_url}")]
    RequestAPIFailed {
        kind: FailureKind,
        code: String,
        message: String,
        request_url: String,
    },
    #[error("unauthorized: {message}, url: {request_url}")]
    Unauthorized {
        message: String,
        request_url: String,
    },
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl From<edts_sdk_common::Error> for Error {
    fn from(e: edts_sdk_common::Error) -> Self {
        match e {
            edts_sdk_common::Error::Common(msg) => Error::Common(msg),
            e @ edts_sdk_common::Error::Json { .. } => Error::Decode(e.to_string()),
            edts_sdk_common::Error::Reqwest(e) => Error::Reqwest(e),
        }
    }
}
