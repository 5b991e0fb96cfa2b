#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("error: {0}")]
    Common(String),
    #[error("json decode error: {source}, body: {body}")]
    Json {
        source: serde_json::Error,
        body: String,
    },
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
