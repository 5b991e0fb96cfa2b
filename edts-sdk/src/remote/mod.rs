//! Remote data source: sends a request once and normalizes whatever comes back
//! into an [`ApiResult`].
//!
//! # Example
//! ```no_run
//! use edts_sdk::remote::{ApiResponse, ApiResult, DataSource, SessionTokenPair};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Login<'a> {
//!     phone: &'a str,
//!     password: &'a str,
//! }
//!
//! # async fn run() -> Result<(), edts_sdk::remote::Error> {
//! let source = DataSource::builder()
//!     .base_url("https://api.example.com")
//!     .build()?;
//! let res = source
//!     .login("/auth/login", &Login { phone: "0812", password: "secret" })
//!     .await;
//! match res {
//!     ApiResult::Success(ApiResponse { data: Some(tokens), .. }) => {
//!         let tokens: SessionTokenPair = tokens;
//!         println!("logged in: {tokens:?}");
//!     }
//!     ApiResult::Success(_) => println!("logged in without tokens"),
//!     ApiResult::Unauthorized { message, .. } => println!("rejected: {message:?}"),
//!     ApiResult::Error { code, message, .. } => println!("{code}: {message:?}"),
//! }
//! # Ok(())
//! # }
//! ```
mod classifier;
mod content;
mod data_source;
mod error;
mod messages;
mod response;
mod result;
mod session;
mod transport;

pub use classifier::{classify, classify_fault, get_result};
pub use content::{ContentResponse, Pageable};
pub use data_source::DataSource;
pub use error::Error;
pub use messages::{DefaultMessages, ErrorMessages, IndonesianMessages};
pub use response::{
    ApiContentResponse, ApiResponse, BodyVerdict, Raw, ResponseBody, SUCCESS_STATUS,
};
pub use result::{
    ApiResult, CODE_BODY_NULL, CODE_CONNECTION_ERROR, CODE_SERVICE_UNAVAILABLE,
    CODE_SYSTEM_ERROR, CODE_UNKNOWN, FailureKind,
};
pub use session::SessionTokenPair;
pub use transport::{NetworkFault, RawResponse};
