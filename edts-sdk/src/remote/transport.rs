use bytes::Bytes;
use edts_sdk_common::helper::buffer_body;
use reqwest::StatusCode;
use serde_json::error::Category;
use std::error::Error as StdError;
use std::fmt;

/// 传输层失败的类型，由发送方显式返回而不是抛出
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkFault {
    ConnectFailure(String),
    NameResolutionFailure(String),
    Timeout,
    MalformedPayload(String),
    Other(String),
}

impl NetworkFault {
    /// 这几类都提示用户检查网络，其它的算系统错误
    pub fn is_connection_error(&self) -> bool {
        !matches!(self, NetworkFault::Other(_))
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            NetworkFault::ConnectFailure(s)
            | NetworkFault::NameResolutionFailure(s)
            | NetworkFault::MalformedPayload(s)
            | NetworkFault::Other(s) => Some(s.as_str()),
            NetworkFault::Timeout => None,
        }
    }
}

impl fmt::Display for NetworkFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkFault::ConnectFailure(s) => write!(f, "connect failed: {s}"),
            NetworkFault::NameResolutionFailure(s) => write!(f, "name resolution failed: {s}"),
            NetworkFault::Timeout => write!(f, "request timed out"),
            NetworkFault::MalformedPayload(s) => write!(f, "malformed payload: {s}"),
            NetworkFault::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<reqwest::Error> for NetworkFault {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            NetworkFault::Timeout
        } else if e.is_connect() {
            if mentions_dns(&e) {
                NetworkFault::NameResolutionFailure(e.to_string())
            } else {
                NetworkFault::ConnectFailure(e.to_string())
            }
        } else if e.is_decode() {
            NetworkFault::MalformedPayload(e.to_string())
        } else {
            NetworkFault::Other(e.to_string())
        }
    }
}

// 只有 JSON 本身不合法才算响应格式错误，结构对不上的按其它错误处理
impl From<serde_json::Error> for NetworkFault {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            Category::Syntax | Category::Eof | Category::Io => {
                NetworkFault::MalformedPayload(e.to_string())
            }
            Category::Data => NetworkFault::Other(e.to_string()),
        }
    }
}

impl From<edts_sdk_common::Error> for NetworkFault {
    fn from(e: edts_sdk_common::Error) -> Self {
        match e {
            edts_sdk_common::Error::Reqwest(e) => e.into(),
            edts_sdk_common::Error::Json { source, .. } => source.into(),
            edts_sdk_common::Error::Common(msg) => NetworkFault::Other(msg),
        }
    }
}

// reqwest 没有单独的 dns 错误类型，只能沿着 source 链找
fn mentions_dns(e: &(dyn StdError + 'static)) -> bool {
    let mut source = Some(e);
    while let Some(err) = source {
        if err.to_string().to_ascii_lowercase().contains("dns") {
            return true;
        }
        source = err.source();
    }
    false
}

/// A fully buffered HTTP response.
///
/// The body stream of a `reqwest::Response` can only be read once, so it is
/// drained here and every later inspection works on the buffered bytes.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub url: String,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    pub async fn from_reqwest(resp: reqwest::Response) -> Result<Self, NetworkFault> {
        let status = resp.status();
        let url = resp.url().to_string();
        let body = buffer_body(resp).await?;
        Ok(Self { status, url, body })
    }

    /// HTTP reason phrase, e.g. `Not Found`
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or_default()
    }

    /// 空 body 视为没有 body
    pub fn body(&self) -> Option<&[u8]> {
        if self.body.is_empty() {
            None
        } else {
            Some(&self.body)
        }
    }
}
