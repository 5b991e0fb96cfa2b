use super::{Error, ResponseBody};

pub const CODE_BODY_NULL: &str = "BODYNULL";
pub const CODE_SYSTEM_ERROR: &str = "SystemError";
pub const CODE_SERVICE_UNAVAILABLE: &str = "503";
pub const CODE_CONNECTION_ERROR: &str = "ConnectionError";
pub const CODE_UNKNOWN: &str = "999";

/// 失败的分类，`code` 仍保留服务端或约定的字符串
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 2xx 但是没有 body
    BodyMissing,
    /// envelope 的 status 不是成功，或者 400 返回的 envelope
    ServerEnvelopeError,
    /// 500
    SystemError,
    /// 503
    ServiceUnavailable,
    /// 连接失败、域名解析失败、超时、响应格式错误
    ConnectionFailure,
    /// 其它无法归类的异常，code 为 `999`
    UnknownFailure,
    /// 其它非 2xx 状态码，code 为状态码本身
    HttpStatus,
}

/// Normalized outcome of a single API call.
///
/// Exactly one variant is populated. `partial_data` is only set when a 2xx
/// envelope reported failure but still carried data.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<B: ResponseBody> {
    Success(B),
    Error {
        kind: FailureKind,
        code: String,
        message: Option<String>,
        partial_data: Option<B::Partial>,
        request_url: String,
    },
    Unauthorized {
        message: Option<String>,
        request_url: String,
    },
}

impl<B: ResponseBody> ApiResult<B> {
    pub(crate) fn error(
        kind: FailureKind,
        code: impl Into<String>,
        message: Option<String>,
        request_url: impl Into<String>,
    ) -> Self {
        ApiResult::Error {
            kind,
            code: code.into(),
            message,
            partial_data: None,
            request_url: request_url.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiResult::Unauthorized { .. })
    }

    pub fn success(self) -> Option<B> {
        match self {
            ApiResult::Success(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_success(&self) -> Option<&B> {
        match self {
            ApiResult::Success(b) => Some(b),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            ApiResult::Error { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            ApiResult::Error { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ApiResult::Success(_) => None,
            ApiResult::Error { message, .. } | ApiResult::Unauthorized { message, .. } => {
                message.as_deref()
            }
        }
    }

    /// 成功的结果不记录 url
    pub fn request_url(&self) -> Option<&str> {
        match self {
            ApiResult::Success(_) => None,
            ApiResult::Error { request_url, .. } | ApiResult::Unauthorized { request_url, .. } => {
                Some(request_url)
            }
        }
    }

    pub fn map<C, F>(self, f: F) -> ApiResult<C>
    where
        C: ResponseBody<Partial = B::Partial>,
        F: FnOnce(B) -> C,
    {
        match self {
            ApiResult::Success(b) => ApiResult::Success(f(b)),
            ApiResult::Error {
                kind,
                code,
                message,
                partial_data,
                request_url,
            } => ApiResult::Error {
                kind,
                code,
                message,
                partial_data,
                request_url,
            },
            ApiResult::Unauthorized {
                message,
                request_url,
            } => ApiResult::Unauthorized {
                message,
                request_url,
            },
        }
    }

    /// 转为标准的 `Result`，partial data 会被丢弃
    pub fn into_result(self) -> Result<B, Error> {
        match self {
            ApiResult::Success(b) => Ok(b),
            ApiResult::Error {
                kind,
                code,
                message,
                request_url,
                ..
            } => Err(Error::RequestAPIFailed {
                kind,
                code,
                message: message.unwrap_or_default(),
                request_url,
            }),
            ApiResult::Unauthorized {
                message,
                request_url,
            } => Err(Error::Unauthorized {
                message: message.unwrap_or_default(),
                request_url,
            }),
        }
    }
}
