//! Turns an HTTP outcome into an [`ApiResult`].
//!
//! | outcome                          | result                                             |
//! |----------------------------------|----------------------------------------------------|
//! | 2xx, no body                     | `Error("BODYNULL", connection text)`               |
//! | 2xx, envelope `is_success()`     | `Success(body)`                                    |
//! | 2xx, envelope failed             | `Error(status, message, partial data)`             |
//! | 2xx, not an envelope             | `Success(body)`                                    |
//! | 401                              | `Unauthorized(message or raw body)`                |
//! | 400 / 500 with body              | `Error(status or "SystemError", message)`          |
//! | 503                              | `Error("503", service unavailable text)`           |
//! | other status                     | `Error(status code, reason phrase)`                |
//! | connect / dns / timeout / bad json | `Error("ConnectionError", connection text)`      |
//! | anything else                    | `Error("999", system error text)`                  |

use super::result::{
    CODE_BODY_NULL, CODE_CONNECTION_ERROR, CODE_SERVICE_UNAVAILABLE, CODE_SYSTEM_ERROR,
    CODE_UNKNOWN,
};
use super::{
    ApiResult, BodyVerdict, ErrorMessages, FailureKind, NetworkFault, RawResponse, ResponseBody,
};
use edts_sdk_common::helper::{
    decode_json, is_absent_body, lossy_text, option_string_or_number,
};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::future::Future;

/// 非 2xx 时的 error body，`status` 和 `message` 都可能缺失或为 `null`，`data` 不需要
#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    #[serde(default, deserialize_with = "option_string_or_number")]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// 执行一次请求并归类结果，不会重试，也不会返回 `Err`
///
/// `request_url` 用于请求没有拿到响应时标记失败的请求
pub async fn get_result<B, F, Fut>(
    request_url: &str,
    messages: &dyn ErrorMessages,
    call: F,
) -> ApiResult<B>
where
    B: ResponseBody + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<RawResponse, NetworkFault>>,
{
    let res = match call().await {
        Ok(raw) => classify(raw, messages),
        Err(fault) => classify_fault(fault, request_url, messages),
    };
    match &res {
        ApiResult::Success(_) => log::debug!("request succeeded: {request_url}"),
        ApiResult::Error { code, message, .. } => {
            log::debug!("request failed: {request_url}, code: {code}, message: {message:?}")
        }
        ApiResult::Unauthorized { message, .. } => {
            log::debug!("request unauthorized: {request_url}, message: {message:?}")
        }
    }
    res
}

/// 对已经完整读取的响应进行归类
pub fn classify<B>(raw: RawResponse, messages: &dyn ErrorMessages) -> ApiResult<B>
where
    B: ResponseBody + DeserializeOwned,
{
    let status = raw.status;
    if status.is_success() {
        return classify_success(raw, messages);
    }

    match status.as_u16() {
        401 => classify_unauthorized(raw),
        400 | 500 if raw.body().is_some() => classify_envelope_error(raw),
        503 => ApiResult::error(
            FailureKind::ServiceUnavailable,
            CODE_SERVICE_UNAVAILABLE,
            Some(messages.http503_text()),
            raw.url,
        ),
        _ => {
            let reason = raw.reason();
            let message = (!reason.is_empty()).then(|| reason.to_owned());
            ApiResult::error(
                FailureKind::HttpStatus,
                status.as_u16().to_string(),
                message,
                raw.url,
            )
        }
    }
}

/// 没有拿到响应时的归类
pub fn classify_fault<B: ResponseBody>(
    fault: NetworkFault,
    request_url: &str,
    messages: &dyn ErrorMessages,
) -> ApiResult<B> {
    log::warn!("request to {request_url} failed: {fault}");
    if fault.is_connection_error() {
        ApiResult::error(
            FailureKind::ConnectionFailure,
            CODE_CONNECTION_ERROR,
            Some(messages.connection_error_text()),
            request_url,
        )
    } else {
        ApiResult::error(
            FailureKind::UnknownFailure,
            CODE_UNKNOWN,
            Some(messages.system_error_text(fault.detail())),
            request_url,
        )
    }
}

fn classify_success<B>(raw: RawResponse, messages: &dyn ErrorMessages) -> ApiResult<B>
where
    B: ResponseBody + DeserializeOwned,
{
    if is_absent_body(&raw.body) {
        return ApiResult::error(
            FailureKind::BodyMissing,
            CODE_BODY_NULL,
            Some(messages.connection_error_text()),
            raw.url,
        );
    }

    let body: B = match decode_json(&raw.body) {
        Ok(b) => b,
        Err(e) => return classify_fault(e.into(), &raw.url, messages),
    };

    match body.into_verdict() {
        BodyVerdict::Accepted(b) => ApiResult::Success(b),
        BodyVerdict::Rejected {
            status,
            message,
            partial,
        } => ApiResult::Error {
            kind: FailureKind::ServerEnvelopeError,
            code: status,
            message,
            partial_data: partial,
            request_url: raw.url,
        },
    }
}

fn classify_unauthorized<B: ResponseBody>(raw: RawResponse) -> ApiResult<B> {
    let message = raw.body().map(|body| match decode_envelope(body) {
        Ok(envelope) => envelope.message,
        Err(text) => Some(text),
    });
    ApiResult::Unauthorized {
        message: message.flatten(),
        request_url: raw.url,
    }
}

// 400/500 的 body 解析失败时和 401 一样回退到原始文本
fn classify_envelope_error<B: ResponseBody>(raw: RawResponse) -> ApiResult<B> {
    let is_500 = raw.status == StatusCode::INTERNAL_SERVER_ERROR;
    let kind = if is_500 {
        FailureKind::SystemError
    } else {
        FailureKind::ServerEnvelopeError
    };

    let (status, message) = match decode_envelope(&raw.body) {
        Ok(envelope) => (envelope.status, envelope.message),
        Err(text) => (None, Some(text)),
    };
    let status = status.unwrap_or_else(|| raw.status.as_u16().to_string());
    let code = if is_500 {
        CODE_SYSTEM_ERROR.to_owned()
    } else {
        status
    };
    ApiResult::error(kind, code, message, raw.url)
}

/// 解析失败时返回原始文本
fn decode_envelope(body: &[u8]) -> Result<ErrorEnvelope, String> {
    decode_json(body).map_err(|e| {
        log::warn!("failed to decode error envelope: {e}");
        lossy_text(body)
    })
}
