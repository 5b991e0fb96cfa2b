use super::ContentResponse;
use super::SessionTokenPair;
use edts_sdk_common::helper::string_or_number;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;

/// 服务端约定的成功状态
pub const SUCCESS_STATUS: &str = "success";

/// Standard response envelope: `{"status": "...", "message": "...", "data": ...}`
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    #[serde(deserialize_with = "string_or_number")]
    pub status: String,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case(SUCCESS_STATUS)
    }
}

/// Envelope whose `data` is a paged [`ContentResponse`].
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiContentResponse<T> {
    #[serde(deserialize_with = "string_or_number")]
    pub status: String,
    pub message: Option<String>,
    pub data: Option<ContentResponse<T>>,
}

impl<T> ApiContentResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case(SUCCESS_STATUS)
    }

    pub fn content(&self) -> Option<&T> {
        self.data.as_ref().and_then(|d| d.content.as_ref())
    }
}

/// 2xx 响应体的判定结果
#[derive(Debug)]
pub enum BodyVerdict<B, P> {
    Accepted(B),
    /// envelope 的 status 不是成功，`partial` 为 envelope 中残留的数据
    Rejected {
        status: String,
        message: Option<String>,
        partial: Option<P>,
    },
}

/// How a decoded 2xx body is judged.
///
/// Envelopes inspect their `status`; any other body is passed through as a success.
pub trait ResponseBody: Sized {
    /// 失败的 envelope 中携带的残留数据类型
    type Partial;

    fn into_verdict(self) -> BodyVerdict<Self, Self::Partial>;
}

impl<T> ResponseBody for ApiResponse<T> {
    type Partial = T;

    fn into_verdict(self) -> BodyVerdict<Self, T> {
        if self.is_success() {
            return BodyVerdict::Accepted(self);
        }
        BodyVerdict::Rejected {
            status: self.status,
            message: self.message,
            partial: self.data,
        }
    }
}

impl<T> ResponseBody for ApiContentResponse<T> {
    type Partial = T;

    fn into_verdict(self) -> BodyVerdict<Self, T> {
        if self.is_success() {
            return BodyVerdict::Accepted(self);
        }
        // 分页的情况只取 content，不要整个分页结构
        BodyVerdict::Rejected {
            status: self.status,
            message: self.message,
            partial: self.data.and_then(|d| d.content),
        }
    }
}

/// Any JSON body that is not an envelope, returned as is.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Raw<T>(pub T);

impl<T> Raw<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> ResponseBody for Raw<T> {
    type Partial = Infallible;

    fn into_verdict(self) -> BodyVerdict<Self, Infallible> {
        BodyVerdict::Accepted(self)
    }
}

impl<T> ResponseBody for Vec<T> {
    type Partial = Infallible;

    fn into_verdict(self) -> BodyVerdict<Self, Infallible> {
        BodyVerdict::Accepted(self)
    }
}

macro_rules! passthrough_body {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ResponseBody for $ty {
                type Partial = Infallible;

                fn into_verdict(self) -> BodyVerdict<Self, Infallible> {
                    BodyVerdict::Accepted(self)
                }
            }
        )*
    };
}

passthrough_body!(Value, String, SessionTokenPair);
