use crate::Error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// 把响应体按 UTF-8 读取为字符串，非法字节会被替换
pub fn lossy_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// body 为空，或者只有 JSON 字面量 `null`
pub fn is_absent_body(bytes: &[u8]) -> bool {
    let trimmed = bytes.trim_ascii();
    trimmed.is_empty() || trimmed == b"null"
}

/// 解析 JSON，失败时把原始 body 一起放进错误里方便排查
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(bytes).map_err(|source| Error::Json {
        source,
        body: lossy_text(bytes),
    })
}

/// 一个完整读取过的响应体，body 只能从 `reqwest::Response` 中读取一次
pub async fn buffer_body(resp: reqwest::Response) -> Result<bytes::Bytes, Error> {
    let bytes = resp.bytes().await?;
    log::trace!("buffered response body: {} bytes", bytes.len());
    Ok(bytes)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

/// 有些接口的 `status` 是字符串，有些是数字，统一转为字符串
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => Ok(s),
        StringOrNumber::Number(n) => Ok(n.to_string()),
    }
}

/// 和 [`string_or_number`] 一样，但字段可以缺失或为 `null`，需要配合 `#[serde(default)]`
pub fn option_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|v| match v {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }),
    )
}
