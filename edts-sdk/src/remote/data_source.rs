use super::classifier::{classify_fault, get_result};
use super::{
    ApiResponse, ApiResult, DefaultMessages, Error, ErrorMessages, NetworkFault, RawResponse,
    ResponseBody, SessionTokenPair,
};
use bon::bon;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

//region client
pub struct DataSource {
    http_client: reqwest::Client,
    base_url: String,
    messages: Arc<dyn ErrorMessages>,
}

#[bon]
impl DataSource {
    /// 传入 `http_client` 时，`timeout` 和 `access_token` 不再生效
    #[builder(on(String, into))]
    pub fn new(
        base_url: String,
        messages: Option<Arc<dyn ErrorMessages>>,
        timeout: Option<Duration>,
        access_token: Option<String>,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, Error> {
        let http_client = match http_client {
            Some(c) => c,
            None => {
                let mut header_map = HeaderMap::new();
                if let Some(token) = access_token {
                    let mut auth_val = HeaderValue::from_str(&format!("Bearer {token}"))
                        .map_err(|e| Error::Common(format!("invalid access token: {e}")))?;
                    auth_val.set_sensitive(true);
                    header_map.insert(AUTHORIZATION, auth_val);
                }

                let mut builder = reqwest::Client::builder().default_headers(header_map);
                if let Some(t) = timeout {
                    builder = builder.timeout(t);
                }
                builder.build()?
            }
        };

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            messages: messages.unwrap_or_else(|| Arc::new(DefaultMessages)),
        })
    }

    /// 完整 url 原样返回，否则拼接到 `base_url` 后面
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client.request(method, self.url(path))
    }

    pub async fn get<B>(&self, path: &str) -> ApiResult<B>
    where
        B: ResponseBody + DeserializeOwned,
    {
        let url = self.url(path);
        self.send(&url, self.http_client.get(&url)).await
    }

    pub async fn post_json<B, P>(&self, path: &str, payload: &P) -> ApiResult<B>
    where
        B: ResponseBody + DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let url = self.url(path);
        self.send(&url, self.http_client.post(&url).json(payload)).await
    }

    /// 登录接口，data 中是 `accessToken` 和 `refreshToken`
    pub async fn login<P>(
        &self,
        path: &str,
        credentials: &P,
    ) -> ApiResult<ApiResponse<SessionTokenPair>>
    where
        P: Serialize + ?Sized,
    {
        self.post_json(path, credentials).await
    }

    /// 发送自行构建的请求
    pub async fn execute<B>(&self, request: reqwest::Request) -> ApiResult<B>
    where
        B: ResponseBody + DeserializeOwned,
    {
        let url = request.url().to_string();
        get_result(&url, self.messages.as_ref(), || fetch(&self.http_client, request)).await
    }

    async fn send<B>(&self, url: &str, builder: RequestBuilder) -> ApiResult<B>
    where
        B: ResponseBody + DeserializeOwned,
    {
        match builder.build() {
            Ok(request) => self.execute(request).await,
            Err(e) => classify_fault(e.into(), url, self.messages.as_ref()),
        }
    }
}
//endregion

async fn fetch(
    http_client: &reqwest::Client,
    request: reqwest::Request,
) -> Result<RawResponse, NetworkFault> {
    log::debug!("{} {}", request.method(), request.url());
    let resp = http_client.execute(request).await?;
    RawResponse::from_reqwest(resp).await
}
