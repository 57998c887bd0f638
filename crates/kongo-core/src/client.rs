use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

/// Handle for the Kong admin API. Construct once and pass by reference;
/// every method issues a single blocking round trip.
pub struct Kongo {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
}

impl Kongo {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        // The admin API is frequently fronted by self-signed certificates,
        // so certificate verification is switched off for every request.
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(true)
            .build()
            .context("building http client")?;

        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid Kong admin url '{base_url}'"))?;

        Ok(Kongo { http, base_url })
    }

    pub(crate) fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("building admin url for '{path}'"))
    }

    /// Reads the gateway version from the admin root document.
    pub async fn version(&self) -> anyhow::Result<String> {
        let url = self.endpoint("/")?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("requesting kong admin root")?;

        let root: serde_json::Value = json(response).await?;

        let version = match root.get("version").and_then(|version| version.as_str()) {
            Some(version) => version,
            None => return Err(anyhow::anyhow!("kong admin root has no version field")),
        };

        Ok(version.to_string())
    }
}

/// Decodes a 2xx response body, turning any other status into an error
/// carrying the status and whatever body Kong returned.
pub(crate) async fn json<T: DeserializeOwned>(response: reqwest::Response) -> anyhow::Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow::anyhow!("kong admin api returned {status}: {body}"));
    }

    response
        .json::<T>()
        .await
        .context("decoding kong admin api response")
}

pub(crate) async fn expect_success(response: reqwest::Response) -> anyhow::Result<()> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow::anyhow!("kong admin api returned {status}: {body}"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_version() {
        let server = MockServer::start();

        let root_mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .json_body(json!({ "version": "2.8.1", "tagline": "Welcome to kong" }));
        });

        let kongo = Kongo::new(&server.base_url()).unwrap();
        let version = kongo.version().await.unwrap();

        root_mock.assert();
        assert_eq!(version, "2.8.1");
    }

    #[tokio::test]
    async fn test_version_missing_field() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).json_body(json!({ "tagline": "Welcome to kong" }));
        });

        let kongo = Kongo::new(&server.base_url()).unwrap();
        let error = kongo.version().await.unwrap_err();

        assert!(error.to_string().contains("no version field"));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(Kongo::new("not a url").is_err());
    }
}
