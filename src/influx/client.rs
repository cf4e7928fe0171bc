use anyhow::{Context as _, Result, anyhow, bail};
use reqwest::{
    Client, RequestBuilder, Response, StatusCode, Url,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde_json::json;

use crate::influx::{Bucket, Buckets, Destination, LineWriter, Organization, Organizations};

/// Client for the InfluxDB v2 HTTP API.
#[derive(Clone)]
pub struct InfluxClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl InfluxClient {
    pub fn new(base_url: Url, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("invalid InfluxDB URL: {}", self.base_url))?
            .pop_if_empty()
            .extend(["api", "v2", path]);

        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request
            .header(AUTHORIZATION, format!("Token {}", self.token))
            .send()
            .await
            .context("failed to send request to InfluxDB")
    }
}

impl LineWriter for InfluxClient {
    async fn write_lines(&self, org: &Organization, bucket: &Bucket, lines: String) -> Result<()> {
        let request = self
            .http
            .post(self.endpoint("write")?)
            .query(&[
                ("orgID", org.id.as_str()),
                ("bucket", bucket.name.as_str()),
                ("precision", "s"),
            ])
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(lines);

        let response = self.send(request).await?;
        ensure_success(response).await?;

        Ok(())
    }
}

impl Destination for InfluxClient {
    async fn find_organization_by_name(&self, name: &str) -> Result<Organization> {
        let request = self.http.get(self.endpoint("orgs")?).query(&[("org", name)]);

        let response = self.send(request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            bail!("organization not found: {name}");
        }

        let organizations: Organizations = ensure_success(response)
            .await?
            .json()
            .await
            .context("failed to decode organizations response")?;

        organizations
            .orgs
            .into_iter()
            .find(|o| o.name == name)
            .ok_or_else(|| anyhow!("organization not found: {name}"))
    }

    async fn find_bucket_by_name(&self, org: &Organization, name: &str) -> Result<Option<Bucket>> {
        let request = self
            .http
            .get(self.endpoint("buckets")?)
            .query(&[("orgID", org.id.as_str()), ("name", name)]);

        let response = self.send(request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let buckets: Buckets = ensure_success(response)
            .await?
            .json()
            .await
            .context("failed to decode buckets response")?;

        Ok(buckets
            .buckets
            .into_iter()
            .find(|b| b.name == name && b.org_id == org.id))
    }

    async fn create_bucket_with_name(&self, org: &Organization, name: &str) -> Result<Bucket> {
        // No retention rules: points are kept forever.
        let request = self.http.post(self.endpoint("buckets")?).json(&json!({
            "orgID": org.id,
            "name": name,
            "retentionRules": [],
        }));

        let response = self.send(request).await?;

        ensure_success(response)
            .await?
            .json()
            .await
            .context("failed to decode created bucket")
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    bail!("InfluxDB request failed: {url}: {status}: {}", body.trim())
}
