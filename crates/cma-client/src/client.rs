use cma_core::{ApiError, ErrorResponse};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use crate::error::{CmaClientError, Result};
use crate::types::{
    Asset, Collection, CollectionQuery, ContentType, Entry, Environment, Space,
};

/// Default management API base URL
const DEFAULT_BASE_URL: &str = "https://api.contentful.com";

/// Content type for management API write requests
const MANAGEMENT_CONTENT_TYPE: &str = "application/vnd.contentful.management.v1+json";

/// Header carrying the resource version for optimistic concurrency
const VERSION_HEADER: &str = "X-Contentful-Version";

/// Header selecting the content type when creating entries
const CONTENT_TYPE_HEADER: &str = "X-Contentful-Content-Type";

/// Typed client for the Content Management API
///
/// Every non-2xx response is classified into an [`ApiError`] and surfaced as
/// [`CmaClientError::Api`]; callers never see a raw status code or an
/// unexplained body.
#[derive(Debug, Clone)]
pub struct CmaClient {
    base_url: Url,
    http: reqwest::Client,
    token: SecretString,
}

impl CmaClient {
    /// Create a client authenticated with a management token
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never
    /// happen).
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("valid default URL"),
            http: reqwest::Client::new(),
            token: SecretString::from(token),
        }
    }

    /// Point the client at a different base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Url::parse(base_url)
            .map_err(|e| CmaClientError::Config(format!("invalid base URL: {e}")))?;
        Ok(self)
    }

    // -- Spaces --

    /// List all spaces the token can access
    pub async fn spaces(&self) -> Result<Collection<Space>> {
        self.get_json("/spaces", &[]).await
    }

    /// Fetch a single space
    pub async fn space(&self, space_id: &str) -> Result<Space> {
        self.get_json(&format!("/spaces/{space_id}"), &[]).await
    }

    /// Delete a space
    pub async fn delete_space(&self, space_id: &str) -> Result<()> {
        let url = self.make_url(&format!("/spaces/{space_id}"));
        let response = self.request(reqwest::Method::DELETE, &url).send().await?;
        handle_error(response).await?;
        Ok(())
    }

    // -- Environments --

    /// Fetch an environment within a space
    pub async fn environment(&self, space_id: &str, environment_id: &str) -> Result<Environment> {
        self.get_json(
            &format!("/spaces/{space_id}/environments/{environment_id}"),
            &[],
        )
        .await
    }

    // -- Content types --

    /// List the content types of an environment
    pub async fn content_types(
        &self,
        space_id: &str,
        environment_id: &str,
    ) -> Result<Collection<ContentType>> {
        self.get_json(&content_path(space_id, environment_id, "content_types"), &[])
            .await
    }

    /// Fetch a single content type
    pub async fn content_type(
        &self,
        space_id: &str,
        environment_id: &str,
        content_type_id: &str,
    ) -> Result<ContentType> {
        let path = content_path(space_id, environment_id, "content_types");
        self.get_json(&format!("{path}/{content_type_id}"), &[]).await
    }

    // -- Entries --

    /// List entries, honoring pagination and content-type filters
    pub async fn entries(
        &self,
        space_id: &str,
        environment_id: &str,
        query: &CollectionQuery,
    ) -> Result<Collection<Entry>> {
        self.get_json(
            &content_path(space_id, environment_id, "entries"),
            &query.to_pairs(),
        )
        .await
    }

    /// Fetch a single entry
    pub async fn entry(
        &self,
        space_id: &str,
        environment_id: &str,
        entry_id: &str,
    ) -> Result<Entry> {
        let path = content_path(space_id, environment_id, "entries");
        self.get_json(&format!("{path}/{entry_id}"), &[]).await
    }

    /// Create an entry with a server-generated id
    pub async fn create_entry(
        &self,
        space_id: &str,
        environment_id: &str,
        content_type_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<Entry> {
        let url = self.make_url(&content_path(space_id, environment_id, "entries"));
        let builder = self
            .request(reqwest::Method::POST, &url)
            .header(CONTENT_TYPE_HEADER, content_type_id)
            .json(&serde_json::json!({ "fields": fields }));

        send_json(builder).await
    }

    /// Update an entry, sending its current version for conflict detection
    pub async fn update_entry(
        &self,
        space_id: &str,
        environment_id: &str,
        entry_id: &str,
        version: u32,
        fields: &Map<String, Value>,
    ) -> Result<Entry> {
        let path = content_path(space_id, environment_id, "entries");
        let url = self.make_url(&format!("{path}/{entry_id}"));
        let builder = self
            .request(reqwest::Method::PUT, &url)
            .header(VERSION_HEADER, version)
            .json(&serde_json::json!({ "fields": fields }));

        send_json(builder).await
    }

    /// Delete an entry
    pub async fn delete_entry(
        &self,
        space_id: &str,
        environment_id: &str,
        entry_id: &str,
    ) -> Result<()> {
        let path = content_path(space_id, environment_id, "entries");
        let url = self.make_url(&format!("{path}/{entry_id}"));
        let response = self.request(reqwest::Method::DELETE, &url).send().await?;
        handle_error(response).await?;
        Ok(())
    }

    /// Publish an entry at the given version
    pub async fn publish_entry(
        &self,
        space_id: &str,
        environment_id: &str,
        entry_id: &str,
        version: u32,
    ) -> Result<Entry> {
        let path = content_path(space_id, environment_id, "entries");
        let url = self.make_url(&format!("{path}/{entry_id}/published"));
        let builder = self
            .request(reqwest::Method::PUT, &url)
            .header(VERSION_HEADER, version);

        send_json(builder).await
    }

    /// Unpublish an entry
    pub async fn unpublish_entry(
        &self,
        space_id: &str,
        environment_id: &str,
        entry_id: &str,
    ) -> Result<Entry> {
        let path = content_path(space_id, environment_id, "entries");
        let url = self.make_url(&format!("{path}/{entry_id}/published"));
        let builder = self.request(reqwest::Method::DELETE, &url);

        send_json(builder).await
    }

    /// Archive an entry at the given version
    pub async fn archive_entry(
        &self,
        space_id: &str,
        environment_id: &str,
        entry_id: &str,
        version: u32,
    ) -> Result<Entry> {
        let path = content_path(space_id, environment_id, "entries");
        let url = self.make_url(&format!("{path}/{entry_id}/archived"));
        let builder = self
            .request(reqwest::Method::PUT, &url)
            .header(VERSION_HEADER, version);

        send_json(builder).await
    }

    /// Unarchive an entry
    pub async fn unarchive_entry(
        &self,
        space_id: &str,
        environment_id: &str,
        entry_id: &str,
    ) -> Result<Entry> {
        let path = content_path(space_id, environment_id, "entries");
        let url = self.make_url(&format!("{path}/{entry_id}/archived"));
        let builder = self.request(reqwest::Method::DELETE, &url);

        send_json(builder).await
    }

    // -- Assets --

    /// List assets, honoring pagination options
    pub async fn assets(
        &self,
        space_id: &str,
        environment_id: &str,
        query: &CollectionQuery,
    ) -> Result<Collection<Asset>> {
        self.get_json(
            &content_path(space_id, environment_id, "assets"),
            &query.to_pairs(),
        )
        .await
    }

    /// Fetch a single asset
    pub async fn asset(
        &self,
        space_id: &str,
        environment_id: &str,
        asset_id: &str,
    ) -> Result<Asset> {
        let path = content_path(space_id, environment_id, "assets");
        self.get_json(&format!("{path}/{asset_id}"), &[]).await
    }

    /// Publish an asset at the given version
    pub async fn publish_asset(
        &self,
        space_id: &str,
        environment_id: &str,
        asset_id: &str,
        version: u32,
    ) -> Result<Asset> {
        let path = content_path(space_id, environment_id, "assets");
        let url = self.make_url(&format!("{path}/{asset_id}/published"));
        let builder = self
            .request(reqwest::Method::PUT, &url)
            .header(VERSION_HEADER, version);

        send_json(builder).await
    }

    /// Delete an asset
    pub async fn delete_asset(
        &self,
        space_id: &str,
        environment_id: &str,
        asset_id: &str,
    ) -> Result<()> {
        let path = content_path(space_id, environment_id, "assets");
        let url = self.make_url(&format!("{path}/{asset_id}"));
        let response = self.request(reqwest::Method::DELETE, &url).send().await?;
        handle_error(response).await?;
        Ok(())
    }

    // -- Helpers --

    /// Build a URL from the base and an absolute path
    fn make_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }

    /// Build an authenticated request
    fn request(&self, method: reqwest::Method, url: &Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url.as_str())
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret()),
            )
            .header(CONTENT_TYPE, MANAGEMENT_CONTENT_TYPE)
    }

    /// GET a JSON resource
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut url = self.make_url(path);
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }

        let builder = self.request(reqwest::Method::GET, &url);
        send_json(builder).await
    }
}

/// Send a request and decode the success body
async fn send_json<T: DeserializeOwned>(builder: reqwest::RequestBuilder) -> Result<T> {
    let response = builder.send().await?;
    let response = handle_error(response).await?;

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| CmaClientError::Parse(format!("failed to decode resource: {e}")))
}

/// Path prefix shared by environment-scoped resources
fn content_path(space_id: &str, environment_id: &str, resource: &str) -> String {
    format!("/spaces/{space_id}/environments/{environment_id}/{resource}")
}

/// Check an HTTP response, classifying anything non-2xx
async fn handle_error(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let headers = response.headers().clone();
    let body = response.text().await.unwrap_or_default();
    let error: ApiError = cma_core::classify(&ErrorResponse::new(status.as_u16(), headers, body));

    tracing::warn!(
        status = status.as_u16(),
        kind = ?error.kind,
        "management API returned an error"
    );

    Err(CmaClientError::Api(error))
}
