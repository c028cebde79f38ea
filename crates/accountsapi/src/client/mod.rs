//! Accounts API client.

mod headers;

pub use headers::API_CONTENT_TYPE;

use accountsapi_core::{Data, MultiPayload, Payload, Resource, codec, validate};
use chrono::Utc;
use reqwest::{Method, StatusCode};
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::transport::{HttpTransport, Request, Response, Transport};

/// Path of the accounts collection, relative to the base URL.
const ACCOUNTS_PATH: [&str; 3] = ["v1", "organisation", "accounts"];

/// Client for the organisation accounts resource.
///
/// Accounts are validated against their country's rules before `create` sends
/// anything. Every operation is a single request with no retries.
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    config: Config,
    transport: T,
}

impl Client<HttpTransport> {
    /// Creates a client that talks HTTP with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client on top of a custom transport.
    #[must_use]
    pub const fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Creates an account.
    ///
    /// The account is validated first; an invalid account never reaches the
    /// network. It is sent with a fresh UUID under the configured organisation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an invalid account,
    /// [`Error::UnexpectedStatus`] unless the service answers `201 Created`, and
    /// [`Error::Codec`] if the response is not a complete payload.
    pub async fn create(&self, account: Resource) -> Result<Payload> {
        if let Err(err) = validate(&account) {
            debug!(country = %account.country, error = %err, "Account rejected before create");
            return Err(err.into());
        }

        let data = Data::new(
            Uuid::new_v4().to_string(),
            self.config.organisation_id.clone(),
            account,
        );
        let body = codec::encode(&Payload::new(data))?;

        let request = Request::new(Method::POST, self.accounts_url(None)?).with_body(body);
        let response = self.execute(request).await?;
        expect_status(&response, StatusCode::CREATED)?;

        Ok(codec::decode(&response.body)?)
    }

    /// Fetches a single account by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedStatus`] unless the service answers `200 OK`
    /// (including when the account does not exist), and [`Error::Codec`] if the
    /// response is not a complete payload.
    pub async fn fetch(&self, account_id: &str) -> Result<Payload> {
        let request = Request::new(Method::GET, self.accounts_url(Some(account_id))?);
        let response = self.execute(request).await?;
        expect_status(&response, StatusCode::OK)?;

        Ok(codec::decode(&response.body)?)
    }

    /// Lists one page of accounts.
    ///
    /// Pages are not followed automatically; the returned links point at the
    /// neighbouring pages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedStatus`] unless the service answers `200 OK`, and
    /// [`Error::Codec`] if the response is not a complete collection.
    pub async fn list(&self, page_number: u32, page_size: u32) -> Result<MultiPayload> {
        let mut url = self.accounts_url(None)?;
        url.query_pairs_mut()
            .append_pair("page[number]", &page_number.to_string())
            .append_pair("page[size]", &page_size.to_string());

        let response = self.execute(Request::new(Method::GET, url)).await?;
        expect_status(&response, StatusCode::OK)?;

        Ok(codec::decode_multi(&response.body)?)
    }

    /// Deletes an account at a specific version.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedStatus`] unless the service answers
    /// `204 No Content`; a stale version comes back as `409 Conflict`.
    pub async fn delete(&self, account_id: &str, version: u64) -> Result<()> {
        let mut url = self.accounts_url(Some(account_id))?;
        url.query_pairs_mut()
            .append_pair("version", &version.to_string());

        let response = self.execute(Request::new(Method::DELETE, url)).await?;
        expect_status(&response, StatusCode::NO_CONTENT)
    }

    /// Builds the collection URL, or the URL of one account.
    fn accounts_url(&self, account_id: Option<&str>) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                Error::Config(format!(
                    "base URL '{}' cannot carry a path",
                    self.config.base_url
                ))
            })?;
            segments.pop_if_empty().extend(ACCOUNTS_PATH);
            if let Some(id) = account_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn execute(&self, mut request: Request) -> Result<Response> {
        headers::decorate(&mut request.headers, request.body.len(), Utc::now())?;

        debug!(method = %request.method, url = %request.url, "Sending request");
        let response = self.transport.send(request).await?;
        debug!(status = %response.status, bytes = response.body.len(), "Received response");

        Ok(response)
    }
}

fn expect_status(response: &Response, expected: StatusCode) -> Result<()> {
    if response.status == expected {
        return Ok(());
    }

    warn!(
        status = %response.status,
        expected = %expected,
        "Unexpected response status"
    );
    Err(Error::UnexpectedStatus {
        expected,
        actual: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    fn client(base: &str) -> Client {
        Client::new(Config::new(base, "orgid").unwrap()).unwrap()
    }

    #[test]
    fn test_accounts_url() {
        let client = client("http://accountapi:8080");
        assert_eq!(
            client.accounts_url(None).unwrap().as_str(),
            "http://accountapi:8080/v1/organisation/accounts"
        );
        assert_eq!(
            client.accounts_url(Some("abc")).unwrap().as_str(),
            "http://accountapi:8080/v1/organisation/accounts/abc"
        );
    }

    #[test]
    fn test_accounts_url_keeps_base_path() {
        let client = client("https://example.com/api/");
        assert_eq!(
            client.accounts_url(None).unwrap().as_str(),
            "https://example.com/api/v1/organisation/accounts"
        );
    }

    #[test]
    fn test_accounts_url_escapes_id() {
        let client = client("http://accountapi:8080");
        let url = client.accounts_url(Some("a/b")).unwrap();
        assert_eq!(url.path(), "/v1/organisation/accounts/a%2Fb");
    }

    #[test]
    fn test_expect_status() {
        let ok = Response::new(StatusCode::OK, Vec::new());
        assert!(expect_status(&ok, StatusCode::OK).is_ok());

        let conflict = Response::new(StatusCode::CONFLICT, "stale version");
        let err = expect_status(&conflict, StatusCode::NO_CONTENT).unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
        assert!(err.to_string().contains("stale version"));
    }
}
