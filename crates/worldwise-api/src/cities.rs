// Async HTTP client for the cities collection service.
//
// A REST-ish JSON resource:
//   GET    /cities        -> [CityRecord]
//   GET    /cities/{id}   -> CityRecord
//   POST   /cities        -> CityRecord (with assigned id)
//   DELETE /cities/{id}   -> (body ignored)

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::CityRecord;
use crate::transport::TransportConfig;

/// Async client for the cities collection.
///
/// Holds no state besides the connection pool; every method performs
/// exactly one request and never retries.
#[derive(Debug, Clone)]
pub struct CitiesClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CitiesClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for the service rooted at `base_url`.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The normalized service root (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /cities`
    pub async fn list_cities(&self) -> Result<Vec<CityRecord>, Error> {
        self.get("cities").await
    }

    /// `GET /cities/{id}`
    pub async fn get_city(&self, id: u64) -> Result<CityRecord, Error> {
        self.get(&format!("cities/{id}")).await
    }

    /// `POST /cities`
    ///
    /// Any `id` on the draft is dropped: the service assigns it.
    pub async fn create_city(&self, draft: &CityRecord) -> Result<CityRecord, Error> {
        let body = CityRecord {
            id: None,
            ..draft.clone()
        };
        self.post("cities", &body).await
    }

    /// `DELETE /cities/{id}`
    pub async fn delete_city(&self, id: u64) -> Result<(), Error> {
        let url = self.url(&format!("cities/{id}"))?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        handle_empty(resp).await
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        // `.json()` sets `Content-Type: application/json`.
        let resp = self.http.post(url).json(body).send().await?;
        handle_response(resp).await
    }
}

/// Ensure the base path ends with `/` so relative joins append to it.
pub(crate) fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

// ── Response handling ────────────────────────────────────────────────

pub(crate) async fn handle_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(parse_error(status, resp).await);
    }

    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}

async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();
    Error::Http {
        status: status.as_u16(),
        message: if raw.is_empty() {
            status.to_string()
        } else {
            raw.chars().take(200).collect()
        },
    }
}
