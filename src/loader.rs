use std::time::Duration;

use thiserror::Error;

use crate::roster::{self, DecodeReport, MemberRecord};

pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vT2KKQ1I06_ekwmIsCuwiliRbqu44Y9pBpSO2HuGpxQLv485PlDZ4tyDUlDjJGu3UJeXJQdLuPNxdkA/pub?output=csv";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    NonOkStatus { url: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {message}")]
    Client { message: String },
}

/// Where the roster comes from: the published sheet or a local export of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RosterSource {
    Url(String),
    File(String),
}

impl RosterSource {
    pub fn describe(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::File(path) => path,
        }
    }
}

/// `timeout_seconds == 0` leaves requests unbounded.
#[derive(Clone, Debug, Default)]
pub struct LoaderOptions {
    pub timeout_seconds: u64,
    pub proxy: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Loaded {
    pub members: Vec<MemberRecord>,
    pub report: DecodeReport,
}

/// Fetches the published sheet and decodes it. A single attempt per call.
#[derive(Clone, Debug)]
pub struct RosterLoader {
    client: reqwest::Client,
}

impl RosterLoader {
    pub fn new(options: &LoaderOptions) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(options)?,
        })
    }

    pub async fn load(&self, source_url: &str) -> Result<Vec<MemberRecord>, FetchError> {
        self.load_with_report(source_url).await.map(|l| l.members)
    }

    pub async fn load_source(&self, source: &RosterSource) -> Result<Loaded, FetchError> {
        match source {
            RosterSource::Url(url) => self.load_with_report(url).await,
            RosterSource::File(path) => load_file(path).await,
        }
    }

    pub async fn load_with_report(&self, source_url: &str) -> Result<Loaded, FetchError> {
        let resp = self
            .client
            .get(source_url)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: source_url.to_string(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::NonOkStatus {
                url: source_url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = resp.text().await.map_err(|e| FetchError::Network {
            url: source_url.to_string(),
            source: e,
        })?;
        let (members, report) = roster::decode_with_report(&text);
        Ok(Loaded { members, report })
    }
}

pub async fn load_file(path: &str) -> Result<Loaded, FetchError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FetchError::Read {
            path: path.to_string(),
            source: e,
        })?;
    let (members, report) = roster::decode_with_report(&text);
    Ok(Loaded { members, report })
}

fn build_client(options: &LoaderOptions) -> Result<reqwest::Client, FetchError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        )),
    );

    // published sheets redirect to a googleusercontent host
    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10));

    if options.timeout_seconds > 0 {
        builder = builder.timeout(Duration::from_secs(options.timeout_seconds));
    }

    if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| FetchError::Client {
            message: format!("invalid proxy {proxy}: {e}"),
        })?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(|e| FetchError::Client {
        message: e.to_string(),
    })
}
