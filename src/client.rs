//! This module provides a client to download the ICS feed, and ways to probe the network

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::config;
use crate::error::{CalendarError, Result};
use crate::traits::{ConnectivityProbe, IcsSource, Transports};


/// An ICS source that downloads the yearly feeds over HTTP(S)
pub struct HttpIcsSource {
    client: reqwest::Client,
}

impl HttpIcsSource {
    /// Create a client. This does not start a connection
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config::CONNECT_TIMEOUT)
            .timeout(config::READ_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl IcsSource for HttpIcsSource {
    async fn fetch_year(&self, year: i32) -> Result<String> {
        let url = Url::parse(&config::ics_url_for_year(year))?;
        log::debug!("Downloading {}", url);

        let res = self.client
            .get(url.as_str())
            .send()
            .await?;

        if res.status() != StatusCode::OK {
            return Err(CalendarError::ServerError { year, code: res.status().as_u16() });
        }

        let text = res.text().await?;
        log::debug!("Downloaded {} bytes for year {}", text.len(), year);
        Ok(text)
    }
}


/// A probe that always reports the same transports
#[derive(Clone, Copy, Debug)]
pub struct StaticConnectivity(pub Transports);

#[async_trait]
impl ConnectivityProbe for StaticConnectivity {
    async fn active_transports(&self) -> Transports {
        self.0
    }
}

/// A probe that considers the network up when the host of the ICS feed can be resolved.
///
/// Desktop systems do not tell which kind of link is used, so a working network is reported as [`Transports::ETHERNET`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ResolverProbe;

#[async_trait]
impl ConnectivityProbe for ResolverProbe {
    async fn active_transports(&self) -> Transports {
        transports_for_url(&config::ics_url_for_year(0)).await
    }
}

/// Resolve the host of `url`, and report [`Transports::ETHERNET`] if it has at least one address
async fn transports_for_url(url: &str) -> Transports {
    let url = match Url::parse(url) {
        Ok(url) => url,
        Err(err) => {
            log::warn!("Invalid ICS URL template: {}", err);
            return Transports::empty();
        },
    };
    let host = match url.host_str() {
        Some(host) => host.to_string(),
        None => return Transports::empty(),
    };
    let port = url.port_or_known_default().unwrap_or(443);

    let transports = match tokio::net::lookup_host((host.as_str(), port)).await {
        Ok(mut addrs) => {
            if addrs.next().is_some() {
                Transports::ETHERNET
            } else {
                Transports::empty()
            }
        },
        Err(err) => {
            log::debug!("Unable to resolve {}: {}", host, err);
            Transports::empty()
        },
    };
    transports
}


#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_static_connectivity() {
        assert!(StaticConnectivity(Transports::WIFI).active_transports().await.is_online());
        assert!(StaticConnectivity(Transports::CELLULAR | Transports::ETHERNET).active_transports().await.is_online());
        assert!(StaticConnectivity(Transports::empty()).active_transports().await.is_online() == false);
    }

    #[tokio::test]
    async fn test_unreachable_hosts() {
        // The .invalid top-level domain never resolves
        assert_eq!(transports_for_url("https://feed.invalid/calendar/2024.ics").await, Transports::empty());
        // No host at all
        assert_eq!(transports_for_url("data:text/calendar,BEGIN").await, Transports::empty());
        assert_eq!(transports_for_url("not a url").await, Transports::empty());
    }
}
