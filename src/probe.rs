//! The single HTTP(S) request a check performs, and how its outcome maps onto a [Status].

use std::fmt;

use hyper::ext::ReasonPhrase;
use reqwest::{StatusCode, Version};
use tracing::{debug, warn};

use crate::Status;

/// URL scheme used to reach the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => f.write_str("http"),
            Protocol::Https => f.write_str("https"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// What is kept of a received response: enough to describe it in a status message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseSummary {
    /// HTTP version as sent on the wire, e.g. `HTTP/1.1`.
    pub protocol: String,
    pub code: u16,
    /// `<code> <reason>`, e.g. `503 Service Unavailable`, with the reason the server sent.
    pub status_line: String,
}

impl ResponseSummary {
    pub fn from_response(response: &reqwest::blocking::Response) -> Self {
        // only present when the server's reason differs from the canonical one
        let sent_reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .map(ReasonPhrase::as_bytes);

        ResponseSummary {
            protocol: protocol_name(response.version()),
            code: response.status().as_u16(),
            status_line: status_line(response.status(), sent_reason),
        }
    }
}

/// `HTTP/1.0`, `HTTP/1.1`, `HTTP/2.0`, ...
fn protocol_name(version: Version) -> String {
    format!("{:?}", version)
}

/// The reason phrase the server sent wins over the canonical one. A code with neither is
/// rendered alone.
fn status_line(status: StatusCode, sent_reason: Option<&[u8]>) -> String {
    let reason = match sent_reason {
        Some(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        None => status.canonical_reason().map(str::to_owned),
    };

    match reason {
        Some(reason) if !reason.is_empty() => format!("{} {}", status.as_u16(), reason),
        _ => status.as_u16().to_string(),
    }
}

/// A check against `<protocol>://<host>`.
///
/// ```rust,no_run
/// # use webcheck::{Probe, Protocol};
/// let status = Probe::new("example.com", Protocol::Https).run();
/// status.print_and_exit();
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Probe {
    host: String,
    protocol: Protocol,
}

impl Probe {
    pub fn new(host: &str, protocol: Protocol) -> Self {
        Probe {
            host: host.to_owned(),
            protocol,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// The requested URL. No path, query or trailing slash is added.
    pub fn url(&self) -> String {
        format!("{}://{}", self.protocol, self.host)
    }

    /// Issues one GET request and returns what came back, without interpreting the status code.
    pub fn fetch(&self) -> Result<ResponseSummary, ProbeError> {
        let url = self.url();
        debug!(%url, "probing");

        let response = reqwest::blocking::get(&url)?;
        let summary = ResponseSummary::from_response(&response);
        debug!(protocol = %summary.protocol, status = %summary.status_line, "received response");

        Ok(summary)
    }

    /// Issues the request and classifies the outcome. Never fails: transport errors are a
    /// critical status.
    pub fn run(&self) -> Status {
        let outcome = self.fetch();
        if let Err(err) = &outcome {
            warn!(host = %self.host, error = %err, "host did not respond");
        }

        classify(&self.host, outcome)
    }
}

/// Maps the outcome of a probe against `host` to a [Status].
///
/// Only a 200 is OK. Any other code, redirects included, is critical, as is a request that
/// never got a response.
pub fn classify(host: &str, outcome: Result<ResponseSummary, ProbeError>) -> Status {
    match outcome {
        Err(_) => Status::critical("CRITICAL- host did not respond"),
        Ok(response) if response.code == 200 => Status::ok(format!(
            "OK- {} responded with {} {}",
            host, response.protocol, response.status_line
        )),
        Ok(response) => Status::critical(format!(
            "CRITICAL- {} {} {}",
            host, response.protocol, response.status_line
        )),
    }
}
