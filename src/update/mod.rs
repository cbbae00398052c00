pub mod query;
pub mod response;

use thiserror::Error;

use crate::config::DomainSettings;
use crate::http::{self, Transport};
use crate::ip;

use query::UpdateQuery;

pub const UPDATE_URL: &str = "https://www.duckdns.org/update";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum UpdateError {
    /// Either the IPv6 lookup or the update request itself could not be
    /// completed.
    #[error(transparent)]
    Network(#[from] http::Error),

    /// Duck DNS answered with something other than `OK`.
    #[error("unexpected response from Duck DNS: {0:?}")]
    Protocol(Box<str>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub update: Box<str>,
    pub ipv6_lookup: Box<str>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            update: UPDATE_URL.into(),
            ipv6_lookup: ip::IPV6_LOOKUP_URL.into(),
        }
    }
}

/// Performs the update of one domain at a time. Nothing is retried.
pub struct Updater<'a> {
    transport: &'a dyn Transport,
    endpoints: Endpoints,
    verbose: bool,
}

impl<'a> Updater<'a> {
    /// With `verbose` set, Duck DNS is asked to explain what it did.
    pub fn new(transport: &'a dyn Transport, endpoints: Endpoints, verbose: bool) -> Self {
        Self {
            transport,
            endpoints,
            verbose,
        }
    }

    pub fn update_domain(
        &self,
        token: &str,
        domain: &str,
        settings: &DomainSettings,
    ) -> Result<(), UpdateError> {
        // Looked up per domain; the address may change in the middle of a run.
        let ipv6 = if settings.is_auto_ipv6() {
            Some(ip::resolve_ipv6(self.transport, &self.endpoints.ipv6_lookup)?)
        } else {
            None
        };

        let query = UpdateQuery::build(token, domain, settings, self.verbose, ipv6.as_deref());

        tracing::debug!(
            url = %format!("{}?{}", self.endpoints.update, query.redacted()),
            "Making Duck DNS request"
        );

        let text = self.transport.get(&self.endpoints.update, &query.pairs())?;

        tracing::debug!(text = %text.trim(), "Got Duck DNS response");

        response::validate(&text)
    }
}
