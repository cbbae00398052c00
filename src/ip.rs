use crate::http::{Error, Transport};

/// Plaintext lookup service answering with the caller's IPv6 address.
pub const IPV6_LOOKUP_URL: &str = "https://ipv6.icanhazip.com";

/// Looks up the current public IPv6 address. The answer is trimmed but
/// otherwise passed on as-is; Duck DNS rejects anything malformed.
pub fn resolve_ipv6(transport: &dyn Transport, url: &str) -> Result<String, Error> {
    let ipv6 = transport.get(url, &[])?.trim().to_owned();

    tracing::debug!(ipv6 = %ipv6, "Got IPv6 response");

    Ok(ipv6)
}
