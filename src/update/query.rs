use std::fmt;

use crate::config::DomainSettings;

/// Stands in for the token wherever a query is shown to a human.
pub const REDACTED: &str = "redacted";

/// Query parameters of a single Duck DNS update request, in the order they
/// are sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateQuery {
    params: Vec<(&'static str, Box<str>)>,
}

impl UpdateQuery {
    /// `resolved_ipv6` is only consulted when the domain asks for
    /// auto-detection; it takes the place of the literal `"auto"`.
    ///
    /// `clear` and `verbose` are toggled by the presence of the key, so they
    /// are left out entirely unless enabled.
    pub fn build(
        token: &str,
        domain: &str,
        settings: &DomainSettings,
        verbose: bool,
        resolved_ipv6: Option<&str>,
    ) -> Self {
        let ipv6 = if settings.is_auto_ipv6() {
            resolved_ipv6.unwrap_or_default()
        } else {
            &*settings.ipv6
        };

        let mut params = vec![
            ("domains", domain.into()),
            ("token", token.into()),
            ("ip", settings.ip.clone()),
            ("ipv6", ipv6.into()),
        ];

        if settings.clear {
            params.push(("clear", "true".into()));
        }

        if verbose {
            params.push(("verbose", "true".into()));
        }

        Self { params }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_ref())
    }

    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.params.iter().map(|(k, v)| (*k, v.as_ref())).collect()
    }

    /// A copy safe to log: the token is replaced by [`REDACTED`].
    pub fn redacted(&self) -> Self {
        let params = self
            .params
            .iter()
            .map(|(k, v)| match *k {
                "token" => (*k, REDACTED.into()),
                _ => (*k, v.clone()),
            })
            .collect();

        Self { params }
    }
}

impl fmt::Display for UpdateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", k, v)?;
        }
        Ok(())
    }
}
