use std::error::Error;

use crate::config::Config;
use crate::update::Updater;

/// Which domains were updated and which were not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub succeeded: Vec<Box<str>>,
    pub failed: Vec<Box<str>>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Updates every configured domain in turn. A failing domain is logged and
/// recorded, and the remaining domains are still attempted.
pub fn run(updater: &Updater, config: &Config, token: &str) -> Outcome {
    let mut outcome = Outcome::default();

    if config.domains.is_empty() {
        tracing::warn!("No domains configured, nothing to update");
    }

    for (domain, settings) in &config.domains {
        let _span = tracing::info_span!("update", domain = %domain).entered();

        match updater.update_domain(token, domain, settings) {
            Ok(()) => {
                tracing::info!(domain = %domain, "Updated domain");
                outcome.succeeded.push(domain.clone());
            }

            Err(e) => {
                tracing::error!(
                    domain = %domain,
                    error = &e as &(dyn Error + 'static),
                    "Failed to update domain"
                );
                outcome.failed.push(domain.clone());
            }
        }
    }

    tracing::debug!(
        succeeded = outcome.succeeded.len(),
        failed = outcome.failed.len(),
        "Finished updating domains"
    );

    outcome
}
