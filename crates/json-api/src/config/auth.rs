//! Auth Config

use clap::Args;
use jiff::SignedDuration;

/// API token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Lifetime of tokens issued by register/login, in hours (0 disables expiry)
    #[arg(long, env = "API_TOKEN_TTL_HOURS", default_value_t = 720_u32)]
    pub api_token_ttl_hours: u32,
}

impl AuthConfig {
    /// Token lifetime applied to new sessions, if any.
    #[must_use]
    pub fn token_ttl(&self) -> Option<SignedDuration> {
        (self.api_token_ttl_hours > 0)
            .then(|| SignedDuration::from_hours(i64::from(self.api_token_ttl_hours)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_hours_disables_expiry() {
        let config = AuthConfig {
            api_token_ttl_hours: 0,
        };

        assert_eq!(config.token_ttl(), None);
    }

    #[test]
    fn hours_become_signed_duration() {
        let config = AuthConfig {
            api_token_ttl_hours: 720,
        };

        assert_eq!(config.token_ttl(), Some(SignedDuration::from_hours(720)));
    }
}
