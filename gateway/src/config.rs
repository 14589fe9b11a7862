use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Port identifying the research chat backend.
pub const RESEARCH_PORT: u16 = 8000;
/// Port identifying the resources chat backend.
pub const RESOURCES_PORT: u16 = 10000;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Port cannot be 0")]
    InvalidPort,

    #[error("OTF chat password cannot be empty")]
    EmptyChatPassword,

    #[error("Spotify credentials cannot be empty")]
    EmptySpotifyCredentials,

    #[error("Daily API key cannot be empty")]
    EmptyDailyApiKey,

    #[error("Daily domain cannot be empty")]
    EmptyDailyDomain,
}

/// Gateway configuration
///
/// Every section is required so that missing credentials or URLs fail at
/// startup rather than on the first request that needs them.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Main listener for incoming requests
    pub listener: Listener,
    /// F1 statistics proxy
    pub f1: F1ProxyConfig,
    /// OTF agent chat relay
    pub otf: OtfConfig,
    /// Psychology chat backends
    pub psychology: PsychologyConfig,
    /// Spotify listening data
    pub spotify: SpotifyConfig,
    /// Daily.co video rooms
    pub daily: DailyConfig,
}

impl Config {
    /// Validates the gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.listener.validate()?;

        if self.otf.chat_password.is_empty() {
            return Err(ValidationError::EmptyChatPassword);
        }

        if self.spotify.client_id.is_empty()
            || self.spotify.client_secret.is_empty()
            || self.spotify.refresh_token.is_empty()
        {
            return Err(ValidationError::EmptySpotifyCredentials);
        }

        if self.daily.api_key.is_empty() {
            return Err(ValidationError::EmptyDailyApiKey);
        }
        if self.daily.domain.is_empty() {
            return Err(ValidationError::EmptyDailyDomain);
        }

        Ok(())
    }
}

/// Network listener configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Listener {
    /// Host address to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

impl Listener {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct F1ProxyConfig {
    /// Upstream base; the `path` query parameter is appended verbatim
    #[serde(default = "default_f1_base_url")]
    pub base_url: String,
    #[serde(default = "default_f1_timeout")]
    pub timeout_secs: u64,
}

fn default_f1_base_url() -> String {
    "http://api.jolpi.ca/ergast/f1".to_owned()
}

fn default_f1_timeout() -> u64 {
    10
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct OtfConfig {
    /// Endpoint of the OTF agent (JSON-RPC over HTTP)
    pub agent_url: Url,
    /// Shared secret the client must send with each chat message
    pub chat_password: String,
    #[serde(default = "default_chat_timeout")]
    pub timeout_secs: u64,
}

fn default_chat_timeout() -> u64 {
    30
}

/// The two chat backends, addressed by their well-known ports. Requests
/// naming any other port are rejected before an upstream call is attempted.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PsychologyConfig {
    #[serde(default = "default_research_url")]
    pub research_url: String,
    #[serde(default = "default_resources_url")]
    pub resources_url: String,
    #[serde(default = "default_chat_timeout")]
    pub chat_timeout_secs: u64,
    #[serde(default = "default_health_timeout")]
    pub health_timeout_secs: u64,
}

impl PsychologyConfig {
    /// Base URL of the backend a port maps to, `None` for invalid ports.
    pub fn backend_url(&self, port: u16) -> Option<&str> {
        match port {
            RESEARCH_PORT => Some(&self.research_url),
            RESOURCES_PORT => Some(&self.resources_url),
            _ => None,
        }
    }
}

fn default_research_url() -> String {
    format!("http://ec2-54-91-100-129.compute-1.amazonaws.com:{RESEARCH_PORT}")
}

fn default_resources_url() -> String {
    format!("http://ec2-54-91-100-129.compute-1.amazonaws.com:{RESOURCES_PORT}")
}

fn default_health_timeout() -> u64 {
    10
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(default = "default_spotify_token_url")]
    pub token_url: String,
    #[serde(default = "default_spotify_api_url")]
    pub api_url: String,
    #[serde(default = "default_health_timeout")]
    pub timeout_secs: u64,
}

fn default_spotify_token_url() -> String {
    "https://accounts.spotify.com/api/token".to_owned()
}

fn default_spotify_api_url() -> String {
    "https://api.spotify.com/v1".to_owned()
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DailyConfig {
    pub api_key: String,
    /// Subdomain rooms are joined on (e.g. "example.daily.co")
    pub domain: String,
    #[serde(default = "default_daily_api_url")]
    pub api_url: String,
    #[serde(default = "default_health_timeout")]
    pub timeout_secs: u64,
}

fn default_daily_api_url() -> String {
    "https://api.daily.co/v1".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            listener: Listener {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            f1: F1ProxyConfig {
                base_url: default_f1_base_url(),
                timeout_secs: 10,
            },
            otf: OtfConfig {
                agent_url: Url::parse("http://127.0.0.1:5001/").unwrap(),
                chat_password: "secret".to_string(),
                timeout_secs: 30,
            },
            psychology: PsychologyConfig {
                research_url: default_research_url(),
                resources_url: default_resources_url(),
                chat_timeout_secs: 30,
                health_timeout_secs: 10,
            },
            spotify: SpotifyConfig {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
                refresh_token: "token".to_string(),
                token_url: default_spotify_token_url(),
                api_url: default_spotify_api_url(),
                timeout_secs: 10,
            },
            daily: DailyConfig {
                api_key: "key".to_string(),
                domain: "example.daily.co".to_string(),
                api_url: default_daily_api_url(),
                timeout_secs: 10,
            },
        }
    }

    #[test]
    fn test_parse_valid_config() {
        let yaml = r#"
listener:
    host: "0.0.0.0"
    port: 3000
f1:
    base_url: "http://api.jolpi.ca/ergast/f1"
otf:
    agent_url: "http://127.0.0.1:5001/"
    chat_password: "secret"
psychology: {}
spotify:
    client_id: "id"
    client_secret: "cs"
    refresh_token: "rt"
daily:
    api_key: "key"
    domain: "example.daily.co"
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());

        assert_eq!(config.listener.port, 3000);
        assert_eq!(config.f1.timeout_secs, 10);
        assert_eq!(config.otf.timeout_secs, 30);
        assert_eq!(config.psychology.chat_timeout_secs, 30);
        assert_eq!(config.psychology.health_timeout_secs, 10);
        assert_eq!(config.spotify.api_url, "https://api.spotify.com/v1");
        assert_eq!(config.daily.api_url, "https://api.daily.co/v1");
    }

    #[test]
    fn test_validation_errors() {
        let mut config = base_config();
        config.listener.port = 0;
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::InvalidPort
        ));

        let mut config = base_config();
        config.otf.chat_password = String::new();
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::EmptyChatPassword
        ));

        let mut config = base_config();
        config.spotify.refresh_token = String::new();
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::EmptySpotifyCredentials
        ));

        let mut config = base_config();
        config.daily.api_key = String::new();
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::EmptyDailyApiKey
        ));

        let mut config = base_config();
        config.daily.domain = String::new();
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::EmptyDailyDomain
        ));
    }

    #[test]
    fn test_deserialization_errors() {
        // Invalid agent URL
        assert!(
            serde_yaml::from_str::<OtfConfig>(
                r#"
agent_url: "not-a-url"
chat_password: "secret"
"#
            )
            .is_err()
        );

        // Invalid port type
        assert!(
            serde_yaml::from_str::<Listener>(
                r#"
host: "0.0.0.0"
port: "not_a_number"
"#
            )
            .is_err()
        );

        // Missing required section
        assert!(
            serde_yaml::from_str::<Config>(
                r#"
listener: {host: "0.0.0.0", port: 3000}
"#
            )
            .is_err()
        );
    }

    #[test]
    fn test_backend_port_mapping() {
        let config = base_config();
        assert!(config.psychology.backend_url(8000).is_some());
        assert!(config.psychology.backend_url(10000).is_some());
        assert_eq!(config.psychology.backend_url(9999), None);
        assert_eq!(config.psychology.backend_url(0), None);
    }
}
