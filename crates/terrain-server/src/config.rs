//! Server configuration.

use clap::Parser;
use terrain_auth::{AuthConfig, AuthResult, SUPER_USER_ROLE};

/// Default listen address for HTTP requests
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Environment variable naming the bootstrap account
pub const ENV_BOOTSTRAP_USERNAME: &str = "TERRAIN_BOOTSTRAP_USERNAME";

/// Environment variable holding the bootstrap account password
pub const ENV_BOOTSTRAP_PASSWORD: &str = "TERRAIN_BOOTSTRAP_PASSWORD";

/// Username used when `TERRAIN_BOOTSTRAP_USERNAME` is unset
pub const DEFAULT_BOOTSTRAP_USERNAME: &str = "admin";

/// Terrain server command line arguments.
#[derive(Debug, Parser)]
#[command(name = "terrain-server")]
#[command(about = "Authentication and session API for the Terrain backend")]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[arg(short, long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on for HTTP requests.
    pub listen_addr: String,
    /// Password and token handling settings.
    pub auth: AuthConfig,
    /// First-boot provisioning settings.
    pub bootstrap: BootstrapConfig,
}

impl ServerConfig {
    /// Create a configuration with the default listen address and bootstrap
    /// settings.
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            auth,
            bootstrap: BootstrapConfig::default(),
        }
    }

    /// Set the listen address
    pub fn with_listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }

    /// Set the bootstrap settings
    pub fn with_bootstrap(mut self, bootstrap: BootstrapConfig) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    /// Assemble the configuration from CLI arguments and the environment.
    ///
    /// The environment is read here, once. Everything downstream receives
    /// the resulting struct and never touches environment variables again.
    pub fn load(args: &Args) -> AuthResult<Self> {
        Ok(Self {
            listen_addr: args.listen.clone(),
            auth: AuthConfig::from_env()?,
            bootstrap: BootstrapConfig::from_env(),
        })
    }
}

/// First-boot provisioning settings.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Username of the provisioned account.
    pub username: String,
    /// Role of the provisioned account.
    pub role: String,
    /// Password for the account. When `None`, one is generated at boot.
    pub password: Option<String>,
}

impl BootstrapConfig {
    /// Read the bootstrap settings from the environment
    pub fn from_env() -> Self {
        Self {
            username: std::env::var(ENV_BOOTSTRAP_USERNAME)
                .unwrap_or_else(|_| DEFAULT_BOOTSTRAP_USERNAME.to_string()),
            role: SUPER_USER_ROLE.to_string(),
            password: std::env::var(ENV_BOOTSTRAP_PASSWORD)
                .ok()
                .filter(|p| !p.is_empty()),
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_BOOTSTRAP_USERNAME.to_string(),
            role: SUPER_USER_ROLE.to_string(),
            password: None,
        }
    }
}
