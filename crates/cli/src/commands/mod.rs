//! CLI command implementations.

pub mod categories;
pub mod products;
pub mod session;

use backoffice_client::{ApiClient, ClientConfig, ConfigError};
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The API call failed.
    #[error(transparent)]
    Api(#[from] backoffice_client::ApiError),

    /// Reading interactive input failed.
    #[error("Input error: {0}")]
    Input(#[from] std::io::Error),
}

/// Build a client from the environment.
pub fn client_from_env() -> Result<ApiClient, CommandError> {
    let config = ClientConfig::from_env()?;
    Ok(ApiClient::new(&config))
}
