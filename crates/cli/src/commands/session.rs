//! Session commands.

#![allow(clippy::print_stdout)]

use std::io::{BufRead, Write};

use backoffice_core::Email;
use thiserror::Error;

use super::{CommandError, client_from_env};

/// Errors specific to session commands.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The email address did not parse.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] backoffice_core::EmailError),
}

/// Sign in and print the bearer token.
///
/// The password is read from stdin so it never lands in shell history.
/// Export the printed token as `BACKOFFICE_API_TOKEN` for later commands.
pub async fn login(email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email).map_err(SessionError::InvalidEmail)?;

    print!("Password: ");
    std::io::stdout().flush().map_err(CommandError::Input)?;
    let mut password = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut password)
        .map_err(CommandError::Input)?;
    let password = password.trim_end_matches(['\r', '\n']);

    let client = client_from_env()?;
    let login = client.login(&email, password).await.map_err(CommandError::Api)?;

    tracing::info!("Signed in as {} ({})", login.user.name, login.user.username);
    println!("{}", login.token);

    Ok(())
}
