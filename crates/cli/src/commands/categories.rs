//! Category inspection commands.

#![allow(clippy::print_stdout)]

use super::{CommandError, client_from_env};

/// List all categories.
pub async fn list() -> Result<(), CommandError> {
    let client = client_from_env()?;

    let categories = client.get_categories().await?;
    tracing::info!("Fetched {} categorie(s)", categories.len());

    for category in categories {
        println!(
            "#{:<4} {:<24} {}",
            category.id,
            category.name,
            category.description.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
