//! Product inspection commands.

#![allow(clippy::print_stdout)]

use super::{CommandError, client_from_env};

/// List all products with their variant counts.
pub async fn list() -> Result<(), CommandError> {
    let client = client_from_env()?;

    let products = client.get_products().await?;
    tracing::info!("Fetched {} product(s)", products.len());

    for product in products {
        println!(
            "{:<30} {:<14} variants: {:<3} status: {}",
            product.name,
            product.slug,
            product.variants.len(),
            if product.status { "active" } else { "inactive" },
        );
    }

    Ok(())
}

/// Show one product in detail.
pub async fn show(slug: &str) -> Result<(), CommandError> {
    let client = client_from_env()?;

    let product = client.get_product(slug).await?;

    println!("{} ({})", product.name, product.sku);
    println!("  slug:        {}", product.slug);
    println!("  category_id: {}", product.category_id);
    println!("  weight:      {}", product.dimensions.weight);
    println!("  use_variant: {}", product.use_variant);

    for variant in &product.variants {
        println!(
            "  variant #{}: {:<20} price {:<12} stock {}",
            variant.id, variant.name, variant.price, variant.stock
        );
    }

    for attribute in &product.attributes {
        println!(
            "  attribute #{}: {} = {}",
            attribute.id,
            attribute.name,
            attribute.values.join(", ")
        );
    }

    for information in &product.informations {
        println!(
            "  information #{}: {}: {}",
            information.id, information.name, information.description
        );
    }

    Ok(())
}
