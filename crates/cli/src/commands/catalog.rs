//! Catalog listing commands.

use borzfuel_core::Price;
use borzfuel_storefront::Storefront;

use super::CliError;

/// Print published products with price and discount.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
#[allow(clippy::print_stdout)]
pub async fn products(storefront: &Storefront) -> Result<(), CliError> {
    let products = storefront.catalog().try_products().await?;
    if products.is_empty() {
        println!("No published products.");
        return Ok(());
    }

    for product in &products {
        let price = Price::usd(product.price);
        match (product.compare_at_price, product.discount_percent()) {
            (Some(compare), Some(percent)) => println!(
                "{:<24} {:<28} {price} (was {}, save {percent}%)",
                product.slug,
                product.name,
                Price::usd(compare)
            ),
            _ => println!("{:<24} {:<28} {price}", product.slug, product.name),
        }
        if !product.is_purchasable() {
            println!("{:<24} out of stock", "");
        }
    }
    Ok(())
}

/// Print product benefits in display order.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
#[allow(clippy::print_stdout)]
pub async fn benefits(storefront: &Storefront) -> Result<(), CliError> {
    for benefit in storefront.catalog().try_benefits().await? {
        println!("{:?} {}: {}", benefit.icon, benefit.title, benefit.description);
        if let Some(highlight) = &benefit.highlight {
            println!("    {highlight}");
        }
    }
    Ok(())
}

/// Print the formula panel.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
#[allow(clippy::print_stdout)]
pub async fn ingredients(storefront: &Storefront) -> Result<(), CliError> {
    for ingredient in storefront.catalog().try_ingredients().await? {
        println!(
            "{:<24} {:>10}  {:?}: {}",
            ingredient.name, ingredient.amount, ingredient.category, ingredient.benefit
        );
    }
    Ok(())
}
