//! Cart pricing command.

use borzfuel_core::{CartProduct, FREE_SHIPPING_THRESHOLD, Price};
use borzfuel_storefront::Storefront;

use super::CliError;

/// Split `slug=quantity` (quantity defaults to 1).
fn parse_item(item: &str) -> Result<(&str, u32), CliError> {
    let invalid = || CliError::InvalidItem(item.to_string());
    match item.split_once('=') {
        None if !item.is_empty() => Ok((item, 1)),
        None => Err(invalid()),
        Some((slug, quantity)) => {
            let quantity = quantity.parse::<u32>().map_err(|_| invalid())?;
            if slug.is_empty() || quantity == 0 {
                return Err(invalid());
            }
            Ok((slug, quantity))
        }
    }
}

/// Fill a cart from catalog slugs and print its lines and totals.
///
/// # Errors
///
/// Returns an error for a malformed item, a slug that is not a published
/// product, or an unreadable catalog.
#[allow(clippy::print_stdout)]
pub async fn quote(storefront: &Storefront, items: &[String]) -> Result<(), CliError> {
    let products = storefront.catalog().try_products().await?;
    let cart = storefront.cart();

    for item in items {
        let (slug, quantity) = parse_item(item)?;
        let product = products
            .iter()
            .find(|p| p.slug == slug && p.is_purchasable())
            .ok_or_else(|| CliError::UnknownProduct(slug.to_string()))?;
        cart.add_to_cart(CartProduct::from(product), quantity);
    }

    let state = cart.snapshot();
    for line in state.items() {
        println!(
            "{:>3} x {:<28} {:>10}",
            line.quantity,
            line.name,
            Price::usd(line.line_total()).to_string()
        );
    }
    println!("{} item(s), total {}", state.total_items(), state.formatted_total());

    if state.qualifies_for_free_shipping() {
        println!("Free shipping");
    } else {
        let remaining = FREE_SHIPPING_THRESHOLD - state.total_price();
        println!("Add {} more for free shipping", Price::usd(remaining));
    }
    Ok(())
}
