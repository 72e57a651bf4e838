//! Wishlist commands.

use shophub_core::ProductId;
use shophub_storefront::api::StorefrontApi;
use shophub_storefront::config::StorefrontConfig;

use shophub_storefront::error::Result;

use super::cart::describe;
use super::open_engine;

/// Fetch the product and add it to the wishlist.
pub async fn add(product_id: &ProductId) -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let api = StorefrontApi::new(&config);
    let product = api.product(product_id).await?;

    let mut engine = open_engine(&config);
    match engine.add_to_wishlist(&product) {
        Ok(event) => println!("{}", describe(event)),
        Err(rejection) => println!("{rejection}"),
    }
    Ok(())
}

/// Remove a product from the wishlist.
pub fn remove(product_id: &ProductId) -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let mut engine = open_engine(&config);
    println!("{}", describe(engine.remove_from_wishlist(product_id)));
    Ok(())
}

/// Print the wishlist.
pub fn show() -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let engine = open_engine(&config);

    if engine.wishlist().is_empty() {
        println!("Your wishlist is empty.");
        return Ok(());
    }

    for product in engine.wishlist() {
        let stock = match product.stock {
            Some(stock) => stock.to_string(),
            None => "?".to_string(),
        };
        println!(
            "{:<12} {:<40} ${:>8} (stock: {stock})",
            product.id, product.title, product.price
        );
    }
    Ok(())
}
