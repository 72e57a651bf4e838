//! Cart commands.

use shophub_core::ProductId;
use shophub_storefront::api::StorefrontApi;
use shophub_storefront::cart::CartEvent;
use shophub_storefront::config::StorefrontConfig;
use shophub_storefront::error::Result;

use super::open_engine;

/// User-facing notice for a successful mutation.
pub(crate) const fn describe(event: CartEvent) -> &'static str {
    match event {
        CartEvent::AddedToCart => "Added to cart!",
        CartEvent::QuantityIncremented { .. } | CartEvent::QuantitySet { .. } => {
            "Quantity updated in cart!"
        }
        CartEvent::RemovedFromCart => "Removed from cart!",
        CartEvent::CartCleared => "Cart cleared!",
        CartEvent::AddedToWishlist => "Added to wishlist!",
        CartEvent::AlreadyInWishlist => "Already in wishlist!",
        CartEvent::RemovedFromWishlist => "Removed from wishlist!",
    }
}

/// Fetch the product and add one unit to the cart.
pub async fn add(product_id: &ProductId) -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let api = StorefrontApi::new(&config);
    let product = api.product(product_id).await?;

    let mut engine = open_engine(&config);
    match engine.add_to_cart(&product) {
        Ok(event) => println!("{}", describe(event)),
        Err(rejection) => println!("{rejection}"),
    }
    Ok(())
}

/// Remove a product's line from the cart.
pub fn remove(product_id: &ProductId) -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let mut engine = open_engine(&config);
    println!("{}", describe(engine.remove_from_cart(product_id)));
    Ok(())
}

/// Set a line's quantity exactly; zero removes the line.
pub fn set_quantity(product_id: &ProductId, quantity: u32) -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let mut engine = open_engine(&config);
    match engine.update_quantity(product_id, quantity) {
        Ok(event) => println!("{}", describe(event)),
        Err(rejection) => println!("{rejection}"),
    }
    Ok(())
}

/// Print the cart with line totals.
pub fn show() -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let engine = open_engine(&config);

    if engine.lines().is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    for line in engine.lines() {
        println!(
            "{:<12} {:<40} {:>3} x ${:>8} = ${:>9}",
            line.product.id,
            line.product.title,
            line.quantity,
            line.product.price,
            line.line_total()
        );
    }
    println!(
        "{} item(s), total ${}",
        engine.cart_items_count(),
        engine.cart_total()
    );
    Ok(())
}

/// Empty the cart. The wishlist is kept.
pub fn clear() -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let mut engine = open_engine(&config);
    println!("{}", describe(engine.clear_cart()));
    Ok(())
}
