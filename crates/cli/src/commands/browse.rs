//! Catalog browsing.

use shophub_storefront::api::StorefrontApi;
use shophub_storefront::config::StorefrontConfig;
use shophub_storefront::error::Result;

/// List products, optionally filtered by category.
pub async fn run(category: Option<&str>) -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let api = StorefrontApi::new(&config);

    let categories = api.categories().await?;
    println!("Categories: {}", categories.join(", "));

    let products = api.products().await?;
    let mut shown = 0;
    for product in products.iter() {
        if let Some(category) = category
            && product.category != category
        {
            continue;
        }
        shown += 1;
        let stock = match product.stock {
            Some(0) => "out of stock".to_string(),
            Some(stock) => format!("{stock} in stock"),
            None => "stock unknown".to_string(),
        };
        println!(
            "{:<12} {:<40} ${:>8}  {:.1}* ({} reviews)  {stock}",
            product.id, product.title, product.price, product.rating, product.review_count
        );
    }

    if shown == 0 {
        println!("No products found.");
    }
    Ok(())
}
