//! Order history command.

use shophub_storefront::api::StorefrontApi;
use shophub_storefront::config::StorefrontConfig;
use shophub_storefront::error::Result;
use shophub_storefront::identity::CurrentUser;

/// Print the current user's orders, newest first.
pub async fn run() -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let user = CurrentUser::from_env()?;
    let api = StorefrontApi::new(&config);

    let orders = api.orders(&user.id).await?;
    println!("Orders for {}", user.display_name);
    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }

    for order in &orders {
        println!(
            "{:<12} {}  {:<10} {:>2} item(s)  ${}",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.status.to_string(),
            order.items.len(),
            order.total
        );
    }
    Ok(())
}
