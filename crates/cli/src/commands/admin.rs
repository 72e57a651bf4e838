//! Admin commands.
//!
//! All commands check the current user against the configured admin
//! allowlist before touching the backend.

use shophub_admin::api::AdminApi;
use shophub_admin::config::AdminConfig;
use shophub_admin::reconciliation::Reconciliation;
use shophub_core::{OrderId, OrderStatus, ProductId};
use shophub_storefront::config::StorefrontConfig;
use shophub_storefront::identity::CurrentUser;

use super::CliResult;

fn ensure_admin() -> CliResult {
    let config = StorefrontConfig::from_env()?;
    let user = CurrentUser::from_env()?;
    if user.is_admin(&config.admin_emails) {
        Ok(())
    } else {
        Err(format!("{} is not on the admin allowlist", user.email).into())
    }
}

async fn load_view() -> Result<Reconciliation<AdminApi>, Box<dyn std::error::Error>> {
    let config = AdminConfig::from_env()?;
    let mut view = Reconciliation::new(AdminApi::new(&config));
    view.load().await?;
    Ok(view)
}

/// Print revenue and stock overview.
pub async fn dashboard() -> CliResult {
    ensure_admin()?;
    let view = load_view().await?;

    let stats = view.stats();
    println!("Total orders:   {}", stats.total_orders);
    println!("Total revenue:  ${}", stats.total_revenue);
    println!("Low stock:      {} product(s)", stats.low_stock_count);
    Ok(())
}

/// List all orders, newest first.
pub async fn orders() -> CliResult {
    ensure_admin()?;
    let view = load_view().await?;

    if view.orders().is_empty() {
        println!("No orders yet.");
        return Ok(());
    }
    for order in view.orders() {
        println!(
            "{:<12} {}  {:<10} user {:<12} ${}",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.status.to_string(),
            order.user_id,
            order.total
        );
    }
    Ok(())
}

/// Change an order's status.
pub async fn set_status(order_id: &OrderId, status: &str) -> CliResult {
    ensure_admin()?;
    let status: OrderStatus = status.parse().map_err(|e: String| {
        let options: Vec<String> = OrderStatus::ALL.iter().map(ToString::to_string).collect();
        format!("{e} (options: {})", options.join(", "))
    })?;

    let mut view = load_view().await?;
    view.set_status(order_id, status).await?;
    println!("Order {order_id} is now \"{status}\".");
    Ok(())
}

/// Correct a product's stock count.
pub async fn set_stock(product_id: &ProductId, stock: u32) -> CliResult {
    ensure_admin()?;

    let mut view = load_view().await?;
    view.correct_stock(product_id, stock).await?;
    println!("Product {product_id} stock set to {stock}.");
    Ok(())
}
