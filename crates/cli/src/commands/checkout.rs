//! Checkout command.

use shophub_core::AddressId;
use shophub_storefront::api::StorefrontApi;
use shophub_storefront::checkout::CheckoutFlow;
use shophub_storefront::config::StorefrontConfig;
use shophub_storefront::error::Result;
use shophub_storefront::identity::CurrentUser;

use super::open_engine;

/// Place an order from the current cart.
pub async fn run(address: Option<String>) -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let user = CurrentUser::from_env()?;
    let api = StorefrontApi::new(&config);

    let mut engine = open_engine(&config);
    if engine.lines().is_empty() {
        println!("Your cart is empty. Add items before checkout.");
        return Ok(());
    }

    let mut flow = CheckoutFlow::new(api, user.id.clone());
    flow.load_addresses().await?;

    if flow.needs_address() {
        println!("No saved addresses. Add one with `shophub address add` first.");
        return Ok(());
    }
    for saved in flow.addresses() {
        println!("  {:<12} {} ({})", saved.id.as_str(), saved.label, saved.street);
    }
    if let Some(id) = address {
        flow.select_address(AddressId::new(id))?;
    }

    if let Some(selected) = flow.selected_address() {
        println!(
            "Shipping to {} ({}, {})",
            selected.label, selected.street, selected.city
        );
    }

    let order_id = flow.submit(&mut engine).await?;
    println!("Order {order_id} placed.");
    Ok(())
}
