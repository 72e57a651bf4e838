//! Saved-address commands.

use shophub_core::NewAddress;
use shophub_storefront::api::StorefrontApi;
use shophub_storefront::config::StorefrontConfig;
use shophub_storefront::error::Result;
use shophub_storefront::identity::CurrentUser;

/// List the current user's saved addresses.
pub async fn list() -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let user = CurrentUser::from_env()?;
    let api = StorefrontApi::new(&config);

    let addresses = api.addresses(&user.id).await?;
    if addresses.is_empty() {
        println!("No saved addresses.");
        return Ok(());
    }

    for address in &addresses {
        println!(
            "{:<12} {:<10} {}, {}, {} {} ({})",
            address.id,
            address.label,
            address.street,
            address.city,
            address.state,
            address.postal_code,
            address.phone
        );
    }
    Ok(())
}

/// Save a new address for the current user.
pub async fn add(address: NewAddress) -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let user = CurrentUser::from_env()?;
    let api = StorefrontApi::new(&config);

    let created = api.create_address(&user.id, &address).await?;
    println!("Saved address {} ({})", created.id, created.label);
    Ok(())
}
