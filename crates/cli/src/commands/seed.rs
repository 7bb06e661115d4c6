//! Sample data commands.

use proshop_api::db::Stores;
use proshop_api::seed::{self, SAMPLE_PASSWORD};

/// Replace all users and products with the sample data.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a write fails.
pub async fn import() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let summary = seed::import(&Stores::postgres(&pool)).await?;

    tracing::info!(
        users = summary.users,
        products = summary.products,
        "Data Imported!"
    );

    #[allow(clippy::print_stdout)]
    {
        println!(
            "Imported {} users and {} products (password for all users: {SAMPLE_PASSWORD})",
            summary.users, summary.products
        );
    }
    Ok(())
}

/// Remove all orders, products and users.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a delete fails.
pub async fn destroy() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    seed::destroy(&Stores::postgres(&pool)).await?;

    tracing::info!("Data Destroyed!");
    Ok(())
}
