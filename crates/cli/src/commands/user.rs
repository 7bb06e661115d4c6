//! User account commands.
//!
//! # Usage
//!
//! ```bash
//! # Check a seeded account's password (read from stdin)
//! echo 123456 | proshop user check -e admin@example.com
//! ```

use proshop_api::db::{Stores, UserStore};
use proshop_api::services::auth::{AuthError, AuthService};
use proshop_core::User;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::DatabaseError;

#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Failed to read password: {0}")]
    Input(#[from] std::io::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Check `email` against the password given on the first line of stdin.
pub async fn check(email: &str) -> Result<(), UserError> {
    let pool = super::connect().await?;
    let stores = Stores::postgres(&pool);

    let mut password = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut password)
        .await?;

    let password = password.trim_end_matches(['\r', '\n']);
    let user = verify(stores.users.as_ref(), email, password).await?;

    #[allow(clippy::print_stdout)]
    {
        println!(
            "Credentials OK for {} <{}>{}",
            user.name,
            user.email,
            if user.is_admin { " (admin)" } else { "" }
        );
    }
    Ok(())
}

async fn verify(users: &dyn UserStore, email: &str, password: &str) -> Result<User, UserError> {
    let user = AuthService::new(users)
        .verify_credentials(email, password)
        .await?;
    tracing::info!(user_id = %user.id, "Credentials verified");
    Ok(user)
}
