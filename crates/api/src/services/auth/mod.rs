//! Password handling.
//!
//! Passwords are hashed with Argon2id and stored as PHC strings. There is no
//! login endpoint; [`AuthService::verify_credentials`] exists so seeded
//! accounts can be checked with `proshop user check`.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;

use proshop_core::{Email, NewUser, User, UserId};

use crate::db::UserStore;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Credential checks against a [`UserStore`].
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(users: &'a dyn UserStore) -> Self {
        Self { users }
    }

    /// Look up a user by email and check the password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed and
    /// `AuthError::InvalidCredentials` if the user is unknown or the password
    /// does not match.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;
        Ok(user)
    }
}

/// Turn a [`NewUser`] into a storable [`User`], hashing its password.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` for passwords shorter than six characters
/// and `AuthError::PasswordHash` if hashing fails.
pub fn build_user(new: NewUser) -> Result<User, AuthError> {
    validate_password(&new.password)?;
    let password_hash = hash_password(&new.password)?;

    Ok(User {
        id: UserId::generate(),
        name: new.name,
        email: new.email,
        password_hash,
        is_admin: new.is_admin,
        created_at: Utc::now(),
    })
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryUserStore;

    fn new_user(password: &str) -> NewUser {
        NewUser {
            name: "Justin Cho".to_owned(),
            email: Email::parse("justin@example.com").unwrap(),
            password: password.to_owned(),
            is_admin: false,
        }
    }

    #[test]
    fn test_build_user_hashes_password() {
        let user = build_user(new_user("123456")).unwrap();
        assert!(user.password_hash.starts_with("$argon2id$"));
        assert!(!user.password_hash.contains("123456"));
    }

    #[test]
    fn test_build_user_rejects_short_password() {
        assert!(matches!(
            build_user(new_user("123")),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let store = MemoryUserStore::default();
        store
            .insert_many(vec![build_user(new_user("123456")).unwrap()])
            .await
            .unwrap();
        let auth = AuthService::new(&store);

        let user = auth
            .verify_credentials("Justin@Example.com", "123456")
            .await
            .unwrap();
        assert_eq!(user.name, "Justin Cho");

        assert!(matches!(
            auth.verify_credentials("justin@example.com", "wrong!").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.verify_credentials("nobody@example.com", "123456").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
