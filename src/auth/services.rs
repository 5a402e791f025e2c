use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use sqlx::SqlitePool;
use tracing::{debug, error};

use crate::{auth::repo_types::User, error::AppError};

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Register a new account. Fails with `DuplicateEmail` when the email is taken.
pub async fn create_user(
    db: &SqlitePool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let hash = hash_password(password)?;
    match User::create(db, name, email, &hash).await {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            debug!(email = %email, "unique violation on users.email");
            Err(AppError::DuplicateEmail)
        }
        Err(e) => Err(e.into()),
    }
}

/// Look up an account by exact email and password.
///
/// Unknown email and wrong password both yield `Ok(None)`.
pub async fn find_user(
    db: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let Some(user) = User::find_by_email(db, email).await? else {
        return Ok(None);
    };
    if verify_password(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// [`find_user`] with a miss turned into `InvalidCredentials`.
pub async fn authenticate(db: &SqlitePool, email: &str, password: &str) -> Result<User, AppError> {
    find_user(db, email, password)
        .await?
        .ok_or(AppError::InvalidCredentials)
}

#[cfg(test)]
mod password_tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("correct-horse-battery-staple").expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
