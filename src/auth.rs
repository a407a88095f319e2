use crate::config::{Session, now_utc};
use crate::db::Db;
use crate::error::EngineError;
use anyhow::{Result, anyhow};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use password_hash::SaltString;
use rand_core::OsRng;
use uuid::Uuid;

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub fn register(db: &Db, username: &str, password: &str) -> Result<i64> {
    let username = username.trim();
    if username.is_empty() {
        return Err(anyhow!("Username must not be empty"));
    }
    if password.is_empty() {
        return Err(anyhow!("Password must not be empty"));
    }

    let password_hash = hash_password(password)?;
    db.create_user(username, &password_hash, now_utc())
}

/// Checks credentials against the stored hash. Unknown username and wrong
/// password produce the same `InvalidCredentials` failure so the message
/// never confirms which usernames exist.
pub fn login(db: &Db, username: &str, password: &str) -> Result<Session> {
    let username = username.trim();

    let Some((user_id, stored_hash)) = db.find_user(username)? else {
        return Err(EngineError::InvalidCredentials.into());
    };
    if !verify_password(&stored_hash, password) {
        return Err(EngineError::InvalidCredentials.into());
    }

    Ok(Session {
        user_id,
        username: username.to_string(),
        token: Uuid::new_v4(),
    })
}
