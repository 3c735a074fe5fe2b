// src/services/auth.rs

use std::{collections::HashMap, sync::Arc};

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    models::auth::{AuthContext, AuthResponse, Claims, Role, UserAccount},
};

/// A login as it comes from configuration, before hashing.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<HashMap<String, UserAccount>>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(accounts: Vec<UserAccount>, jwt_secret: String, token_ttl: Duration) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.username.clone(), account))
            .collect();
        Self {
            accounts: Arc::new(accounts),
            jwt_secret,
            token_ttl,
        }
    }

    /// Hashes the configured passwords once at startup, off the async runtime.
    pub async fn hash_accounts(credentials: Vec<Credentials>, cost: u32) -> Result<Vec<UserAccount>, AppError> {
        let hashed = tokio::task::spawn_blocking(move || {
            credentials
                .into_iter()
                .map(|c| -> Result<UserAccount, bcrypt::BcryptError> {
                    Ok(UserAccount {
                        password_hash: hash(&c.password, cost)?,
                        username: c.username,
                        role: c.role,
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(|e| anyhow::anyhow!("Password hashing task failed: {}", e))??;

        Ok(hashed)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, AppError> {
        let account = self
            .accounts
            .get(username)
            .cloned()
            .ok_or(AppError::InvalidCredentials)?;

        let password = password.to_owned();
        let password_hash = account.password_hash.clone();

        // bcrypt is CPU-bound
        let is_password_valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Password verification task failed: {}", e))??;

        if !is_password_valid {
            tracing::warn!("Failed login for '{}'", username);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.issue_token(&account.username, account.role)?;
        tracing::info!("🔑 '{}' logged in as {:?}", account.username, account.role);

        Ok(AuthResponse { token, role: account.role })
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthContext, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        // Accounts removed from configuration lose access immediately
        let account = self
            .accounts
            .get(&token_data.claims.sub)
            .ok_or(AppError::InvalidToken)?;

        Ok(AuthContext {
            username: account.username.clone(),
            role: account.role,
        })
    }

    fn issue_token(&self, username: &str, role: Role) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: username.to_string(),
            role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service_with_ttl(ttl: Duration) -> AuthService {
        let accounts = AuthService::hash_accounts(
            vec![
                Credentials { username: "admin".into(), password: "admin-pw".into(), role: Role::Admin },
                Credentials { username: "cashier".into(), password: "cashier-pw".into(), role: Role::Cashier },
            ],
            4,
        )
        .await
        .unwrap();
        AuthService::new(accounts, "test-secret".into(), ttl)
    }

    #[tokio::test]
    async fn login_issues_token_carrying_role() {
        let service = service_with_ttl(Duration::hours(1)).await;

        let response = service.login("cashier", "cashier-pw").await.unwrap();
        assert_eq!(response.role, Role::Cashier);

        let context = service.validate_token(&response.token).unwrap();
        assert_eq!(context.username, "cashier");
        assert_eq!(context.role, Role::Cashier);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_rejected() {
        let service = service_with_ttl(Duration::hours(1)).await;

        assert!(matches!(
            service.login("admin", "nope").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("ghost", "admin-pw").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn tampered_and_expired_tokens_are_invalid() {
        let service = service_with_ttl(Duration::hours(1)).await;
        let token = service.login("admin", "admin-pw").await.unwrap().token;

        assert!(matches!(
            service.validate_token(&format!("{}x", token)),
            Err(AppError::InvalidToken)
        ));

        let expired = service_with_ttl(Duration::hours(-2)).await;
        let old = expired.login("admin", "admin-pw").await.unwrap().token;
        assert!(matches!(expired.validate_token(&old), Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn token_from_other_secret_is_invalid() {
        let service = service_with_ttl(Duration::hours(1)).await;
        let other = AuthService::new(Vec::new(), "other-secret".into(), Duration::hours(1));
        let token = service.login("admin", "admin-pw").await.unwrap().token;

        assert!(matches!(other.validate_token(&token), Err(AppError::InvalidToken)));
    }
}
