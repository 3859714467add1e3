use std::sync::Arc;

use tracing::info;

use quill_types::models::{NewUser, User};

use crate::error::{ServiceError, ValidationError};
use crate::gateway::{GatewayError, UserGateway};

const MIN_PASSWORD_LEN: usize = 6;

/// Registration and login rules.
pub struct IdentityService {
    users: Arc<dyn UserGateway>,
}

impl IdentityService {
    pub fn new(users: Arc<dyn UserGateway>) -> Self {
        Self { users }
    }

    pub fn register(&self, email: &str, password: &str, username: &str) -> Result<User, ServiceError> {
        if email.trim().is_empty() {
            return Err(ValidationError::EmailRequired.into());
        }
        if !email.contains('@') {
            return Err(ValidationError::EmailInvalid.into());
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort.into());
        }
        if username.trim().is_empty() {
            return Err(ValidationError::UsernameRequired.into());
        }

        let email = normalize_email(email);
        if self.users.find_by_email(&email)?.is_some() {
            return Err(ServiceError::EmailAlreadyRegistered { email });
        }

        let new_user = NewUser {
            email,
            password: password.to_string(),
            username: username.trim().to_string(),
        };
        // A concurrent registration can win between the lookup and the insert.
        let inserted = match self.users.create(&new_user) {
            Ok(inserted) => inserted,
            Err(GatewayError::Duplicate) => {
                return Err(ServiceError::EmailAlreadyRegistered { email: new_user.email });
            }
            Err(e) => return Err(e.into()),
        };

        info!("Registered user {} ({})", inserted.id, new_user.email);
        Ok(User {
            id: inserted.id,
            email: new_user.email,
            password: new_user.password,
            username: new_user.username,
            created_at: inserted.created_at,
        })
    }

    pub fn login(&self, email: &str, password: &str) -> Result<User, ServiceError> {
        if email.trim().is_empty() {
            return Err(ValidationError::EmailRequired.into());
        }
        if password.is_empty() {
            return Err(ValidationError::PasswordRequired.into());
        }

        let user = self
            .users
            .find_by_email(&normalize_email(email))?
            .ok_or(ServiceError::InvalidCredentials)?;

        // Plain equality: passwords are stored as given.
        if user.password != password {
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(user)
    }
}

/// Uniqueness and lookup key for accounts.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
