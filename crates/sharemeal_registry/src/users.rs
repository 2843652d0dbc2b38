// --- File: crates/sharemeal_registry/src/users.rs ---
//! Mock account directory.
//!
//! Plain-text passwords and a linear scan: this stands in for a real
//! identity provider and is only meant for demos and tests.

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::RegistryError;
use crate::models::User;

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_users(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Resolves a session user id.
    pub fn find(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_by_phone(&self, phone: &str) -> Option<&User> {
        let phone = phone.trim();
        self.users.iter().find(|u| u.phone.trim() == phone)
    }

    /// Adds `user` unless its id or phone is already taken.
    pub(crate) fn insert(&mut self, user: User) -> bool {
        if self.find(&user.id).is_some() || self.find_by_phone(&user.phone).is_some() {
            return false;
        }
        self.users.push(user);
        true
    }

    pub fn authenticate(&self, phone: &str, password: &str) -> Result<User, RegistryError> {
        match self.find_by_phone(phone) {
            Some(user) if user.password.as_deref() == Some(password) => {
                info!("User {} signed in", user.id);
                Ok(user.clone())
            }
            _ => {
                warn!("Failed sign-in for {}", phone.trim());
                Err(RegistryError::InvalidCredentials)
            }
        }
    }

    /// Creates an account. An already registered phone leaves the existing
    /// record untouched.
    pub fn register(
        &mut self,
        phone: &str,
        password: &str,
        name: &str,
    ) -> Result<User, RegistryError> {
        let phone = phone.trim();
        let name = name.trim();
        if phone.is_empty() || name.is_empty() || password.is_empty() {
            return Err(RegistryError::Validation(
                "Name, phone number and password are required".to_string(),
            ));
        }
        if self.find_by_phone(phone).is_some() {
            warn!("Registration rejected: {} already exists", phone);
            return Err(RegistryError::DuplicateRegistration(phone.to_string()));
        }

        let user = User {
            id: format!("user-{}", Uuid::new_v4()),
            name: name.to_string(),
            phone: phone.to_string(),
            password: Some(password.to_string()),
            is_verified: Some(true),
        };
        info!("Registered user {} ({})", user.id, user.name);
        self.users.push(user.clone());
        Ok(user)
    }
}
