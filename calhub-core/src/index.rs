//! The in-memory user index.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CalHubError, CalHubResult};
use crate::identifier::Identifier;
use crate::user::User;

/// Key for removing a user.
#[derive(Debug, Clone, Copy)]
pub enum UserKey<'a> {
    Name(&'a str),
    Id(Identifier),
}

/// Dual-keyed table: username → identifier → user.
///
/// `add_user` and `remove_user` update both maps together, so every username
/// resolves to a user whose identifier is the key it is stored under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserIndex {
    usernames: BTreeMap<String, Identifier>,
    users: BTreeMap<Identifier, User>,
}

impl UserIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.usernames.keys().map(String::as_str)
    }

    pub fn has_username(&self, name: &str) -> bool {
        self.usernames.contains_key(name)
    }

    pub fn user_id_for(&self, name: &str) -> Option<Identifier> {
        self.usernames.get(name).copied()
    }

    pub fn has_user_id(&self, id: Identifier) -> bool {
        self.users.contains_key(&id)
    }

    pub fn user_for(&self, id: Identifier) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn user_for_mut(&mut self, id: Identifier) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    pub fn user_by_name(&self, name: &str) -> Option<&User> {
        self.user_id_for(name).and_then(|id| self.user_for(id))
    }

    /// Insert a user under both keys. Fails without touching the index if the
    /// username or identifier is already taken.
    pub fn add_user(&mut self, user: User) -> CalHubResult<()> {
        if self.has_username(user.username()) {
            return Err(CalHubError::conflict("User", user.username()));
        }
        if self.has_user_id(user.id()) {
            return Err(CalHubError::conflict("User", user.id()));
        }

        self.usernames
            .insert(user.username().to_string(), user.id());
        self.users.insert(user.id(), user);
        Ok(())
    }

    /// Remove a user from both maps. Returns whether anything was removed.
    pub fn remove_user(&mut self, key: UserKey<'_>) -> bool {
        let id = match key {
            UserKey::Name(name) => match self.usernames.remove(name) {
                Some(id) => id,
                None => return false,
            },
            UserKey::Id(id) => id,
        };

        match self.users.remove(&id) {
            Some(user) => {
                self.usernames.remove(user.username());
                true
            }
            None => matches!(key, UserKey::Name(_)),
        }
    }

    /// Resolve credentials to the user's identifier.
    ///
    /// An unknown username and a wrong password are both `Auth` errors, so
    /// callers can't use this to probe for usernames.
    pub fn authenticate(&self, username: &str, password: &str) -> CalHubResult<Identifier> {
        match self.user_by_name(username) {
            Some(user) if user.password_matches(password) => Ok(user.id()),
            _ => Err(CalHubError::auth("invalid username or password")),
        }
    }
}
