/**
 * Password Hashing
 *
 * Thin wrapper over bcrypt that carries the configured cost.
 */

use crate::backend::error::BackendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, BackendError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Check `password` against a stored hash
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, BackendError> {
        Ok(bcrypt::verify(password, hash)?)
    }
}
