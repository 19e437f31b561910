//! Lookup key normalization.
//!
//! Stores look users up by normalized name and email and never normalize
//! themselves; callers produce the keys with a [`LookupNormalizer`].

/// Produces case-insensitive lookup keys.
pub trait LookupNormalizer: Send + Sync {
    /// Normalizes a user or role name.
    fn normalize_name(&self, name: &str) -> String;

    /// Normalizes an email address.
    fn normalize_email(&self, email: &str) -> String;
}

/// Uppercases keys without any locale-specific folding.
#[derive(Debug, Default, Clone, Copy)]
pub struct UpperInvariantNormalizer;

impl LookupNormalizer for UpperInvariantNormalizer {
    fn normalize_name(&self, name: &str) -> String {
        name.to_uppercase()
    }

    fn normalize_email(&self, email: &str) -> String {
        email.to_uppercase()
    }
}
