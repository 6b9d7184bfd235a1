//! # State Addressing
//!
//! Every piece of ledger state lives at a 70-hex-character address. The
//! transaction header must declare, up front, every address the transaction
//! will read (inputs) or write (outputs); validators refuse any access
//! outside those sets.
//!
//! The pipeline consumes addressing through [`AddressDeriver`] so the
//! namespace layout stays owned by whoever owns the transaction family.
//! [`RbacAddresser`] is the family's own layout:
//!
//! ```text
//! | namespace (6) | space (2) | sha512(identifier)[..62] |
//! | sha512("rbac")[..6] | "00" = user |                  |
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{ADDRESS_HASH_LENGTH, ADDRESS_LENGTH, FAMILY_NAME, NAMESPACE_LENGTH, USER_ADDRESS_SPACE};
use crate::crypto::hash::sha512_hex;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A state address: a fixed-format lowercase hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wraps an already-derived address string.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Borrow the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the address, returning the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

// ---------------------------------------------------------------------------
// AddressDeriver
// ---------------------------------------------------------------------------

/// Maps logical identifiers to state addresses.
///
/// Implementations must be deterministic (same identifier, same address,
/// every time) and collision-resistant across distinct identifiers. The
/// pipeline relies on both and checks neither.
pub trait AddressDeriver {
    /// Address of the user record keyed by `identifier`.
    fn derive_user_address(&self, identifier: &str) -> Address;
}

impl<T: AddressDeriver + ?Sized> AddressDeriver for &T {
    fn derive_user_address(&self, identifier: &str) -> Address {
        (**self).derive_user_address(identifier)
    }
}

// ---------------------------------------------------------------------------
// RbacAddresser
// ---------------------------------------------------------------------------

/// The RBAC family's address layout.
#[derive(Debug, Clone)]
pub struct RbacAddresser {
    namespace: String,
}

impl RbacAddresser {
    /// Builds the addresser, computing the family namespace once.
    pub fn new() -> Self {
        Self {
            namespace: family_namespace(),
        }
    }

    /// The 6-character namespace prefix shared by every RBAC address.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns `true` if `address` lies in the RBAC user address space.
    pub fn is_user_address(&self, address: &str) -> bool {
        address.len() == ADDRESS_LENGTH
            && address.starts_with(&self.namespace)
            && address
                .get(NAMESPACE_LENGTH..)
                .is_some_and(|rest| rest.starts_with(USER_ADDRESS_SPACE))
    }
}

impl Default for RbacAddresser {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressDeriver for RbacAddresser {
    fn derive_user_address(&self, identifier: &str) -> Address {
        let digest = sha512_hex(identifier.as_bytes());
        let mut address = String::with_capacity(ADDRESS_LENGTH);
        address.push_str(&self.namespace);
        address.push_str(USER_ADDRESS_SPACE);
        address.push_str(&digest[..ADDRESS_HASH_LENGTH]);
        Address(address)
    }
}

/// `sha512(FAMILY_NAME)` truncated to [`NAMESPACE_LENGTH`] hex characters.
pub fn family_namespace() -> String {
    let mut digest = sha512_hex(FAMILY_NAME.as_bytes());
    digest.truncate(NAMESPACE_LENGTH);
    digest
}
