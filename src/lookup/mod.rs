//! Lookup domain types.
//!
//! - key.rs: the validated CEP every race starts from
//! - address.rs: per-provider response shapes and their unified projection

pub mod address;
pub mod key;

pub use address::{Address, AddressRecord, BrasilApiAddress, ViaCepAddress};
pub use key::{KeyError, LookupKey};
