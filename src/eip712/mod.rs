//! Digest computation and wire encoding for EIP-712 extended-format
//! transactions.
//!
//! Both operations are pure: the same populated request always hashes to the
//! same signing digest and serializes to the same bytes. The wire layout is
//! the one the Era sequencer decodes, matched field for field.

mod serialize;
mod transaction;

pub use serialize::{decode_eip712, serialize_eip712};
pub use transaction::{hash_bytecode, Eip712Transaction};
