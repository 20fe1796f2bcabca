//! Dual-chain wallet SDK for ZKsync Era.
//!
//! One signing key serves two chains: the Ethereum settlement chain (L1) and
//! the Era rollup (L2). [`Wallet`] decides per transaction request whether the
//! plain Ethereum envelope applies or the EIP-712 extended format (type
//! `0x71`) that carries an out-of-band custom-data block, fills chain
//! defaults, and produces the signed wire encoding.

mod consts;
mod errors;
pub mod eip712;
mod helpers;
pub mod prelude;
mod signer;
mod types;
mod wallet;

pub use consts::{
    Network, DEFAULT_GAS_PER_PUBDATA_LIMIT, EIP1559_TX_TYPE, EIP712_TX_TYPE, ERA_MAINNET_URL,
    ERA_TESTNET_URL, ETH_MAINNET_URL, ETH_TESTNET_URL, LEGACY_TX_TYPE,
};
pub use eip712::{decode_eip712, hash_bytecode, serialize_eip712, Eip712Transaction};
pub use errors::Error;
pub use signer::Eip712Signer;
pub use types::{Eip712Meta, PaymasterParams, TransactionRequest};
pub use wallet::{ChainAccount, Wallet};
