use ethers::abi::{encode, Token};
use ethers::types::transaction::eip712::{EIP712Domain, Eip712};
use ethers::types::{Address, Bytes, H256, U256};
use ethers::utils::keccak256;
use lazy_static::lazy_static;
use sha2::{Digest, Sha256};

use crate::consts::{
    DEFAULT_GAS_PER_PUBDATA_LIMIT, EIP712_DOMAIN_NAME, EIP712_DOMAIN_VERSION, EIP712_TX_TYPE,
};
use crate::prelude::{Error, Result};
use crate::types::TransactionRequest;

const TRANSACTION_TYPE: &str = "Transaction(uint256 txType,uint256 from,uint256 to,\
     uint256 gasLimit,uint256 gasPerPubdataByteLimit,uint256 maxFeePerGas,\
     uint256 maxPriorityFeePerGas,uint256 paymaster,uint256 nonce,uint256 value,\
     bytes data,bytes32[] factoryDeps,bytes paymasterInput)";

lazy_static! {
    static ref TRANSACTION_TYPE_HASH: [u8; 32] = keccak256(TRANSACTION_TYPE);
}

/// Fully-resolved signable view of an extended-format transaction. Every
/// field the signature must be bound to appears here concretely; optional
/// draft fields have already collapsed to their defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct Eip712Transaction {
    pub tx_type: U256,
    pub from: Address,
    pub to: Address,
    pub gas_limit: U256,
    pub gas_per_pubdata_byte_limit: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    pub paymaster: Address,
    pub nonce: U256,
    pub value: U256,
    pub data: Bytes,
    pub factory_deps: Vec<H256>,
    pub paymaster_input: Bytes,
    chain_id: u64,
}

impl Eip712Transaction {
    /// Resolves a draft request into the signable view. Missing numeric
    /// fields default to zero and missing data to empty bytes; `from` has no
    /// sensible default and is required.
    pub fn from_request(tx: &TransactionRequest, chain_id: u64) -> Result<Self> {
        let from = tx.from.ok_or_else(|| {
            Error::TransactionSerialization("transaction `from` is not set".to_string())
        })?;

        let max_fee_per_gas = tx.max_fee_per_gas.or(tx.gas_price).unwrap_or_default();
        let max_priority_fee_per_gas = tx.max_priority_fee_per_gas.unwrap_or(max_fee_per_gas);

        let meta = tx.custom_data.clone().unwrap_or_default();
        let gas_per_pubdata_byte_limit = meta
            .gas_per_pubdata
            .unwrap_or_else(|| U256::from(DEFAULT_GAS_PER_PUBDATA_LIMIT));
        let (paymaster, paymaster_input) = meta
            .paymaster_params
            .map(|params| (params.paymaster, params.paymaster_input))
            .unwrap_or_default();
        let factory_deps = meta
            .factory_deps
            .iter()
            .map(|dep| hash_bytecode(dep))
            .collect::<Result<Vec<_>>>()?;

        Ok(Eip712Transaction {
            tx_type: U256::from(EIP712_TX_TYPE as u64),
            from,
            to: tx.to.unwrap_or_default(),
            gas_limit: tx.gas.unwrap_or_default(),
            gas_per_pubdata_byte_limit,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            paymaster,
            nonce: tx.nonce.unwrap_or_default(),
            value: tx.value.unwrap_or_default(),
            data: tx.data.clone().unwrap_or_default(),
            factory_deps,
            paymaster_input,
            chain_id,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl Eip712 for Eip712Transaction {
    type Error = Error;

    fn domain(&self) -> Result<EIP712Domain> {
        Ok(EIP712Domain {
            name: Some(EIP712_DOMAIN_NAME.to_string()),
            version: Some(EIP712_DOMAIN_VERSION.to_string()),
            chain_id: Some(U256::from(self.chain_id)),
            verifying_contract: None,
            salt: None,
        })
    }

    fn type_hash() -> Result<[u8; 32]> {
        Ok(*TRANSACTION_TYPE_HASH)
    }

    fn struct_hash(&self) -> Result<[u8; 32]> {
        // Dynamic members (bytes, bytes32[]) contribute their hash, not their
        // raw encoding; everything else is a 32-byte word.
        let factory_deps_hash = keccak256(
            self.factory_deps
                .iter()
                .flat_map(|hash| hash.as_bytes().to_vec())
                .collect::<Vec<u8>>(),
        );

        let encoded = encode(&[
            Token::FixedBytes(Self::type_hash()?.to_vec()),
            Token::Uint(self.tx_type),
            Token::Uint(address_to_uint(&self.from)),
            Token::Uint(address_to_uint(&self.to)),
            Token::Uint(self.gas_limit),
            Token::Uint(self.gas_per_pubdata_byte_limit),
            Token::Uint(self.max_fee_per_gas),
            Token::Uint(self.max_priority_fee_per_gas),
            Token::Uint(address_to_uint(&self.paymaster)),
            Token::Uint(self.nonce),
            Token::Uint(self.value),
            Token::FixedBytes(keccak256(self.data.as_ref()).to_vec()),
            Token::FixedBytes(factory_deps_hash.to_vec()),
            Token::FixedBytes(keccak256(self.paymaster_input.as_ref()).to_vec()),
        ]);

        Ok(keccak256(encoded))
    }
}

fn address_to_uint(address: &Address) -> U256 {
    U256::from_big_endian(address.as_bytes())
}

/// Commitment hash of a factory dependency bytecode: sha256 with the first
/// four bytes replaced by a version tag and the length in 32-byte words.
/// Bytecode must be word-aligned with an odd word count.
pub fn hash_bytecode(bytecode: &[u8]) -> Result<H256> {
    if bytecode.len() % 32 != 0 {
        return Err(Error::TransactionSerialization(
            "bytecode length is not divisible by 32".to_string(),
        ));
    }
    let word_count = bytecode.len() / 32;
    if word_count % 2 == 0 {
        return Err(Error::TransactionSerialization(
            "bytecode length in 32-byte words must be odd".to_string(),
        ));
    }
    if word_count > u16::MAX as usize {
        return Err(Error::TransactionSerialization(
            "bytecode is longer than the supported 2^16 - 1 words".to_string(),
        ));
    }

    let mut hash: [u8; 32] = Sha256::digest(bytecode).into();
    hash[0] = 1;
    hash[1] = 0;
    hash[2..4].copy_from_slice(&(word_count as u16).to_be_bytes());
    Ok(H256::from(hash))
}
