use ethers::types::{
    transaction::eip2718::TypedTransaction, Address, Bytes, Eip1559TransactionRequest,
    NameOrAddress, TransactionRequest as EthTransactionRequest, U256, U64,
};
use serde::{Deserialize, Serialize};

use crate::consts::{EIP1559_TX_TYPE, EIP712_TX_TYPE};

/// Draft of a transaction on either chain. Every field is optional until
/// population; the `type` field together with `custom_data` decides whether
/// the plain Ethereum envelope or the EIP-712 extended format applies.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<U64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<U64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<Eip712Meta>,
}

/// Custom-data side channel of an extended-format transaction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_per_pubdata: Option<U256>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub factory_deps: Vec<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_signature: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_params: Option<PaymasterParams>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymasterParams {
    pub paymaster: Address,
    pub paymaster_input: Bytes,
}

impl TransactionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, transaction_type: u8) -> Self {
        self.transaction_type = Some(U64::from(transaction_type as u64));
        self
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_data(mut self, data: Bytes) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_gas(mut self, gas: U256) -> Self {
        self.gas = Some(gas);
        self
    }

    pub fn with_gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    pub fn with_nonce(mut self, nonce: U256) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(U64::from(chain_id));
        self
    }

    pub fn with_custom_data(mut self, custom_data: Eip712Meta) -> Self {
        self.custom_data = Some(custom_data);
        self
    }

    /// Whether this request takes the extended-format path: either the
    /// custom-data block is present or the type says so explicitly.
    pub fn is_eip712(&self) -> bool {
        self.custom_data.is_some()
            || self.transaction_type == Some(U64::from(EIP712_TX_TYPE as u64))
    }

    /// Ethereum-envelope view of this request, used when delegating to the
    /// standard populator and signer. Fee-market requests map to the EIP-1559
    /// envelope, everything else to the legacy one.
    pub fn as_typed_transaction(&self) -> TypedTransaction {
        match self.transaction_type {
            Some(t) if t == U64::from(EIP1559_TX_TYPE as u64) => {
                TypedTransaction::Eip1559(Eip1559TransactionRequest {
                    from: self.from,
                    to: self.to.map(NameOrAddress::Address),
                    gas: self.gas,
                    value: self.value,
                    data: self.data.clone(),
                    nonce: self.nonce,
                    access_list: Default::default(),
                    max_priority_fee_per_gas: self.max_priority_fee_per_gas,
                    max_fee_per_gas: self.max_fee_per_gas,
                    chain_id: self.chain_id,
                })
            }
            _ => TypedTransaction::Legacy(EthTransactionRequest {
                from: self.from,
                to: self.to.map(NameOrAddress::Address),
                gas: self.gas,
                gas_price: self.gas_price,
                value: self.value,
                data: self.data.clone(),
                nonce: self.nonce,
                chain_id: self.chain_id,
                ..Default::default()
            }),
        }
    }

    /// Copies fields the standard populator resolved back into the draft.
    /// Fields already set keep their value only if the populator left them
    /// untouched; the populator itself never unsets anything.
    pub(crate) fn apply_filled(&mut self, typed: &TypedTransaction) {
        if let Some(from) = typed.from() {
            self.from = Some(*from);
        }
        if let Some(NameOrAddress::Address(to)) = typed.to() {
            self.to = Some(*to);
        }
        if let Some(nonce) = typed.nonce() {
            self.nonce = Some(*nonce);
        }
        if let Some(gas) = typed.gas() {
            self.gas = Some(*gas);
        }
        if let Some(chain_id) = typed.chain_id() {
            self.chain_id = Some(chain_id);
        }
        match typed {
            TypedTransaction::Eip1559(inner) => {
                if let Some(max_fee) = inner.max_fee_per_gas {
                    self.max_fee_per_gas = Some(max_fee);
                }
                if let Some(priority_fee) = inner.max_priority_fee_per_gas {
                    self.max_priority_fee_per_gas = Some(priority_fee);
                }
            }
            _ => {
                if let Some(gas_price) = typed.gas_price() {
                    self.gas_price = Some(gas_price);
                }
            }
        }
    }
}
