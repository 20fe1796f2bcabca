use ethers::types::{Address, Bytes, Signature, U256};
use ethers::utils::rlp::{Rlp, RlpStream};

use crate::consts::{DEFAULT_GAS_PER_PUBDATA_LIMIT, EIP712_TX_TYPE};
use crate::helpers::rlp_opt;
use crate::prelude::{Error, Result};
use crate::types::{Eip712Meta, PaymasterParams, TransactionRequest};

/// Number of RLP items in the extended-format payload after the type byte.
const EIP712_TX_FIELDS: usize = 16;

/// Encodes a fully-populated extended-format transaction into its wire bytes:
/// the `0x71` type byte followed by the RLP list the Era sequencer expects.
///
/// An account-abstraction signature travels inside the custom-data block; an
/// ECDSA signature over the whole payload may instead be passed explicitly.
/// When neither slot is filled for the outer triple, the chain id takes the
/// recovery position, mirroring the unsigned legacy convention.
pub fn serialize_eip712(
    tx: &TransactionRequest,
    signature: Option<&Signature>,
) -> Result<Bytes> {
    let chain_id = tx
        .chain_id
        .ok_or_else(|| {
            Error::TransactionSerialization("transaction chainId is not set".to_string())
        })?
        .as_u64();
    let from = tx.from.ok_or_else(|| {
        Error::TransactionSerialization("transaction `from` is not set".to_string())
    })?;

    let meta = tx.custom_data.clone().unwrap_or_default();
    if let Some(custom_signature) = &meta.custom_signature {
        if custom_signature.is_empty() {
            return Err(Error::TransactionSerialization(
                "empty custom signatures are not supported".to_string(),
            ));
        }
    }

    let mut rlp = RlpStream::new_list(EIP712_TX_FIELDS);
    rlp.append(&tx.nonce.unwrap_or_default());
    rlp.append(&tx.max_priority_fee_per_gas.or(tx.gas_price).unwrap_or_default());
    rlp.append(&tx.max_fee_per_gas.or(tx.gas_price).unwrap_or_default());
    rlp.append(&tx.gas.unwrap_or_default());
    rlp_opt(&mut rlp, &tx.to);
    rlp.append(&tx.value.unwrap_or_default());
    rlp.append(&tx.data.clone().unwrap_or_default().to_vec());

    match signature {
        Some(signature) => {
            let y_parity = if signature.v >= 27 { signature.v - 27 } else { signature.v };
            rlp.append(&y_parity);
            rlp.append(&signature.r);
            rlp.append(&signature.s);
        }
        None => {
            rlp.append(&chain_id);
            rlp.append(&"");
            rlp.append(&"");
        }
    }

    rlp.append(&chain_id);
    rlp.append(&from);
    rlp.append(
        &meta
            .gas_per_pubdata
            .unwrap_or_else(|| U256::from(DEFAULT_GAS_PER_PUBDATA_LIMIT)),
    );
    rlp.begin_list(meta.factory_deps.len());
    for dep in &meta.factory_deps {
        rlp.append(&dep.to_vec());
    }
    rlp.append(&meta.custom_signature.unwrap_or_default().to_vec());
    match &meta.paymaster_params {
        Some(params) => {
            rlp.begin_list(2);
            rlp.append(&params.paymaster);
            rlp.append(&params.paymaster_input.to_vec());
        }
        None => {
            rlp.begin_list(0);
        }
    }

    let mut encoded = rlp.out().to_vec();
    encoded.insert(0, EIP712_TX_TYPE);
    Ok(Bytes::from(encoded))
}

/// Decodes extended-format wire bytes back into a transaction request,
/// validating the type byte and the field layout.
pub fn decode_eip712(bytes: &[u8]) -> Result<TransactionRequest> {
    match bytes.first() {
        Some(&EIP712_TX_TYPE) => {}
        Some(other) => {
            return Err(Error::TransactionSerialization(format!(
                "unknown transaction type 0x{other:02x}, expected 0x{EIP712_TX_TYPE:02x}"
            )))
        }
        None => {
            return Err(Error::TransactionSerialization(
                "empty transaction bytes".to_string(),
            ))
        }
    }

    let rlp = Rlp::new(&bytes[1..]);
    let item_count = rlp.item_count()?;
    if item_count != EIP712_TX_FIELDS {
        return Err(Error::TransactionSerialization(format!(
            "expected {EIP712_TX_FIELDS} fields, got {item_count}"
        )));
    }

    let to = decode_optional_address(&rlp, 4)?;
    let from = decode_optional_address(&rlp, 11)?.ok_or_else(|| {
        Error::TransactionSerialization("transaction `from` is not set".to_string())
    })?;

    let custom_signature: Vec<u8> = rlp.val_at(14)?;
    let paymaster_list = rlp.at(15)?;
    let paymaster_params = match paymaster_list.item_count()? {
        0 => None,
        2 => {
            let paymaster: Vec<u8> = paymaster_list.val_at(0)?;
            if paymaster.len() != 20 {
                return Err(Error::TransactionSerialization(
                    "malformed paymaster address".to_string(),
                ));
            }
            Some(PaymasterParams {
                paymaster: Address::from_slice(&paymaster),
                paymaster_input: Bytes::from(paymaster_list.val_at::<Vec<u8>>(1)?),
            })
        }
        _ => {
            return Err(Error::TransactionSerialization(
                "malformed paymaster params".to_string(),
            ))
        }
    };

    Ok(TransactionRequest {
        transaction_type: Some((EIP712_TX_TYPE as u64).into()),
        from: Some(from),
        to,
        nonce: Some(rlp.val_at(0)?),
        max_priority_fee_per_gas: Some(rlp.val_at(1)?),
        gas_price: Some(rlp.val_at(2)?),
        max_fee_per_gas: None,
        gas: Some(rlp.val_at(3)?),
        value: Some(rlp.val_at(5)?),
        data: Some(Bytes::from(rlp.val_at::<Vec<u8>>(6)?)),
        chain_id: Some(rlp.val_at::<u64>(10)?.into()),
        custom_data: Some(Eip712Meta {
            gas_per_pubdata: Some(rlp.val_at(12)?),
            factory_deps: rlp
                .list_at::<Vec<u8>>(13)?
                .into_iter()
                .map(Bytes::from)
                .collect(),
            custom_signature: (!custom_signature.is_empty())
                .then(|| Bytes::from(custom_signature)),
            paymaster_params,
        }),
    })
}

fn decode_optional_address(rlp: &Rlp, index: usize) -> Result<Option<Address>> {
    let raw: Vec<u8> = rlp.val_at(index)?;
    match raw.len() {
        0 => Ok(None),
        20 => Ok(Some(Address::from_slice(&raw))),
        len => Err(Error::TransactionSerialization(format!(
            "address field has {len} bytes, expected 20"
        ))),
    }
}
