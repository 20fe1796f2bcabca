use ethers::utils::rlp::{Encodable, RlpStream};

/// Appends an optional field as either its encoding or the empty string.
pub(crate) fn rlp_opt<T: Encodable>(rlp: &mut RlpStream, opt: &Option<T>) {
    if let Some(inner) = opt {
        rlp.append(inner);
    } else {
        rlp.append(&"");
    }
}

pub(crate) fn address_hex(address: &ethers::types::Address) -> String {
    ethers::utils::to_checksum(address, None)
}
