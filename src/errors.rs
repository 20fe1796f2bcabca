use ethers::providers::ProviderError;
use ethers::utils::rlp::DecoderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An operation needed a provider binding that was never supplied. The
    /// message names the missing chain and the bind call that attaches one.
    #[error("Provider missing: {0}")]
    MissingProvider(String),
    #[error("Transaction `from` address mismatch: from is {from}, signer is {signer}")]
    AddressMismatch { from: String, signer: String },
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Signature failure: {0}")]
    SignatureFailure(String),
    #[error("Eip712 error: {0}")]
    Eip712(String),
    #[error("Transaction serialization error: {0}")]
    TransactionSerialization(String),
    #[error("Private key parse error: {0}")]
    PrivateKeyParse(String),
    #[error("Mnemonic parse error: {0}")]
    MnemonicParse(String),
    #[error("Keystore decrypt error: {0}")]
    KeystoreDecrypt(String),
}

impl Error {
    /// Wraps any middleware failure; provider errors are surfaced verbatim
    /// and never retried.
    pub(crate) fn provider<E: std::fmt::Display>(err: E) -> Self {
        Error::Provider(err.to_string())
    }
}

impl From<ProviderError> for Error {
    fn from(err: ProviderError) -> Self {
        Error::Provider(err.to_string())
    }
}

impl From<DecoderError> for Error {
    fn from(err: DecoderError) -> Self {
        Error::TransactionSerialization(err.to_string())
    }
}
