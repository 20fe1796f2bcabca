use std::sync::Arc;

use ethers::providers::Middleware;
use ethers::signers::LocalWallet;
use ethers::types::transaction::eip712::Eip712;
use ethers::types::{Signature, H256};
use log::debug;
use tokio::sync::OnceCell;

use crate::eip712::Eip712Transaction;
use crate::prelude::{Error, Result};
use crate::types::TransactionRequest;

/// Signer for EIP-712 extended-format transactions.
///
/// Holds the account key together with the rollup chain id, which is fetched
/// from the provider on first use and memoized for the signer's lifetime:
/// concurrent signing attempts share a single in-flight resolution instead of
/// issuing redundant calls.
#[derive(Debug)]
pub struct Eip712Signer<M> {
    wallet: LocalWallet,
    provider: Arc<M>,
    chain_id: Arc<OnceCell<u64>>,
}

impl<M> Clone for Eip712Signer<M> {
    fn clone(&self) -> Self {
        Self {
            wallet: self.wallet.clone(),
            provider: Arc::clone(&self.provider),
            chain_id: Arc::clone(&self.chain_id),
        }
    }
}

impl<M: Middleware> Eip712Signer<M> {
    /// Binds the key to a rollup provider. No network round trip happens
    /// here; the chain id is resolved lazily when a signature is requested.
    pub fn new(wallet: LocalWallet, provider: Arc<M>) -> Self {
        Self {
            wallet,
            provider,
            chain_id: Arc::new(OnceCell::new()),
        }
    }

    /// The rollup chain id, fetched once and cached permanently. All
    /// concurrent callers await the same pending resolution.
    pub async fn chain_id(&self) -> Result<u64> {
        self.chain_id
            .get_or_try_init(|| async {
                let chain_id = self
                    .provider
                    .get_chainid()
                    .await
                    .map_err(Error::provider)?
                    .as_u64();
                debug!("resolved rollup chain id {chain_id}");
                Ok(chain_id)
            })
            .await
            .copied()
    }

    /// Computes the typed-data digest over the request's current fields and
    /// signs it with the account key. The result is the 65-byte signature
    /// destined for the custom-data block.
    pub async fn sign(&self, tx: &TransactionRequest) -> Result<Signature> {
        let chain_id = self.chain_id().await?;
        let transaction = Eip712Transaction::from_request(tx, chain_id)?;
        self.sign_typed_data(&transaction).await
    }

    /// Signs an arbitrary typed-data payload with the account key.
    pub async fn sign_typed_data<T: Eip712 + Send + Sync>(&self, payload: &T) -> Result<Signature> {
        let digest = payload
            .encode_eip712()
            .map_err(|e| Error::Eip712(e.to_string()))?;
        self.wallet
            .sign_hash(H256::from(digest))
            .map_err(|e| Error::SignatureFailure(e.to_string()))
    }
}
