use std::path::Path;
use std::sync::Arc;

use ethers::providers::Middleware;
use ethers::signers::{coins_bip39::English, LocalWallet, MnemonicBuilder, Signer};
use ethers::types::{Address, Bytes, H256, U256, U64};
use log::debug;
use rand::{CryptoRng, Rng};

use crate::consts::{EIP1559_TX_TYPE, EIP712_TX_TYPE, LEGACY_TX_TYPE};
use crate::eip712::serialize_eip712;
use crate::helpers::address_hex;
use crate::prelude::{Error, Result};
use crate::signer::Eip712Signer;
use crate::types::{Eip712Meta, TransactionRequest};

/// Account acting on two chains under one key: the settlement chain (L1) and
/// the rollup (L2). The L2 provider drives population and extended-format
/// signing; the L1 provider is optional and only role accessors that need it
/// will demand it.
#[derive(Debug)]
pub struct Wallet<M> {
    signer: LocalWallet,
    provider: Option<Arc<M>>,
    provider_l1: Option<Arc<M>>,
    eip712: Option<Eip712Signer<M>>,
}

impl<M> Clone for Wallet<M> {
    fn clone(&self) -> Self {
        Self {
            signer: self.signer.clone(),
            provider: self.provider.clone(),
            provider_l1: self.provider_l1.clone(),
            eip712: self.eip712.clone(),
        }
    }
}

/// Narrow view of the account in one chain role: the provider handle for that
/// chain and the signing key, nothing more.
#[derive(Debug)]
pub struct ChainAccount<'a, M> {
    provider: &'a Arc<M>,
    signer: &'a LocalWallet,
}

impl<'a, M> ChainAccount<'a, M> {
    pub fn provider(&self) -> &Arc<M> {
        self.provider
    }

    pub fn signer(&self) -> &LocalWallet {
        self.signer
    }
}

impl<M: Middleware> Wallet<M> {
    /// Creates the account. When a rollup provider is given, the embedded
    /// extended-format signer is derived against it; its chain id is fetched
    /// lazily on first signature request, so construction never touches the
    /// network.
    pub fn new(
        signer: LocalWallet,
        provider_l2: Option<Arc<M>>,
        provider_l1: Option<Arc<M>>,
    ) -> Self {
        let eip712 = provider_l2
            .as_ref()
            .map(|provider| Eip712Signer::new(signer.clone(), Arc::clone(provider)));
        Self {
            signer,
            provider: provider_l2,
            provider_l1,
            eip712,
        }
    }

    pub fn from_private_key(
        private_key: &str,
        provider_l2: Option<Arc<M>>,
        provider_l1: Option<Arc<M>>,
    ) -> Result<Self> {
        let signer = private_key
            .parse::<LocalWallet>()
            .map_err(|e| Error::PrivateKeyParse(e.to_string()))?;
        Ok(Self::new(signer, provider_l2, provider_l1))
    }

    /// Derives the key from a BIP-39 mnemonic phrase. The account starts with
    /// only the settlement-chain binding; attach the rollup with
    /// [`Wallet::bind_l2_provider`].
    pub fn from_mnemonic(mnemonic: &str, provider_l1: Option<Arc<M>>) -> Result<Self> {
        let signer = MnemonicBuilder::<English>::default()
            .phrase(mnemonic)
            .build()
            .map_err(|e| Error::MnemonicParse(e.to_string()))?;
        Ok(Self::new(signer, None, provider_l1))
    }

    pub fn from_encrypted_json_sync(
        keystore: impl AsRef<Path>,
        password: impl AsRef<[u8]>,
    ) -> Result<Self> {
        let signer = LocalWallet::decrypt_keystore(keystore, password)
            .map_err(|e| Error::KeystoreDecrypt(e.to_string()))?;
        Ok(Self::new(signer, None, None))
    }

    /// Async variant of [`Wallet::from_encrypted_json_sync`]; the key
    /// derivation function is CPU-bound, so it runs on the blocking pool.
    pub async fn from_encrypted_json(
        keystore: impl AsRef<Path>,
        password: impl AsRef<[u8]>,
    ) -> Result<Self> {
        let keystore = keystore.as_ref().to_path_buf();
        let password = password.as_ref().to_vec();
        let signer = tokio::task::spawn_blocking(move || {
            LocalWallet::decrypt_keystore(keystore, password)
        })
        .await
        .map_err(|e| Error::KeystoreDecrypt(e.to_string()))?
        .map_err(|e| Error::KeystoreDecrypt(e.to_string()))?;
        Ok(Self::new(signer, None, None))
    }

    pub fn random<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        Self::new(LocalWallet::new(rng), None, None)
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn l2_provider(&self) -> Result<&Arc<M>> {
        self.provider.as_ref().ok_or_else(|| {
            Error::MissingProvider(
                "L2 provider missing: use `bind_l2_provider` to attach one".to_string(),
            )
        })
    }

    pub fn l1_provider(&self) -> Result<&Arc<M>> {
        self.provider_l1.as_ref().ok_or_else(|| {
            Error::MissingProvider(
                "L1 provider missing: use `bind_l1_provider` to attach one".to_string(),
            )
        })
    }

    /// The account in its settlement-chain role. Requires an explicit L1
    /// binding; there is no fallback to the rollup provider.
    pub fn account_for_l1(&self) -> Result<ChainAccount<'_, M>> {
        Ok(ChainAccount {
            provider: self.l1_provider()?,
            signer: &self.signer,
        })
    }

    /// The account in its rollup role.
    pub fn account_for_l2(&self) -> Result<ChainAccount<'_, M>> {
        Ok(ChainAccount {
            provider: self.l2_provider()?,
            signer: &self.signer,
        })
    }

    /// Plain settlement-chain signer over the same key. Fails when no L1
    /// provider is bound, since the wallet would have no chain to act on.
    pub fn eth_wallet(&self) -> Result<LocalWallet> {
        self.l1_provider()?;
        Ok(self.signer.clone())
    }

    /// Signer for extended-format transactions; present whenever a rollup
    /// provider is bound.
    pub fn eip712(&self) -> Result<&Eip712Signer<M>> {
        self.eip712.as_ref().ok_or_else(|| {
            Error::MissingProvider(
                "L2 provider missing: extended-format signing requires one".to_string(),
            )
        })
    }

    /// Returns a new account with the settlement-chain provider replaced.
    /// The original is left untouched.
    pub fn bind_l1_provider(&self, provider: Arc<M>) -> Wallet<M> {
        let mut rebound = self.clone();
        rebound.provider_l1 = Some(provider);
        rebound
    }

    /// Returns a new account bound to another rollup provider. The embedded
    /// extended-format signer is re-derived, so the chain id is resolved
    /// against the new provider on next use.
    pub fn bind_l2_provider(&self, provider: Arc<M>) -> Wallet<M> {
        Wallet::new(
            self.signer.clone(),
            Some(provider),
            self.provider_l1.clone(),
        )
    }

    async fn resolve_chain_id(&self) -> Result<u64> {
        match &self.eip712 {
            Some(eip712) => eip712.chain_id().await,
            None => {
                let chain_id = self
                    .l2_provider()?
                    .get_chainid()
                    .await
                    .map_err(Error::provider)?;
                Ok(chain_id.as_u64())
            }
        }
    }

    /// Runs the chain-native population over the request: sender, nonce and
    /// chain id first, then gas and pricing through the provider's own
    /// fill logic for the request's envelope kind.
    async fn fill_standard_fields(
        &self,
        mut tx: TransactionRequest,
    ) -> Result<TransactionRequest> {
        let provider = self.l2_provider()?;

        let from = tx.from.unwrap_or_else(|| self.address());
        tx.from = Some(from);
        if tx.nonce.is_none() {
            let nonce = provider
                .get_transaction_count(from, None)
                .await
                .map_err(Error::provider)?;
            tx.nonce = Some(nonce);
        }
        if tx.chain_id.is_none() {
            tx.chain_id = Some(self.resolve_chain_id().await?.into());
        }

        let mut typed = tx.as_typed_transaction();
        provider
            .fill_transaction(&mut typed, None)
            .await
            .map_err(Error::provider)?;
        tx.apply_filled(&typed);
        Ok(tx)
    }

    /// Normalizes a draft request. Requests with neither a type nor a
    /// custom-data block become legacy transactions; requests carrying custom
    /// data or the extended type marker are forced onto the extended format
    /// and get their remaining defaults. Idempotent, except that the
    /// extended-format gas price is re-quoted from the provider on every
    /// pass.
    pub async fn populate_transaction(
        &self,
        mut tx: TransactionRequest,
    ) -> Result<TransactionRequest> {
        if tx.transaction_type.is_none() && tx.custom_data.is_none() {
            tx.transaction_type = Some(U64::from(LEGACY_TX_TYPE as u64));
        }

        if !tx.is_eip712() {
            return self.fill_standard_fields(tx).await;
        }

        tx.transaction_type = Some(U64::from(EIP712_TX_TYPE as u64));
        let mut populated = self.fill_standard_fields(tx).await?;
        populated.transaction_type = Some(U64::from(EIP712_TX_TYPE as u64));
        if populated.value.is_none() {
            populated.value = Some(U256::zero());
        }
        if populated.data.is_none() {
            populated.data = Some(Bytes::default());
        }

        // Extended-format transactions always carry an explicit gas price
        // quoted at populate time; a previously set value is superseded.
        let gas_price = self
            .l2_provider()?
            .get_gas_price()
            .await
            .map_err(Error::provider)?;
        populated.gas_price = Some(gas_price);
        debug!("populated extended-format transaction, gas price {gas_price}");
        Ok(populated)
    }

    /// Signs a request and returns the encoded transaction bytes.
    ///
    /// Requests without custom data and without the extended type marker are
    /// delegated to the chain-native envelope. Everything else goes through
    /// the extended format: the typed-data digest is computed over the
    /// request as it stands, the signature lands in the custom-data block,
    /// and a second population pass completes the fields before encoding.
    pub async fn sign_transaction(&self, mut tx: TransactionRequest) -> Result<Bytes> {
        if !tx.is_eip712() {
            if tx.transaction_type == Some(U64::from(EIP1559_TX_TYPE as u64))
                && tx.max_fee_per_gas.is_none()
            {
                // A single spot quote stands in for a full fee-market
                // estimate.
                let gas_price = self
                    .l2_provider()?
                    .get_gas_price()
                    .await
                    .map_err(Error::provider)?;
                tx.max_fee_per_gas = Some(gas_price);
            }
            let mut typed = tx.as_typed_transaction();
            if typed.chain_id().is_none() {
                typed.set_chain_id(self.resolve_chain_id().await?);
            }
            let signature = self
                .signer
                .sign_transaction(&typed)
                .await
                .map_err(|e| Error::SignatureFailure(e.to_string()))?;
            return Ok(typed.rlp_signed(&signature));
        }

        let from = tx.from.unwrap_or_else(|| self.address());
        if from != self.address() {
            return Err(Error::AddressMismatch {
                from: address_hex(&from),
                signer: address_hex(&self.address()),
            });
        }
        tx.from = Some(from);

        if tx.custom_data.is_none() {
            tx.custom_data = Some(Eip712Meta::default());
        }
        let signature = self.eip712()?.sign(&tx).await?;
        if let Some(custom_data) = tx.custom_data.as_mut() {
            custom_data.custom_signature = Some(Bytes::from(signature.to_vec()));
        }
        debug!("attached custom signature for {}", address_hex(&from));

        // Second population pass: the digest had to be computed before the
        // signature field existed, while full defaulting needs the
        // custom-data block in place.
        let populated = self.populate_transaction(tx).await?;
        serialize_eip712(&populated, None)
    }

    /// Signs a request and broadcasts it through the rollup provider.
    pub async fn send_transaction(&self, tx: TransactionRequest) -> Result<H256> {
        let signed = self.sign_transaction(tx).await?;
        let pending = self
            .l2_provider()?
            .send_raw_transaction(signed)
            .await
            .map_err(Error::provider)?;
        Ok(*pending)
    }

    /// Plain value transfer on the rollup, routed through the extended
    /// format.
    pub async fn transfer(&self, to: Address, amount: U256) -> Result<H256> {
        let tx = TransactionRequest::new()
            .with_to(to)
            .with_value(amount)
            .with_custom_data(Eip712Meta::default());
        self.send_transaction(tx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_GAS_PER_PUBDATA_LIMIT;
    use crate::eip712::{decode_eip712, Eip712Transaction};
    use ethers::providers::{MockProvider, Provider};
    use ethers::types::transaction::eip2718::TypedTransaction;
    use ethers::types::transaction::eip712::Eip712;
    use ethers::types::Signature;
    use ethers::utils::rlp::Rlp;

    const TEST_KEY: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
    const TEST_MNEMONIC: &str =
        "test test test test test test test test test test test junk";

    fn mocked_wallet() -> (Wallet<Provider<MockProvider>>, MockProvider) {
        let (provider, mock) = Provider::mocked();
        let wallet = Wallet::new(
            TEST_KEY.parse().unwrap(),
            Some(Arc::new(provider)),
            None,
        );
        (wallet, mock)
    }

    /// Request with every chain-dependent field preset, so provider traffic
    /// in a test is limited to what the operation under test adds.
    fn preset_request(from: Address) -> TransactionRequest {
        TransactionRequest::new()
            .with_from(from)
            .with_to(Address::repeat_byte(0x22))
            .with_value(U256::from(7u64))
            .with_data(Bytes::from(vec![0xde, 0xad]))
            .with_gas(U256::from(300_000u64))
            .with_gas_price(U256::from(2_000u64))
            .with_nonce(U256::zero())
            .with_chain_id(270)
    }

    #[tokio::test]
    async fn test_populate_defaults_to_legacy_type() {
        let (wallet, mock) = mocked_wallet();
        let tx = preset_request(wallet.address());

        let populated = wallet.populate_transaction(tx).await.unwrap();
        assert_eq!(populated.transaction_type, Some(U64::zero()));
        assert!(populated.custom_data.is_none());
        // Everything was preset, so no provider round trips happened.
        assert!(mock.assert_request("eth_gasPrice", ()).is_err());
    }

    #[tokio::test]
    async fn test_populate_extended_defaults_and_fresh_gas_price() {
        let (wallet, mock) = mocked_wallet();
        mock.push(U256::from(3_000u64)).unwrap();

        let mut tx = preset_request(wallet.address())
            .with_custom_data(Eip712Meta::default());
        tx.value = None;
        tx.data = None;

        let populated = wallet.populate_transaction(tx).await.unwrap();
        assert_eq!(
            populated.transaction_type,
            Some(U64::from(EIP712_TX_TYPE as u64))
        );
        assert_eq!(populated.value, Some(U256::zero()));
        assert_eq!(populated.data, Some(Bytes::default()));
        // The caller-supplied 2000 quote was superseded by the fresh one.
        assert_eq!(populated.gas_price, Some(U256::from(3_000u64)));
        mock.assert_request("eth_gasPrice", ()).unwrap();
    }

    #[tokio::test]
    async fn test_populate_type_marker_alone_forces_extended() {
        let (wallet, mock) = mocked_wallet();
        mock.push(U256::from(3_000u64)).unwrap();

        let tx = preset_request(wallet.address()).with_type(EIP712_TX_TYPE);
        let populated = wallet.populate_transaction(tx).await.unwrap();
        assert_eq!(
            populated.transaction_type,
            Some(U64::from(EIP712_TX_TYPE as u64))
        );
        assert_eq!(populated.gas_price, Some(U256::from(3_000u64)));
        mock.assert_request("eth_gasPrice", ()).unwrap();
    }

    #[tokio::test]
    async fn test_populate_is_idempotent_except_gas_price() {
        let (wallet, mock) = mocked_wallet();
        mock.push(U256::from(3_000u64)).unwrap();
        mock.push(U256::from(2_500u64)).unwrap();

        let tx = preset_request(wallet.address()).with_custom_data(Eip712Meta::default());
        let populated = wallet.populate_transaction(tx).await.unwrap();
        assert_eq!(populated.gas_price, Some(U256::from(2_500u64)));

        let repopulated = wallet.populate_transaction(populated.clone()).await.unwrap();
        assert_eq!(repopulated.gas_price, Some(U256::from(3_000u64)));

        let mut first = populated;
        let mut second = repopulated;
        first.gas_price = None;
        second.gas_price = None;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_account_for_l1_requires_explicit_binding() {
        let (wallet, _mock) = mocked_wallet();

        let err = wallet.account_for_l1().unwrap_err();
        assert!(matches!(err, Error::MissingProvider(_)));
        assert!(err.to_string().contains("L1 provider missing"));
        assert!(wallet.eth_wallet().is_err());

        let (l1_provider, _l1_mock) = Provider::mocked();
        let l1_provider = Arc::new(l1_provider);
        let bound = wallet.bind_l1_provider(Arc::clone(&l1_provider));
        let account = bound.account_for_l1().unwrap();
        assert_eq!(account.signer().address(), wallet.address());
        assert!(Arc::ptr_eq(account.provider(), &l1_provider));
        assert_eq!(bound.eth_wallet().unwrap().address(), wallet.address());

        // Value semantics: the original account is unchanged.
        assert!(wallet.account_for_l1().is_err());
    }

    #[tokio::test]
    async fn test_account_for_l2_exposes_rollup_role() {
        let (wallet, _mock) = mocked_wallet();
        let account = wallet.account_for_l2().unwrap();
        assert_eq!(account.signer().address(), wallet.address());

        let detached: Wallet<Provider<MockProvider>> =
            Wallet::new(TEST_KEY.parse().unwrap(), None, None);
        assert!(detached.account_for_l2().is_err());
        assert!(detached.eip712().is_err());
    }

    #[tokio::test]
    async fn test_bind_l2_provider_rederives_chain_id() {
        let (wallet, mock) = mocked_wallet();
        mock.push(U256::from(270u64)).unwrap();
        assert_eq!(wallet.eip712().unwrap().chain_id().await.unwrap(), 270);

        let (other_provider, other_mock) = Provider::mocked();
        other_mock.push(U256::from(300u64)).unwrap();
        let rebound = wallet.bind_l2_provider(Arc::new(other_provider));
        assert_eq!(rebound.eip712().unwrap().chain_id().await.unwrap(), 300);

        // The original keeps its memoized value without another fetch.
        assert_eq!(wallet.eip712().unwrap().chain_id().await.unwrap(), 270);
    }

    #[tokio::test]
    async fn test_standard_path_substitutes_gas_price_quote_for_max_fee() {
        let (wallet, mock) = mocked_wallet();
        mock.push(U256::from(123u64)).unwrap();

        let mut tx = preset_request(wallet.address()).with_type(EIP1559_TX_TYPE);
        tx.gas_price = None;
        let raw = wallet.sign_transaction(tx).await.unwrap();
        assert_eq!(raw[0], EIP1559_TX_TYPE);

        let (decoded, signature) =
            TypedTransaction::decode_signed(&Rlp::new(&raw)).unwrap();
        match &decoded {
            TypedTransaction::Eip1559(inner) => {
                assert_eq!(inner.max_fee_per_gas, Some(U256::from(123u64)));
            }
            other => panic!("expected fee-market envelope, got {other:?}"),
        }
        assert_eq!(
            signature.recover(decoded.sighash()).unwrap(),
            wallet.address()
        );
        mock.assert_request("eth_gasPrice", ()).unwrap();
        assert!(mock.assert_request("eth_gasPrice", ()).is_err());
    }

    #[tokio::test]
    async fn test_standard_path_signs_legacy_envelope() {
        let (wallet, mock) = mocked_wallet();

        let raw = wallet
            .sign_transaction(preset_request(wallet.address()))
            .await
            .unwrap();
        let (decoded, signature) =
            TypedTransaction::decode_signed(&Rlp::new(&raw)).unwrap();
        assert_eq!(
            signature.recover(decoded.sighash()).unwrap(),
            wallet.address()
        );
        // Fully preset request: signing is offline.
        assert!(mock.assert_request("eth_gasPrice", ()).is_err());
    }

    #[tokio::test]
    async fn test_sign_extended_round_trip_recovers_signer() {
        let (wallet, mock) = mocked_wallet();
        // Reverse call order: the chain-id resolution pops last-pushed first,
        // then the populate pass quotes the gas price.
        mock.push(U256::from(2_000u64)).unwrap();
        mock.push(U256::from(270u64)).unwrap();

        let tx = preset_request(wallet.address()).with_custom_data(Eip712Meta::default());
        let raw = wallet.sign_transaction(tx).await.unwrap();
        assert_eq!(raw[0], EIP712_TX_TYPE);

        let decoded = decode_eip712(&raw).unwrap();
        assert_eq!(decoded.from, Some(wallet.address()));
        assert_eq!(decoded.to, Some(Address::repeat_byte(0x22)));
        assert_eq!(decoded.value, Some(U256::from(7u64)));
        assert_eq!(decoded.data, Some(Bytes::from(vec![0xde, 0xad])));
        assert_eq!(decoded.gas_price, Some(U256::from(2_000u64)));
        let meta = decoded.custom_data.clone().unwrap();
        assert_eq!(
            meta.gas_per_pubdata,
            Some(U256::from(DEFAULT_GAS_PER_PUBDATA_LIMIT))
        );

        let raw_signature = meta.custom_signature.expect("custom signature embedded");
        assert_eq!(raw_signature.len(), 65);
        let signature = Signature::try_from(raw_signature.as_ref()).unwrap();
        let digest = Eip712Transaction::from_request(&decoded, 270)
            .unwrap()
            .encode_eip712()
            .unwrap();
        assert_eq!(
            signature.recover(H256::from(digest)).unwrap(),
            wallet.address()
        );
    }

    #[tokio::test]
    async fn test_sign_extended_defaults_from_to_own_address() {
        let (wallet, mock) = mocked_wallet();
        mock.push(U256::from(2_000u64)).unwrap();
        mock.push(U256::from(270u64)).unwrap();

        let mut tx = preset_request(wallet.address()).with_custom_data(Eip712Meta::default());
        tx.from = None;
        let raw = wallet.sign_transaction(tx).await.unwrap();
        assert_eq!(decode_eip712(&raw).unwrap().from, Some(wallet.address()));
    }

    #[tokio::test]
    async fn test_sign_refuses_foreign_from_address() {
        let (wallet, mock) = mocked_wallet();

        let tx = TransactionRequest::new()
            .with_from(Address::repeat_byte(0xaa))
            .with_custom_data(Eip712Meta::default());
        let err = wallet.sign_transaction(tx).await.unwrap_err();
        assert!(matches!(err, Error::AddressMismatch { .. }));

        // The mismatch is detected before any provider traffic.
        assert!(mock.assert_request("eth_chainId", ()).is_err());
    }

    #[tokio::test]
    async fn test_concurrent_extended_signs_share_one_chain_id_fetch() {
        let (wallet, mock) = mocked_wallet();
        mock.push(U256::from(2_000u64)).unwrap();
        mock.push(U256::from(2_000u64)).unwrap();
        mock.push(U256::from(270u64)).unwrap();

        let tx = preset_request(wallet.address()).with_custom_data(Eip712Meta::default());
        let (first, second) = futures_util::future::join(
            wallet.sign_transaction(tx.clone()),
            wallet.sign_transaction(tx),
        )
        .await;
        let first = first.unwrap();
        let second = second.unwrap();
        assert_eq!(first, second);
        assert_eq!(decode_eip712(&first).unwrap().chain_id, Some(270u64.into()));

        // Exactly one chain-id resolution, then one gas quote per attempt.
        mock.assert_request("eth_chainId", ()).unwrap();
        mock.assert_request("eth_gasPrice", ()).unwrap();
        mock.assert_request("eth_gasPrice", ()).unwrap();
        assert!(mock.assert_request("eth_chainId", ()).is_err());
    }

    #[tokio::test]
    async fn test_sign_extended_without_l2_provider_fails() {
        let detached: Wallet<Provider<MockProvider>> =
            Wallet::new(TEST_KEY.parse().unwrap(), None, None);
        let err = detached
            .sign_transaction(TransactionRequest::new().with_custom_data(Eip712Meta::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingProvider(_)));
    }

    #[test]
    fn test_from_mnemonic_derives_known_address() {
        let wallet: Wallet<Provider<MockProvider>> =
            Wallet::from_mnemonic(TEST_MNEMONIC, None).unwrap();
        assert_eq!(
            address_hex(&wallet.address()),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[tokio::test]
    async fn test_keystore_round_trip() {
        let dir = std::env::temp_dir();
        let mut rng = rand::thread_rng();
        let (signer, file) =
            LocalWallet::new_keystore(&dir, &mut rng, "hunter2", None).unwrap();

        let path = dir.join(file);
        let sync_wallet: Wallet<Provider<MockProvider>> =
            Wallet::from_encrypted_json_sync(&path, "hunter2").unwrap();
        assert_eq!(sync_wallet.address(), signer.address());

        let async_wallet: Wallet<Provider<MockProvider>> =
            Wallet::from_encrypted_json(&path, "hunter2").await.unwrap();
        assert_eq!(async_wallet.address(), signer.address());

        assert!(
            Wallet::<Provider<MockProvider>>::from_encrypted_json_sync(&path, "wrong")
                .is_err()
        );
        std::fs::remove_file(path).ok();
    }
}
