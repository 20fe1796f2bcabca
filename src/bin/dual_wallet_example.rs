use std::env;
use std::sync::Arc;

use era_signer::prelude::Result;
use era_signer::{Eip712Meta, Error, Network, TransactionRequest, Wallet};
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::{Address, U256};
use log::info;

// Dual-chain setup: one key, an L1 binding for the settlement chain and an
// L2 binding for the rollup. Set MNEMONIC in your environment or .env file.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let mnemonic = env::var("MNEMONIC")
        .map_err(|_| Error::MnemonicParse("MNEMONIC environment variable not found".to_string()))?;

    let l1_provider = Provider::<Http>::try_from(Network::EthTestnet.get_url())
        .expect("static testnet url is valid");
    let wallet: Wallet<Provider<Http>> = Wallet::from_mnemonic(&mnemonic, Some(Arc::new(l1_provider)))?;

    // Fresh from the mnemonic the account only knows the settlement chain.
    assert!(wallet.account_for_l1().is_ok());
    assert!(wallet.account_for_l2().is_err());

    let l2_provider = Provider::<Http>::try_from(Network::EraTestnet.get_url())
        .expect("static testnet url is valid");
    let wallet = wallet.bind_l2_provider(Arc::new(l2_provider));
    println!("✅ dual-chain wallet ready: {:?}", wallet.address());

    let l1_gas = wallet.account_for_l1()?.provider().get_gas_price().await
        .map_err(|e| Error::Provider(e.to_string()))?;
    let l2_gas = wallet.account_for_l2()?.provider().get_gas_price().await
        .map_err(|e| Error::Provider(e.to_string()))?;
    info!("gas prices: L1 {l1_gas}, L2 {l2_gas}");

    // Two extended-format signatures in flight at once share a single
    // chain-id resolution.
    let to = "0x1234567890123456789012345678901234567890".parse::<Address>().unwrap();
    let request = TransactionRequest::new()
        .with_to(to)
        .with_value(U256::from(1u64))
        .with_custom_data(Eip712Meta::default());
    let (first, second) = futures_util::future::join(
        wallet.sign_transaction(request.clone()),
        wallet.sign_transaction(request),
    )
    .await;
    println!("✅ signed {} and {} bytes", first?.len(), second?.len());

    Ok(())
}
