use std::sync::Arc;

use era_signer::prelude::Result;
use era_signer::{decode_eip712, Eip712Meta, Network, TransactionRequest, Wallet};
use ethers::providers::{Http, Provider};
use ethers::types::{Address, U256};
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Throwaway key; fund it on testnet before broadcasting anything.
    let mut rng = rand::thread_rng();
    let provider = Provider::<Http>::try_from(Network::EraTestnet.get_url())
        .expect("static testnet url is valid");
    let wallet = Wallet::random(&mut rng).bind_l2_provider(Arc::new(provider));
    info!("wallet address: {:?}", wallet.address());

    // Example 1: populate a plain transfer; without custom data it stays a
    // legacy transaction.
    let plain = TransactionRequest::new()
        .with_to("0x1234567890123456789012345678901234567890".parse::<Address>().unwrap())
        .with_value(U256::from(1_000_000_000u64));
    let populated = wallet.populate_transaction(plain).await?;
    println!("✅ populated legacy transaction: type {:?}", populated.transaction_type);

    // Example 2: the same transfer with a custom-data block takes the
    // EIP-712 extended path end to end.
    let extended = TransactionRequest::new()
        .with_to("0x1234567890123456789012345678901234567890".parse::<Address>().unwrap())
        .with_value(U256::from(1_000_000_000u64))
        .with_custom_data(Eip712Meta::default());
    let raw = wallet.sign_transaction(extended).await?;
    println!("✅ signed EIP-712 transaction: 0x{}", hex::encode(&raw));

    // Example 3: decode the wire bytes back and inspect the custom-data
    // block that carries the signature.
    let decoded = decode_eip712(&raw)?;
    println!(
        "✅ decoded: from {:?}, gas price {:?}, custom signature {} bytes",
        decoded.from,
        decoded.gas_price,
        decoded
            .custom_data
            .and_then(|meta| meta.custom_signature)
            .map(|sig| sig.len())
            .unwrap_or(0)
    );

    Ok(())
}
