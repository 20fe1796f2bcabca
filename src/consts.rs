/// EIP-712 extended-format transaction type marker.
pub const EIP712_TX_TYPE: u8 = 0x71;
/// Legacy transaction type marker.
pub const LEGACY_TX_TYPE: u8 = 0x00;
/// EIP-1559 fee-market transaction type marker.
pub const EIP1559_TX_TYPE: u8 = 0x02;

/// Default `gas_per_pubdata` when the custom-data block leaves it unset.
pub const DEFAULT_GAS_PER_PUBDATA_LIMIT: u64 = 50_000;

pub(crate) const EIP712_DOMAIN_NAME: &str = "zkSync";
pub(crate) const EIP712_DOMAIN_VERSION: &str = "2";

pub const ERA_MAINNET_URL: &str = "https://mainnet.era.zksync.io";
pub const ERA_TESTNET_URL: &str = "https://sepolia.era.zksync.dev";
pub const ETH_MAINNET_URL: &str = "https://ethereum-rpc.publicnode.com";
pub const ETH_TESTNET_URL: &str = "https://ethereum-sepolia-rpc.publicnode.com";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Network {
    EraMainnet,
    EraTestnet,
    EthMainnet,
    EthTestnet,
}

impl Network {
    pub fn get_url(&self) -> String {
        match self {
            Network::EraMainnet => ERA_MAINNET_URL.to_string(),
            Network::EraTestnet => ERA_TESTNET_URL.to_string(),
            Network::EthMainnet => ETH_MAINNET_URL.to_string(),
            Network::EthTestnet => ETH_TESTNET_URL.to_string(),
        }
    }
}
