use std::time::Duration;

use alloy::network::{EthereumWallet, ReceiptResponse};
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{BlockNumberOrTag, TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol_types::SolCall;
use color_eyre::eyre::{eyre, Result};

use crate::data::contracts::{IRegistry, CELO_REGISTRY};

/// How long to wait for a submitted transaction to be mined.
const RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);

/// RPC provider with a local signing wallet attached.
/// The concrete filler stack is erased behind a trait object.
pub struct VaultProvider {
    provider: Box<dyn Provider + Send + Sync>,
    chain_id: u64,
    signer_address: Address,
}

impl VaultProvider {
    /// Connect to a node via HTTP RPC, signing with the given key.
    pub async fn connect(rpc_url: &str, signer: PrivateKeySigner) -> Result<Self> {
        let url = rpc_url.parse()?;
        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new().wallet(wallet).on_http(url);
        let chain_id = provider.get_chain_id().await?;
        tracing::info!(rpc_url, chain_id, %signer_address, "connected to node");
        Ok(Self {
            provider: Box::new(provider),
            chain_id,
            signer_address,
        })
    }

    /// Return the chain ID obtained at connection time.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Execute a read-only contract call and decode its return values.
    pub async fn call<C: SolCall>(&self, to: Address, call: C) -> Result<C::Return> {
        let tx = TransactionRequest::default()
            .to(to)
            .input(Bytes::from(call.abi_encode()).into());
        let output = self.provider.call(tx).await?;
        let decoded = C::abi_decode_returns(&output, true)
            .map_err(|e| eyre!("failed to decode {} result: {e}", C::SIGNATURE))?;
        Ok(decoded)
    }

    /// Sign and submit a contract call, then wait for its receipt.
    ///
    /// A receipt with a failed status is reported as an error so callers only
    /// ever see mined, successful transactions.
    pub async fn send<C: SolCall>(&self, to: Address, call: C) -> Result<TransactionReceipt> {
        let tx = TransactionRequest::default()
            .from(self.signer_address)
            .to(to)
            .input(Bytes::from(call.abi_encode()).into());

        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(%tx_hash, method = C::SIGNATURE, %to, "transaction submitted");

        let receipt = pending
            .with_timeout(Some(RECEIPT_TIMEOUT))
            .get_receipt()
            .await?;

        if !receipt.status() {
            tracing::warn!(%tx_hash, block = ?receipt.block_number, "transaction reverted");
            return Err(eyre!("Transaction {tx_hash} reverted"));
        }

        tracing::info!(
            %tx_hash,
            block = ?receipt.block_number,
            gas_used = receipt.gas_used,
            "transaction confirmed"
        );
        Ok(receipt)
    }

    /// Get the native coin balance of an address at the latest block.
    pub async fn native_balance(&self, address: Address) -> Result<U256> {
        let balance = self.provider.get_balance(address).await?;
        Ok(balance)
    }

    /// Timestamp of the latest block, the base for unlock times.
    pub async fn latest_block_timestamp(&self) -> Result<u64> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await?
            .ok_or_else(|| eyre!("Latest block not available"))?;
        Ok(block.header.timestamp)
    }

    /// Look up a core contract in the Celo registry.
    /// Returns None when the registry is absent or has no entry for `identifier`.
    pub async fn registry_lookup(&self, identifier: &str) -> Option<Address> {
        let call = IRegistry::getAddressForStringCall {
            identifier: identifier.to_string(),
        };
        match self.call(CELO_REGISTRY, call).await {
            Ok(ret) if ret.addr != Address::ZERO => Some(ret.addr),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(identifier, error = %e, "registry lookup failed");
                None
            }
        }
    }
}
