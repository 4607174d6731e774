//! Contract gateway: the kill-switch contract's operations over a wallet provider.

use sentinel_core::abi::{self, ContractCall};
use sentinel_core::{
    Address, Confirmation, DeviceStatusCode, GatewayError, ProviderError, Result, TransactionId,
    TransactionReceipt,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::config::GatewayConfig;
use crate::provider::WalletProvider;

/// Gateway to the kill-switch contract.
///
/// Every operation resolves to a typed value or a [`GatewayError`]; provider
/// faults never escape in any other form. Nothing is retried: a failed write
/// may be resubmitted by the caller, which creates a new transaction.
#[derive(Clone)]
pub struct ContractGateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    provider: Option<Arc<dyn WalletProvider>>,
    config: GatewayConfig,
}

impl ContractGateway {
    /// Create a gateway that talks to the contract through `provider`
    #[must_use]
    pub fn new(config: GatewayConfig, provider: impl WalletProvider + 'static) -> Self {
        ContractGatewayBuilder::new(config).provider(provider).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(config: GatewayConfig) -> ContractGatewayBuilder {
        ContractGatewayBuilder::new(config)
    }

    /// Configuration this gateway was built with
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    /// Returns true if a wallet provider is wired in
    #[must_use]
    pub fn has_provider(&self) -> bool {
        self.inner.provider.is_some()
    }

    /// Read a device's kill-switch status.
    ///
    /// May trigger a wallet connection prompt. Does not touch chain state.
    #[instrument(skip(self), fields(contract = %self.inner.config.contract_address))]
    pub async fn get_device_status(&self, device_id: &str) -> Result<DeviceStatusCode> {
        let call = ContractCall::GetStatus { device_id };
        let provider = self.provider(&call)?;
        require_device_id(device_id)?;

        let outcome = self.read_status(provider, &call).await;
        let status = self.settle(&call, outcome)?;
        debug!(%status, "device status read");
        Ok(status)
    }

    /// Anchor a log digest for a device and wait for it to be mined.
    #[instrument(skip(self), fields(contract = %self.inner.config.contract_address))]
    pub async fn store_log_hash(&self, device_id: &str, log_hash: &str) -> Result<Confirmation> {
        let call = ContractCall::StoreLogHash {
            device_id,
            log_hash,
        };
        self.write(call).await
    }

    /// Flag a device as infected and wait for the transaction to be mined.
    #[instrument(skip(self), fields(contract = %self.inner.config.contract_address))]
    pub async fn report_infection(&self, device_id: &str) -> Result<Confirmation> {
        self.write(ContractCall::ReportInfection { device_id }).await
    }

    async fn write(&self, call: ContractCall<'_>) -> Result<Confirmation> {
        let provider = self.provider(&call)?;
        require_device_id(call.device_id())?;

        let outcome = self.transact(provider, &call).await;
        let confirmation = self.settle(&call, outcome)?;
        info!(
            operation = call.name(),
            tx = %confirmation.transaction_id,
            block = ?confirmation.block_number,
            "transaction confirmed"
        );
        Ok(confirmation)
    }

    fn provider(&self, call: &ContractCall<'_>) -> Result<&dyn WalletProvider> {
        self.inner.provider.as_deref().ok_or_else(|| {
            warn!(operation = call.name(), "no wallet provider available");
            GatewayError::WalletUnavailable
        })
    }

    /// Log and normalize the outcome of an operation
    fn settle<T>(
        &self,
        call: &ContractCall<'_>,
        outcome: std::result::Result<T, ProviderError>,
    ) -> Result<T> {
        outcome.map_err(|err| {
            error!(operation = call.name(), error = %err, "contract call failed");
            GatewayError::from_provider(call.name(), err)
        })
    }

    async fn read_status(
        &self,
        provider: &dyn WalletProvider,
        call: &ContractCall<'_>,
    ) -> std::result::Result<DeviceStatusCode, ProviderError> {
        request_accounts(provider).await?;
        let data = self.call(provider, call).await?;
        let raw = abi::decode_uint8(&data)?;
        Ok(DeviceStatusCode::try_from(raw)?)
    }

    async fn call(
        &self,
        provider: &dyn WalletProvider,
        call: &ContractCall<'_>,
    ) -> std::result::Result<Vec<u8>, ProviderError> {
        let params = json!([
            {
                "to": self.inner.config.contract_address.to_string(),
                "data": abi::to_hex(&call.encode()),
            },
            "latest"
        ]);
        let value = provider.request("eth_call", params).await?;
        let hex = value
            .as_str()
            .ok_or_else(|| ProviderError::unexpected("eth_call", "result is not a hex string"))?;
        Ok(abi::from_hex(hex)?)
    }

    async fn transact(
        &self,
        provider: &dyn WalletProvider,
        call: &ContractCall<'_>,
    ) -> std::result::Result<Confirmation, ProviderError> {
        let from = request_accounts(provider)
            .await?
            .into_iter()
            .next()
            .ok_or(ProviderError::NoAccounts)?;
        let contract = self.inner.config.contract_address;

        let params = json!([{
            "from": from.to_string(),
            "to": contract.to_string(),
            "data": abi::to_hex(&call.encode()),
        }]);
        let value = provider.request("eth_sendTransaction", params).await?;
        let transaction_id: TransactionId = value
            .as_str()
            .ok_or_else(|| {
                ProviderError::unexpected("eth_sendTransaction", "result is not a hash string")
            })?
            .parse()?;
        info!(operation = call.name(), tx = %transaction_id, "transaction submitted");

        let receipt = self.wait_for_receipt(provider, &transaction_id).await?;
        if receipt.is_reverted()? {
            return Err(ProviderError::Reverted(transaction_id.to_string()));
        }

        Ok(Confirmation {
            block_number: receipt.block()?,
            events: receipt.events_from(&contract, call.device_id()),
            transaction_id,
        })
    }

    /// Poll for the receipt, bounded by the overall receipt timeout
    async fn wait_for_receipt(
        &self,
        provider: &dyn WalletProvider,
        transaction_id: &TransactionId,
    ) -> std::result::Result<TransactionReceipt, ProviderError> {
        let timeout = self.inner.config.receipt_timeout;
        tokio::time::timeout(timeout, self.poll_receipt(provider, transaction_id))
            .await
            .map_err(|_| ProviderError::Timeout(timeout))?
    }

    async fn poll_receipt(
        &self,
        provider: &dyn WalletProvider,
        transaction_id: &TransactionId,
    ) -> std::result::Result<TransactionReceipt, ProviderError> {
        let mut attempt: u32 = 0;
        loop {
            let value = provider
                .request("eth_getTransactionReceipt", json!([transaction_id.as_str()]))
                .await?;
            if !value.is_null() {
                return Ok(serde_json::from_value(value)?);
            }

            attempt += 1;
            debug!(tx = %transaction_id, attempt, "receipt not available yet");
            tokio::time::sleep(self.inner.config.receipt_poll_interval).await;
        }
    }
}

async fn request_accounts(
    provider: &dyn WalletProvider,
) -> std::result::Result<Vec<Address>, ProviderError> {
    let value = provider.request("eth_requestAccounts", Value::Array(vec![])).await?;
    let accounts: Vec<String> = serde_json::from_value(value)
        .map_err(|e| ProviderError::unexpected("eth_requestAccounts", e.to_string()))?;

    accounts
        .iter()
        .map(|a| {
            a.parse::<Address>()
                .map_err(|e| ProviderError::unexpected("eth_requestAccounts", e.to_string()))
        })
        .collect()
}

fn require_device_id(device_id: &str) -> Result<()> {
    if device_id.trim().is_empty() {
        return Err(GatewayError::InvalidInput(
            "device id must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Builder for configuring a [`ContractGateway`]
pub struct ContractGatewayBuilder {
    config: GatewayConfig,
    provider: Option<Arc<dyn WalletProvider>>,
}

impl ContractGatewayBuilder {
    /// Create a new builder with no provider
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            provider: None,
        }
    }

    /// Set the wallet provider
    #[must_use]
    pub fn provider(mut self, provider: impl WalletProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Set or clear an already shared wallet provider
    #[must_use]
    pub fn shared_provider(mut self, provider: Option<Arc<dyn WalletProvider>>) -> Self {
        self.provider = provider;
        self
    }

    /// Build the gateway
    #[must_use]
    pub fn build(self) -> ContractGateway {
        if let Some(provider) = &self.provider {
            debug!(provider = provider.name(), "contract gateway ready");
        }
        ContractGateway {
            inner: Arc::new(GatewayInner {
                provider: self.provider,
                config: self.config,
            }),
        }
    }
}
