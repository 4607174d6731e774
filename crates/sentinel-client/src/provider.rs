//! Wallet provider port.

use async_trait::async_trait;
use serde_json::Value;
use sentinel_core::ProviderError;
use std::sync::Arc;

/// An EIP-1193 style provider: a single `request({ method, params })` entry point.
///
/// Browser wallets, node RPC endpoints and test doubles all fit behind this
/// trait. Errors carry the provider's `{ code, message, data }` shape in
/// [`ProviderError::Rpc`]; code 4001 means the user declined.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &str;

    /// Issue a JSON-RPC request and return its `result`
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;
}

#[async_trait]
impl<P: WalletProvider + ?Sized> WalletProvider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        (**self).request(method, params).await
    }
}
