//! In-memory provider for gateway tests.

use async_trait::async_trait;
use sentinel_core::{abi, Address, ContractEventType, ProviderError};
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;

use crate::provider::WalletProvider;

pub const CONTRACT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
pub const ACCOUNT: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

/// Scripted provider that records every request it receives
pub struct MockProvider {
    state: Mutex<MockState>,
}

struct MockState {
    calls: Vec<(String, Value)>,
    accounts: Result<Vec<String>, (i64, String)>,
    call_result: Result<String, (i64, String)>,
    send_error: Option<(i64, String)>,
    receipt_status: &'static str,
    pending_polls: u32,
    receipt_delay: Duration,
    emit: Option<(ContractEventType, String)>,
    sent: u64,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                calls: Vec::new(),
                accounts: Ok(vec![ACCOUNT.to_string()]),
                call_result: Ok(word(0)),
                send_error: None,
                receipt_status: "0x1",
                pending_polls: 0,
                receipt_delay: Duration::ZERO,
                emit: None,
                sent: 0,
            }),
        }
    }

    /// `eth_call` returns a word holding `value`
    pub fn with_status(self, value: u8) -> Self {
        self.with_call_result(word(value))
    }

    /// `eth_call` returns raw hex
    pub fn with_call_result(self, hex: impl Into<String>) -> Self {
        self.state.lock().unwrap().call_result = Ok(hex.into());
        self
    }

    pub fn failing_call(self, code: i64, message: &str) -> Self {
        self.state.lock().unwrap().call_result = Err((code, message.to_string()));
        self
    }

    pub fn failing_accounts(self, code: i64, message: &str) -> Self {
        self.state.lock().unwrap().accounts = Err((code, message.to_string()));
        self
    }

    pub fn without_accounts(self) -> Self {
        self.state.lock().unwrap().accounts = Ok(Vec::new());
        self
    }

    pub fn failing_send(self, code: i64, message: &str) -> Self {
        self.state.lock().unwrap().send_error = Some((code, message.to_string()));
        self
    }

    /// Receipts report a revert
    pub fn reverting(self) -> Self {
        self.with_receipt_status("0x0")
    }

    pub fn with_receipt_status(self, status: &'static str) -> Self {
        self.state.lock().unwrap().receipt_status = status;
        self
    }

    /// Every receipt lookup takes `delay` to answer
    pub fn slow_receipts(self, delay: Duration) -> Self {
        self.state.lock().unwrap().receipt_delay = delay;
        self
    }

    /// Receipts stay `null` for the first `polls` lookups of each transaction
    pub fn pending_for(self, polls: u32) -> Self {
        self.state.lock().unwrap().pending_polls = polls;
        self
    }

    /// Receipts carry a log for `event` about `device_id`
    pub fn emitting(self, event: ContractEventType, device_id: &str) -> Self {
        self.state.lock().unwrap().emit = Some((event, device_id.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|(m, _)| m).collect()
    }
}

fn word(value: u8) -> String {
    let mut bytes = [0u8; 32];
    bytes[31] = value;
    abi::to_hex(&bytes)
}

fn rpc_error((code, message): (i64, String)) -> ProviderError {
    ProviderError::Rpc {
        code,
        message,
        data: None,
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let delay = self.state.lock().unwrap().receipt_delay;
        if method == "eth_getTransactionReceipt" && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        state.calls.push((method.to_string(), params));

        match method {
            "eth_requestAccounts" => state.accounts.clone().map(|a| json!(a)).map_err(rpc_error),
            "eth_call" => state.call_result.clone().map(|r| json!(r)).map_err(rpc_error),
            "eth_sendTransaction" => {
                if let Some(err) = state.send_error.clone() {
                    return Err(rpc_error(err));
                }
                state.sent += 1;
                let mut hash = [0u8; 32];
                hash[24..].copy_from_slice(&state.sent.to_be_bytes());
                Ok(json!(abi::to_hex(&hash)))
            }
            "eth_getTransactionReceipt" => {
                let hash = state.calls.last().map(|(_, p)| p[0].clone()).unwrap_or_default();
                let polls = state
                    .calls
                    .iter()
                    .filter(|(m, p)| m == "eth_getTransactionReceipt" && p[0] == hash)
                    .count() as u32;
                if polls <= state.pending_polls {
                    return Ok(Value::Null);
                }

                let logs: Vec<Value> = state
                    .emit
                    .iter()
                    .map(|(event, device)| {
                        json!({
                            "address": CONTRACT.parse::<Address>().unwrap().to_string(),
                            "topics": [
                                abi::to_hex(&event.topic().unwrap()),
                                abi::to_hex(&abi::device_topic(device)),
                            ],
                            "data": "0x",
                        })
                    })
                    .collect();

                Ok(json!({
                    "transactionHash": hash,
                    "blockNumber": format!("0x{:x}", 100 + state.sent),
                    "status": state.receipt_status,
                    "logs": logs,
                }))
            }
            other => Err(ProviderError::Rpc {
                code: -32601,
                message: format!("method {other} not found"),
                data: None,
            }),
        }
    }
}
