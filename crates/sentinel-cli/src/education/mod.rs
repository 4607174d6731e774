//! Educational features: what each command does on-chain.

use colored::Colorize;
use std::fmt::Write as _;

/// Command explanation builder.
pub struct Explain {
    title: String,
    description: String,
    rpc_calls: Vec<String>,
    cost: Option<String>,
    what_happens: Vec<String>,
    learn_more: Option<String>,
}

impl Explain {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            rpc_calls: Vec::new(),
            cost: None,
            what_happens: Vec::new(),
            learn_more: None,
        }
    }

    fn description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    fn rpc(mut self, call: &str) -> Self {
        self.rpc_calls.push(call.to_string());
        self
    }

    fn cost(mut self, cost: &str) -> Self {
        self.cost = Some(cost.to_string());
        self
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn learn_more(mut self, url: &str) -> Self {
        self.learn_more = Some(url.to_string());
        self
    }

    /// Render the explanation as terminal text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", format!("=== {} ===", self.title).bold().cyan());
        let _ = writeln!(out, "{}", self.description);
        let _ = writeln!(out);

        if !self.what_happens.is_empty() {
            let _ = writeln!(out, "{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, step);
            }
            let _ = writeln!(out);
        }

        if !self.rpc_calls.is_empty() {
            let _ = writeln!(out, "{} {}", "RPC Calls:".bold(), self.rpc_calls.join(", ").dimmed());
        }

        if let Some(cost) = &self.cost {
            let _ = writeln!(out, "{} {}", "Cost:".bold(), cost);
        }

        if let Some(url) = &self.learn_more {
            let _ = writeln!(out);
            let _ = writeln!(out, "{} {}", "Learn more:".bold(), url.cyan().underline());
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "=== Results ===".bold().cyan());
        out
    }

    /// Print the explanation to stdout.
    pub fn print(&self) {
        println!("{}", self.render());
    }

    /// Print the explanation to stderr, keeping stdout machine-readable.
    pub fn eprint(&self) {
        eprintln!("{}", self.render());
    }

    // ========================================================================
    // Factory methods for each command
    // ========================================================================

    pub fn status(device_id: &str) -> Self {
        Self::new("Device Status")
            .description(&format!(
                "Reads the kill-switch state of {device_id} from the contract."
            ))
            .rpc("eth_requestAccounts")
            .rpc("eth_call getStatus(string)")
            .cost("Free - read-only call, no transaction")
            .step("Asks the wallet for account access")
            .step("Calls getStatus with the device id at the latest block")
            .step("Decodes the uint8 result: 0 = SAFE, 1 = LOCKED")
            .learn_more("https://docs.soliditylang.org/en/latest/abi-spec.html")
    }

    pub fn store_log(device_id: &str) -> Self {
        Self::new("Store Log Hash")
            .description(&format!(
                "Anchors a log digest for {device_id} so later tampering is detectable."
            ))
            .rpc("eth_requestAccounts")
            .rpc("eth_sendTransaction storeLogHash(string,string)")
            .rpc("eth_getTransactionReceipt")
            .cost("Gas, paid by the signing account")
            .step("Hashes the log file with SHA-256 (when --file is given)")
            .step("Sends a transaction calling storeLogHash")
            .step("Polls for the receipt until the transaction is mined")
            .step("The contract emits LogHashStored with the device id as topic")
            .learn_more("https://eips.ethereum.org/EIPS/eip-1193")
    }

    pub fn report(device_id: &str) -> Self {
        Self::new("Report Infection")
            .description(&format!(
                "Flags {device_id} as infected, which locks it on-chain."
            ))
            .rpc("eth_requestAccounts")
            .rpc("eth_sendTransaction reportInfection(string)")
            .rpc("eth_getTransactionReceipt")
            .cost("Gas, paid by the signing account")
            .step("Sends a transaction calling reportInfection")
            .step("Polls for the receipt until the transaction is mined")
            .step("The contract emits InfectionDetected; getStatus now returns LOCKED")
            .step("Running it twice sends two transactions")
            .learn_more("https://eips.ethereum.org/EIPS/eip-1193")
    }

    pub fn simulate() -> Self {
        Self::new("Attack Simulation")
            .description("Renders the dashboard timeline locally. Nothing is sent to the chain.")
            .cost("Free - no network access")
            .step("Files with entropy below 5.0 are safe, below 7.0 a warning")
            .step("Entropy of 7.0 or more looks encrypted and counts as infected")
            .step("An attack adds an infected file, a blockchain record and a kill-switch event")
            .learn_more("https://en.wikipedia.org/wiki/Entropy_(information_theory)")
    }
}
