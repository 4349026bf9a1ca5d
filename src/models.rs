use serde::Serialize;

/// One parsed input line. Only `to` and `transactionHash` are ever looked at.
pub type Record = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Relay,
    WethHelper,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub mode: String,
    pub input: InputSummary,
    pub by_to: ByToSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSummary {
    pub path: String,
    pub total_transactions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ByToSummary {
    pub relay: KnownBucket,
    pub weth_helper: KnownBucket,
    pub other: OtherBucket,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnownBucket {
    pub address: String,
    pub name: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OtherBucket {
    pub count: u64,
    pub percentage: f64,
    pub to_addresses: ToAddresses,
    pub transaction_hashes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToAddresses {
    pub unique_count: usize,
    pub unique: Vec<String>,
    pub frequencies: Vec<AddressCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressCount {
    pub address: String,
    pub count: u64,
}
