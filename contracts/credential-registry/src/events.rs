//! Events published for off-chain indexers. Each successful mutating call
//! publishes exactly one of these.

use skillcert_shared::Grade;
use soroban_sdk::{contractevent, Address};

#[contractevent]
pub struct Initialized {
    pub admin: Address,
    pub oracle: Address,
}

#[contractevent]
pub struct AdminChanged {
    pub previous: Address,
    pub admin: Address,
}

#[contractevent]
pub struct OracleChanged {
    pub admin: Address,
    pub oracle: Address,
}

#[contractevent]
pub struct PauseChanged {
    pub admin: Address,
    pub paused: bool,
}

#[contractevent]
pub struct Minted {
    #[topic]
    pub token_id: u64,
    pub issuer: Address,
    pub recipient: Address,
    pub grade: Grade,
}

#[contractevent]
pub struct MetadataUpdated {
    #[topic]
    pub token_id: u64,
    pub oracle: Address,
    pub grade: Grade,
    pub verified_at: u32,
}

#[contractevent]
pub struct Revoked {
    #[topic]
    pub token_id: u64,
    pub issuer: Address,
}

#[contractevent]
pub struct Approved {
    #[topic]
    pub token_id: u64,
    pub owner: Address,
    pub spender: Address,
}

#[contractevent]
pub struct ApprovalRevoked {
    #[topic]
    pub token_id: u64,
    pub owner: Address,
    pub spender: Address,
}

#[contractevent]
pub struct Transferred {
    #[topic]
    pub token_id: u64,
    pub from: Address,
    pub to: Address,
    pub operator: Address,
}

#[contractevent]
pub struct Burned {
    #[topic]
    pub token_id: u64,
    pub owner: Address,
    pub burned_by: Address,
    pub approvals_cleared: u32,
}
