//! Token store and approval entries.
//!
//! Roles, the pause flag and the id counter live in instance storage. Every
//! per-token record lives in persistent storage. Both tiers have their TTL
//! bumped on write.

use skillcert_shared::{CredentialMetadata, INSTANCE_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS};
use soroban_sdk::{contracttype, Address, Env, Vec};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Oracle,
    Paused,
    LastTokenId,
    Owner(u64),
    Issuer(u64),
    Metadata(u64),
    Revoked(u64),
    Approval(u64, Address), // (token_id, spender)
    Spenders(u64),
}

// ---------------------------------------------------------------------------
// Ledger-wide state
// ---------------------------------------------------------------------------

pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    set_instance(env, &DataKey::Admin, admin);
}

pub fn get_oracle(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Oracle)
}

pub fn set_oracle(env: &Env, oracle: &Address) {
    set_instance(env, &DataKey::Oracle, oracle);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    set_instance(env, &DataKey::Paused, &paused);
}

pub fn get_last_token_id(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::LastTokenId)
        .unwrap_or(0)
}

pub fn set_last_token_id(env: &Env, token_id: u64) {
    set_instance(env, &DataKey::LastTokenId, &token_id);
}

// ---------------------------------------------------------------------------
// Token records
// ---------------------------------------------------------------------------

pub fn get_owner(env: &Env, token_id: u64) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Owner(token_id))
}

pub fn set_owner(env: &Env, token_id: u64, owner: &Address) {
    set_persistent(env, &DataKey::Owner(token_id), owner);
}

pub fn get_issuer(env: &Env, token_id: u64) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Issuer(token_id))
}

pub fn get_metadata(env: &Env, token_id: u64) -> Option<CredentialMetadata> {
    env.storage().persistent().get(&DataKey::Metadata(token_id))
}

pub fn set_metadata(env: &Env, token_id: u64, metadata: &CredentialMetadata) {
    set_persistent(env, &DataKey::Metadata(token_id), metadata);
}

pub fn is_revoked(env: &Env, token_id: u64) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Revoked(token_id))
        .unwrap_or(false)
}

pub fn set_revoked(env: &Env, token_id: u64) {
    set_persistent(env, &DataKey::Revoked(token_id), &true);
}

/// Writes all four records of a freshly minted token.
pub fn create_token(
    env: &Env,
    token_id: u64,
    owner: &Address,
    issuer: &Address,
    metadata: &CredentialMetadata,
) {
    set_owner(env, token_id, owner);
    set_persistent(env, &DataKey::Issuer(token_id), issuer);
    set_metadata(env, token_id, metadata);
    set_persistent(env, &DataKey::Revoked(token_id), &false);
}

/// Removes all four records of a token.
pub fn remove_token(env: &Env, token_id: u64) {
    let storage = env.storage().persistent();
    storage.remove(&DataKey::Owner(token_id));
    storage.remove(&DataKey::Issuer(token_id));
    storage.remove(&DataKey::Metadata(token_id));
    storage.remove(&DataKey::Revoked(token_id));
}

// ---------------------------------------------------------------------------
// Approvals
// ---------------------------------------------------------------------------

pub fn has_approval(env: &Env, token_id: u64, spender: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Approval(token_id, spender.clone()))
}

pub fn get_spenders(env: &Env, token_id: u64) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Spenders(token_id))
        .unwrap_or(Vec::new(env))
}

/// Records an approval and adds the spender to the token's spender index.
pub fn add_approval(env: &Env, token_id: u64, spender: &Address) {
    set_persistent(env, &DataKey::Approval(token_id, spender.clone()), &());

    let mut spenders = get_spenders(env, token_id);
    spenders.push_back(spender.clone());
    set_persistent(env, &DataKey::Spenders(token_id), &spenders);
}

/// Deletes an approval if present. Returns whether an entry was removed.
pub fn remove_approval(env: &Env, token_id: u64, spender: &Address) -> bool {
    let key = DataKey::Approval(token_id, spender.clone());
    if !env.storage().persistent().has(&key) {
        return false;
    }
    env.storage().persistent().remove(&key);

    let mut spenders = get_spenders(env, token_id);
    if let Some(idx) = spenders.first_index_of(spender) {
        spenders.remove(idx);
    }
    if spenders.is_empty() {
        env.storage().persistent().remove(&DataKey::Spenders(token_id));
    } else {
        set_persistent(env, &DataKey::Spenders(token_id), &spenders);
    }
    true
}

/// Deletes every approval recorded for a token. Returns how many were cleared.
pub fn clear_approvals(env: &Env, token_id: u64) -> u32 {
    let spenders = get_spenders(env, token_id);
    for spender in spenders.iter() {
        env.storage()
            .persistent()
            .remove(&DataKey::Approval(token_id, spender));
    }
    env.storage().persistent().remove(&DataKey::Spenders(token_id));
    spenders.len()
}

// ---------------------------------------------------------------------------
// TTL
// ---------------------------------------------------------------------------

fn set_instance<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().instance().set(key, value);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_BUMP_LEDGERS, INSTANCE_BUMP_LEDGERS);
}

fn set_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}
