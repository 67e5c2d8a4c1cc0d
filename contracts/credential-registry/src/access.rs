//! Role checks and the pause gate.
//!
//! Mutating entry points call `require_not_paused` first, then the role check
//! for the operation. Role checks authenticate the caller before comparing it
//! with the stored role.

use soroban_sdk::{Address, Env};

use crate::storage;
use crate::Error;

pub fn require_not_paused(env: &Env) -> Result<(), Error> {
    if storage::is_paused(env) {
        return Err(Error::Paused);
    }
    Ok(())
}

pub fn is_admin(env: &Env, caller: &Address) -> Result<bool, Error> {
    let admin = storage::get_admin(env).ok_or(Error::NotInitialized)?;
    Ok(caller == &admin)
}

pub fn is_oracle(env: &Env, caller: &Address) -> Result<bool, Error> {
    let oracle = storage::get_oracle(env).ok_or(Error::NotInitialized)?;
    Ok(caller == &oracle)
}

pub fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if !is_admin(env, caller)? {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

pub fn require_oracle(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if !is_oracle(env, caller)? {
        return Err(Error::OracleOnly);
    }
    Ok(())
}

/// Fetches the owner of an existing token, failing with `TokenNotExist`.
pub fn require_token(env: &Env, token_id: u64) -> Result<Address, Error> {
    storage::get_owner(env, token_id).ok_or(Error::TokenNotExist)
}

pub fn require_not_revoked(env: &Env, token_id: u64) -> Result<(), Error> {
    if storage::is_revoked(env, token_id) {
        return Err(Error::Revoked);
    }
    Ok(())
}
