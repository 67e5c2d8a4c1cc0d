//! SkillCert Credential Registry Contract
//!
//! A registry of unique, non-fungible credential records (course completions,
//! certifications). The admin mints credentials, the oracle attests to or
//! updates their details, and the original issuer keeps the right to revoke
//! or burn a credential regardless of who currently holds it.
//!
//! ## Roles
//! - **Admin**: mints, assigns the admin and oracle roles, toggles the pause gate
//! - **Oracle**: replaces the metadata of active, unrevoked credentials
//! - **Issuer**: the admin that minted a credential; may revoke or burn it
//! - **Owner**: current holder; may approve spenders, transfer or burn
//!
//! ## Check Order
//! Every mutating token operation checks, in order: pause gate, caller role,
//! token state, input validation. All checks run before the first storage
//! write, so a failed call leaves the registry untouched.
//!
//! Error codes are fixed in the 100..=114 range so indexers can match them.
#![no_std]
#![allow(unexpected_cfgs)]

use skillcert_shared::{skills_within_limits, CredentialMetadata, Grade, MAX_APPROVALS};
use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Address, Env, String, Vec};

mod access;
mod events;
mod storage;

pub use storage::DataKey;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotAuthorized          = 100,
    InsufficientPermission = 101, // reserved
    TokenNotExist          = 102,
    Paused                 = 103,
    NullTarget             = 104,
    AlreadyApproved        = 105,
    NotApproved            = 106,
    Revoked                = 107,
    OracleOnly             = 108,
    IssuerOnly             = 109,
    MaxLengthExceeded      = 110,
    InvalidGrade           = 111,
    AlreadyInitialized     = 112,
    NotInitialized         = 113,
    Overflow               = 114,
}

// ---------------------------------------------------------------------------
// Read projection types
// ---------------------------------------------------------------------------

/// Everything recorded about one credential.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CredentialRecord {
    pub token_id: u64,
    pub owner: Address,
    pub issuer: Address,
    pub metadata: CredentialMetadata,
    pub revoked: bool,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[contract]
pub struct CredentialRegistry;

#[contractimpl]
impl CredentialRegistry {
    /// Initialize the registry with its admin and oracle. Can only be called once.
    pub fn init(env: Env, admin: Address, oracle: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        storage::set_admin(&env, &admin);
        storage::set_oracle(&env, &oracle);
        storage::set_paused(&env, false);
        storage::set_last_token_id(&env, 0);

        events::Initialized { admin, oracle }.publish(&env);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Role administration
    // -----------------------------------------------------------------------

    /// Hand the admin role to `new_admin`. Takes effect immediately.
    pub fn set_admin(env: Env, caller: Address, new_admin: Option<Address>) -> Result<bool, Error> {
        access::require_admin(&env, &caller)?;
        let new_admin = new_admin.ok_or(Error::NullTarget)?;

        storage::set_admin(&env, &new_admin);
        events::AdminChanged {
            previous: caller,
            admin: new_admin,
        }
        .publish(&env);
        Ok(true)
    }

    /// Replace the oracle. Admin only.
    pub fn set_oracle(env: Env, caller: Address, new_oracle: Option<Address>) -> Result<bool, Error> {
        access::require_admin(&env, &caller)?;
        let new_oracle = new_oracle.ok_or(Error::NullTarget)?;

        storage::set_oracle(&env, &new_oracle);
        events::OracleChanged {
            admin: caller,
            oracle: new_oracle,
        }
        .publish(&env);
        Ok(true)
    }

    /// Set the pause flag and return its new value. Admin only; never blocked
    /// by the pause gate itself.
    pub fn set_paused(env: Env, caller: Address, paused: bool) -> Result<bool, Error> {
        access::require_admin(&env, &caller)?;

        storage::set_paused(&env, paused);
        events::PauseChanged {
            admin: caller,
            paused,
        }
        .publish(&env);
        Ok(paused)
    }

    // -----------------------------------------------------------------------
    // Credential lifecycle
    // -----------------------------------------------------------------------

    /// Mint a credential to `recipient`. The caller becomes its issuer.
    ///
    /// `grade`: one of `A+ A A- B+ B B- C+ C C- D F` or the empty string
    pub fn mint(
        env: Env,
        caller: Address,
        recipient: Option<Address>,
        skills: Vec<String>,
        grade: String,
    ) -> Result<u64, Error> {
        access::require_not_paused(&env)?;
        access::require_admin(&env, &caller)?;
        let recipient = recipient.ok_or(Error::NullTarget)?;
        let grade = validate_metadata(&skills, &grade)?;

        let token_id = storage::get_last_token_id(&env)
            .checked_add(1)
            .ok_or(Error::Overflow)?;

        let metadata = CredentialMetadata {
            skills,
            grade,
            verified_at: env.ledger().sequence(),
        };
        storage::create_token(&env, token_id, &recipient, &caller, &metadata);
        storage::set_last_token_id(&env, token_id);

        events::Minted {
            token_id,
            issuer: caller,
            recipient,
            grade,
        }
        .publish(&env);

        Ok(token_id)
    }

    /// Replace the metadata of an unrevoked credential. Oracle only.
    pub fn update_metadata(
        env: Env,
        caller: Address,
        token_id: u64,
        skills: Vec<String>,
        grade: String,
    ) -> Result<bool, Error> {
        access::require_not_paused(&env)?;
        access::require_oracle(&env, &caller)?;
        access::require_token(&env, token_id)?;
        access::require_not_revoked(&env, token_id)?;
        let grade = validate_metadata(&skills, &grade)?;

        let verified_at = env.ledger().sequence();
        let metadata = CredentialMetadata {
            skills,
            grade,
            verified_at,
        };
        storage::set_metadata(&env, token_id, &metadata);

        events::MetadataUpdated {
            token_id,
            oracle: caller,
            grade,
            verified_at,
        }
        .publish(&env);

        Ok(true)
    }

    /// Revoke a credential. Only its issuer may revoke, and only once.
    pub fn revoke(env: Env, caller: Address, token_id: u64) -> Result<bool, Error> {
        access::require_not_paused(&env)?;
        access::require_token(&env, token_id)?;

        caller.require_auth();
        let issuer = storage::get_issuer(&env, token_id).ok_or(Error::TokenNotExist)?;
        if caller != issuer {
            return Err(Error::IssuerOnly);
        }
        access::require_not_revoked(&env, token_id)?;

        storage::set_revoked(&env, token_id);
        events::Revoked {
            token_id,
            issuer: caller,
        }
        .publish(&env);

        Ok(true)
    }

    /// Authorize `spender` to perform one transfer of the credential. At most
    /// `MAX_APPROVALS` spenders may hold an approval at once.
    pub fn approve(env: Env, caller: Address, token_id: u64, spender: Address) -> Result<bool, Error> {
        access::require_not_paused(&env)?;
        let owner = access::require_token(&env, token_id)?;
        access::require_not_revoked(&env, token_id)?;

        caller.require_auth();
        if caller != owner {
            return Err(Error::NotAuthorized);
        }
        if storage::has_approval(&env, token_id, &spender) {
            return Err(Error::AlreadyApproved);
        }
        if storage::get_spenders(&env, token_id).len() >= MAX_APPROVALS {
            return Err(Error::MaxLengthExceeded);
        }

        storage::add_approval(&env, token_id, &spender);
        events::Approved {
            token_id,
            owner,
            spender,
        }
        .publish(&env);

        Ok(true)
    }

    /// Withdraw an approval. Succeeds whether or not one was recorded.
    pub fn revoke_approval(
        env: Env,
        caller: Address,
        token_id: u64,
        spender: Address,
    ) -> Result<bool, Error> {
        access::require_not_paused(&env)?;
        let owner = access::require_token(&env, token_id)?;

        caller.require_auth();
        if caller != owner {
            return Err(Error::NotAuthorized);
        }

        storage::remove_approval(&env, token_id, &spender);
        events::ApprovalRevoked {
            token_id,
            owner,
            spender,
        }
        .publish(&env);

        Ok(true)
    }

    /// Move a credential to `recipient`.
    ///
    /// The caller must be `sender` and either the owner or an approved
    /// spender. Any approval held by the caller is consumed.
    pub fn transfer(
        env: Env,
        caller: Address,
        token_id: u64,
        sender: Address,
        recipient: Option<Address>,
    ) -> Result<bool, Error> {
        access::require_not_paused(&env)?;

        caller.require_auth();
        if caller != sender {
            return Err(Error::NotAuthorized);
        }
        let owner = access::require_token(&env, token_id)?;
        access::require_not_revoked(&env, token_id)?;
        let recipient = recipient.ok_or(Error::NullTarget)?;

        if caller != owner && !storage::has_approval(&env, token_id, &caller) {
            return Err(Error::NotApproved);
        }

        storage::set_owner(&env, token_id, &recipient);
        storage::remove_approval(&env, token_id, &caller);

        events::Transferred {
            token_id,
            from: owner,
            to: recipient,
            operator: caller,
        }
        .publish(&env);

        Ok(true)
    }

    /// Destroy a credential. The owner or the issuer may burn, revoked or not.
    /// Outstanding approvals for the id are cleared with it.
    pub fn burn(env: Env, caller: Address, token_id: u64) -> Result<bool, Error> {
        access::require_not_paused(&env)?;
        let owner = access::require_token(&env, token_id)?;

        caller.require_auth();
        let issuer = storage::get_issuer(&env, token_id);
        if caller != owner && issuer.as_ref() != Some(&caller) {
            return Err(Error::NotAuthorized);
        }

        let approvals_cleared = storage::clear_approvals(&env, token_id);
        storage::remove_token(&env, token_id);

        events::Burned {
            token_id,
            owner,
            burned_by: caller,
            approvals_cleared,
        }
        .publish(&env);

        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Read projections
    // -----------------------------------------------------------------------

    /// Id of the most recently minted credential, 0 before the first mint.
    pub fn get_last_token_id(env: Env) -> u64 {
        storage::get_last_token_id(&env)
    }

    pub fn get_owner(env: Env, token_id: u64) -> Option<Address> {
        storage::get_owner(&env, token_id)
    }

    pub fn get_metadata(env: Env, token_id: u64) -> Option<CredentialMetadata> {
        storage::get_metadata(&env, token_id)
    }

    /// False for unknown ids.
    pub fn is_revoked(env: Env, token_id: u64) -> bool {
        storage::is_revoked(&env, token_id)
    }

    pub fn get_issuer(env: Env, token_id: u64) -> Option<Address> {
        storage::get_issuer(&env, token_id)
    }

    pub fn get_admin(env: Env) -> Option<Address> {
        storage::get_admin(&env)
    }

    pub fn get_oracle(env: Env) -> Option<Address> {
        storage::get_oracle(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn is_approved(env: Env, token_id: u64, spender: Address) -> bool {
        storage::has_approval(&env, token_id, &spender)
    }

    /// Spenders currently holding an approval on the credential.
    pub fn get_approved_spenders(env: Env, token_id: u64) -> Vec<Address> {
        storage::get_spenders(&env, token_id)
    }

    /// Full record of a credential in one call.
    pub fn get_credential(env: Env, token_id: u64) -> Option<CredentialRecord> {
        let owner = storage::get_owner(&env, token_id)?;
        let issuer = storage::get_issuer(&env, token_id)?;
        let metadata = storage::get_metadata(&env, token_id)?;
        Some(CredentialRecord {
            token_id,
            owner,
            issuer,
            metadata,
            revoked: storage::is_revoked(&env, token_id),
        })
    }

    /// True when the credential exists and has not been revoked.
    pub fn is_valid(env: Env, token_id: u64) -> bool {
        storage::get_owner(&env, token_id).is_some() && !storage::is_revoked(&env, token_id)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_metadata(skills: &Vec<String>, grade: &String) -> Result<Grade, Error> {
    if !skills_within_limits(skills) {
        return Err(Error::MaxLengthExceeded);
    }
    Grade::parse(grade).ok_or(Error::InvalidGrade)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
