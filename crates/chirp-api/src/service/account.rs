use std::sync::{Arc, OnceLock};

use anyhow::{Context, anyhow};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use rand_core::OsRng;
use tracing::info;

use chirp_db::AccountStore;
use chirp_types::api::AccountRequest;
use chirp_types::{Account, MIN_PASSWORD_LEN};

use crate::error::ServiceError;

/// Verified against when the username is unknown, so both login failures cost one Argon2 run.
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

pub struct AccountService<S> {
    store: Arc<S>,
}

impl<S: AccountStore> AccountService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create an account. The username must be non-empty and unused, the
    /// password at least `MIN_PASSWORD_LEN` characters.
    pub fn register(&self, req: &AccountRequest) -> Result<Account, ServiceError> {
        if req.username.is_empty() {
            return Err(ServiceError::InvalidUsername);
        }
        if req.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServiceError::InvalidPassword);
        }

        if self.store.get_account_by_username(&req.username)?.is_some() {
            return Err(ServiceError::UserAlreadyExists);
        }

        let password_hash = hash_password(&req.password)?;

        // A concurrent registration may have taken the name since the check above.
        let row = self
            .store
            .insert_account(&req.username, &password_hash)?
            .ok_or(ServiceError::UserAlreadyExists)?;

        info!("Registered account {} ({})", row.account_id, row.username);
        Ok(row.into())
    }

    /// Return the account whose username and password both match.
    pub fn login(&self, req: &AccountRequest) -> Result<Account, ServiceError> {
        let Some(row) = self.store.get_account_by_username(&req.username)? else {
            password_matches(&req.password, dummy_hash()?)?;
            return Err(ServiceError::InvalidLogin);
        };

        let matches = password_matches(&req.password, &row.password)
            .with_context(|| format!("account {}", row.account_id))?;
        if !matches {
            return Err(ServiceError::InvalidLogin);
        }

        Ok(row.into())
    }
}

/// Hash password with Argon2id
fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Password hashing failed: {}", e))?
        .to_string();
    Ok(hash)
}

fn password_matches(password: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| anyhow!("Corrupt password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn dummy_hash() -> anyhow::Result<&'static str> {
    if let Some(hash) = DUMMY_HASH.get() {
        return Ok(hash.as_str());
    }
    let hash = hash_password("chirp-unknown-account")?;
    Ok(DUMMY_HASH.get_or_init(|| hash).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_db::{AccountRow, MemoryStore};

    /// Another registration always takes the name between the lookup and the insert.
    struct TakenOnInsert;

    impl AccountStore for TakenOnInsert {
        fn insert_account(&self, _: &str, _: &str) -> anyhow::Result<Option<AccountRow>> {
            Ok(None)
        }

        fn get_account_by_id(&self, _: i64) -> anyhow::Result<Option<AccountRow>> {
            Ok(None)
        }

        fn get_account_by_username(&self, _: &str) -> anyhow::Result<Option<AccountRow>> {
            Ok(None)
        }
    }

    fn service() -> AccountService<MemoryStore> {
        AccountService::new(Arc::new(MemoryStore::new()))
    }

    fn request(username: &str, password: &str) -> AccountRequest {
        AccountRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn register_assigns_id() {
        let accounts = service();

        let account = accounts.register(&request("alice", "secret")).unwrap();
        assert_eq!(account.account_id, 1);
        assert_eq!(account.username, "alice");
    }

    #[test]
    fn empty_username_is_rejected() {
        let err = service().register(&request("", "secret")).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidUsername));
    }

    #[test]
    fn short_passwords_are_rejected() {
        let accounts = service();
        for password in ["", "a", "ab", "abc", "çé"] {
            let err = accounts.register(&request("bob", password)).unwrap_err();
            assert!(matches!(err, ServiceError::InvalidPassword), "{password:?}");
        }
    }

    #[test]
    fn four_character_password_is_enough() {
        assert!(service().register(&request("bob", "abcd")).is_ok());
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let accounts = service();
        accounts.register(&request("alice", "secret")).unwrap();

        let err = accounts.register(&request("alice", "other-pass")).unwrap_err();
        assert!(matches!(err, ServiceError::UserAlreadyExists));
    }

    #[test]
    fn password_is_not_stored_in_plain_text() {
        let store = Arc::new(MemoryStore::new());
        let accounts = AccountService::new(store.clone());
        accounts.register(&request("alice", "secret")).unwrap();

        let row = store.get_account_by_username("alice").unwrap().unwrap();
        assert_ne!(row.password, "secret");
        assert!(row.password.starts_with("$argon2"));
    }

    #[test]
    fn login_returns_registered_account() {
        let accounts = service();
        let registered = accounts.register(&request("alice", "secret")).unwrap();

        let logged_in = accounts.login(&request("alice", "secret")).unwrap();
        assert_eq!(logged_in, registered);
    }

    #[test]
    fn login_rejects_wrong_password_and_unknown_user() {
        let accounts = service();
        accounts.register(&request("alice", "secret")).unwrap();

        let wrong = accounts.login(&request("alice", "Secret")).unwrap_err();
        assert!(matches!(wrong, ServiceError::InvalidLogin));

        let unknown = accounts.login(&request("mallory", "secret")).unwrap_err();
        assert!(matches!(unknown, ServiceError::InvalidLogin));
    }

    #[test]
    fn register_losing_insert_race_is_duplicate() {
        let accounts = AccountService::new(Arc::new(TakenOnInsert));

        let err = accounts.register(&request("alice", "secret")).unwrap_err();
        assert!(matches!(err, ServiceError::UserAlreadyExists));
    }

    #[test]
    fn unknown_username_still_verifies_a_hash() {
        let hash = dummy_hash().unwrap();
        assert!(PasswordHash::new(hash).is_ok());
        assert!(!password_matches("secret", hash).unwrap());
        assert_eq!(dummy_hash().unwrap(), hash);
    }

    #[test]
    fn corrupt_stored_hash_is_a_storage_error() {
        let store = Arc::new(MemoryStore::new());
        store.insert_account("alice", "not-a-phc-string").unwrap();
        let accounts = AccountService::new(store);

        let err = accounts.login(&request("alice", "secret")).unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
    }
}
