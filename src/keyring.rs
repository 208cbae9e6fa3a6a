use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_STORE: &str = "repbook-store";
const SERVICE_IDENTITY: &str = "repbook-identity";

/// Store a credential in the system keyring
pub fn store_credential(service: &str, username: &str, password: &str) -> Result<()> {
    let entry = Entry::new(service, username).context("Failed to create keyring entry")?;

    entry
        .set_password(password)
        .context("Failed to store credential in keyring")?;

    Ok(())
}

/// Retrieve a credential from the system keyring
pub fn get_credential(service: &str, username: &str) -> Result<String> {
    let entry = Entry::new(service, username).context("Failed to create keyring entry")?;

    entry
        .get_password()
        .context("Failed to retrieve credential from keyring")
}

/// Document store write token
pub fn store_store_token(token: &str) -> Result<()> {
    store_credential(SERVICE_STORE, "default", token)
}

pub fn get_store_token() -> Result<String> {
    get_credential(SERVICE_STORE, "default")
}

/// Identity service backend secret key
pub fn store_identity_secret(secret: &str) -> Result<()> {
    store_credential(SERVICE_IDENTITY, "default", secret)
}

pub fn get_identity_secret() -> Result<String> {
    get_credential(SERVICE_IDENTITY, "default")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires actual keyring backend
    fn test_store_and_retrieve() {
        let test_service = "repbook-test";
        let test_username = "test_user";
        let test_password = "test_password_123";

        store_credential(test_service, test_username, test_password).unwrap();

        let retrieved = get_credential(test_service, test_username).unwrap();
        assert_eq!(retrieved, test_password);

        Entry::new(test_service, test_username)
            .unwrap()
            .delete_credential()
            .unwrap();
    }
}
