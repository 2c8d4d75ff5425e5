use backend_lib::auth::{hash_password, verify_password, DEFAULT_HASH_COST};

#[test]
fn test_password_hashing_and_verification() {
    let hash = hash_password("SecureP@ssw0rd", 4).unwrap();

    // Hash should be different than the original password
    assert_ne!(hash, "SecureP@ssw0rd");
    assert!(verify_password("SecureP@ssw0rd", &hash).unwrap());
    assert!(!verify_password("SecureP@ssw0rD", &hash).unwrap());
    assert!(!verify_password("", &hash).unwrap());
}

#[test]
fn test_externally_produced_hash_verifies() {
    // Cost-10 hash of "Worker1Pass!" produced by another bcrypt implementation
    let hash = "$2b$10$abcdefghijklmnopqrstuu.jVm9x3b8bliLqQRbzDwF0t3.1UAQgu";
    assert!(verify_password("Worker1Pass!", hash).unwrap());
    assert!(!verify_password("Worker2Pass!", hash).unwrap());

    let ours = hash_password("Worker1Pass!", DEFAULT_HASH_COST).unwrap();
    assert!(ours.starts_with("$2b$10$"));
}

#[test]
fn test_malformed_hash() {
    assert!(verify_password("anything", "$2b$10$short").is_err());
}
