use lectern::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_and_verify() {
    let hash = hash_password("correct horse battery staple").unwrap();
    assert_ne!(hash, "correct horse battery staple");
    assert!(verify_password("correct horse battery staple", &hash).unwrap());
}

#[test]
fn test_wrong_password_fails_verification() {
    let hash = hash_password("secret123").unwrap();
    assert!(!verify_password("secret124", &hash).unwrap());
    assert!(!verify_password("", &hash).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let a = hash_password("secret123").unwrap();
    let b = hash_password("secret123").unwrap();
    assert_ne!(a, b);
}
