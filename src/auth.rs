//! パスワード認証
//!
//! 設定に保存したSHA-256ハッシュと入力パスワードを照合する。
//! ハッシュが未設定なら常に認証済みとして扱う。

use crate::error::{FaqSearchError, Result};
use faq_search_common::AuthGate;
use sha2::{Digest, Sha256};

/// パスワードのハッシュ（hex）
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[derive(Debug, Clone, Default)]
pub struct PasswordGate {
    expected_hash: Option<String>,
    authenticated: bool,
}

impl PasswordGate {
    pub fn new(expected_hash: Option<String>) -> Self {
        let authenticated = expected_hash.is_none();
        Self { expected_hash, authenticated }
    }

    /// パスワードが必要か
    pub fn requires_password(&self) -> bool {
        self.expected_hash.is_some()
    }

    /// パスワードを照合し、一致すれば認証済みにする
    pub fn verify(&mut self, password: &str) -> Result<()> {
        match &self.expected_hash {
            None => {
                self.authenticated = true;
                Ok(())
            }
            Some(expected) if expected.eq_ignore_ascii_case(&hash_password(password)) => {
                self.authenticated = true;
                Ok(())
            }
            Some(_) => {
                tracing::warn!("パスワード不一致");
                Err(FaqSearchError::WrongPassword)
            }
        }
    }
}

impl AuthGate for PasswordGate {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_open_gate_without_hash() {
        let gate = PasswordGate::new(None);
        assert!(!gate.requires_password());
        assert!(gate.is_authenticated());
    }

    #[test]
    fn test_verify() {
        let mut gate = PasswordGate::new(Some(hash_password("secret")));
        assert!(gate.requires_password());
        assert!(!gate.is_authenticated());

        assert!(matches!(gate.verify("wrong"), Err(FaqSearchError::WrongPassword)));
        assert!(!gate.is_authenticated());

        gate.verify("secret").unwrap();
        assert!(gate.is_authenticated());
    }
}
