use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use ethabi::Token;
use ethereum_types::H160;

use crate::error::RegistryError;
use crate::registry::{SignatureRecord, SignatureRegistry};
use crate::selector::Selector;

macro_rules! parameterize {
        ($test_fn:expr, [$(($name:ident, $input:expr)), * $(,)? ]) => {
            $(
                #[test]
                fn $name() {
                    $test_fn($input);
                }
            )*
        };
    }

pub fn address_token_from_string(address: &str) -> Token {
    Token::Address(H160::from_str(address).unwrap())
}

pub fn bytes_token_from_string(bytes: &str) -> Token {
    Token::Bytes(hex::decode(bytes).unwrap())
}

pub fn record(id: u64, created_at: &str, text_signature: &str) -> SignatureRecord {
    SignatureRecord {
        id,
        created_at: created_at.to_string(),
        text_signature: text_signature.to_string(),
        hex_signature: "0xa9059cbb".to_string(),
        bytes_signature: String::new(),
    }
}

/// In-memory registry answering every lookup with the same records (or a status error)
pub struct StaticRegistry {
    records: Vec<SignatureRecord>,
    fail_with_status: Option<u16>,
    calls: AtomicUsize,
}

impl StaticRegistry {
    pub fn new(records: Vec<SignatureRecord>) -> Self {
        StaticRegistry {
            records,
            fail_with_status: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(status: u16) -> Self {
        StaticRegistry {
            records: Vec::new(),
            fail_with_status: Some(status),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SignatureRegistry for StaticRegistry {
    async fn lookup(&self, selector: &Selector) -> Result<Vec<SignatureRecord>, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.fail_with_status {
            return Err(RegistryError::Status {
                status,
                url: format!("test://registry?hex_signature={}", selector),
            });
        }
        Ok(self.records.clone())
    }
}

pub(crate) use parameterize;
