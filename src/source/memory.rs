//! Implements `DataSource` over text held in memory.
//!
//! Note: this is compiled in the library, not only in tests, so that callers can render a deck
//! from data they already have without touching the filesystem.

use crate::source::DataSource;
use crate::Result;

/// Serves CSV text held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    text: String,
}

impl MemorySource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait::async_trait]
impl DataSource for MemorySource {
    fn describe(&self) -> String {
        String::from("memory")
    }

    async fn fetch(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}
