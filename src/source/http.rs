use crate::source::DataSource;
use crate::Result;
use anyhow::Context;
use tracing::trace;
use url::Url;

/// Downloads the data with a single GET request.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
}

impl HttpSource {
    pub fn new(url: Url) -> Self {
        Self { url }
    }
}

#[async_trait::async_trait]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<String> {
        trace!("GET {}", self.url);
        let response = reqwest::get(self.url.clone())
            .await
            .with_context(|| format!("Request to {} failed", self.url))?
            .error_for_status()
            .with_context(|| format!("Server refused {}", self.url))?;
        response
            .text()
            .await
            .with_context(|| format!("Unable to read the response body from {}", self.url))
    }
}
