use thiserror::Error;

/// Errors returned by the Firecrawl client and extraction pipeline.
///
/// Only network and API failures surface here. A field that cannot be
/// extracted from page content is `None`, never an error.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Firecrawl API returned `"success": false` with a message.
    #[error("Firecrawl API error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Live extraction was requested without a Firecrawl API key configured.
    #[error("no Firecrawl API key configured; set FIRECRAWL_API_KEY or pass --firecrawl-key")]
    MissingApiKey,
}
