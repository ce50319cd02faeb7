/// Network adapters for external API calls
mod openai_client;

pub use openai_client::{
    OpenAiAdvisoryService, OpenAiConfig, DEFAULT_API_BASE_URL, DEFAULT_MODEL,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
