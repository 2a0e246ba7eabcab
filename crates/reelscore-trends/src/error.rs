use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrendError {
    #[error("{var} is not set; export it to use the {provider} backend")]
    MissingApiKey {
        provider: &'static str,
        var: &'static str,
    },

    #[error("request to {provider} failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} error {status}: {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} returned an empty response")]
    EmptyResponse { provider: &'static str },

    #[error("no descriptions to analyse")]
    NoDescriptions,
}
