use vyapi_core::Error as CoreError;

/// Errors from the client layer: transport failures, envelope errors, and
/// the core-layer semantic errors they wrap.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-2xx HTTP status. Distinct from an envelope-level error: the
    /// request never produced a decodable envelope.
    #[error("received non-successful ({status}) response from the api ({url}):\n{body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// The server reported an error in the response envelope. The message
    /// is the server's, verbatim.
    #[error("{message}")]
    Api { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}
