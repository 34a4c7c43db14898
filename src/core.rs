pub mod backoff;
pub mod error;
pub mod http;
pub mod traits;

pub use backoff::{Backoff, Sleeper, TokioSleeper};
pub use error::LlmError;
pub use http::{HttpClient, HttpClientConfig};
pub use traits::TextCompleter;
