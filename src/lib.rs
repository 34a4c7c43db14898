//! # askpanel
//!
//! Client-side behaviour of a landing page: a question panel backed by a retrying
//! Gemini completion client, plus the accordion and header widgets.
//!
//! The completion client never fails from the caller's point of view. Every
//! failure turns into one of two fallback strings that can be shown as is.
//!
//! ```rust,no_run
//! use askpanel::{FaqPanel, GeminiClient, GeminiConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiClient::new(GeminiConfig::from_env()?)?;
//!
//!     let mut panel = FaqPanel::new();
//!     panel.question = "How long does the course take?".to_string();
//!     panel.submit(&client).await;
//!
//!     println!("{}", panel.render());
//!     Ok(())
//! }
//! ```

pub mod accordion;
pub mod completions;
pub mod core;
pub mod header;
pub mod panel;
pub mod provider;

pub use accordion::{Accordion, AccordionItem};
pub use completions::{
    COMMUNICATION_ERROR_FALLBACK, CompletionClient, CompletionProviderConfig,
    NO_RESPONSE_FALLBACK,
};
pub use crate::core::{
    Backoff, HttpClient, HttpClientConfig, LlmError, Sleeper, TextCompleter, TokioSleeper,
};
pub use panel::{ActionControl, ActionGuard, FaqPanel, PanelView, PromptTemplate};
pub use provider::{ApiKey, GeminiClient, GeminiConfig, Provider};
