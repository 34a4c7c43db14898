//! Completion API abstraction for single-turn, prompt-in text-out providers.

pub mod client;

pub use client::{
    COMMUNICATION_ERROR_FALLBACK, CompletionClient, CompletionProviderConfig,
    NO_RESPONSE_FALLBACK,
};
