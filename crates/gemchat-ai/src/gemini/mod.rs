//! Google Gemini API client.
//!
//! Implements `ExchangeClient` against the Generative Language API's
//! `generateContent` endpoint.

mod api;
mod client;
mod config;

pub use client::{GeminiClient, GEMINI_API_BASE};
pub use config::{GeminiConfig, SafetyThreshold, HARM_CATEGORIES};
