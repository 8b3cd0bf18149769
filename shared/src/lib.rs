//! Shared library for the DIME planner Lambda.
//!
//! Domain types, the DIME computation, prompt and advice handling, and the
//! Gemini client used by the `dime` handler.

pub mod advice;
pub mod auth;
pub mod config;
pub mod dime;
pub mod error;
pub mod format;
pub mod gemini;
pub mod http;
pub mod models;
pub mod payload;
pub mod prompt;
pub mod secrets;

pub use advice::{parse_advice, AdviceResult};
pub use auth::verify_api_key;
pub use config::Config;
pub use dime::DimeResult;
pub use error::{Error, Result};
pub use gemini::{AdviceGenerator, GeminiClient, GenerationParams};
pub use models::{DimeResponse, UserData};
pub use payload::{extract_candidate, normalize_body};
pub use prompt::build_prompt;
pub use secrets::get_gemini_api_key;
