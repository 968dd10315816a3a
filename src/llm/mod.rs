//! Generation Gateway.
//!
//! Two-tier provider chain with a deterministic offline mode: a self-hosted
//! completion endpoint first, a hosted chat-completion API second, and a
//! fixed textual fallback when both are down. Generation never raises past
//! this module; failures degrade to text.

mod openai;
mod provider;
mod self_hosted;
mod service;

pub use openai::OpenAiProvider;
pub use provider::TextProvider;
pub use self_hosted::SelfHostedProvider;
pub use service::GenerationService;
