// Chat assistant: routing, prompt composition and the /chat handler.

pub mod agent;
pub mod handlers;
pub mod prompts;
pub mod router;
