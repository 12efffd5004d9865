pub mod client;
pub mod gemini;
pub mod openai;
pub mod prompts;
pub mod template;

pub use client::*;
pub use gemini::*;
pub use openai::*;
pub use prompts::*;
