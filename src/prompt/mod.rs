// src/prompt/mod.rs
// Prompt building for practice feedback

pub mod builder;

pub use builder::{build_practice_prompts, system_prompt, user_message};
