//! Flat-file persistence: the inbox and the prompt templates each live in one
//! JSON file that is read whole and rewritten whole on every mutation.
//!
//! There is no locking. Two requests that load, mutate and save the same file
//! concurrently race, and the last save wins.

pub mod error;
pub mod inbox;
pub mod json_file;
pub mod prompts;

pub use error::StoreError;
pub use inbox::{Draft, Email};
pub use json_file::JsonFile;
pub use prompts::PromptSet;
