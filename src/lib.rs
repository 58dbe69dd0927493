//! Submit handler for the review ("reseña") form.
//!
//! Compiled to wasm, the module binds itself to `#resenaForm` on load, posts
//! the form's fields as JSON to the form's `action` and writes the result
//! into `#resenaMessage`. The submit logic itself is host independent and
//! lives in [`submitter`].

pub mod error;
pub mod form;
pub mod options;
pub mod submitter;
pub mod types;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

pub use error::SubmitError;
pub use options::SubmitterOptions;
pub use submitter::FormSubmitter;
pub use types::{Outcome, Payload};
