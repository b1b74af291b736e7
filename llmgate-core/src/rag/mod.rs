//! Retrieval-augmented generation
//!
//! A `RagPipeline` asks a `ContextRetriever` for context, folds it into the
//! prompt and hands the result to the `Gateway`.

pub mod pipeline;
pub mod retriever;

pub use pipeline::{compose_prompt, ModelTarget, RagAnswer, RagPipeline};
pub use retriever::{ContextRetriever, NoopRetriever, RetrievalResult, StaticRetriever};
