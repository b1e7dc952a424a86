// src/pipeline/mod.rs

//! Pipeline assembly: resolved steps + plugin settings → YAML document.

pub mod assemble;
pub mod document;

pub use assemble::{build_document, generate_pipeline, AssembledPipeline};
pub use document::PipelineDocument;
