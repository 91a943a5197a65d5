//! End-to-end tests: discovery files on disk through the pipeline to the written artifacts.

mod fixtures;
mod pipeline;
