pub mod config;
pub mod corpus;
pub mod error;
pub mod pipeline;
pub mod ranker;
pub mod table;
pub mod writer;
// cmd and reports belong to the binary crate (main.rs).
