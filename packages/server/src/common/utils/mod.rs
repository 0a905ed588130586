pub mod embeddings;

pub use embeddings::*;
