//! Text preprocessing.

pub mod tokenizer;

pub use tokenizer::tokenize;
