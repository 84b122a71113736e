pub mod classifier;
pub mod tokenizer;

pub use classifier::*;
pub use tokenizer::*;
