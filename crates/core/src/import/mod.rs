pub mod builder;
pub mod header;
pub mod manager;
pub mod section;
pub mod tokenizer;
