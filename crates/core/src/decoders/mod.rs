pub mod encodings;
pub mod registry;
pub mod traits;
