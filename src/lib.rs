pub mod error;
pub mod models;
pub mod preprocessor;
pub mod shader;
