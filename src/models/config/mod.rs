mod prep_config;

pub use prep_config::*;
