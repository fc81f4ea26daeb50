// src/config/mod.rs
// Configuration: environment first, then the optional config file

pub mod env;
pub mod file;

pub use env::{ClientConfig, ConfigValidation, EnvConfig, default_data_dir};
pub use file::FileConfig;
