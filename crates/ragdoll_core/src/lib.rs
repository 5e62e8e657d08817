pub mod chunk;
pub mod config;
pub mod document;
pub mod error;
pub mod files;
pub mod model;
pub mod report;
