//! HTTP protocol layer module
//!
//! Response construction and header policy, decoupled from file loading.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_403_response, build_404_response, build_405_response, build_file_response,
    build_options_response,
};
