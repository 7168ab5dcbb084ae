//! Request handling module

pub mod router;
pub mod static_files;

pub use router::handle_request;
