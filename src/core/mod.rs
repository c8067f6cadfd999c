// src/core/mod.rs
//! Backend access: the HTTP service client and validated uploads

pub mod service_client;
pub mod upload;

pub use service_client::ServiceClient;
pub use upload::ResumeUpload;
