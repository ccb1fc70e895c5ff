pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod google_auth;
pub mod middleware;
pub mod models;
pub mod proto;
pub mod ranking;
pub mod services;
pub mod storage;
pub mod token;

pub use client::{AbelanaApi, AbelanaClient, CallError, CallHandle, CancelHandle, ClientError};
pub use config::Config;
pub use error::{AppError, AppResult};

/// Encoded descriptor set of the service, served by gRPC reflection.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("abelana_descriptor");
