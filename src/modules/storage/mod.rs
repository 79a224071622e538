//! Storage module for report evidence images
//!
//! Provides a MinIO/S3-compatible storage client for uploading captured
//! frames and resolving their public URLs.

mod minio_client;

pub use minio_client::MinIOClient;
