//! Storage module for guest photo uploads
//!
//! Provides an S3-compatible object storage client: uploads under a fixed
//! folder prefix, a bounded listing for the gallery, and public URL
//! construction through the configured CDN domain.

mod s3_client;

pub use s3_client::{StorageClient, StoredObject};
