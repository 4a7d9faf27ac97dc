//! ov-s3: aws-sdk-s3 backend for the ov versioned object storage client
//!
//! Provides `S3Client`, the `ObjectStore` implementation backed by an
//! S3-compatible service.

mod client;

pub use client::S3Client;
