//! Amazon S3 object storage using aws-sdk-s3.
//!
//! # Feature flag
//!
//! This module is gated behind the `s3` feature flag. `AWS_S3_ENDPOINT`
//! switches to path-style addressing for S3-compatible servers (MinIO,
//! LocalStack).

use super::objects::{ObjectStorage, StoredObject};
use crate::config::AwsConfig;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Builder, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use std::time::Duration;

/// Object storage backed by one S3 bucket
#[derive(Clone, Debug)]
pub struct S3ObjectStorage {
    client: Client,
    bucket: String,
    region: String,
    endpoint: Option<String>,
}

impl S3ObjectStorage {
    /// Build a client from static credentials in the configuration
    pub fn from_config(config: &AwsConfig) -> Result<Self> {
        let (Some(bucket), Some(access_key), Some(secret_key)) = (
            config.bucket.clone(),
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
        ) else {
            return Err(anyhow!(
                "AWS_S3_BUCKET_NAME, AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY are required"
            ));
        };

        let credentials = Credentials::new(access_key, secret_key, None, None, "gestor-env");
        let mut builder = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket,
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| anyhow!("Failed to upload '{}': {}", key, e))?;

        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Option<StoredObject>> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                let service_error = err.into_service_error();
                if service_error.is_no_such_key() {
                    return Ok(None);
                }
                return Err(anyhow!("Failed to download '{}': {}", key, service_error));
            }
        };

        let content_type = output
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| anyhow!("Failed to read '{}': {}", key, e))?
            .into_bytes()
            .to_vec();

        Ok(Some(StoredObject {
            bytes,
            content_type,
        }))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to delete '{}': {}", key, e))?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }

    async fn signed_url(&self, key: &str, expires_in: Duration) -> Result<String> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| anyhow!("Invalid presign duration: {}", e))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| anyhow!("Failed to presign '{}': {}", key, e))?;

        Ok(request.uri().to_string())
    }
}
