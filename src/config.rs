use std::env;
use std::sync::Arc;

use anyhow::Context;
use object_store::aws::AmazonS3Builder;
use object_store::ObjectStore;

/// Connection settings for the flat-file bucket, read from the
/// environment once at startup and passed into the pipeline.
pub struct SyncConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub endpoint: String,
    pub bucket_name: String,
    pub prefix: String,
    pub region: String,
}

impl SyncConfig {
    pub fn from_env() -> Result<SyncConfig, anyhow::Error> {
        Ok(SyncConfig {
            access_key_id: require_var("AWS_ACCESS_KEY_ID")?,
            secret_access_key: require_var("AWS_SECRET_ACCESS_KEY")?,
            endpoint: require_var("S3_SERVICE_URL")?,
            bucket_name: require_var("S3_BUCKET_NAME")?,
            prefix: require_var("S3_PREFIX")?,
            region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        })
    }

    /// Builds the S3 client. Path-style addressing and plain-http
    /// endpoints keep compatible services like MinIO working.
    pub fn build_store(&self) -> Result<Arc<dyn ObjectStore>, object_store::Error> {
        let store = AmazonS3Builder::new()
            .with_region(self.region.as_str())
            .with_bucket_name(self.bucket_name.as_str())
            .with_access_key_id(self.access_key_id.as_str())
            .with_secret_access_key(self.secret_access_key.as_str())
            .with_endpoint(self.endpoint.as_str())
            .with_virtual_hosted_style_request(false)
            .with_allow_http(true)
            .build()?;

        Ok(Arc::new(store))
    }
}

fn require_var(name: &str) -> Result<String, anyhow::Error> {
    env::var(name).with_context(|| format!("missing environment variable {}", name))
}
