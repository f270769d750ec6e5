use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

use super::{MediaStorage, StorageError};
use crate::config::S3Settings;

const KEY_PREFIX: &str = "uploads";

/// Media storage on S3 or an S3-compatible provider (MinIO etc.).
/// Objects land under `uploads/` and are addressed publicly through
/// `public_base`.
pub struct S3Storage {
    client: Client,
    bucket: String,
    public_base: String,
}

impl S3Storage {
    pub async fn new(settings: &S3Settings) -> Self {
        let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = settings.region.clone() {
            config_loader = config_loader.region(aws_sdk_s3::config::Region::new(region));
        }

        let config = config_loader.load().await;
        let mut s3_config = aws_sdk_s3::config::Builder::from(&config);

        if let Some(endpoint) = settings.endpoint.clone() {
            // S3-compatible providers generally require path-style addressing
            s3_config = s3_config.endpoint_url(endpoint).force_path_style(true);
        }

        let public_base = match &settings.public_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => match (&settings.endpoint, &settings.region) {
                (Some(endpoint), _) => {
                    format!("{}/{}", endpoint.trim_end_matches('/'), settings.bucket)
                }
                (None, Some(region)) => {
                    format!("https://{}.s3.{region}.amazonaws.com", settings.bucket)
                }
                (None, None) => format!("https://{}.s3.amazonaws.com", settings.bucket),
            },
        };

        tracing::debug!(bucket = %settings.bucket, public_base = %public_base, "S3 storage initialized");

        Self {
            client: Client::from_conf(s3_config.build()),
            bucket: settings.bucket.clone(),
            public_base,
        }
    }

    fn object_key(&self, filename: &str) -> String {
        format!("{KEY_PREFIX}/{filename}")
    }

    /// Recover the object key from a public URL produced by `store`.
    fn key_for_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(self.public_base.as_str())
            .map(|rest| rest.trim_start_matches('/').to_string())
    }
}

#[async_trait]
impl MediaStorage for S3Storage {
    async fn store(&self, filename: &str, data: &[u8]) -> Result<String, StorageError> {
        let key = self.object_key(filename);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("S3 put_object error: {e}")))?;

        Ok(format!("{}/{key}", self.public_base))
    }

    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        let Some(key) = self.key_for_url(url) else {
            // not one of ours, nothing to remove
            return Ok(());
        };

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("S3 delete_object error: {e}")))?;

        Ok(())
    }
}
