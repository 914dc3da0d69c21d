use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// One object summary from a bucket listing
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// S3-compatible storage client for the photo bucket.
///
/// Photos are write-once: uploaded under the folder prefix, listed for the
/// gallery, never mutated or deleted by the application.
#[allow(dead_code)]
pub struct StorageClient {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    endpoint: String,
    cdn_domain: Option<String>,
    folder_prefix: String,
    /// Access key for AWS Signature v4 signing
    access_key: String,
    /// Secret key for AWS Signature v4 signing
    secret_key: String,
    /// Region name for AWS Signature v4 signing
    region_name: String,
    /// HTTP client for bucket policy operations
    http_client: Client,
}

#[allow(dead_code)]
impl StorageClient {
    /// Create a new storage client from configuration. Construction is
    /// offline; call [`ensure_bucket_exists`] and [`set_public_read_policy`]
    /// at startup for self-hosted endpoints.
    pub fn new(config: StorageConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Config(format!("Failed to create storage credentials: {}", e)))?;

        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("https://s3.{}.amazonaws.com", config.region));

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Config(format!("Failed to create storage bucket: {}", e)))?;

        // Path-style URLs for self-hosted S3-compatible endpoints
        // (http://endpoint/bucket instead of http://bucket.endpoint)
        if config.endpoint.is_some() {
            bucket.set_path_style();
        }

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            bucket,
            region,
            credentials,
            endpoint,
            cdn_domain: config.cdn_domain,
            folder_prefix: config.folder_prefix,
            access_key: config.access_key,
            secret_key: config.secret_key,
            region_name: config.region,
            http_client,
        })
    }

    /// Ensure the bucket exists, create if not
    pub async fn ensure_bucket_exists(&self) -> Result<(), AppError> {
        // Try to create bucket - if it already exists, the endpoint will
        // return an error which we can safely ignore
        match self.create_bucket().await {
            Ok(_) => {
                info!("Bucket '{}' created successfully", self.bucket.name());
                Ok(())
            }
            Err(e) => {
                let error_str = e.to_string();
                // Bucket already exists - this is fine
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                    Ok(())
                } else {
                    // Log warning but don't fail - bucket might exist with different error
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                    Ok(())
                }
            }
        }
    }

    /// Create the bucket
    async fn create_bucket(&self) -> Result<(), AppError> {
        let bucket_config = BucketConfiguration::default();

        Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            bucket_config,
        )
        .await
        .map_err(|e| {
            AppError::Storage(format!(
                "Failed to create bucket '{}': {}",
                self.bucket.name(),
                e
            ))
        })?;

        Ok(())
    }

    /// Set public read policy for the photo folder prefix so the gallery can
    /// fetch objects without presigning. Files outside the prefix stay
    /// inaccessible.
    pub async fn set_public_read_policy(&self) -> Result<(), AppError> {
        let bucket_name = self.bucket.name();
        let folder_prefix = &self.folder_prefix;

        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [
                {
                    "Effect": "Allow",
                    "Principal": {"AWS": "*"},
                    "Action": ["s3:GetObject"],
                    "Resource": [format!("arn:aws:s3:::{bucket_name}/{folder_prefix}/*")]
                }
            ]
        });

        let policy_str = policy.to_string();

        match self
            .put_bucket_policy_with_sigv4(&bucket_name, &policy_str)
            .await
        {
            Ok(_) => {
                info!(
                    "Set public read policy for {}/{}/*",
                    bucket_name, folder_prefix
                );
                Ok(())
            }
            Err(e) => {
                // Log warning but don't fail startup - policy can be set manually
                warn!(
                    "Failed to set bucket policy for '{}': {}. \
                    You may need to set the policy manually.",
                    bucket_name, e
                );
                Ok(())
            }
        }
    }

    /// Put bucket policy using AWS Signature v4
    async fn put_bucket_policy_with_sigv4(
        &self,
        bucket_name: &str,
        policy: &str,
    ) -> Result<(), AppError> {
        let now = Utc::now();
        let date_stamp = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();

        // Parse endpoint to get host
        let endpoint_url = Url::parse(&self.endpoint)
            .map_err(|e| AppError::Storage(format!("Invalid endpoint URL: {}", e)))?;
        let host = endpoint_url
            .host_str()
            .ok_or_else(|| AppError::Storage("Endpoint URL has no host".to_string()))?;
        let port = endpoint_url.port();
        let host_header = match port {
            Some(p) => format!("{}:{}", host, p),
            None => host.to_string(),
        };

        // Build the URL for PUT bucket policy
        let url = format!("{}/{}?policy", self.endpoint, bucket_name);

        // Calculate payload hash
        let payload_hash = hex::encode(Sha256::digest(policy.as_bytes()));

        // Create canonical request
        let canonical_uri = format!("/{}", bucket_name);
        let canonical_querystring = "policy=";
        let canonical_headers = format!(
            "host:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n",
            host_header, payload_hash, amz_date
        );
        let signed_headers = "host;x-amz-content-sha256;x-amz-date";

        let canonical_request = format!(
            "PUT\n{}\n{}\n{}\n{}\n{}",
            canonical_uri, canonical_querystring, canonical_headers, signed_headers, payload_hash
        );

        // Create string to sign
        let algorithm = "AWS4-HMAC-SHA256";
        let credential_scope = format!("{}/{}/s3/aws4_request", date_stamp, self.region_name);
        let canonical_request_hash = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            algorithm, amz_date, credential_scope, canonical_request_hash
        );

        // Calculate signature
        let signature = self.calculate_signature(&date_stamp, &string_to_sign)?;

        // Create authorization header
        let authorization_header = format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            algorithm, self.access_key, credential_scope, signed_headers, signature
        );

        // Make the request
        let response = self
            .http_client
            .put(&url)
            .header("Host", &host_header)
            .header("x-amz-date", &amz_date)
            .header("x-amz-content-sha256", &payload_hash)
            .header("Authorization", &authorization_header)
            .header("Content-Type", "application/json")
            .body(policy.to_string())
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to send policy request: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(AppError::Storage(format!(
                "Failed to set bucket policy: {} - {}",
                status, body
            )))
        }
    }

    /// Calculate AWS Signature v4 signature
    fn calculate_signature(
        &self,
        date_stamp: &str,
        string_to_sign: &str,
    ) -> Result<String, AppError> {
        // Step 1: Create signing key
        let k_date = Self::hmac_sha256(
            format!("AWS4{}", self.secret_key).as_bytes(),
            date_stamp.as_bytes(),
        )?;
        let k_region = Self::hmac_sha256(&k_date, self.region_name.as_bytes())?;
        let k_service = Self::hmac_sha256(&k_region, b"s3")?;
        let k_signing = Self::hmac_sha256(&k_service, b"aws4_request")?;

        // Step 2: Calculate signature
        let signature = Self::hmac_sha256(&k_signing, string_to_sign.as_bytes())?;
        Ok(hex::encode(signature))
    }

    /// HMAC-SHA256 helper
    fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, AppError> {
        let mut mac = HmacSha256::new_from_slice(key)
            .map_err(|e| AppError::Storage(format!("HMAC key error: {}", e)))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Build the full object key for a file name under the folder prefix
    pub fn object_key(&self, file_name: &str) -> String {
        format!("{}/{}", self.folder_prefix, file_name)
    }

    /// Upload an object. Returns the object key.
    pub async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        self.bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload '{}': {}", key, e)))?;

        debug!("Uploaded '{}' to bucket '{}'", key, self.bucket.name());
        Ok(key.to_string())
    }

    /// Single bounded listing of the photo folder. No pagination beyond
    /// `max_keys`; the gallery shows at most one page.
    pub async fn list(&self, max_keys: usize) -> Result<Vec<StoredObject>, AppError> {
        let prefix = format!("{}/", self.folder_prefix);
        let (page, _status) = self
            .bucket
            .list_page(prefix.clone(), None, None, None, Some(max_keys))
            .await
            .map_err(|e| AppError::Storage(format!("Failed to list '{}': {}", prefix, e)))?;

        Ok(page
            .contents
            .into_iter()
            .map(|object| StoredObject {
                key: object.key,
                size: object.size,
                last_modified: DateTime::parse_from_rfc3339(&object.last_modified)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc)),
            })
            .collect())
    }

    /// Public retrieval URL for an object: the CDN domain when configured,
    /// otherwise a direct bucket URL.
    pub fn public_url(&self, key: &str) -> String {
        match &self.cdn_domain {
            Some(domain) if domain.contains("://") => {
                format!("{}/{}", domain.trim_end_matches('/'), key)
            }
            Some(domain) => format!("https://{}/{}", domain, key),
            None => format!("{}/{}/{}", self.endpoint, self.bucket.name(), key),
        }
    }

    /// Get the folder prefix photos live under
    pub fn folder_prefix(&self) -> &str {
        &self.folder_prefix
    }

    /// Get the bucket name
    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(cdn_domain: Option<&str>) -> StorageConfig {
        StorageConfig {
            region: "ap-northeast-2".to_string(),
            access_key: "test-access".to_string(),
            secret_key: "test-secret".to_string(),
            bucket: "wedding-photos".to_string(),
            endpoint: Some("http://localhost:9000".to_string()),
            cdn_domain: cdn_domain.map(str::to_string),
            folder_prefix: "attendance".to_string(),
        }
    }

    #[test]
    fn test_public_url_uses_cdn_domain() {
        let client = StorageClient::new(test_config(Some("cdn.example.com"))).unwrap();
        assert_eq!(
            client.public_url("attendance/20251011-abc.jpg"),
            "https://cdn.example.com/attendance/20251011-abc.jpg"
        );
    }

    #[test]
    fn test_public_url_accepts_cdn_with_scheme() {
        let client = StorageClient::new(test_config(Some("https://cdn.example.com/"))).unwrap();
        assert_eq!(
            client.public_url("attendance/a.mp4"),
            "https://cdn.example.com/attendance/a.mp4"
        );
    }

    #[test]
    fn test_public_url_falls_back_to_bucket_endpoint() {
        let client = StorageClient::new(test_config(None)).unwrap();
        assert_eq!(
            client.public_url("attendance/a.png"),
            "http://localhost:9000/wedding-photos/attendance/a.png"
        );
    }

    #[test]
    fn test_object_key_applies_folder_prefix() {
        let client = StorageClient::new(test_config(None)).unwrap();
        assert_eq!(
            client.object_key("20251011130000-1a2b3c4d.jpg"),
            "attendance/20251011130000-1a2b3c4d.jpg"
        );
    }
}
