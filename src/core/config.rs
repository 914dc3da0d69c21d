use std::env;

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Config {
    pub app: AppConfig,
    pub swagger: SwaggerConfig,
    pub google: GoogleSheetsConfig,
    pub storage: StorageConfig,
    pub venue: VenueConfig,
}

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Google Sheets service-account configuration.
///
/// The sheet is the attendance datastore: one append-only worksheet of
/// RSVP rows plus an optional photo-metadata worksheet.
#[derive(Debug, Clone)]
pub struct GoogleSheetsConfig {
    /// Spreadsheet id from the sheet URL
    pub sheet_id: String,
    /// Service account email (the JWT issuer)
    pub service_account_email: String,
    /// RSA private key in PEM form. Deployment systems commonly store the
    /// key with literal "\n" sequences; those are un-escaped at load time.
    pub private_key: String,
}

/// S3-compatible storage for guest photo uploads
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// AWS region (also used for SigV4 signing against custom endpoints)
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    /// Custom endpoint for S3-compatible services; None means AWS S3
    pub endpoint: Option<String>,
    /// Content-delivery domain for photo URLs (e.g. a CloudFront domain).
    /// Falls back to direct bucket URLs when unset.
    pub cdn_domain: Option<String>,
    /// Folder prefix under which every uploaded photo lives
    pub folder_prefix: String,
}

/// Ceremony venue shown on the invitation, including the optional map key.
/// A missing map key must never break the page: the venue endpoint then
/// serves only the static directions links.
#[derive(Debug, Clone)]
pub struct VenueConfig {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub kakao_map_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            google: GoogleSheetsConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            venue: VenueConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Dearday API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the Dearday invitation".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl GoogleSheetsConfig {
    pub fn from_env() -> Result<Self, String> {
        let sheet_id = env::var("GOOGLE_SHEET_ID")
            .map_err(|_| "GOOGLE_SHEET_ID environment variable is required".to_string())?;

        let service_account_email = env::var("GOOGLE_SERVICE_ACCOUNT_EMAIL").map_err(|_| {
            "GOOGLE_SERVICE_ACCOUNT_EMAIL environment variable is required".to_string()
        })?;

        let private_key = env::var("GOOGLE_PRIVATE_KEY")
            .map_err(|_| "GOOGLE_PRIVATE_KEY environment variable is required".to_string())?
            .replace("\\n", "\n");

        Ok(Self {
            sheet_id,
            service_account_email,
            private_key,
        })
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, String> {
        let region = env::var("AWS_REGION").unwrap_or_else(|_| "ap-northeast-2".to_string());

        let access_key = env::var("AWS_ACCESS_KEY_ID")
            .map_err(|_| "AWS_ACCESS_KEY_ID environment variable is required".to_string())?;

        let secret_key = env::var("AWS_SECRET_ACCESS_KEY")
            .map_err(|_| "AWS_SECRET_ACCESS_KEY environment variable is required".to_string())?;

        let bucket = env::var("S3_BUCKET_NAME")
            .map_err(|_| "S3_BUCKET_NAME environment variable is required".to_string())?;

        let endpoint = env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty());

        let cdn_domain = env::var("CLOUDFRONT_DOMAIN").ok().filter(|s| !s.is_empty());

        let folder_prefix =
            env::var("S3_FOLDER_PREFIX").unwrap_or_else(|_| "attendance".to_string());

        Ok(Self {
            region,
            access_key,
            secret_key,
            bucket,
            endpoint,
            cdn_domain,
            folder_prefix,
        })
    }
}

impl VenueConfig {
    pub fn from_env() -> Result<Self, String> {
        let name =
            env::var("VENUE_NAME").unwrap_or_else(|_| "당산 그랜드컨벤션센터".to_string());
        let address = env::var("VENUE_ADDRESS")
            .unwrap_or_else(|_| "서울특별시 영등포구 양평로 58, 당산 그랜드컨벤션센터".to_string());

        let latitude = env::var("VENUE_LATITUDE")
            .unwrap_or_else(|_| "37.5347454".to_string())
            .parse::<f64>()
            .map_err(|_| "VENUE_LATITUDE must be a valid number".to_string())?;

        let longitude = env::var("VENUE_LONGITUDE")
            .unwrap_or_else(|_| "126.9006169".to_string())
            .parse::<f64>()
            .map_err(|_| "VENUE_LONGITUDE must be a valid number".to_string())?;

        let kakao_map_api_key = env::var("KAKAO_MAP_API_KEY").ok().filter(|s| !s.is_empty());

        Ok(Self {
            name,
            address,
            latitude,
            longitude,
            kakao_map_api_key,
        })
    }
}
