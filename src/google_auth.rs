use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};

/// Google JWKS endpoint
const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

/// Allowed issuers for Google ID tokens
const ALLOWED_ISSUERS: &[&str] = &["accounts.google.com", "https://accounts.google.com"];

/// Cache TTL in seconds (1 hour)
const JWKS_CACHE_TTL_SECS: u64 = 3600;

/// Identity established by the sign-in provider.
#[derive(Debug, Clone)]
pub struct IdentityClaims {
    /// Provider-local user id; becomes the app user id.
    pub user_id: String,
    pub email: Option<String>,
}

/// Verifies the provider token a client presents to SignIn.
#[tonic::async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> AppResult<IdentityClaims>;
}

#[derive(Debug, Serialize, Deserialize)]
struct GoogleIdTokenClaims {
    sub: String,
    email: Option<String>,
    aud: String,
    iss: String,
    exp: u64,
    iat: u64,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct JwkKey {
    kid: String,
    n: String,
    e: String,
    kty: String,
    alg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwksResponse {
    keys: Vec<JwkKey>,
}

struct JwksCache {
    keys: HashMap<String, JwkKey>,
    fetched_at: std::time::Instant,
}

/// Google ID token verifier with JWKS caching
#[derive(Clone)]
pub struct GoogleTokenVerifier {
    client: Client,
    client_id: String,
    cache: Arc<RwLock<Option<JwksCache>>>,
}

impl GoogleTokenVerifier {
    pub fn new(client_id: String) -> Self {
        Self {
            client: Client::new(),
            client_id,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    async fn get_decoding_key(&self, kid: &str) -> Result<DecodingKey, String> {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                if cached.fetched_at.elapsed().as_secs() < JWKS_CACHE_TTL_SECS {
                    if let Some(key) = cached.keys.get(kid) {
                        return Self::jwk_to_decoding_key(key);
                    }
                }
            }
        }

        let jwks: JwksResponse = self
            .client
            .get(GOOGLE_JWKS_URL)
            .send()
            .await
            .map_err(|e| format!("Failed to fetch JWKS: {}", e))?
            .json()
            .await
            .map_err(|e| format!("Failed to parse JWKS: {}", e))?;

        let keys: HashMap<String, JwkKey> = jwks
            .keys
            .into_iter()
            .map(|key| (key.kid.clone(), key))
            .collect();

        let decoding_key = keys
            .get(kid)
            .ok_or_else(|| format!("Key with kid '{}' not found in JWKS", kid))
            .and_then(Self::jwk_to_decoding_key)?;

        *self.cache.write().await = Some(JwksCache {
            keys,
            fetched_at: std::time::Instant::now(),
        });

        Ok(decoding_key)
    }

    fn jwk_to_decoding_key(key: &JwkKey) -> Result<DecodingKey, String> {
        if key.kty != "RSA" {
            return Err(format!("Unsupported key type: {}", key.kty));
        }
        DecodingKey::from_rsa_components(&key.n, &key.e)
            .map_err(|e| format!("Failed to create decoding key: {}", e))
    }
}

#[tonic::async_trait]
impl IdentityVerifier for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> AppResult<IdentityClaims> {
        let header = decode_header(id_token)
            .map_err(|e| AppError::SignIn(format!("Invalid token header: {}", e)))?;
        let kid = header
            .kid
            .ok_or_else(|| AppError::SignIn("Token missing kid header".to_string()))?;

        let decoding_key = self.get_decoding_key(&kid).await.map_err(AppError::SignIn)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.client_id]);
        validation.set_issuer(ALLOWED_ISSUERS);

        let claims = decode::<GoogleIdTokenClaims>(id_token, &decoding_key, &validation)
            .map_err(|e| AppError::SignIn(format!("Token validation failed: {}", e)))?
            .claims;

        Ok(IdentityClaims {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}
