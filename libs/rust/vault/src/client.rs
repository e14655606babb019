//! Vault HTTP client for KV secret engines.

use crate::{
    config::VaultConfig,
    error::{VaultError, VaultResult},
    path::{add_prefix_to_kv_path, sanitize_path},
    provider::{KvSecret, KvSecretReader},
    secrets::{KvVersion, LogicalResponse, MountInfo, string_fields},
};
use async_trait::async_trait;
use pipeline_common::{HttpConfig, build_http_client};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

const TOKEN_HEADER: &str = "X-Vault-Token";
const NAMESPACE_HEADER: &str = "X-Vault-Namespace";

/// Vault client reading KV v1 and v2 secrets with a static token.
#[derive(Debug)]
pub struct VaultClient {
    config: VaultConfig,
    base: Url,
    http: Client,
}

impl VaultClient {
    /// Create a new Vault client.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfig`] for an empty token or an address
    /// that is not an absolute `http`/`https` URL, and a platform error if
    /// the HTTP client cannot be built.
    pub fn new(config: VaultConfig) -> VaultResult<Self> {
        let addr = Url::parse(&config.addr)
            .map_err(|e| VaultError::invalid_config(format!("vault address {:?}: {e}", config.addr)))?;
        if addr.cannot_be_a_base() || !matches!(addr.scheme(), "http" | "https") {
            return Err(VaultError::invalid_config(format!(
                "vault address {:?}: unsupported scheme {}",
                config.addr,
                addr.scheme()
            )));
        }
        if config.token.expose_secret().is_empty() {
            return Err(VaultError::invalid_config("vault token is empty"));
        }

        let http = build_http_client(&HttpConfig::default().with_timeout(config.timeout))?;

        Ok(Self {
            config,
            base: addr,
            http,
        })
    }

    /// Configured namespace, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.config.namespace.as_deref()
    }

    /// `<addr>/v1/<path>` with each path segment percent-encoded.
    fn api_url(&self, path: &str) -> VaultResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| VaultError::invalid_config(format!("vault address {:?} cannot be a base", self.config.addr)))?
            .pop_if_empty()
            .push("v1")
            .extend(path.split('/'));
        Ok(url)
    }

    /// Reads a logical path. A 404 is `Ok(None)`.
    async fn read(&self, path: &str) -> VaultResult<Option<LogicalResponse>> {
        let url = self.api_url(path)?;

        let mut request = self
            .http
            .get(url)
            .header(TOKEN_HEADER, self.config.token.expose_secret());
        if let Some(namespace) = &self.config.namespace {
            request = request.header(NAMESPACE_HEADER, namespace);
        }

        let response = request
            .send()
            .await
            .map_err(|e| VaultError::unavailable(e.to_string()))?;

        let status = response.status();
        match status.as_u16() {
            404 => return Ok(None),
            403 => return Err(VaultError::PermissionDenied(path.to_string())),
            429 => return Err(VaultError::RateLimited),
            204 => return Ok(Some(LogicalResponse::default())),
            _ if !status.is_success() => {
                let text = response.text().await.unwrap_or_default();
                return Err(VaultError::unavailable(format!("Status {status}: {text}")));
            }
            _ => {}
        }

        let body: LogicalResponse = response.json().await?;
        Ok(Some(body))
    }

    /// Looks up the mount serving `path` and its KV version.
    async fn kv_mount(&self, path: &str) -> VaultResult<MountInfo> {
        let info_path = format!("sys/internal/ui/mounts/{path}");
        let data = self
            .read(&info_path)
            .await?
            .and_then(|r| r.data)
            .ok_or_else(|| VaultError::malformed(&info_path, "failed to read secret engine information"))?;

        if !data.contains_key("path") {
            return Err(VaultError::malformed(&info_path, "failed to determine mount path"));
        }
        let mount: MountInfo = serde_json::from_value(Value::Object(data))?;
        Ok(mount)
    }
}

#[async_trait]
impl KvSecretReader for VaultClient {
    #[instrument(skip(self))]
    async fn get_kv_secret(&self, path: &str) -> VaultResult<Option<KvSecret>> {
        let path = sanitize_path(path);
        let mount = self.kv_mount(&path).await?;
        let version = mount.kv_version();

        let read_path = match version {
            KvVersion::V1 => path.clone(),
            KvVersion::V2 => add_prefix_to_kv_path(&path, &mount.path, "data"),
        };
        debug!(mount = %mount.path, ?version, read_path, "Reading KV secret");

        let Some(data) = self.read(&read_path).await?.and_then(|r| r.data) else {
            debug!(read_path, "No secret stored at path");
            return Ok(None);
        };

        let fields = match version {
            KvVersion::V1 => string_fields(&data),
            KvVersion::V2 => match data.get("data") {
                Some(Value::Object(inner)) => string_fields(inner),
                // deleted or destroyed version
                Some(Value::Null) => return Ok(None),
                Some(other) => {
                    warn!(read_path, "KV v2 payload is not an object");
                    return Err(VaultError::malformed(
                        read_path,
                        format!("expected 'data' to be an object, got {other}"),
                    ));
                }
                None => return Err(VaultError::malformed(read_path, "missing 'data' field")),
            },
        };

        Ok(Some(fields))
    }
}
