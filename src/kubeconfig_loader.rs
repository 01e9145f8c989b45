
use async_trait::async_trait;
use kube::Config;
use kube::config::Kubeconfig;
use log::{debug, info};
use rustls::crypto::CryptoProvider;
use serde_yml::from_str;
use std::path::PathBuf;
use std::sync::Arc;

pub fn from_yaml() -> Arc<dyn KubeConfigLoader<ConfigSource = String>> {
    Arc::new(YamlKubeConfigLoader)
}

pub fn from_file() -> Arc<dyn KubeConfigLoader<ConfigSource = PathBuf>> {
    Arc::new(FileKubeConfigLoader)
}

#[async_trait]
pub trait KubeConfigLoader: Send + Sync {
    type ConfigSource;
    async fn load(&self, source: &Self::ConfigSource) -> anyhow::Result<Config>;
}

/// Installs the `ring` crypto provider for the Kubernetes client unless one is installed already.
pub fn ensure_crypto_provider() {
    if CryptoProvider::get_default().is_none() {
        // Another thread may win the race, either provider works
        let _ = rustls::crypto::ring::default_provider().install_default();
    }
}

/// Parses kubeconfig YAML and resolves its current context into a client configuration.
pub async fn parse_kubeconfig(kubeconfig_string: &str) -> anyhow::Result<Config> {
    let kubeconfig: Kubeconfig = from_str(kubeconfig_string)?;
    Ok(Config::from_custom_kubeconfig(kubeconfig, &Default::default()).await?)
}

struct YamlKubeConfigLoader;

#[async_trait]
impl KubeConfigLoader for YamlKubeConfigLoader {
    type ConfigSource = String;

    async fn load(&self, source: &Self::ConfigSource) -> anyhow::Result<Config> {
        debug!("Configuring Kubernetes client with in-memory kubeconfig ({} bytes)", source.len());
        parse_kubeconfig(source).await
    }
}

struct FileKubeConfigLoader;

#[async_trait]
impl KubeConfigLoader for FileKubeConfigLoader {
    type ConfigSource = PathBuf;

    async fn load(&self, source: &Self::ConfigSource) -> anyhow::Result<Config> {
        info!("Configuring Kubernetes client with kubeconfig file: {:?}", source);
        let kubeconfig_string = tokio::fs::read_to_string(source).await?;
        parse_kubeconfig(&kubeconfig_string).await
    }
}
