
use crate::envtest::envtest_error::EnvtestError;
use crate::envtest::server_address::rewrite_server_address;
use crate::envtest::{API_SERVER_PORT, Envtest, KUBECONFIG_PATH};
use log::{debug, info};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use testcontainers::core::{CmdWaitFor, ExecCommand};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ContainerRequest, ImageExt};

#[cfg(feature = "client")]
use crate::kubeconfig_loader::{KubeConfigLoader, ensure_crypto_provider, from_yaml};
#[cfg(feature = "client")]
use kube::{Client, Config};

/// A running envtest container.
///
/// Owns exactly one container, which is removed once this value is dropped.
///
/// ```no_run
/// use envtest_container::{Envtest, EnvtestContainer};
///
/// # async fn run() -> Result<(), envtest_container::EnvtestError> {
/// let envtest = EnvtestContainer::start(Envtest::default()).await?;
/// let client = envtest.kubernetes_client().await?;
/// # Ok(())
/// # }
/// ```
pub struct EnvtestContainer {
    container: ContainerAsync<Envtest>,
    kubernetes_version: String,
}

impl EnvtestContainer {
    /// Starts the container and waits until the API server reports readiness.
    pub async fn start(image: Envtest) -> Result<Self, EnvtestError> {
        Self::start_with(image, |request| request).await
    }

    /// Starts the container after passing the request through `configure`, which can apply any
    /// generic container option offered by [`ImageExt`] (networks, env vars, mapped ports, ...).
    pub async fn start_with<F>(image: Envtest, configure: F) -> Result<Self, EnvtestError>
    where
        F: FnOnce(ContainerRequest<Envtest>) -> ContainerRequest<Envtest>,
    {
        let kubernetes_version = image.kubernetes_version().to_string();
        info!(
            "Starting envtest container from image {} (Kubernetes {})",
            image.image(),
            kubernetes_version
        );

        let (request, startup_timeout) = startup_request(image, configure);
        let container = request
            .start()
            .await
            .map_err(|error| EnvtestError::from_start_error(error, startup_timeout))?;

        info!("Envtest container {} is ready", container.id());
        Ok(EnvtestContainer {
            container,
            kubernetes_version,
        })
    }

    pub fn kubernetes_version(&self) -> &str {
        &self.kubernetes_version
    }

    pub fn image(&self) -> &Envtest {
        self.container.image()
    }

    /// The underlying container, for anything not covered by this adapter.
    pub fn container(&self) -> &ContainerAsync<Envtest> {
        &self.container
    }

    /// The externally reachable API server address, e.g. `https://localhost:32768`.
    pub async fn api_server_url(&self) -> Result<String, EnvtestError> {
        let host = self.container.get_host().await?;
        let port = self.container.get_host_port_ipv4(API_SERVER_PORT).await?;
        Ok(format!("https://{}:{}", host, port))
    }

    /// Reads the kubeconfig generated inside the container and points it to the mapped API
    /// server address. The kubeconfig is read again on every call.
    pub async fn kubeconfig(&self) -> Result<String, EnvtestError> {
        let command =
            ExecCommand::new(["cat", KUBECONFIG_PATH]).with_cmd_ready_condition(CmdWaitFor::exit());
        let mut result = self.container.exec(command).await?;
        let stdout = result.stdout_to_vec().await?;
        let stderr = result.stderr_to_vec().await?;
        let exit_code = result.exit_code().await?;

        if exit_code != Some(0) {
            let output = if stderr.is_empty() { stdout } else { stderr };
            return Err(EnvtestError::KubeconfigRead {
                exit_code,
                output: String::from_utf8_lossy(&output).into_owned(),
            });
        }

        let kubeconfig = String::from_utf8(stdout)?;
        let api_server_url = self.api_server_url().await?;
        debug!("Rewriting kubeconfig server address to {}", api_server_url);
        Ok(rewrite_server_address(&kubeconfig, &api_server_url)?)
    }

    /// Writes the kubeconfig to a new temporary file and returns its path.
    ///
    /// The file outlives this container, removing it is up to the caller.
    pub async fn kubeconfig_path(&self) -> Result<PathBuf, EnvtestError> {
        let kubeconfig = self.kubeconfig().await?;
        let mut file = tempfile::Builder::new()
            .prefix("envtest-")
            .suffix(".kubeconfig")
            .tempfile()?;
        file.write_all(kubeconfig.as_bytes())?;
        let (_, path) = file.keep().map_err(|error| EnvtestError::Io(error.error))?;
        debug!("Kubeconfig written to {:?}", path);
        Ok(path)
    }

    /// Client configuration for the API server of this container.
    #[cfg(feature = "client")]
    pub async fn kube_config(&self) -> Result<Config, EnvtestError> {
        let kubeconfig = self.kubeconfig().await?;
        Ok(from_yaml().load(&kubeconfig).await?)
    }

    /// A Kubernetes client connected to the API server of this container.
    ///
    /// Only available with the `client` feature (enabled by default).
    #[cfg(feature = "client")]
    pub async fn kubernetes_client(&self) -> Result<Client, EnvtestError> {
        ensure_crypto_provider();
        let config = self.kube_config().await?;
        Ok(Client::try_from(config)?)
    }

    pub async fn stop(&self) -> Result<(), EnvtestError> {
        info!("Stopping envtest container {}", self.container.id());
        Ok(self.container.stop().await?)
    }

    pub async fn rm(self) -> Result<(), EnvtestError> {
        info!("Removing envtest container {}", self.container.id());
        Ok(self.container.rm().await?)
    }
}

/// Builds the container request and resolves the readiness timeout it will run with, which
/// `configure` may have overridden.
fn startup_request<F>(image: Envtest, configure: F) -> (ContainerRequest<Envtest>, Duration)
where
    F: FnOnce(ContainerRequest<Envtest>) -> ContainerRequest<Envtest>,
{
    let image_timeout = image.startup_timeout();
    let request = configure(image.with_startup_timeout(image_timeout));
    let startup_timeout = request.startup_timeout().unwrap_or(image_timeout);
    (request, startup_timeout)
}
