#[cfg(test)]
mod tests;

pub mod envtest_container;
pub mod envtest_error;
pub mod server_address;

use log::warn;
use std::borrow::Cow;
use std::time::Duration;
use testcontainers::Image;
use testcontainers::core::{ContainerPort, WaitFor};

/// Repository of the envtest images, each Kubernetes version is published as `v<version>` tag.
pub const DEFAULT_IMAGE_NAME: &str = "ghcr.io/roma-glushko/testcontainers-envtest";
pub const DEFAULT_IMAGE_TAG: &str = "latest";
pub const DEFAULT_IMAGE: &str = "ghcr.io/roma-glushko/testcontainers-envtest:latest";
pub const DEFAULT_KUBERNETES_VERSION: &str = "1.31.0";

/// Port the Kubernetes API server listens on inside the container.
pub const API_SERVER_PORT: ContainerPort = ContainerPort::Tcp(6443);

/// Location of the kubeconfig generated by the image once the API server is up.
pub const KUBECONFIG_PATH: &str = "/tmp/kubeconfig";

/// Log line the image writes to stdout once both etcd and the API server are serving.
pub const READY_MESSAGE: &str = "Envtest is ready!";

pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(120);

/// Kubernetes minor versions the image is published for.
pub const SUPPORTED_KUBERNETES_VERSIONS: &[&str] = &["1.27", "1.28", "1.29", "1.30", "1.31"];

/// The envtest image: a Kubernetes API server backed by etcd, without scheduler or kubelet.
///
/// The image reference is derived from the requested Kubernetes version unless an explicit
/// image is provided, in which case the explicit image always wins:
///
/// ```
/// use envtest_container::Envtest;
///
/// let envtest = Envtest::default().with_kubernetes_version("1.30.0");
/// assert_eq!(envtest.image(), "ghcr.io/roma-glushko/testcontainers-envtest:v1.30.0");
///
/// let envtest = envtest.with_image("my-registry/envtest:custom");
/// assert_eq!(envtest.image(), "my-registry/envtest:custom");
/// assert_eq!(envtest.kubernetes_version(), "1.30.0");
/// ```
///
/// Generic container options (networks, environment variables, mapped ports) are passed through
/// [`testcontainers::ImageExt`], see [`envtest_container::EnvtestContainer::start_with`].
#[derive(Debug, Clone)]
pub struct Envtest {
    explicit_image: Option<String>,
    kubernetes_version: String,
    image: String,
    name_end: usize,
    startup_timeout: Duration,
    expose_ports: [ContainerPort; 1],
}

impl Envtest {
    pub fn new(image: Option<String>, kubernetes_version: Option<String>) -> Self {
        let kubernetes_version = kubernetes_version
            .filter(|version| !version.is_empty())
            .unwrap_or_else(|| DEFAULT_KUBERNETES_VERSION.to_string());
        if !is_supported_version(&kubernetes_version) {
            warn!(
                "Kubernetes version {} is not in the list of supported versions {:?}",
                kubernetes_version, SUPPORTED_KUBERNETES_VERSIONS
            );
        }

        let resolved_image = resolve_image(image.as_deref(), &kubernetes_version).into_owned();
        let name_end = tag_separator(&resolved_image).unwrap_or(resolved_image.len());
        Envtest {
            explicit_image: image,
            kubernetes_version,
            image: resolved_image,
            name_end,
            startup_timeout: DEFAULT_STARTUP_TIMEOUT,
            expose_ports: [API_SERVER_PORT],
        }
    }

    /// Uses the given image verbatim, regardless of the requested Kubernetes version.
    pub fn with_image(self, image: impl Into<String>) -> Self {
        Self::new(Some(image.into()), Some(self.kubernetes_version)).with_startup_timeout_of(self.startup_timeout)
    }

    /// Selects the image tag matching the Kubernetes version, unless an explicit image was set.
    pub fn with_kubernetes_version(self, kubernetes_version: impl Into<String>) -> Self {
        Self::new(self.explicit_image, Some(kubernetes_version.into())).with_startup_timeout_of(self.startup_timeout)
    }

    /// Overrides how long the container may take to report readiness.
    pub fn with_startup_timeout_of(mut self, startup_timeout: Duration) -> Self {
        self.startup_timeout = startup_timeout;
        self
    }

    /// The resolved image reference.
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn kubernetes_version(&self) -> &str {
        &self.kubernetes_version
    }

    pub fn startup_timeout(&self) -> Duration {
        self.startup_timeout
    }
}

impl Default for Envtest {
    fn default() -> Self {
        Envtest::new(None, None)
    }
}

impl Image for Envtest {
    fn name(&self) -> &str {
        &self.image[..self.name_end]
    }

    fn tag(&self) -> &str {
        match self.image.get(self.name_end + 1..) {
            Some(tag) if !tag.is_empty() => tag,
            _ => DEFAULT_IMAGE_TAG,
        }
    }

    fn ready_conditions(&self) -> Vec<WaitFor> {
        vec![WaitFor::message_on_stdout(READY_MESSAGE)]
    }

    fn expose_ports(&self) -> &[ContainerPort] {
        &self.expose_ports
    }
}

fn resolve_image<'a>(image: Option<&'a str>, kubernetes_version: &str) -> Cow<'a, str> {
    match image {
        Some(image) => Cow::Borrowed(image),
        None if kubernetes_version != DEFAULT_KUBERNETES_VERSION => {
            Cow::Owned(format!("{}:v{}", DEFAULT_IMAGE_NAME, kubernetes_version))
        }
        None => Cow::Borrowed(DEFAULT_IMAGE),
    }
}

/// Position of the `:` separating the tag, ignoring registry ports such as `localhost:5000/envtest`.
fn tag_separator(image: &str) -> Option<usize> {
    let path_start = image.rfind('/').map(|index| index + 1).unwrap_or(0);
    image[path_start..].rfind(':').map(|index| path_start + index)
}

fn is_supported_version(kubernetes_version: &str) -> bool {
    let version = kubernetes_version.trim_start_matches('v');
    SUPPORTED_KUBERNETES_VERSIONS
        .iter()
        .any(|supported| version == *supported || version.starts_with(&format!("{}.", supported)))
}
