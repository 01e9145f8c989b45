
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::string::FromUtf8Error;
use std::time::Duration;
use testcontainers::TestcontainersError;
use testcontainers::core::error::WaitContainerError;

/// Errors surfaced by the envtest container adapter.
#[derive(Debug)]
pub enum EnvtestError {
    /// The readiness marker did not show up in the container logs in time.
    ReadinessTimeout(Duration),
    Start(TestcontainersError),
    Runtime(TestcontainersError),
    KubeconfigRead { exit_code: Option<i64>, output: String },
    Encoding(FromUtf8Error),
    Pattern(regex::Error),
    Io(std::io::Error),
    #[cfg(feature = "client")]
    Kubeconfig(anyhow::Error),
    #[cfg(feature = "client")]
    Client(kube::Error),
}

impl EnvtestError {
    /// Classifies a failure returned by the container runner while starting the container.
    pub fn from_start_error(error: TestcontainersError, startup_timeout: Duration) -> Self {
        match error {
            TestcontainersError::WaitContainer(WaitContainerError::StartupTimeout) => {
                EnvtestError::ReadinessTimeout(startup_timeout)
            }
            _ => EnvtestError::Start(error),
        }
    }

    pub fn is_readiness_timeout(&self) -> bool {
        matches!(self, EnvtestError::ReadinessTimeout(_))
    }
}

impl From<TestcontainersError> for EnvtestError {
    fn from(error: TestcontainersError) -> Self {
        EnvtestError::Runtime(error)
    }
}

impl From<FromUtf8Error> for EnvtestError {
    fn from(error: FromUtf8Error) -> Self {
        EnvtestError::Encoding(error)
    }
}

impl From<regex::Error> for EnvtestError {
    fn from(error: regex::Error) -> Self {
        EnvtestError::Pattern(error)
    }
}

impl From<std::io::Error> for EnvtestError {
    fn from(error: std::io::Error) -> Self {
        EnvtestError::Io(error)
    }
}

#[cfg(feature = "client")]
impl From<anyhow::Error> for EnvtestError {
    fn from(error: anyhow::Error) -> Self {
        EnvtestError::Kubeconfig(error)
    }
}

#[cfg(feature = "client")]
impl From<kube::Error> for EnvtestError {
    fn from(error: kube::Error) -> Self {
        EnvtestError::Client(error)
    }
}

impl Display for EnvtestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvtestError::ReadinessTimeout(timeout) => {
                write!(f, "Envtest container was not ready after {:?}", timeout)
            }
            EnvtestError::Start(e) => write!(f, "Failed to start envtest container: {}", e),
            EnvtestError::Runtime(e) => write!(f, "Container runtime error: {}", e),
            EnvtestError::KubeconfigRead { exit_code, output } => match exit_code {
                Some(code) => write!(f, "Failed to read kubeconfig (exit code {}): {}", code, output),
                None => write!(f, "Failed to read kubeconfig (unknown exit code): {}", output),
            },
            EnvtestError::Encoding(e) => write!(f, "Kubeconfig is not valid UTF-8: {}", e),
            EnvtestError::Pattern(e) => write!(f, "Invalid server address pattern: {}", e),
            EnvtestError::Io(e) => write!(f, "I/O error: {}", e),
            #[cfg(feature = "client")]
            EnvtestError::Kubeconfig(cause) => write!(f, "Failed to load kubeconfig: {}", cause),
            #[cfg(feature = "client")]
            EnvtestError::Client(e) => write!(f, "Failed to create Kubernetes client: {}", e),
        }
    }
}

impl Error for EnvtestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EnvtestError::Start(e) | EnvtestError::Runtime(e) => Some(e),
            EnvtestError::Encoding(e) => Some(e),
            EnvtestError::Pattern(e) => Some(e),
            EnvtestError::Io(e) => Some(e),
            #[cfg(feature = "client")]
            EnvtestError::Kubeconfig(cause) => Some(&**cause),
            #[cfg(feature = "client")]
            EnvtestError::Client(e) => Some(e),
            EnvtestError::ReadinessTimeout(_) | EnvtestError::KubeconfigRead { .. } => None,
        }
    }
}
