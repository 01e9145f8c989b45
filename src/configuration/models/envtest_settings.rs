
use crate::envtest::Envtest;
use duration_string::DurationString;
use serde::Deserialize;

/// Envtest container settings as they appear in a test suite configuration file.
#[derive(Debug, Default, Deserialize)]
pub struct EnvtestSettings {
    pub image: Option<String>,
    pub kubernetes_version: Option<String>,
    pub startup_timeout: Option<DurationString>,
}

impl Into<Envtest> for &EnvtestSettings {
    fn into(self) -> Envtest {
        let envtest = Envtest::new(self.image.clone(), self.kubernetes_version.clone());
        match self.startup_timeout {
            Some(startup_timeout) => envtest.with_startup_timeout_of(startup_timeout.into()),
            None => envtest,
        }
    }
}
