#![cfg_attr(coverage, feature(coverage_attribute))]

pub mod configuration;
pub mod envtest;
#[cfg(feature = "client")]
pub mod kubeconfig_loader;
// COVERAGE: disabled since the module is only compiled for testing purposes
#[cfg(all(feature = "client", any(test, feature = "testing")))]
#[cfg_attr(coverage, coverage(off))]
pub mod testing;

pub use envtest::Envtest;
pub use envtest::envtest_container::EnvtestContainer;
pub use envtest::envtest_error::EnvtestError;
