use crate::envtest::envtest_container::EnvtestContainer;
use crate::envtest::Envtest;
use crate::testing::start_envtest;
use kube::Client;
use log::warn;
use test_context::AsyncTestContext;

/// A fresh envtest container per test, removed on teardown.
pub struct EnvtestContext {
    pub envtest: EnvtestContainer,
    pub client: Client,
}

impl AsyncTestContext for EnvtestContext {
    async fn setup() -> Self {
        let (envtest, client) = start_envtest(Envtest::default())
            .await
            .expect("Failed to start envtest container");
        EnvtestContext { envtest, client }
    }

    async fn teardown(self) {
        if let Err(e) = self.envtest.rm().await {
            warn!("Failed to remove envtest container: {}", e);
        }
    }
}
