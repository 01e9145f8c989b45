use crate::testing::create_namespace;
use crate::testing::envtest_context::EnvtestContext;
use test_context::AsyncTestContext;

pub struct TempNamespaceContext {
    pub namespace: String,
    pub envtest_context: EnvtestContext,
}

impl AsyncTestContext for TempNamespaceContext {
    async fn setup() -> Self {
        let envtest_context = EnvtestContext::setup().await;
        let namespace = create_namespace(&envtest_context.client)
            .await
            .expect("Failed to create namespace");
        TempNamespaceContext {
            namespace,
            envtest_context,
        }
    }

    async fn teardown(self) {
        self.envtest_context.teardown().await;
    }
}
