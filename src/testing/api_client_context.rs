use crate::envtest::envtest_container::EnvtestContainer;
use crate::testing::temp_namespace_context::TempNamespaceContext;
use k8s_openapi::NamespaceResourceScope;
use kube::{Api, Client};
use test_context::AsyncTestContext;

pub struct ApiClientContext<R> {
    pub api: Api<R>,
    namespace_context: TempNamespaceContext,
    pub client: Client,
}

impl<R> ApiClientContext<R>
where
    R: kube::Resource<Scope = NamespaceResourceScope> + Clone + Send + Sync + 'static,
    R::DynamicType: Default,
{
    pub fn namespace(&self) -> &str {
        &self.namespace_context.namespace
    }

    pub fn envtest(&self) -> &EnvtestContainer {
        &self.namespace_context.envtest_context.envtest
    }

    pub fn api(&self) -> &Api<R> {
        &self.api
    }
}

impl<R> AsyncTestContext for ApiClientContext<R>
where
    R: kube::Resource<Scope = NamespaceResourceScope> + Clone + Send + Sync + 'static,
    R::DynamicType: Default,
{
    async fn setup() -> Self {
        let namespace_context = TempNamespaceContext::setup().await;
        let client = namespace_context.envtest_context.client.clone();
        let api: Api<R> = Api::namespaced(client.clone(), &namespace_context.namespace);
        ApiClientContext {
            api,
            client,
            namespace_context,
        }
    }

    async fn teardown(self) {
        self.namespace_context.teardown().await;
    }
}
