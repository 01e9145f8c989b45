use crate::envtest::envtest_container::EnvtestContainer;
use crate::envtest::Envtest;
use k8s_openapi::api::core::v1::Namespace;
use kube::api::PostParams;
use kube::{Api, Client};
use log::info;
use serde_json::json;
use uuid::Uuid;

pub mod api_client_context;
pub mod envtest_context;
pub mod temp_namespace_context;

/// COVERAGE: disabled since this is a testing helper
#[cfg_attr(coverage, coverage(off))]
pub async fn start_envtest(image: Envtest) -> anyhow::Result<(EnvtestContainer, Client)> {
    let envtest = EnvtestContainer::start(image).await?;
    info!("Envtest API server used by the tests: {}", envtest.api_server_url().await?);
    let client = envtest.kubernetes_client().await?;
    Ok((envtest, client))
}

pub async fn create_namespace(client: &Client) -> anyhow::Result<String> {
    let namespace_name = Uuid::new_v4().to_string();
    info!("Using namespace: {}", namespace_name);

    let namespaces: Api<Namespace> = Api::all(client.clone());
    let namespace_definition = json!({
        "metadata": {
            "name": namespace_name
        }
    });

    let ns = serde_json::from_value(namespace_definition)?;
    namespaces.create(&PostParams::default(), &ns).await?;
    info!("Namespace {} created successfully", namespace_name);
    Ok(namespace_name)
}
