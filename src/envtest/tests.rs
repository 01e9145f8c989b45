use super::*;

#[test]
fn test_default_image() {
    // Act
    let envtest = Envtest::default();

    // Assert
    assert_eq!(envtest.image(), DEFAULT_IMAGE);
    assert_eq!(envtest.name(), DEFAULT_IMAGE_NAME);
    assert_eq!(envtest.tag(), DEFAULT_IMAGE_TAG);
    assert_eq!(envtest.kubernetes_version(), DEFAULT_KUBERNETES_VERSION);
    assert_eq!(envtest.startup_timeout(), Duration::from_secs(120));
}

#[test]
fn test_default_version_keeps_default_image() {
    let envtest = Envtest::new(None, Some(DEFAULT_KUBERNETES_VERSION.to_string()));

    assert_eq!(envtest.image(), DEFAULT_IMAGE);
}

#[test]
fn test_versioned_image() {
    // Act
    let envtest = Envtest::new(None, Some("1.30.0".to_string()));

    // Assert
    assert_eq!(envtest.image(), "ghcr.io/roma-glushko/testcontainers-envtest:v1.30.0");
    assert_eq!(envtest.name(), DEFAULT_IMAGE_NAME);
    assert_eq!(envtest.tag(), "v1.30.0");
    assert_eq!(envtest.kubernetes_version(), "1.30.0");
}

#[test]
fn test_explicit_image_wins_over_version() {
    for version in [None, Some("1.27.1"), Some(DEFAULT_KUBERNETES_VERSION)] {
        // Act
        let envtest = Envtest::new(Some("my-registry/envtest:custom".to_string()), version.map(String::from));

        // Assert
        assert_eq!(envtest.image(), "my-registry/envtest:custom");
        assert_eq!(envtest.name(), "my-registry/envtest");
        assert_eq!(envtest.tag(), "custom");
        assert_eq!(
            envtest.kubernetes_version(),
            version.unwrap_or(DEFAULT_KUBERNETES_VERSION)
        );
    }
}

#[test]
fn test_explicit_image_wins_regardless_of_call_order() {
    let image_first = Envtest::default()
        .with_image("my-registry/envtest:custom")
        .with_kubernetes_version("1.28.0");
    let version_first = Envtest::default()
        .with_kubernetes_version("1.28.0")
        .with_image("my-registry/envtest:custom");

    assert_eq!(image_first.image(), "my-registry/envtest:custom");
    assert_eq!(version_first.image(), "my-registry/envtest:custom");
    assert_eq!(image_first.kubernetes_version(), "1.28.0");
    assert_eq!(version_first.kubernetes_version(), "1.28.0");
}

#[test]
fn test_with_kubernetes_version_keeps_startup_timeout() {
    let envtest = Envtest::default()
        .with_startup_timeout_of(Duration::from_secs(30))
        .with_kubernetes_version("1.29.0");

    assert_eq!(envtest.startup_timeout(), Duration::from_secs(30));
    assert_eq!(envtest.tag(), "v1.29.0");
}

#[test]
fn test_empty_version_falls_back_to_default() {
    let envtest = Envtest::new(None, Some(String::new()));

    assert_eq!(envtest.kubernetes_version(), DEFAULT_KUBERNETES_VERSION);
    assert_eq!(envtest.image(), DEFAULT_IMAGE);
}

#[test]
fn test_image_without_tag() {
    let envtest = Envtest::default().with_image("my-registry/envtest");

    assert_eq!(envtest.image(), "my-registry/envtest");
    assert_eq!(envtest.name(), "my-registry/envtest");
    assert_eq!(envtest.tag(), DEFAULT_IMAGE_TAG);
}

#[test]
fn test_image_with_registry_port() {
    let envtest = Envtest::default().with_image("localhost:5000/envtest");

    assert_eq!(envtest.name(), "localhost:5000/envtest");
    assert_eq!(envtest.tag(), DEFAULT_IMAGE_TAG);

    let envtest = envtest.with_image("localhost:5000/envtest:v1.27.1");

    assert_eq!(envtest.name(), "localhost:5000/envtest");
    assert_eq!(envtest.tag(), "v1.27.1");
}

#[test]
fn test_exposed_ports_always_contain_api_server_port() {
    let images = [
        Envtest::default(),
        Envtest::new(None, Some("1.27.0".to_string())),
        Envtest::new(Some("my-registry/envtest:custom".to_string()), None),
        Envtest::new(Some("my-registry/envtest:custom".to_string()), Some("1.30.0".to_string())),
    ];

    for envtest in images {
        assert!(envtest.expose_ports().contains(&ContainerPort::Tcp(6443)));
    }
}

#[test]
fn test_ready_conditions() {
    let conditions = Envtest::default().ready_conditions();

    assert_eq!(conditions.len(), 1);
    assert!(matches!(conditions[0], WaitFor::Log(_)));
    let condition = format!("{:?}", conditions[0]);
    assert!(condition.contains("StdOut"));
    assert!(condition.contains(READY_MESSAGE));
}

#[test]
fn test_constants() {
    assert_eq!(API_SERVER_PORT, ContainerPort::Tcp(6443));
    assert_eq!(KUBECONFIG_PATH, "/tmp/kubeconfig");
    assert_eq!(READY_MESSAGE, "Envtest is ready!");
    assert_eq!(DEFAULT_IMAGE, format!("{}:{}", DEFAULT_IMAGE_NAME, DEFAULT_IMAGE_TAG));
}

#[test]
fn test_supported_versions() {
    assert!(is_supported_version("1.27.1"));
    assert!(is_supported_version("1.31"));
    assert!(is_supported_version("v1.30.0"));
    assert!(!is_supported_version("1.26.0"));
    assert!(!is_supported_version("1.310.0"));
}
