pub mod envtest_settings;
