//! # Configuration and Logging Setup
//!
//! The pieces a host application wires up before the first call.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use ql_01_correlation_transport::{BridgeConfig, BridgeError, ConfigError};
    use ql_bridge_sim::SimulatedBridge;
    use quill_telemetry::{build_filter, init_logging, TelemetryConfig, TelemetryError};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_bridge_config_from_json_document() {
        let config: BridgeConfig =
            serde_json::from_str(r#"{ "default_timeout": "250ms", "sweep_interval": "2s" }"#)
                .unwrap();

        assert_eq!(config.default_timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.sweep_interval, Duration::from_secs(2));
        assert!(config.validate().is_ok());

        let partial: BridgeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(partial, BridgeConfig::default());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = BridgeConfig::with_timeout(Duration::ZERO);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeout(_))));
    }

    #[tokio::test]
    async fn test_env_timeout_applies_end_to_end() {
        let config = BridgeConfig::from_lookup(lookup(&[("QUILL_BRIDGE_TIMEOUT_MS", "25")]));
        assert_eq!(config.default_timeout, Some(Duration::from_millis(25)));

        let bridge = SimulatedBridge::start(config, Duration::from_millis(1));
        bridge.host.silence_channel("windowClose");

        let result = bridge.facade.window_close().await;
        assert!(matches!(result, Err(BridgeError::Timeout { .. })));
        bridge.shutdown();
    }

    #[test]
    fn test_telemetry_config_and_filter() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("QUILL_LOG_LEVEL", "ql_01_correlation_transport=debug,warn"),
            ("QUILL_JSON_LOGS", "true"),
        ]));
        assert!(config.json_logs);
        assert!(build_filter(&config).is_ok());

        let bad = TelemetryConfig {
            log_level: "ql_01=notalevel".into(),
            ..TelemetryConfig::default()
        };
        assert!(matches!(
            build_filter(&bad),
            Err(TelemetryError::InvalidFilter { .. })
        ));
    }

    #[test]
    fn test_logging_initializes_once() {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::default()
        };
        // Only this test installs a subscriber in this binary.
        assert!(init_logging(&config).is_ok());
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::AlreadyInitialized)
        ));
    }
}
