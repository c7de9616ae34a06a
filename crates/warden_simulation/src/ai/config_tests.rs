//! Tests for EnemyAiConfig.

#[cfg(test)]
mod tests {
    use crate::ai::EnemyAiConfig;
    use crate::error::ConfigError;

    #[test]
    fn test_config_defaults() {
        let config = EnemyAiConfig::default();
        assert_eq!(config.detection_range, 15.0);
        assert_eq!(config.attack_range, 2.0);
        assert_eq!(config.attack_cooldown, 2.0);
        assert_eq!(config.walk_speed, 2.0);
        assert_eq!(config.run_speed, 5.0);
        assert_eq!(config.attack_variants, 3);
        assert_eq!(config.target_tag, "Player");
        assert_eq!(config.pending_path_speed, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_attack_trigger_names() {
        let config = EnemyAiConfig::default();
        assert_eq!(config.attack_trigger(1), "Attack1");
        assert_eq!(config.attack_trigger(3), "Attack3");
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config = EnemyAiConfig::from_ron_str("(detection_range: 20.0, attack_variants: 5)")
            .expect("valid config");

        assert_eq!(config.detection_range, 20.0);
        assert_eq!(config.attack_variants, 5);
        assert_eq!(config.run_speed, 5.0);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = EnemyAiConfig {
            target_tag: "Hero".to_string(),
            turn_rate: 8.0,
            ..Default::default()
        };

        let text = config.to_ron_string().expect("serializable");
        let parsed = EnemyAiConfig::from_ron_str(&text).expect("parsable");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_attack_beyond_detection() {
        let config = EnemyAiConfig {
            detection_range: 3.0,
            attack_range: 4.0,
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::AttackBeyondDetection { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        let negative = EnemyAiConfig {
            run_speed: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::InvalidValue { field: "run_speed", .. })
        ));

        let nan = EnemyAiConfig {
            attack_cooldown: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(ConfigError::InvalidValue { field: "attack_cooldown", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_variants() {
        let config = EnemyAiConfig {
            attack_variants: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoAttackVariants)));
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        let result = EnemyAiConfig::from_ron_str("(detection_range: \"far\")");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
