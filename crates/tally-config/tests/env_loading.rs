//! Environment-only configuration through the full provider chain.

use figment::Jail;
use tally_config::{ConfigError, TallyConfig};

#[test]
fn nested_env_vars_fill_every_section() {
    Jail::expect_with(|jail| {
        jail.set_env("TALLY_TOGGL__API_TOKEN", "env-toggl");
        jail.set_env("TALLY_TOGGL__WORKSPACE_ID", "777");
        jail.set_env("TALLY_PIVOTAL__API_TOKEN", "env-tracker");
        jail.set_env("TALLY_PIVOTAL__PROJECT_ID", "1234567");
        jail.set_env("TALLY_REPORT__OWNER", "Env Owner");

        let config = TallyConfig::load().expect("config loads");
        assert_eq!(config.toggl.api_token, "env-toggl");
        assert_eq!(config.toggl.workspace_id, "777");
        assert_eq!(config.pivotal.project_id, "1234567");
        assert_eq!(config.report.owner, "Env Owner");
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("TALLY_TOGGL__API_TOKN", "typo");

        let config = TallyConfig::load().expect("config loads");
        assert!(config.toggl.api_token.is_empty());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotConfigured { .. })
        ));
        Ok(())
    });
}

#[test]
fn single_underscore_does_not_nest() {
    Jail::expect_with(|jail| {
        jail.set_env("TALLY_REPORT_OWNER", "flat");

        let config = TallyConfig::load().expect("config loads");
        assert!(config.report.owner.is_empty());
        Ok(())
    });
}
