//! Site configuration.
//!
//! Settings are read from TOML. The defaults ship embedded in the crate
//! (`site.toml`) and every section is optional, so a deployment only spells
//! out what it changes:
//!
//! ```toml
//! [router]
//! navigation_delay_ms = 150
//!
//! [analytics]
//! ga4_measurement_id = "G-ABC123"
//! ```

use serde::Deserialize;
use std::time::Duration;

/// The embedded default configuration.
pub const DEFAULT_SETTINGS: &str = include_str!("site.toml");

/// Upper bound for the artificial navigation delay.
pub const MAX_NAVIGATION_DELAY_MS: u64 = 2_000;

/// Error type for settings loading.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// The TOML document could not be parsed.
	#[error("Failed to parse settings: {0}")]
	Parse(#[from] toml::de::Error),
	/// A value is outside its allowed range.
	#[error("Invalid setting '{key}': {reason}")]
	Invalid {
		/// Dotted key of the offending setting.
		key: &'static str,
		/// Why the value was rejected.
		reason: String,
	},
}

/// Router settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
	/// Id of the content mount element.
	pub mount_id: String,
	/// Id of the loading indicator element.
	pub loading_id: String,
	/// Delay between a navigation request and the content swap.
	pub navigation_delay_ms: u64,
	/// Attribute marking same-document navigation links.
	pub link_attribute: String,
}

impl Default for RouterSettings {
	fn default() -> Self {
		Self {
			mount_id: "main-content".to_string(),
			loading_id: "loading".to_string(),
			navigation_delay_ms: 300,
			link_attribute: "data-route".to_string(),
		}
	}
}

impl RouterSettings {
	/// Returns the navigation delay.
	pub fn navigation_delay(&self) -> Duration {
		Duration::from_millis(self.navigation_delay_ms)
	}
}

/// Page feature settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeatureSettings {
	/// Endpoint receiving newsletter subscriptions.
	pub newsletter_endpoint: String,
	/// Auto-advance period of the partner logo slider.
	pub logo_slide_interval_ms: u64,
	/// Service category shown when a tab strip is initialized.
	pub default_service_filter: String,
}

impl Default for FeatureSettings {
	fn default() -> Self {
		Self {
			newsletter_endpoint: "https://formspree.io/f/xldwwvdr".to_string(),
			logo_slide_interval_ms: 3_000,
			default_service_filter: "ai".to_string(),
		}
	}
}

impl FeatureSettings {
	/// Returns the logo slider period.
	pub fn logo_slide_interval(&self) -> Duration {
		Duration::from_millis(self.logo_slide_interval_ms)
	}
}

/// Analytics settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
	/// GA4 measurement id; page views are sent through `gtag` when set.
	pub ga4_measurement_id: Option<String>,
	/// Forward page views to the page-level `analyticsManager` object.
	pub forward_to_global_manager: bool,
}

impl Default for AnalyticsSettings {
	fn default() -> Self {
		Self {
			ga4_measurement_id: None,
			forward_to_global_manager: true,
		}
	}
}

/// Complete site configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
	/// `[router]`
	pub router: RouterSettings,
	/// `[features]`
	pub features: FeatureSettings,
	/// `[analytics]`
	pub analytics: AnalyticsSettings,
}

impl SiteSettings {
	/// Parses and validates settings from a TOML string.
	pub fn from_toml(source: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Loads the embedded defaults.
	pub fn embedded() -> Result<Self, SettingsError> {
		Self::from_toml(DEFAULT_SETTINGS)
	}

	/// Checks every value against its allowed range.
	pub fn validate(&self) -> Result<(), SettingsError> {
		let non_empty = [
			("router.mount_id", &self.router.mount_id),
			("router.loading_id", &self.router.loading_id),
			("router.link_attribute", &self.router.link_attribute),
		];
		for (key, value) in non_empty {
			if value.trim().is_empty() {
				return Err(SettingsError::Invalid {
					key,
					reason: "must not be empty".to_string(),
				});
			}
		}

		let delay = self.router.navigation_delay_ms;
		if delay == 0 || delay > MAX_NAVIGATION_DELAY_MS {
			return Err(SettingsError::Invalid {
				key: "router.navigation_delay_ms",
				reason: format!("must be within 1..={} ms, got {}", MAX_NAVIGATION_DELAY_MS, delay),
			});
		}

		if self.features.logo_slide_interval_ms == 0 {
			return Err(SettingsError::Invalid {
				key: "features.logo_slide_interval_ms",
				reason: "must be greater than zero".to_string(),
			});
		}

		if let Some(id) = &self.analytics.ga4_measurement_id
			&& id.trim().is_empty()
		{
			return Err(SettingsError::Invalid {
				key: "analytics.ga4_measurement_id",
				reason: "must not be empty when present".to_string(),
			});
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_embedded_settings_are_valid() {
		let settings = SiteSettings::embedded().unwrap();
		assert_eq!(settings.router.mount_id, "main-content");
		assert_eq!(settings.router.loading_id, "loading");
		assert_eq!(settings.router.link_attribute, "data-route");
		assert_eq!(settings.router.navigation_delay(), Duration::from_millis(300));
		assert_eq!(settings.features.default_service_filter, "ai");
		assert!(settings.analytics.forward_to_global_manager);
	}

	#[rstest]
	fn test_partial_document_keeps_defaults() {
		let settings = SiteSettings::from_toml(
			r#"
			[router]
			navigation_delay_ms = 150
			"#,
		)
		.unwrap();

		assert_eq!(settings.router.navigation_delay_ms, 150);
		assert_eq!(settings.router.mount_id, "main-content");
		assert_eq!(settings.features, FeatureSettings::default());
		assert_eq!(settings.analytics.ga4_measurement_id, None);
	}

	#[rstest]
	fn test_empty_document_is_default() {
		assert_eq!(SiteSettings::from_toml("").unwrap(), SiteSettings::default());
	}

	#[rstest]
	#[case("[router]\nnavigation_delay_ms = 0", "router.navigation_delay_ms")]
	#[case("[router]\nnavigation_delay_ms = 5000", "router.navigation_delay_ms")]
	#[case("[router]\nmount_id = \"  \"", "router.mount_id")]
	#[case("[router]\nlink_attribute = \"\"", "router.link_attribute")]
	#[case("[features]\nlogo_slide_interval_ms = 0", "features.logo_slide_interval_ms")]
	#[case("[analytics]\nga4_measurement_id = \"\"", "analytics.ga4_measurement_id")]
	fn test_invalid_values_rejected(#[case] source: &str, #[case] expected_key: &str) {
		match SiteSettings::from_toml(source) {
			Err(SettingsError::Invalid { key, .. }) => assert_eq!(key, expected_key),
			other => panic!("expected invalid setting, got {:?}", other),
		}
	}

	#[rstest]
	fn test_malformed_toml_is_parse_error() {
		let result = SiteSettings::from_toml("[router\nmount_id = 1");
		assert!(matches!(result, Err(SettingsError::Parse(_))));
	}
}
