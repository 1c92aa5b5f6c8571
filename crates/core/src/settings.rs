//! Dashboard settings: four independently saved sections.
//!
//! Saving a section takes a partial patch, merges it over the current value,
//! and validates the merged result. An invalid merge is rejected as a whole
//! and the stored section is left untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::validation::{evaluate_model, FieldErrors, RuleKind, RuleSet};

define_status_enum! {
    /// How often notification emails are batched.
    Digest {
        Immediate = "immediate",
        #[default]
        Daily = "daily",
        Weekly = "weekly",
    }
}

define_status_enum! {
    ThemeMode {
        #[default]
        Dark = "dark",
        Light = "light",
    }
}

const HEX_COLOR_PATTERN: &str = r"^#[0-9a-fA-F]{6}$";

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    pub app_name: String,
    pub support_email: String,
    pub logo_url: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            app_name: "Ballie Admin".to_string(),
            support_email: "support@ballie.app".to_string(),
            logo_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email_enabled: bool,
    pub push_enabled: bool,
    pub digest: Digest,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_enabled: true,
            push_enabled: true,
            digest: Digest::Daily,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceSettings {
    pub theme_mode: ThemeMode,
    pub primary_color: String,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::Dark,
            primary_color: "#a8ff1a".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizationSettings {
    pub default_lang: String,
    pub supported: Vec<String>,
}

impl Default for LocalizationSettings {
    fn default() -> Self {
        Self {
            default_lang: "en".to_string(),
            supported: vec!["en".to_string(), "nl".to_string()],
        }
    }
}

/// All settings, as returned by `GET /settings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub general: GeneralSettings,
    pub notifications: NotificationSettings,
    pub appearance: AppearanceSettings,
    pub localization: LocalizationSettings,
}

// ---------------------------------------------------------------------------
// Section names
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsSection {
    General,
    Notifications,
    Appearance,
    Localization,
}

impl SettingsSection {
    pub const ALL: [SettingsSection; 4] = [
        Self::General,
        Self::Notifications,
        Self::Appearance,
        Self::Localization,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Notifications => "notifications",
            Self::Appearance => "appearance",
            Self::Localization => "localization",
        }
    }
}

impl fmt::Display for SettingsSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingsSection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| CoreError::not_found("Settings section", s))
    }
}

// ---------------------------------------------------------------------------
// Patches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralPatch {
    pub app_name: Option<String>,
    pub support_email: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationsPatch {
    pub email_enabled: Option<bool>,
    pub push_enabled: Option<bool>,
    pub digest: Option<Digest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppearancePatch {
    pub theme_mode: Option<ThemeMode>,
    pub primary_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizationPatch {
    pub default_lang: Option<String>,
    pub supported: Option<Vec<String>>,
}

/// A partial update to exactly one section.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsPatch {
    General(GeneralPatch),
    Notifications(NotificationsPatch),
    Appearance(AppearancePatch),
    Localization(LocalizationPatch),
}

impl SettingsPatch {
    /// Decode a JSON body for `section`.
    ///
    /// A body that does not fit the section's patch shape is reported as a
    /// validation failure on the offending section.
    pub fn from_json(section: SettingsSection, body: Value) -> Result<Self, CoreError> {
        let decoded = match section {
            SettingsSection::General => serde_json::from_value(body).map(Self::General),
            SettingsSection::Notifications => {
                serde_json::from_value(body).map(Self::Notifications)
            }
            SettingsSection::Appearance => serde_json::from_value(body).map(Self::Appearance),
            SettingsSection::Localization => {
                serde_json::from_value(body).map(Self::Localization)
            }
        };
        decoded.map_err(|e| {
            let mut errors = FieldErrors::new();
            errors.insert(section.as_str(), e.to_string());
            CoreError::Validation(errors)
        })
    }

    pub fn section(&self) -> SettingsSection {
        match self {
            Self::General(_) => SettingsSection::General,
            Self::Notifications(_) => SettingsSection::Notifications,
            Self::Appearance(_) => SettingsSection::Appearance,
            Self::Localization(_) => SettingsSection::Localization,
        }
    }
}

fn merge<T>(slot: &mut T, value: &Option<T>)
where
    T: Clone,
{
    if let Some(v) = value {
        *slot = v.clone();
    }
}

// ---------------------------------------------------------------------------
// Merge + validate
// ---------------------------------------------------------------------------

impl Settings {
    /// The merged settings after applying `patch`, or the validation errors
    /// of the patched section.
    pub fn patched(&self, patch: &SettingsPatch) -> Result<Settings, CoreError> {
        let mut next = self.clone();
        match patch {
            SettingsPatch::General(p) => {
                merge(&mut next.general.app_name, &p.app_name);
                merge(&mut next.general.support_email, &p.support_email);
                merge(&mut next.general.logo_url, &p.logo_url);
            }
            SettingsPatch::Notifications(p) => {
                merge(&mut next.notifications.email_enabled, &p.email_enabled);
                merge(&mut next.notifications.push_enabled, &p.push_enabled);
                merge(&mut next.notifications.digest, &p.digest);
            }
            SettingsPatch::Appearance(p) => {
                merge(&mut next.appearance.theme_mode, &p.theme_mode);
                merge(&mut next.appearance.primary_color, &p.primary_color);
            }
            SettingsPatch::Localization(p) => {
                merge(&mut next.localization.default_lang, &p.default_lang);
                merge(&mut next.localization.supported, &p.supported);
            }
        }
        next.validate(patch.section()).into_result()?;
        Ok(next)
    }

    /// Validate one section of these settings.
    pub fn validate(&self, section: SettingsSection) -> FieldErrors {
        match section {
            SettingsSection::General => evaluate_model(
                &RuleSet::new()
                    .required("appName", "App name is required")
                    .email("supportEmail", "Invalid email"),
                &self.general,
            ),
            SettingsSection::Notifications => FieldErrors::new(),
            SettingsSection::Appearance => evaluate_model(
                &RuleSet::new().rule(
                    "primaryColor",
                    RuleKind::Pattern(HEX_COLOR_PATTERN.to_string()),
                    "Color must look like #rrggbb",
                ),
                &self.appearance,
            ),
            SettingsSection::Localization => {
                let allowed = self
                    .localization
                    .supported
                    .iter()
                    .map(|lang| Value::String(lang.clone()))
                    .collect();
                evaluate_model(
                    &RuleSet::new()
                        .required("supported", "At least one language is required")
                        .required("defaultLang", "Default language is required")
                        .rule(
                            "defaultLang",
                            RuleKind::OneOf(allowed),
                            "Default language must be one of the supported languages",
                        ),
                    &self.localization,
                )
            }
        }
    }

    /// One section serialized as JSON.
    pub fn section_value(&self, section: SettingsSection) -> Value {
        let value = match section {
            SettingsSection::General => serde_json::to_value(&self.general),
            SettingsSection::Notifications => serde_json::to_value(&self.notifications),
            SettingsSection::Appearance => serde_json::to_value(&self.appearance),
            SettingsSection::Localization => serde_json::to_value(&self.localization),
        };
        value.unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn defaults_match_dashboard_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.general.app_name, "Ballie Admin");
        assert_eq!(settings.notifications.digest, Digest::Daily);
        assert_eq!(settings.appearance.primary_color, "#a8ff1a");
        assert_eq!(settings.localization.supported, vec!["en", "nl"]);
    }

    #[test]
    fn section_names_parse() {
        assert_eq!(
            "appearance".parse::<SettingsSection>().unwrap(),
            SettingsSection::Appearance
        );
        assert_matches!(
            "billing".parse::<SettingsSection>(),
            Err(CoreError::NotFound { .. })
        );
    }

    #[test]
    fn patch_merges_only_given_fields() {
        let patch = SettingsPatch::from_json(
            SettingsSection::General,
            json!({ "appName": "Ballie HQ" }),
        )
        .unwrap();
        let next = Settings::default().patched(&patch).unwrap();
        assert_eq!(next.general.app_name, "Ballie HQ");
        assert_eq!(next.general.support_email, "support@ballie.app");
    }

    #[test]
    fn invalid_color_is_rejected() {
        let patch = SettingsPatch::Appearance(AppearancePatch {
            primary_color: Some("green".into()),
            ..AppearancePatch::default()
        });
        let err = Settings::default().patched(&patch).unwrap_err();
        assert!(err.field_errors().unwrap().contains("primaryColor"));
    }

    #[test]
    fn default_language_must_be_supported() {
        let patch = SettingsPatch::Localization(LocalizationPatch {
            default_lang: Some("fr".into()),
            supported: None,
        });
        assert_matches!(
            Settings::default().patched(&patch),
            Err(CoreError::Validation(errors)) if errors.contains("defaultLang")
        );

        let patch = SettingsPatch::Localization(LocalizationPatch {
            default_lang: Some("fr".into()),
            supported: Some(vec!["en".into(), "fr".into()]),
        });
        assert!(Settings::default().patched(&patch).is_ok());
    }

    #[test]
    fn blank_app_name_is_rejected() {
        let patch = SettingsPatch::General(GeneralPatch {
            app_name: Some("  ".into()),
            ..GeneralPatch::default()
        });
        assert_matches!(
            Settings::default().patched(&patch),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn wrong_shape_is_a_validation_error() {
        assert_matches!(
            SettingsPatch::from_json(SettingsSection::Notifications, json!({"digest": "hourly"})),
            Err(CoreError::Validation(errors)) if errors.contains("notifications")
        );
    }
}
