use serde::Serialize;
use thiserror::Error;

use crate::domain::subject::{Configuration, PrefixMode};
use crate::normalize::aliases::{
    AliasConfiguration, DEFAULT_FORWARD_ALIASES, DEFAULT_FORWARD_LABEL, DEFAULT_REPLY_ALIASES,
    DEFAULT_REPLY_LABEL, DEFAULT_TAGS, RawAliasSettings,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown setting `{0}`")]
    UnknownKey(String),
    #[error("`{key}` expects true or false, got `{value}`")]
    InvalidBool { key: String, value: String },
    #[error("`prefixOptions` expects collapse or overwrite, got `{0}`")]
    InvalidPrefixMode(String),
}

/// Every setting the store knows, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    RemoveExtTag,
    Tags,
    ReinsertTags,
    RemovePrefix,
    PrefixOptions,
    ReplyAliases,
    ForwardAliases,
    ReplyLabel,
    ForwardLabel,
}

impl SettingKey {
    pub const ALL: [SettingKey; 9] = [
        SettingKey::RemoveExtTag,
        SettingKey::Tags,
        SettingKey::ReinsertTags,
        SettingKey::RemovePrefix,
        SettingKey::PrefixOptions,
        SettingKey::ReplyAliases,
        SettingKey::ForwardAliases,
        SettingKey::ReplyLabel,
        SettingKey::ForwardLabel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::RemoveExtTag => "removeExtTag",
            SettingKey::Tags => "tags",
            SettingKey::ReinsertTags => "reinsertTags",
            SettingKey::RemovePrefix => "removePrefix",
            SettingKey::PrefixOptions => "prefixOptions",
            SettingKey::ReplyAliases => "replyAliases",
            SettingKey::ForwardAliases => "forwardAliases",
            SettingKey::ReplyLabel => "replyLabel",
            SettingKey::ForwardLabel => "forwardLabel",
        }
    }

    pub fn default_value(&self) -> &'static str {
        match self {
            SettingKey::RemoveExtTag => "true",
            SettingKey::Tags => DEFAULT_TAGS,
            SettingKey::ReinsertTags => "false",
            SettingKey::RemovePrefix => "true",
            SettingKey::PrefixOptions => "collapse",
            SettingKey::ReplyAliases => DEFAULT_REPLY_ALIASES,
            SettingKey::ForwardAliases => DEFAULT_FORWARD_ALIASES,
            SettingKey::ReplyLabel => DEFAULT_REPLY_LABEL,
            SettingKey::ForwardLabel => DEFAULT_FORWARD_LABEL,
        }
    }

    pub fn parse(name: &str) -> Result<Self, SettingsError> {
        SettingKey::ALL
            .into_iter()
            .find(|k| k.as_str() == name)
            .ok_or_else(|| SettingsError::UnknownKey(name.to_string()))
    }

    /// Check a value before it is written; free-text keys accept anything.
    pub fn validate(&self, value: &str) -> Result<(), SettingsError> {
        match self {
            SettingKey::RemoveExtTag | SettingKey::ReinsertTags | SettingKey::RemovePrefix => {
                parse_bool(value).map(|_| ()).ok_or_else(|| SettingsError::InvalidBool {
                    key: self.as_str().to_string(),
                    value: value.to_string(),
                })
            }
            SettingKey::PrefixOptions => match value.trim().to_ascii_lowercase().as_str() {
                "collapse" | "overwrite" => Ok(()),
                _ => Err(SettingsError::InvalidPrefixMode(value.to_string())),
            },
            _ => Ok(()),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Raw snapshot of the settings store. String fields keep whatever the user
/// typed; interpretation happens in [`Settings::to_configuration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub remove_ext_tag: bool,
    pub tags: String,
    pub reinsert_tags: bool,
    pub remove_prefix: bool,
    pub prefix_options: PrefixMode,
    pub reply_aliases: String,
    pub forward_aliases: String,
    pub reply_label: String,
    pub forward_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            remove_ext_tag: true,
            tags: DEFAULT_TAGS.to_string(),
            reinsert_tags: false,
            remove_prefix: true,
            prefix_options: PrefixMode::Collapse,
            reply_aliases: DEFAULT_REPLY_ALIASES.to_string(),
            forward_aliases: DEFAULT_FORWARD_ALIASES.to_string(),
            reply_label: DEFAULT_REPLY_LABEL.to_string(),
            forward_label: DEFAULT_FORWARD_LABEL.to_string(),
        }
    }
}

impl Settings {
    /// Build a snapshot from stored key/value pairs. Missing keys and values
    /// that do not parse fall back to the defaults.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut settings = Settings::default();
        for (name, value) in pairs {
            let Ok(key) = SettingKey::parse(name) else {
                log::debug!("ignoring unknown stored setting {name}");
                continue;
            };
            settings.apply(key, value);
        }
        settings
    }

    fn apply(&mut self, key: SettingKey, value: &str) {
        let flag = |current: bool| match parse_bool(value) {
            Some(b) => b,
            None => {
                log::warn!(
                    "setting {} has non-boolean value {value:?}, using default",
                    key.as_str()
                );
                current
            }
        };

        match key {
            SettingKey::RemoveExtTag => self.remove_ext_tag = flag(self.remove_ext_tag),
            SettingKey::ReinsertTags => self.reinsert_tags = flag(self.reinsert_tags),
            SettingKey::RemovePrefix => self.remove_prefix = flag(self.remove_prefix),
            SettingKey::PrefixOptions => self.prefix_options = PrefixMode::parse_lenient(value),
            SettingKey::Tags => self.tags = value.to_string(),
            SettingKey::ReplyAliases => self.reply_aliases = value.to_string(),
            SettingKey::ForwardAliases => self.forward_aliases = value.to_string(),
            SettingKey::ReplyLabel => self.reply_label = value.to_string(),
            SettingKey::ForwardLabel => self.forward_label = value.to_string(),
        }
    }

    pub fn to_configuration(&self) -> Configuration {
        AliasConfiguration::parse(&RawAliasSettings {
            tags: Some(&self.tags),
            reply_aliases: Some(&self.reply_aliases),
            forward_aliases: Some(&self.forward_aliases),
            reply_label: Some(&self.reply_label),
            forward_label: Some(&self.forward_label),
        })
        .into_configuration(
            self.remove_ext_tag,
            self.reinsert_tags,
            self.remove_prefix,
            self.prefix_options,
        )
    }
}
