// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Configuration types for PII Guard

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::error::{PiiError, Result};

/// Storage key under which hosts persist the admin toggles
pub const SETTINGS_KEY: &str = "pii-settings-v1";

/// Settings field naming the group whose comments may not mention users
pub const REGULATED_GROUP_KEY: &str = "regulatedGroupName";

/// PII types that can be detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PiiType {
    Email,
    Phone,
    CreditCard,
    Ssn,
    Passport,
    DriversLicense,
}

impl PiiType {
    /// Every type, in settings order
    pub const ALL: [PiiType; 6] = [
        PiiType::Email,
        PiiType::Phone,
        PiiType::CreditCard,
        PiiType::Ssn,
        PiiType::Passport,
        PiiType::DriversLicense,
    ];

    /// Settings/report key for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            PiiType::Email => "email",
            PiiType::Phone => "phone",
            PiiType::CreditCard => "creditCard",
            PiiType::Ssn => "ssn",
            PiiType::Passport => "passport",
            PiiType::DriversLicense => "driversLicense",
        }
    }
}

impl fmt::Display for PiiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PiiType {
    type Err = PiiError;

    fn from_str(s: &str) -> Result<Self> {
        PiiType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PiiError::UnknownPiiType(s.to_string()))
    }
}

/// Which detectors are enabled for a scan
///
/// Deserializing treats any missing key as disabled; `Default` enables all
/// six, which is what a host uses when no settings were ever saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorConfig {
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub phone: bool,
    #[serde(default)]
    pub credit_card: bool,
    #[serde(default)]
    pub ssn: bool,
    #[serde(default)]
    pub passport: bool,
    #[serde(default)]
    pub drivers_license: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            email: true,
            phone: true,
            credit_card: true,
            ssn: true,
            passport: true,
            drivers_license: true,
        }
    }
}

impl DetectorConfig {
    /// Configuration with every detector disabled
    pub fn none() -> Self {
        Self {
            email: false,
            phone: false,
            credit_card: false,
            ssn: false,
            passport: false,
            drivers_license: false,
        }
    }

    /// Configuration enabling exactly the given types
    pub fn only(types: &[PiiType]) -> Self {
        types
            .iter()
            .fold(Self::none(), |config, &t| config.with(t, true))
    }

    /// Copy of this configuration with one flag changed
    pub fn with(mut self, pii_type: PiiType, enabled: bool) -> Self {
        *self.flag_mut(pii_type) = enabled;
        self
    }

    pub fn is_enabled(&self, pii_type: PiiType) -> bool {
        match pii_type {
            PiiType::Email => self.email,
            PiiType::Phone => self.phone,
            PiiType::CreditCard => self.credit_card,
            PiiType::Ssn => self.ssn,
            PiiType::Passport => self.passport,
            PiiType::DriversLicense => self.drivers_license,
        }
    }

    pub fn enabled_types(&self) -> impl Iterator<Item = PiiType> + '_ {
        PiiType::ALL.into_iter().filter(|t| self.is_enabled(*t))
    }

    /// Build from a stored settings value
    ///
    /// A falsy value (`None`, `null`, `false`, `0`, `""`) means nothing was
    /// saved and yields the default. Object keys are read with JavaScript
    /// truthiness, absent keys are disabled, and unknown keys are ignored.
    /// Any other truthy value has no keys, so every type is disabled.
    pub fn from_settings(settings: Option<&Value>) -> Self {
        match settings {
            Some(Value::Object(map)) => {
                PiiType::ALL.into_iter().fold(Self::none(), |config, t| {
                    let enabled = map.get(t.as_str()).is_some_and(is_truthy);
                    config.with(t, enabled)
                })
            }
            Some(value) if is_truthy(value) => Self::none(),
            _ => Self::default(),
        }
    }

    /// Parse stored settings JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_settings(Some(&value)))
    }

    fn flag_mut(&mut self, pii_type: PiiType) -> &mut bool {
        match pii_type {
            PiiType::Email => &mut self.email,
            PiiType::Phone => &mut self.phone,
            PiiType::CreditCard => &mut self.credit_card,
            PiiType::Ssn => &mut self.ssn,
            PiiType::Passport => &mut self.passport,
            PiiType::DriversLicense => &mut self.drivers_license,
        }
    }
}

/// Name of the regulated user group from a stored settings value
///
/// `None` when the settings are missing, not an object, or the name is
/// absent or empty.
pub fn regulated_group(settings: Option<&Value>) -> Option<&str> {
    settings?
        .get(REGULATED_GROUP_KEY)?
        .as_str()
        .filter(|name| !name.is_empty())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
