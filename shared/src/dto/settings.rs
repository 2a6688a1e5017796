//! # Platform Settings
//!
//! The backend stores platform parameters as a flat JSON object: fee
//! percentages, deposit/withdrawal limits, staking APYs, investment returns and
//! blockchain network names. This module gives that object an explicit schema
//! ([`SCHEMA`]) so edits are coerced and checked per field instead of being
//! treated as an untyped map. Keys the schema does not know are kept verbatim
//! and sent back on save.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Tab a setting is shown under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingGroup {
    Fees,
    Limits,
    Staking,
    Investment,
    Networks,
}

impl SettingGroup {
    pub fn all() -> &'static [SettingGroup] {
        &[
            SettingGroup::Fees,
            SettingGroup::Limits,
            SettingGroup::Staking,
            SettingGroup::Investment,
            SettingGroup::Networks,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            SettingGroup::Fees => "Fees",
            SettingGroup::Limits => "Limits",
            SettingGroup::Staking => "Staking",
            SettingGroup::Investment => "Investment",
            SettingGroup::Networks => "Networks",
        }
    }
}

/// Value shape and constraints of a setting
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingKind {
    /// Non-integral amount, optionally bounded above (percentages use 100)
    Decimal { min: f64, max: Option<f64> },
    /// Whole number of units (days)
    Integer { min: i64 },
    /// Free-form string such as a network name
    Text,
}

/// One entry of the settings schema
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub group: SettingGroup,
    pub kind: SettingKind,
}

const AMOUNT: SettingKind = SettingKind::Decimal { min: 0.0, max: None };
const PERCENT: SettingKind = SettingKind::Decimal {
    min: 0.0,
    max: Some(100.0),
};
const DAYS: SettingKind = SettingKind::Integer { min: 1 };

macro_rules! spec {
    ($key:literal, $label:literal, $group:ident, $kind:expr) => {
        SettingSpec {
            key: $key,
            label: $label,
            group: SettingGroup::$group,
            kind: $kind,
        }
    };
}

/// Every setting the console knows how to edit
pub const SCHEMA: &[SettingSpec] = &[
    spec!("transaction_fee_percentage", "Transaction Fee (%)", Fees, PERCENT),
    spec!("withdrawal_fee_fixed", "Fixed Withdrawal Fee", Fees, AMOUNT),
    spec!("withdrawal_fee_percentage", "Withdrawal Fee (%)", Fees, PERCENT),
    spec!("min_deposit_amount", "Min Deposit Amount", Limits, AMOUNT),
    spec!("max_deposit_amount", "Max Deposit Amount", Limits, AMOUNT),
    spec!("min_withdrawal_amount", "Min Withdrawal Amount", Limits, AMOUNT),
    spec!("max_withdrawal_amount", "Max Withdrawal Amount", Limits, AMOUNT),
    spec!("daily_withdrawal_limit", "Daily Withdrawal Limit", Limits, AMOUNT),
    spec!("kyc_required_amount_threshold", "KYC Required Above", Limits, AMOUNT),
    spec!("staking_basic_apy", "Basic Plan APY (%)", Staking, PERCENT),
    spec!("staking_premium_apy", "Premium Plan APY (%)", Staking, PERCENT),
    spec!("staking_vip_apy", "VIP Plan APY (%)", Staking, PERCENT),
    spec!("min_staking_amount", "Min Staking Amount", Staking, AMOUNT),
    spec!("staking_lock_period_days", "Lock Period (Days)", Staking, DAYS),
    spec!("investment_starter_return", "Starter Return (%)", Investment, PERCENT),
    spec!("investment_growth_return", "Growth Return (%)", Investment, PERCENT),
    spec!("investment_premium_return", "Premium Return (%)", Investment, PERCENT),
    spec!("min_investment_amount", "Min Investment Amount", Investment, AMOUNT),
    spec!("investment_period_days", "Investment Period (Days)", Investment, DAYS),
    spec!("eth_network", "Ethereum Network", Networks, SettingKind::Text),
    spec!("bsc_network", "BSC Network", Networks, SettingKind::Text),
    spec!("polygon_network", "Polygon Network", Networks, SettingKind::Text),
];

/// `(min, max)` pairs that must stay ordered
const RANGES: &[(&str, &str)] = &[
    ("min_deposit_amount", "max_deposit_amount"),
    ("min_withdrawal_amount", "max_withdrawal_amount"),
];

/// Look up the schema entry for a key
pub fn spec_for(key: &str) -> Option<&'static SettingSpec> {
    SCHEMA.iter().find(|spec| spec.key == key)
}

/// A single setting value as it travels on the wire
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SettingValue {
    Number(f64),
    Text(String),
    /// Anything else the server sends (booleans, nested objects); round-tripped untouched
    Other(Value),
}

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Integral values go out as JSON integers so `30` stays `30`, not `30.0`
            SettingValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                serializer.serialize_i64(*n as i64)
            }
            SettingValue::Number(n) => serializer.serialize_f64(*n),
            SettingValue::Text(s) => serializer.serialize_str(s),
            SettingValue::Other(v) => v.serialize(serializer),
        }
    }
}

impl SettingValue {
    /// Number when the input parses as a finite number, otherwise the raw string
    pub fn coerce(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => SettingValue::Number(n),
            _ => SettingValue::Text(raw.to_string()),
        }
    }

    /// Coerce according to the field's declared kind
    pub fn coerce_for(kind: SettingKind, raw: &str) -> Self {
        match kind {
            SettingKind::Text => SettingValue::Text(raw.to_string()),
            SettingKind::Decimal { .. } | SettingKind::Integer { .. } => Self::coerce(raw),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValue::Number(n) => write!(f, "{}", n),
            SettingValue::Text(s) => write!(f, "{}", s),
            SettingValue::Other(v) => write!(f, "{}", v),
        }
    }
}

/// A rule a draft breaks
#[derive(Debug, Clone, PartialEq)]
pub struct SettingViolation {
    pub key: String,
    pub message: String,
}

impl std::fmt::Display for SettingViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Full settings object, keyed by setting name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SettingsBundle(BTreeMap<String, SettingValue>);

impl SettingsBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: SettingValue) {
        self.0.insert(key.into(), value);
    }

    /// Apply a raw text edit, coercing per schema (or generically for unknown keys)
    pub fn apply_edit(&mut self, key: &str, raw: &str) -> &SettingValue {
        let value = match spec_for(key) {
            Some(spec) => SettingValue::coerce_for(spec.kind, raw),
            None => SettingValue::coerce(raw),
        };
        self.0.insert(key.to_string(), value);
        &self.0[key]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check every present field against the schema and the min/max pairs
    pub fn validate(&self) -> Result<(), Vec<SettingViolation>> {
        let mut violations = Vec::new();

        for (key, value) in &self.0 {
            let Some(spec) = spec_for(key) else { continue };
            if let Some(message) = check_kind(spec.kind, value) {
                violations.push(SettingViolation {
                    key: key.clone(),
                    message,
                });
            }
        }

        for (min_key, max_key) in RANGES {
            let min = self.get(min_key).and_then(SettingValue::as_f64);
            let max = self.get(max_key).and_then(SettingValue::as_f64);
            if let (Some(min), Some(max)) = (min, max) {
                if min > max {
                    violations.push(SettingViolation {
                        key: (*min_key).to_string(),
                        message: format!("must not exceed {} ({} > {})", max_key, min, max),
                    });
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn check_kind(kind: SettingKind, value: &SettingValue) -> Option<String> {
    match (kind, value) {
        (SettingKind::Text, SettingValue::Text(s)) if s.trim().is_empty() => {
            Some("must not be empty".to_string())
        }
        (SettingKind::Text, SettingValue::Text(_)) => None,
        (SettingKind::Text, _) => Some("must be text".to_string()),
        (SettingKind::Decimal { min, max }, SettingValue::Number(n)) => {
            if *n < min {
                Some(format!("must be at least {}", min))
            } else if max.is_some_and(|max| *n > max) {
                Some(format!("must be at most {}", max.unwrap_or_default()))
            } else {
                None
            }
        }
        (SettingKind::Integer { min }, SettingValue::Number(n)) => {
            if n.fract() != 0.0 {
                Some("must be a whole number".to_string())
            } else if (*n as i64) < min {
                Some(format!("must be at least {}", min))
            } else {
                None
            }
        }
        (_, SettingValue::Text(raw)) => Some(format!("`{}` is not a number", raw)),
        (_, SettingValue::Other(_)) => Some("must be a number".to_string()),
    }
}
