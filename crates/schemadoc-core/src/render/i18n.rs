//! Localized labels used in rendered output
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};

/// Labels shown next to literal values (`default`, `const`, `enum`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueLabels {
    pub default: String,
    #[serde(rename = "const")]
    pub const_value: String,
    #[serde(rename = "enum")]
    pub enum_values: String,
}

/// Labels shown next to validation bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionLabels {
    pub min_value: String,
    pub max_value: String,
    pub exclusive_min: String,
    pub exclusive_max: String,
    pub min_length: String,
    pub max_length: String,
    pub pattern: String,
    pub format: String,
    pub min_items: String,
    pub max_items: String,
    pub unique_items: String,
    pub min_properties: String,
    pub max_properties: String,
}

/// Headings of combinator disclosures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinatorLabels {
    pub one_of: String,
    pub any_of: String,
    pub all_of: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecatedLabels {
    pub title: String,
    pub message: String,
}

/// Complete label set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct I18nLabels {
    #[serde(rename = "type")]
    pub type_label: String,
    pub name: String,
    pub description: String,
    pub additional: String,
    pub pattern: String,
    pub examples: String,
    pub example: String,
    pub values: ValueLabels,
    pub assertions: AssertionLabels,
    pub combinators: CombinatorLabels,
    pub deprecated: DeprecatedLabels,
}

impl Default for I18nLabels {
    fn default() -> Self {
        Self {
            type_label: "Type".to_string(),
            name: "Name".to_string(),
            description: "Description".to_string(),
            additional: "[additional]".to_string(),
            pattern: "Pattern".to_string(),
            examples: "Examples".to_string(),
            example: "Example".to_string(),
            values: ValueLabels {
                default: "Default".to_string(),
                const_value: "Const".to_string(),
                enum_values: "Enum".to_string(),
            },
            assertions: AssertionLabels {
                min_value: "Min value".to_string(),
                max_value: "Max value".to_string(),
                exclusive_min: "Exclusive min".to_string(),
                exclusive_max: "Exclusive max".to_string(),
                min_length: "Min length".to_string(),
                max_length: "Max length".to_string(),
                pattern: "Pattern".to_string(),
                format: "Format".to_string(),
                min_items: "Min items".to_string(),
                max_items: "Max items".to_string(),
                unique_items: "Unique items".to_string(),
                min_properties: "Min properties".to_string(),
                max_properties: "Max properties".to_string(),
            },
            combinators: CombinatorLabels {
                one_of: "One of".to_string(),
                any_of: "Any of".to_string(),
                all_of: "All of".to_string(),
            },
            deprecated: DeprecatedLabels {
                title: "Deprecated".to_string(),
                message: "This entity is deprecated and may be removed in future versions.".to_string(),
            },
        }
    }
}

/// Partial label set; every field left out keeps its default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct I18nOverrides {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub values: ValueOverrides,
    pub assertions: AssertionOverrides,
    pub combinators: CombinatorOverrides,
    pub deprecated: DeprecatedOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueOverrides {
    pub default: Option<String>,
    #[serde(rename = "const")]
    pub const_value: Option<String>,
    #[serde(rename = "enum")]
    pub enum_values: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssertionOverrides {
    pub min_value: Option<String>,
    pub max_value: Option<String>,
    pub exclusive_min: Option<String>,
    pub exclusive_max: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub pattern: Option<String>,
    pub format: Option<String>,
    pub min_items: Option<String>,
    pub max_items: Option<String>,
    pub unique_items: Option<String>,
    pub min_properties: Option<String>,
    pub max_properties: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CombinatorOverrides {
    pub one_of: Option<String>,
    pub any_of: Option<String>,
    pub all_of: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeprecatedOverrides {
    pub title: Option<String>,
    pub message: Option<String>,
}

fn apply(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        target.clone_from(value);
    }
}

impl I18nLabels {
    /// Default labels with `overrides` applied field by field
    pub fn merged(overrides: &I18nOverrides) -> Self {
        let mut labels = Self::default();
        labels.apply(overrides);
        labels
    }

    /// Apply `overrides` on top of the current labels
    pub fn apply(&mut self, overrides: &I18nOverrides) {
        apply(&mut self.type_label, &overrides.type_label);
        apply(&mut self.name, &overrides.name);
        apply(&mut self.description, &overrides.description);
        apply(&mut self.additional, &overrides.additional);
        apply(&mut self.pattern, &overrides.pattern);
        apply(&mut self.examples, &overrides.examples);
        apply(&mut self.example, &overrides.example);

        apply(&mut self.values.default, &overrides.values.default);
        apply(&mut self.values.const_value, &overrides.values.const_value);
        apply(&mut self.values.enum_values, &overrides.values.enum_values);

        let (labels, given) = (&mut self.assertions, &overrides.assertions);
        apply(&mut labels.min_value, &given.min_value);
        apply(&mut labels.max_value, &given.max_value);
        apply(&mut labels.exclusive_min, &given.exclusive_min);
        apply(&mut labels.exclusive_max, &given.exclusive_max);
        apply(&mut labels.min_length, &given.min_length);
        apply(&mut labels.max_length, &given.max_length);
        apply(&mut labels.pattern, &given.pattern);
        apply(&mut labels.format, &given.format);
        apply(&mut labels.min_items, &given.min_items);
        apply(&mut labels.max_items, &given.max_items);
        apply(&mut labels.unique_items, &given.unique_items);
        apply(&mut labels.min_properties, &given.min_properties);
        apply(&mut labels.max_properties, &given.max_properties);

        apply(&mut self.combinators.one_of, &overrides.combinators.one_of);
        apply(&mut self.combinators.any_of, &overrides.combinators.any_of);
        apply(&mut self.combinators.all_of, &overrides.combinators.all_of);

        apply(&mut self.deprecated.title, &overrides.deprecated.title);
        apply(&mut self.deprecated.message, &overrides.deprecated.message);
    }
}
