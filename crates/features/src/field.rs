use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FeatureError;

/// Number of inputs the scaler and model were fitted on.
pub const FEATURE_COUNT: usize = 9;

/// One named input, in fitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureField {
    #[serde(rename = "industry_code")]
    IndustryCode,
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "kg_co2e_per_usd")]
    KgCo2ePerUsd,
    #[serde(rename = "supply_chain_ef")]
    SupplyChainEf,
    #[serde(rename = "transport_ef")]
    TransportEf,
    #[serde(rename = "manufacturing_ef")]
    ManufacturingEf,
    #[serde(rename = "material_ef")]
    MaterialEf,
    #[serde(rename = "energy_ef")]
    EnergyEf,
    #[serde(rename = "other_ghg_emissions")]
    OtherGhgEmissions,
}

impl FeatureField {
    /// All fields, in the order the artifacts expect them.
    pub const ALL: [FeatureField; FEATURE_COUNT] = [
        FeatureField::IndustryCode,
        FeatureField::Year,
        FeatureField::KgCo2ePerUsd,
        FeatureField::SupplyChainEf,
        FeatureField::TransportEf,
        FeatureField::ManufacturingEf,
        FeatureField::MaterialEf,
        FeatureField::EnergyEf,
        FeatureField::OtherGhgEmissions,
    ];

    /// Position of this field in a feature row.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Field at `index`, if the index is inside the row.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Wire key used in JSON objects and form posts.
    pub fn key(self) -> &'static str {
        match self {
            FeatureField::IndustryCode => "industry_code",
            FeatureField::Year => "year",
            FeatureField::KgCo2ePerUsd => "kg_co2e_per_usd",
            FeatureField::SupplyChainEf => "supply_chain_ef",
            FeatureField::TransportEf => "transport_ef",
            FeatureField::ManufacturingEf => "manufacturing_ef",
            FeatureField::MaterialEf => "material_ef",
            FeatureField::EnergyEf => "energy_ef",
            FeatureField::OtherGhgEmissions => "other_ghg_emissions",
        }
    }

    /// Human-readable label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            FeatureField::IndustryCode => "Industry Code",
            FeatureField::Year => "Year",
            FeatureField::KgCo2ePerUsd => "kg CO₂e per USD",
            FeatureField::SupplyChainEf => "Supply Chain Emission Factor",
            FeatureField::TransportEf => "Transport Emission Factor",
            FeatureField::ManufacturingEf => "Manufacturing Emission Factor",
            FeatureField::MaterialEf => "Material Emission Factor",
            FeatureField::EnergyEf => "Energy Emission Factor",
            FeatureField::OtherGhgEmissions => "Other GHG Emissions",
        }
    }

    /// Value the form is pre-filled with.
    pub fn default_value(self) -> f64 {
        match self {
            FeatureField::IndustryCode => 111.0,
            FeatureField::Year => 2016.0,
            _ => 0.01,
        }
    }

    /// Increment used by the form's number input.
    pub fn step(self) -> f64 {
        match self {
            FeatureField::IndustryCode | FeatureField::Year => 1.0,
            _ => 0.01,
        }
    }

    /// Looks a field up by wire key or by label. Keys match case-insensitively.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(key) || field.label() == key)
    }
}

impl fmt::Display for FeatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FeatureField {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| FeatureError::UnknownField(s.to_string()))
    }
}

/// Serializable description of one input, for clients that render the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub index: usize,
    pub key: &'static str,
    pub label: &'static str,
    pub default: f64,
    pub step: f64,
}

impl From<FeatureField> for FieldSpec {
    fn from(field: FeatureField) -> Self {
        Self {
            index: field.index(),
            key: field.key(),
            label: field.label(),
            default: field.default_value(),
            step: field.step(),
        }
    }
}

/// The full input schema in fitted order.
pub fn schema() -> Vec<FieldSpec> {
    FeatureField::ALL.into_iter().map(FieldSpec::from).collect()
}
