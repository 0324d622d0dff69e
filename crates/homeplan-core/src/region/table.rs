//! Province → district → neighborhood reference data.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::HomePlanError;
use crate::HomePlanResult;

const BUILTIN_REGIONS: &str = include_str!("data/regions.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub name: String,
    #[serde(default)]
    pub neighborhoods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub name: String,
    #[serde(default)]
    pub districts: Vec<District>,
}

/// Read-only region hierarchy. Order follows the source data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTable {
    provinces: Vec<Province>,
}

impl RegionTable {
    pub fn new(provinces: Vec<Province>) -> HomePlanResult<Self> {
        let table = RegionTable { provinces };
        table.validate()?;
        Ok(table)
    }

    /// Parse a table from its JSON form (`{"provinces": [...]}`).
    pub fn from_json(json: &str) -> HomePlanResult<Self> {
        let table: RegionTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> HomePlanResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            HomePlanError::ReferenceData(format!("failed to read '{}': {e}", path.display()))
        })?;
        let table = Self::from_json(&contents)?;
        debug!(path = %path.display(), provinces = table.provinces.len(), "region table loaded");
        Ok(table)
    }

    /// The table compiled into the crate, parsed on first use.
    pub fn builtin() -> HomePlanResult<&'static RegionTable> {
        static BUILTIN: OnceLock<Result<RegionTable, String>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| RegionTable::from_json(BUILTIN_REGIONS).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|e| HomePlanError::ReferenceData(e.clone()))
    }

    pub fn provinces(&self) -> Vec<&str> {
        self.provinces.iter().map(|p| p.name.as_str()).collect()
    }

    /// Districts of a province; empty when the province is unknown.
    pub fn districts_of(&self, province: &str) -> Vec<&str> {
        self.province(province)
            .map(|p| p.districts.iter().map(|d| d.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Neighborhoods of a district; empty when either parent is unknown.
    pub fn neighborhoods_of(&self, province: &str, district: &str) -> Vec<&str> {
        self.district(province, district)
            .map(|d| d.neighborhoods.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn province(&self, name: &str) -> Option<&Province> {
        self.provinces.iter().find(|p| p.name == name)
    }

    pub fn district(&self, province: &str, district: &str) -> Option<&District> {
        self.province(province)?
            .districts
            .iter()
            .find(|d| d.name == district)
    }

    pub fn has_neighborhood(&self, province: &str, district: &str, neighborhood: &str) -> bool {
        self.district(province, district)
            .is_some_and(|d| d.neighborhoods.iter().any(|n| n == neighborhood))
    }

    fn validate(&self) -> HomePlanResult<()> {
        check_names("province", "table", self.provinces.iter().map(|p| p.name.as_str()))?;
        for province in &self.provinces {
            check_names(
                "district",
                &province.name,
                province.districts.iter().map(|d| d.name.as_str()),
            )?;
            for district in &province.districts {
                check_names(
                    "neighborhood",
                    &district.name,
                    district.neighborhoods.iter().map(String::as_str),
                )?;
            }
        }
        Ok(())
    }
}

fn check_names<'a>(
    level: &str,
    parent: &str,
    names: impl Iterator<Item = &'a str>,
) -> HomePlanResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(HomePlanError::ReferenceData(format!(
                "empty {level} name under {parent}"
            )));
        }
        if !seen.insert(name) {
            return Err(HomePlanError::ReferenceData(format!(
                "duplicate {level} '{name}' under {parent}"
            )));
        }
    }
    Ok(())
}
