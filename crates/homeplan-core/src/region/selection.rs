//! Three-level dependent-reset selection state.
//!
//! Changing a parent clears everything below it; a child can only be chosen
//! once its parent is. A failed transition leaves the state untouched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::table::RegionTable;
use crate::error::HomePlanError;
use crate::HomePlanResult;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSelection {
    #[serde(default)]
    province: Option<String>,
    #[serde(default)]
    district: Option<String>,
    #[serde(default)]
    neighborhood: Option<String>,
}

/// A user action on the region selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum RegionEvent {
    SelectProvince(String),
    SelectDistrict(String),
    SelectNeighborhood(String),
    Clear,
}

impl RegionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn province(&self) -> Option<&str> {
        self.province.as_deref()
    }

    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    pub fn neighborhood(&self) -> Option<&str> {
        self.neighborhood.as_deref()
    }

    /// Select a province. A different province clears district and neighborhood.
    pub fn select_province(&mut self, table: &RegionTable, province: &str) -> HomePlanResult<()> {
        if table.province(province).is_none() {
            return Err(invalid("province", format!("unknown province '{province}'")));
        }
        if self.province.as_deref() != Some(province) {
            self.province = Some(province.to_string());
            self.district = None;
            self.neighborhood = None;
        }
        Ok(())
    }

    /// Select a district of the current province. A different district clears
    /// the neighborhood.
    pub fn select_district(&mut self, table: &RegionTable, district: &str) -> HomePlanResult<()> {
        let province = self
            .province
            .as_deref()
            .ok_or_else(|| invalid("district", "no province selected".into()))?;
        if table.district(province, district).is_none() {
            return Err(invalid(
                "district",
                format!("'{district}' is not a district of '{province}'"),
            ));
        }
        if self.district.as_deref() != Some(district) {
            self.district = Some(district.to_string());
            self.neighborhood = None;
        }
        Ok(())
    }

    pub fn select_neighborhood(
        &mut self,
        table: &RegionTable,
        neighborhood: &str,
    ) -> HomePlanResult<()> {
        let (province, district) = match (self.province.as_deref(), self.district.as_deref()) {
            (Some(p), Some(d)) => (p, d),
            _ => return Err(invalid("neighborhood", "no district selected".into())),
        };
        if !table.has_neighborhood(province, district, neighborhood) {
            return Err(invalid(
                "neighborhood",
                format!("'{neighborhood}' is not a neighborhood of '{district}'"),
            ));
        }
        self.neighborhood = Some(neighborhood.to_string());
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Apply an event to the selection.
    pub fn apply(&mut self, table: &RegionTable, event: RegionEvent) -> HomePlanResult<()> {
        if !self.is_consistent(table) {
            return Err(invalid(
                "state",
                "selection does not match the region table".into(),
            ));
        }
        debug!(event = ?event, "region selection event");
        match event {
            RegionEvent::SelectProvince(name) => self.select_province(table, &name),
            RegionEvent::SelectDistrict(name) => self.select_district(table, &name),
            RegionEvent::SelectNeighborhood(name) => self.select_neighborhood(table, &name),
            RegionEvent::Clear => {
                self.clear();
                Ok(())
            }
        }
    }

    /// Every selected child belongs to its selected parent.
    pub fn is_consistent(&self, table: &RegionTable) -> bool {
        match (
            self.province.as_deref(),
            self.district.as_deref(),
            self.neighborhood.as_deref(),
        ) {
            (None, None, None) => true,
            (Some(p), None, None) => table.province(p).is_some(),
            (Some(p), Some(d), None) => table.district(p, d).is_some(),
            (Some(p), Some(d), Some(n)) => table.has_neighborhood(p, d, n),
            _ => false,
        }
    }
}

fn invalid(level: &str, reason: String) -> HomePlanError {
    HomePlanError::InvalidSelection {
        level: level.into(),
        reason,
    }
}
