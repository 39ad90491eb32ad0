//! Display-value to numeric-code tables for categorical columns.

use super::columns;
use crate::error::{Result, SeverityError};
use std::collections::HashMap;

const AREA_CODES: &[(&str, f64)] = &[("Urban", 1.0), ("Rural", 2.0), ("Unallocated", 3.0)];

const LIGHT_CODES: &[(&str, f64)] = &[
    ("Daylight: Street light present", 4.0),
    ("Darkness: Street lights present and lit", 3.0),
    ("Darkness: Street lighting unknown", 2.0),
    ("Darkness: Street lights present but unlit", 1.0),
    ("Darkness: No street lighting", 0.0),
];

const SURFACE_CODES: &[(&str, f64)] = &[
    ("Dry", 4.0),
    ("Wet/Damp", 3.0),
    ("Frost/Ice", 2.0),
    ("Snow", 1.0),
    ("Flood (Over 3cm of water)", 0.0),
];

const ROAD_TYPE_CODES: &[(&str, f64)] = &[
    ("Roundabout", 1.0),
    ("One way street", 2.0),
    ("Dual carriageway", 3.0),
    ("Single carriageway", 6.0),
    ("Slip road", 7.0),
    ("Unknown", 9.0),
];

const DAY_CODES: &[(&str, f64)] = &[
    ("Sunday", 1.0),
    ("Monday", 2.0),
    ("Tuesday", 3.0),
    ("Wednesday", 4.0),
    ("Thursday", 5.0),
    ("Friday", 6.0),
    ("Saturday", 7.0),
];

const POLICE_CODES: &[(&str, f64)] = &[("Yes", 1.0), ("No", 2.0)];

/// Per-column lookup tables, `column -> display value -> code`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryMaps {
    tables: HashMap<String, HashMap<String, f64>>,
}

impl CategoryMaps {
    /// Tables the accident models were trained with.
    pub fn standard() -> Self {
        let mut maps = Self::default();
        for (column, table) in [
            (columns::AREA, AREA_CODES),
            (columns::LIGHT, LIGHT_CODES),
            (columns::SURFACE, SURFACE_CODES),
            (columns::ROAD_TYPE, ROAD_TYPE_CODES),
            (columns::DAY_OF_WEEK, DAY_CODES),
            (columns::POLICE_ATTENDED, POLICE_CODES),
        ] {
            for (label, code) in table {
                maps.insert(column, *label, *code);
            }
        }
        maps
    }

    pub fn insert(&mut self, column: impl Into<String>, label: impl Into<String>, code: f64) {
        self.tables
            .entry(column.into())
            .or_default()
            .insert(label.into(), code);
    }

    /// Code for `label` in `column`. Never falls back to a default.
    pub fn code(&self, column: &str, label: &str) -> Result<f64> {
        self.tables
            .get(column)
            .and_then(|t| t.get(label))
            .copied()
            .ok_or_else(|| SeverityError::unmapped(column, label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{AreaType, Category, DayOfWeek, LightCondition, PoliceAttended, RoadType, SurfaceCondition};

    fn covers<C: Category>(maps: &CategoryMaps) {
        for c in C::ALL {
            assert!(
                maps.code(C::COLUMN, c.label()).is_ok(),
                "{} missing {}",
                C::COLUMN,
                c.label()
            );
        }
    }

    #[test]
    fn standard_tables_cover_every_variant() {
        let maps = CategoryMaps::standard();
        covers::<AreaType>(&maps);
        covers::<LightCondition>(&maps);
        covers::<SurfaceCondition>(&maps);
        covers::<RoadType>(&maps);
        covers::<DayOfWeek>(&maps);
        covers::<PoliceAttended>(&maps);
    }

    #[test]
    fn unknown_label_fails() {
        let maps = CategoryMaps::standard();
        assert_eq!(maps.code(columns::SURFACE, "Dry").unwrap(), 4.0);
        let err = maps.code(columns::SURFACE, "Mud").unwrap_err();
        assert_eq!(err.code(), "SEV-1002");
        assert!(maps.code("Weather_Conditions", "Fine").is_err());
    }
}
