//! Assembly pipeline: raw input → translated base columns → derived columns →
//! schema fill/drop/reorder → (optional) frequency encoding.

use super::{columns, CategoryMaps, FeatureSchema, FeatureVector, FrequencyMaps};
use crate::error::{Result, SeverityError};
use crate::input::{Cell, RawInput};
use tracing::debug;

/// Build the aligned vector for `raw`.
///
/// Categorical cells go through `category_maps` (an unknown value is an error),
/// numeric cells pass through. `Speed_Urban_Rural` and `Light_Road_Interaction`
/// are always recomputed from the translated base columns. Schema columns with no
/// value are filled with `0.0`; columns outside the schema are dropped.
pub fn assemble(
    raw: &RawInput,
    schema: &FeatureSchema,
    category_maps: &CategoryMaps,
) -> Result<FeatureVector> {
    let cells = raw.cells();
    let mut working: Vec<(&str, f64)> = Vec::with_capacity(cells.len() + 2);
    for (column, cell) in cells {
        let value = match cell {
            Cell::Category(label) => category_maps.code(column, label)?,
            Cell::Numeric(v) => v,
        };
        working.push((column, value));
    }

    fn lookup(working: &[(&str, f64)], column: &str) -> f64 {
        working
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }
    let speed_urban_rural = lookup(&working, columns::AREA) * lookup(&working, columns::SPEED_LIMIT);
    let light_road = lookup(&working, columns::LIGHT) * lookup(&working, columns::SURFACE);
    working.retain(|(c, _)| *c != columns::SPEED_URBAN_RURAL && *c != columns::LIGHT_ROAD_INTERACTION);
    working.push((columns::SPEED_URBAN_RURAL, speed_urban_rural));
    working.push((columns::LIGHT_ROAD_INTERACTION, light_road));

    let dropped: Vec<&str> = working
        .iter()
        .map(|(c, _)| *c)
        .filter(|c| !schema.contains(c))
        .collect();
    let mut filled = 0usize;
    let vector = FeatureVector::from_schema(schema, |name| {
        match working.iter().find(|(c, _)| *c == name) {
            Some((_, v)) => *v,
            None => {
                filled += 1;
                0.0
            }
        }
    });
    if filled > 0 || !dropped.is_empty() {
        debug!(filled, ?dropped, "feature vector aligned to schema");
    }

    if vector.len() != schema.len() {
        return Err(SeverityError::SchemaMismatch {
            expected: schema.len(),
            actual: vector.len(),
        });
    }
    Ok(vector)
}

/// Category tables plus optional frequency encoding, built once and reused per request.
#[derive(Debug, Clone, Default)]
pub struct FeatureAssembler {
    category_maps: CategoryMaps,
    frequency_maps: Option<FrequencyMaps>,
}

impl FeatureAssembler {
    pub fn new(category_maps: CategoryMaps) -> Self {
        Self {
            category_maps,
            frequency_maps: None,
        }
    }

    pub fn with_frequency_maps(mut self, maps: FrequencyMaps) -> Self {
        self.frequency_maps = Some(maps);
        self
    }

    pub fn assemble(&self, raw: &RawInput, schema: &FeatureSchema) -> Result<FeatureVector> {
        let mut vector = assemble(raw, schema, &self.category_maps)?;
        if let Some(ref freq) = self.frequency_maps {
            freq.apply(&mut vector);
        }
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{AreaType, LightCondition, RoadType, SurfaceCondition};

    fn full_schema() -> FeatureSchema {
        FeatureSchema::new([
            columns::LIGHT_ROAD_INTERACTION,
            columns::SPEED_LIMIT,
            columns::AREA,
            columns::LIGHT,
            columns::SURFACE,
            columns::SPEED_URBAN_RURAL,
            columns::HOUR,
            columns::ROAD_TYPE,
            "Number_of_Vehicles",
        ])
        .unwrap()
    }

    #[test]
    fn length_and_order_follow_schema() {
        let schema = full_schema();
        let raw = RawInput::new(30, AreaType::Urban, LightCondition::DaylightStreetLightPresent, SurfaceCondition::Dry);
        let v = assemble(&raw, &schema, &CategoryMaps::standard()).unwrap();
        assert_eq!(v.len(), schema.len());
        assert_eq!(v.names(), schema.names());
    }

    #[test]
    fn derived_columns_from_translated_codes() {
        let raw = RawInput::new(60, AreaType::Rural, LightCondition::DarknessLightsLit, SurfaceCondition::WetDamp);
        let v = assemble(&raw, &full_schema(), &CategoryMaps::standard()).unwrap();
        assert_eq!(v.get(columns::AREA), Some(2.0));
        assert_eq!(v.get(columns::SPEED_URBAN_RURAL), Some(120.0));
        assert_eq!(v.get(columns::LIGHT), Some(3.0));
        assert_eq!(v.get(columns::SURFACE), Some(3.0));
        assert_eq!(v.get(columns::LIGHT_ROAD_INTERACTION), Some(9.0));
    }

    #[test]
    fn missing_columns_zero_filled_and_extras_dropped() {
        let schema = FeatureSchema::new([columns::SPEED_LIMIT, columns::HOUR, "Number_of_Vehicles"]).unwrap();
        let raw = RawInput::new(50, AreaType::Unallocated, LightCondition::DarknessNoLighting, SurfaceCondition::Snow)
            .with_road_type(RoadType::DualCarriageway);
        let v = assemble(&raw, &schema, &CategoryMaps::standard()).unwrap();
        let pairs: Vec<_> = v.iter().collect();
        assert_eq!(
            pairs,
            vec![(columns::SPEED_LIMIT, 50.0), (columns::HOUR, 0.0), ("Number_of_Vehicles", 0.0)]
        );
    }

    #[test]
    fn optional_context_translated() {
        let raw = RawInput::new(30, AreaType::Urban, LightCondition::DaylightStreetLightPresent, SurfaceCondition::Dry)
            .with_hour(8)
            .unwrap()
            .with_road_type(RoadType::SingleCarriageway);
        let v = assemble(&raw, &full_schema(), &CategoryMaps::standard()).unwrap();
        assert_eq!(v.get(columns::HOUR), Some(8.0));
        assert_eq!(v.get(columns::ROAD_TYPE), Some(6.0));
    }

    #[test]
    fn incomplete_maps_fail_loudly() {
        let mut maps = CategoryMaps::default();
        maps.insert(columns::AREA, "Urban", 1.0);
        maps.insert(columns::SURFACE, "Dry", 4.0);
        let raw = RawInput::new(30, AreaType::Urban, LightCondition::DarknessLightsUnlit, SurfaceCondition::Dry);
        let err = assemble(&raw, &full_schema(), &maps).unwrap_err();
        assert!(matches!(err, SeverityError::UnmappedCategory { ref field, .. } if field == columns::LIGHT));
    }

    #[test]
    fn assembler_applies_frequency_maps() {
        let mut freq = FrequencyMaps::default();
        freq.insert(columns::ROAD_TYPE, 6.0, 0.72);
        let assembler = FeatureAssembler::new(CategoryMaps::standard()).with_frequency_maps(freq);
        let raw = RawInput::new(30, AreaType::Urban, LightCondition::DaylightStreetLightPresent, SurfaceCondition::Dry)
            .with_road_type(RoadType::SingleCarriageway);
        let v = assembler.assemble(&raw, &full_schema()).unwrap();
        assert_eq!(v.get(columns::ROAD_TYPE), Some(0.72));
        assert_eq!(v.get(columns::SPEED_URBAN_RURAL), Some(30.0));
    }
}
