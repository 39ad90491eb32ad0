//! Road and accident attributes as collected from a form.
//!
//! [`FormInput`] is what arrives over the wire (display strings), [`RawInput`]
//! is the validated, typed record the assembler and the override rules read.

use crate::error::{Result, SeverityError};
use crate::features::columns;
use serde::{Deserialize, Serialize};

/// A closed set of display labels belonging to one feature column.
pub trait Category: Copy + Sized + 'static {
    /// Feature column this category translates into.
    const COLUMN: &'static str;
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    /// Extra spellings accepted on input.
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }

    /// Match a display value (surrounding whitespace ignored). Unknown values fail
    /// with [`SeverityError::UnmappedCategory`].
    fn parse(value: &str) -> Result<Self> {
        let wanted = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label() == wanted || c.aliases().contains(&wanted))
            .ok_or_else(|| SeverityError::unmapped(Self::COLUMN, value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaType {
    Urban,
    Rural,
    Unallocated,
}

impl Category for AreaType {
    const COLUMN: &'static str = columns::AREA;
    const ALL: &'static [Self] = &[Self::Urban, Self::Rural, Self::Unallocated];

    fn label(self) -> &'static str {
        match self {
            Self::Urban => "Urban",
            Self::Rural => "Rural",
            Self::Unallocated => "Unallocated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightCondition {
    DaylightStreetLightPresent,
    DarknessLightsLit,
    DarknessLightingUnknown,
    DarknessLightsUnlit,
    DarknessNoLighting,
}

impl LightCondition {
    pub fn is_daylight(self) -> bool {
        matches!(self, Self::DaylightStreetLightPresent)
    }
}

impl Category for LightCondition {
    const COLUMN: &'static str = columns::LIGHT;
    const ALL: &'static [Self] = &[
        Self::DaylightStreetLightPresent,
        Self::DarknessLightsLit,
        Self::DarknessLightingUnknown,
        Self::DarknessLightsUnlit,
        Self::DarknessNoLighting,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::DaylightStreetLightPresent => "Daylight: Street light present",
            Self::DarknessLightsLit => "Darkness: Street lights present and lit",
            Self::DarknessLightingUnknown => "Darkness: Street lighting unknown",
            Self::DarknessLightsUnlit => "Darkness: Street lights present but unlit",
            Self::DarknessNoLighting => "Darkness: No street lighting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceCondition {
    Dry,
    WetDamp,
    FrostIce,
    Snow,
    Flood,
}

impl SurfaceCondition {
    pub fn is_hazardous(self) -> bool {
        matches!(self, Self::FrostIce | Self::Snow | Self::Flood)
    }
}

impl Category for SurfaceCondition {
    const COLUMN: &'static str = columns::SURFACE;
    const ALL: &'static [Self] = &[
        Self::Dry,
        Self::WetDamp,
        Self::FrostIce,
        Self::Snow,
        Self::Flood,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Dry => "Dry",
            Self::WetDamp => "Wet/Damp",
            Self::FrostIce => "Frost/Ice",
            Self::Snow => "Snow",
            Self::Flood => "Flood (Over 3cm of water)",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Flood => &["Flood"],
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadType {
    Roundabout,
    OneWayStreet,
    DualCarriageway,
    SingleCarriageway,
    SlipRoad,
    Unknown,
}

impl Category for RoadType {
    const COLUMN: &'static str = columns::ROAD_TYPE;
    const ALL: &'static [Self] = &[
        Self::Roundabout,
        Self::OneWayStreet,
        Self::DualCarriageway,
        Self::SingleCarriageway,
        Self::SlipRoad,
        Self::Unknown,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Roundabout => "Roundabout",
            Self::OneWayStreet => "One way street",
            Self::DualCarriageway => "Dual carriageway",
            Self::SingleCarriageway => "Single carriageway",
            Self::SlipRoad => "Slip road",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// Day number, Sunday = 1.
    pub fn from_number(n: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(n).wrapping_sub(1))
            .copied()
            .ok_or(SeverityError::OutOfRange {
                field: columns::DAY_OF_WEEK,
                value: i64::from(n),
            })
    }
}

impl Category for DayOfWeek {
    const COLUMN: &'static str = columns::DAY_OF_WEEK;
    const ALL: &'static [Self] = &[
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}

/// Whether a police officer attended the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoliceAttended {
    Yes,
    No,
}

impl From<bool> for PoliceAttended {
    fn from(attended: bool) -> Self {
        if attended {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl Category for PoliceAttended {
    const COLUMN: &'static str = columns::POLICE_ATTENDED;
    const ALL: &'static [Self] = &[Self::Yes, Self::No];

    fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

/// One value of a raw record, keyed by its feature column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Display label, translated through the category maps.
    Category(&'static str),
    /// Already numeric; passed through.
    Numeric(f64),
}

/// Validated attributes for a single prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawInput {
    pub speed_limit: u32,
    pub area_type: AreaType,
    pub light_condition: LightCondition,
    pub surface_condition: SurfaceCondition,
    pub police_attended: Option<PoliceAttended>,
    pub hour: Option<u8>,
    pub road_type: Option<RoadType>,
    pub second_road_class: Option<i32>,
    pub day_of_week: Option<DayOfWeek>,
}

impl RawInput {
    pub fn new(
        speed_limit: u32,
        area_type: AreaType,
        light_condition: LightCondition,
        surface_condition: SurfaceCondition,
    ) -> Self {
        Self {
            speed_limit,
            area_type,
            light_condition,
            surface_condition,
            police_attended: None,
            hour: None,
            road_type: None,
            second_road_class: None,
            day_of_week: None,
        }
    }

    pub fn with_hour(mut self, hour: u8) -> Result<Self> {
        if hour > 23 {
            return Err(SeverityError::OutOfRange {
                field: columns::HOUR,
                value: i64::from(hour),
            });
        }
        self.hour = Some(hour);
        Ok(self)
    }

    pub fn with_police_attended(mut self, attended: bool) -> Self {
        self.police_attended = Some(attended.into());
        self
    }

    pub fn with_road_type(mut self, road_type: RoadType) -> Self {
        self.road_type = Some(road_type);
        self
    }

    pub fn with_second_road_class(mut self, class: i32) -> Self {
        self.second_road_class = Some(class);
        self
    }

    pub fn with_day_of_week(mut self, day: DayOfWeek) -> Self {
        self.day_of_week = Some(day);
        self
    }

    /// Base columns present in this record, in a stable order. Optional context
    /// that was not supplied is omitted and left to the schema default fill.
    pub fn cells(&self) -> Vec<(&'static str, Cell)> {
        let mut out = vec![
            (columns::SPEED_LIMIT, Cell::Numeric(f64::from(self.speed_limit))),
            (AreaType::COLUMN, Cell::Category(self.area_type.label())),
            (LightCondition::COLUMN, Cell::Category(self.light_condition.label())),
            (SurfaceCondition::COLUMN, Cell::Category(self.surface_condition.label())),
        ];
        if let Some(p) = self.police_attended {
            out.push((PoliceAttended::COLUMN, Cell::Category(p.label())));
        }
        if let Some(h) = self.hour {
            out.push((columns::HOUR, Cell::Numeric(f64::from(h))));
        }
        if let Some(r) = self.road_type {
            out.push((RoadType::COLUMN, Cell::Category(r.label())));
        }
        if let Some(c) = self.second_road_class {
            out.push((columns::SECOND_ROAD_CLASS, Cell::Numeric(f64::from(c))));
        }
        if let Some(d) = self.day_of_week {
            out.push((DayOfWeek::COLUMN, Cell::Category(d.label())));
        }
        out
    }
}

/// Form submission as received: categorical fields carry display strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormInput {
    pub speed_limit: u32,
    pub area_type: String,
    pub light_condition: String,
    pub surface_condition: String,
    #[serde(default)]
    pub police_attended: Option<bool>,
    #[serde(default)]
    pub hour: Option<u8>,
    #[serde(default)]
    pub road_type: Option<String>,
    #[serde(default)]
    pub second_road_class: Option<i32>,
    #[serde(default)]
    pub day_of_week: Option<u8>,
}

impl FormInput {
    pub fn parse(&self) -> Result<RawInput> {
        let mut raw = RawInput::new(
            self.speed_limit,
            AreaType::parse(&self.area_type)?,
            LightCondition::parse(&self.light_condition)?,
            SurfaceCondition::parse(&self.surface_condition)?,
        );
        if let Some(h) = self.hour {
            raw = raw.with_hour(h)?;
        }
        if let Some(p) = self.police_attended {
            raw = raw.with_police_attended(p);
        }
        if let Some(ref r) = self.road_type {
            raw = raw.with_road_type(RoadType::parse(r)?);
        }
        if let Some(c) = self.second_road_class {
            raw = raw.with_second_road_class(c);
        }
        if let Some(d) = self.day_of_week {
            raw = raw.with_day_of_week(DayOfWeek::from_number(d)?);
        }
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(light: &str, surface: &str) -> FormInput {
        FormInput {
            speed_limit: 30,
            area_type: "Urban ".into(),
            light_condition: light.into(),
            surface_condition: surface.into(),
            police_attended: None,
            hour: None,
            road_type: None,
            second_road_class: None,
            day_of_week: None,
        }
    }

    #[test]
    fn parse_trims_and_accepts_flood_alias() {
        let raw = form("Darkness: Street lighting unknown", "Flood")
            .parse()
            .unwrap();
        assert_eq!(raw.area_type, AreaType::Urban);
        assert_eq!(raw.surface_condition, SurfaceCondition::Flood);
    }

    #[test]
    fn unknown_light_is_unmapped() {
        let err = form("Twilight", "Dry").parse().unwrap_err();
        match err {
            SeverityError::UnmappedCategory { field, value } => {
                assert_eq!(field, columns::LIGHT);
                assert_eq!(value, "Twilight");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn hour_and_day_ranges() {
        assert!(RawInput::new(30, AreaType::Rural, LightCondition::DarknessLightsLit, SurfaceCondition::Dry)
            .with_hour(24)
            .is_err());
        assert!(DayOfWeek::from_number(0).is_err());
        assert!(DayOfWeek::from_number(8).is_err());
        assert_eq!(DayOfWeek::from_number(1).unwrap(), DayOfWeek::Sunday);
        assert_eq!(DayOfWeek::from_number(7).unwrap(), DayOfWeek::Saturday);
    }

    #[test]
    fn cells_skip_missing_context() {
        let raw = RawInput::new(40, AreaType::Urban, LightCondition::DarknessNoLighting, SurfaceCondition::Snow);
        assert_eq!(raw.cells().len(), 4);
        let raw = raw.with_hour(17).unwrap().with_road_type(RoadType::SlipRoad);
        let names: Vec<_> = raw.cells().into_iter().map(|(n, _)| n).collect();
        assert!(names.contains(&columns::HOUR));
        assert!(names.contains(&columns::ROAD_TYPE));
    }
}
