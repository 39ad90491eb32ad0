//! Feature column names used by the accident severity models.

pub const SPEED_LIMIT: &str = "Speed_limit";
pub const AREA: &str = "Urban_or_Rural_Area";
pub const LIGHT: &str = "Light_Conditions";
pub const SURFACE: &str = "Road_Surface_Conditions";
pub const POLICE_ATTENDED: &str = "Did_Police_Officer_Attend_Scene_of_Accident";
pub const HOUR: &str = "Hour";
pub const ROAD_TYPE: &str = "Road_Type";
pub const SECOND_ROAD_CLASS: &str = "2nd_Road_Class";
pub const DAY_OF_WEEK: &str = "Day_of_Week";

// Derived
pub const SPEED_URBAN_RURAL: &str = "Speed_Urban_Rural";
pub const LIGHT_ROAD_INTERACTION: &str = "Light_Road_Interaction";
