//! Feature alignment: raw form attributes → schema-ordered numeric vector.

pub mod columns;
mod category;
mod frequency;
mod pipeline;
mod schema;

pub use category::CategoryMaps;
pub use frequency::FrequencyMaps;
pub use pipeline::{assemble, FeatureAssembler};
pub use schema::FeatureSchema;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One value per schema column, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn from_schema(schema: &FeatureSchema, mut value_of: impl FnMut(&str) -> f64) -> Self {
        let names = schema.names().to_vec();
        let values = names.iter().map(|n| value_of(n.as_str())).collect();
        Self { names, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    pub(crate) fn set(&mut self, name: &str, value: f64) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names.iter().map(String::as_str).zip(self.values.iter().copied())
    }

    /// Single-precision copy for tensor input.
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|v| *v as f32).collect()
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_schema_order() {
        let schema = FeatureSchema::new(["z", "a", "m"]).unwrap();
        let v = FeatureVector::from_schema(&schema, |n| if n == "a" { 1.5 } else { 0.0 });
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"z":0.0,"a":1.5,"m":0.0}"#);
        assert_eq!(v.to_f32(), vec![0.0f32, 1.5, 0.0]);
    }
}
