//! Frequency encoding applied after schema alignment.
//!
//! Some trained models replace a column's code with how often that code occurred
//! in the training set. Codes the table has never seen encode to `0.0`.

use super::FeatureVector;
use crate::artifact;
use crate::error::{Result, SeverityError};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

const CODE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyMaps {
    tables: HashMap<String, Vec<(f64, f64)>>,
}

impl FrequencyMaps {
    /// Load `{column: {code: frequency}}`; object keys must parse as numbers.
    pub fn load(path: &Path) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, f64>> = artifact::read_json(path)?;
        let mut maps = Self::default();
        for (column, table) in raw {
            for (key, freq) in table {
                let code: f64 = key.trim().parse().map_err(|_| SeverityError::Artifact {
                    path: path.to_path_buf(),
                    details: format!("{column}: key {key:?} is not numeric"),
                })?;
                maps.insert(column.clone(), code, freq);
            }
        }
        tracing::info!(path = %path.display(), columns = maps.tables.len(), "frequency maps loaded");
        Ok(maps)
    }

    pub fn insert(&mut self, column: impl Into<String>, code: f64, frequency: f64) {
        let table = self.tables.entry(column.into()).or_default();
        match table.iter_mut().find(|(c, _)| (*c - code).abs() < CODE_EPSILON) {
            Some(entry) => entry.1 = frequency,
            None => table.push((code, frequency)),
        }
    }

    pub fn encode(&self, column: &str, code: f64) -> Option<f64> {
        let table = self.tables.get(column)?;
        let freq = table
            .iter()
            .find(|(c, _)| (*c - code).abs() < CODE_EPSILON)
            .map(|(_, f)| *f)
            .unwrap_or(0.0);
        Some(freq)
    }

    /// Rewrite every encoded column present in `vector`.
    pub fn apply(&self, vector: &mut FeatureVector) {
        for column in self.tables.keys() {
            if let Some(current) = vector.get(column) {
                if let Some(freq) = self.encode(column, current) {
                    vector.set(column, freq);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureSchema;

    #[test]
    fn apply_encodes_known_and_zeroes_unknown() {
        let schema = FeatureSchema::new(["Road_Type", "Hour", "Day_of_Week"]).unwrap();
        let mut v = FeatureVector::from_schema(&schema, |n| match n {
            "Road_Type" => 6.0,
            "Hour" => 17.0,
            _ => 4.0,
        });
        let mut maps = FrequencyMaps::default();
        maps.insert("Road_Type", 6.0, 0.74);
        maps.insert("Day_of_Week", 1.0, 0.11);
        maps.insert("Not_In_Schema", 1.0, 0.5);
        maps.apply(&mut v);
        assert_eq!(v.get("Road_Type"), Some(0.74));
        assert_eq!(v.get("Day_of_Week"), Some(0.0));
        assert_eq!(v.get("Hour"), Some(17.0));
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn load_parses_numeric_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freq.json");
        std::fs::write(&path, r#"{"Road_Type": {"6": 0.7, "3.0": 0.2}}"#).unwrap();
        let maps = FrequencyMaps::load(&path).unwrap();
        assert_eq!(maps.encode("Road_Type", 3.0), Some(0.2));
        assert_eq!(maps.encode("Road_Type", 6.0), Some(0.7));
        assert_eq!(maps.encode("Hour", 6.0), None);

        std::fs::write(&path, r#"{"Road_Type": {"six": 0.7}}"#).unwrap();
        assert!(FrequencyMaps::load(&path).is_err());
    }
}
