//! Ordered feature schema expected by the model.

use crate::artifact;
use crate::error::{Result, SeverityError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

/// Authoritative column set and order. Some back-ends are order-sensitive,
/// so assembled vectors always follow this order exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(SeverityError::InvalidSchema("no columns".into()));
        }
        let mut seen = HashSet::with_capacity(names.len());
        for n in &names {
            if !seen.insert(n.as_str()) {
                return Err(SeverityError::InvalidSchema(format!("duplicate column {n:?}")));
            }
        }
        Ok(Self { names })
    }

    /// Load a JSON array of column names.
    pub fn load(path: &Path) -> Result<Self> {
        let names: Vec<String> = artifact::read_json(path)?;
        let schema = Self::new(names)?;
        tracing::info!(
            path = %path.display(),
            columns = schema.len(),
            fingerprint = %schema.fingerprint(),
            "feature schema loaded"
        );
        Ok(schema)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// SHA-256 over the ordered names; changes when a column is added, removed or moved.
    pub fn fingerprint(&self) -> String {
        let mut h = Sha256::new();
        for n in &self.names {
            h.update(n.as_bytes());
            h.update([0u8]);
        }
        format!("{:x}", h.finalize())
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = SeverityError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        Self::new(names)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(schema: FeatureSchema) -> Self {
        schema.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicates_and_empty() {
        assert!(FeatureSchema::new(["a", "b", "a"]).is_err());
        assert!(FeatureSchema::new(Vec::<String>::new()).is_err());
    }

    #[test]
    fn fingerprint_tracks_order() {
        let a = FeatureSchema::new(["Speed_limit", "Hour"]).unwrap();
        let b = FeatureSchema::new(["Hour", "Speed_limit"]).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), a.clone().fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"["Speed_limit","Light_Conditions"]"#).unwrap();
        let s = FeatureSchema::load(&path).unwrap();
        assert_eq!(s.names(), ["Speed_limit", "Light_Conditions"]);

        std::fs::write(&path, r#"{"not":"a list"}"#).unwrap();
        let err = FeatureSchema::load(&path).unwrap_err();
        assert_eq!(err.code(), "SEV-3001");
    }
}
