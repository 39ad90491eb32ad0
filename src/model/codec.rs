//! Class index ⇄ label mapping shipped alongside the model.

use crate::artifact;
use crate::error::{Result, SeverityError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct LabelCodec {
    classes: Vec<String>,
}

impl LabelCodec {
    pub fn new<I, S>(classes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        if classes.is_empty() {
            return Err(SeverityError::InvalidLabels("no classes".into()));
        }
        for (i, c) in classes.iter().enumerate() {
            if classes[..i].contains(c) {
                return Err(SeverityError::InvalidLabels(format!("duplicate class {c:?}")));
            }
        }
        Ok(Self { classes })
    }

    /// Load a JSON array of labels in class-index order.
    pub fn load(path: &Path) -> Result<Self> {
        let classes: Vec<String> = artifact::read_json(path)?;
        let codec = Self::new(classes)?;
        tracing::info!(path = %path.display(), classes = ?codec.classes, "label codec loaded");
        Ok(codec)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn is_binary(&self) -> bool {
        self.classes.len() == 2
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn decode(&self, index: usize) -> Result<&str> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(SeverityError::UnknownClass {
                index,
                classes: self.classes.len(),
            })
    }

    pub fn encode(&self, label: &str) -> Result<usize> {
        self.classes
            .iter()
            .position(|c| c == label)
            .ok_or_else(|| SeverityError::UnknownLabel(label.to_string()))
    }
}

impl TryFrom<Vec<String>> for LabelCodec {
    type Error = SeverityError;

    fn try_from(classes: Vec<String>) -> Result<Self> {
        Self::new(classes)
    }
}

impl From<LabelCodec> for Vec<String> {
    fn from(codec: LabelCodec) -> Self {
        codec.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_and_inverse() {
        let codec = LabelCodec::new(["Fatal", "Serious", "Slight"]).unwrap();
        assert!(!codec.is_binary());
        assert_eq!(codec.decode(1).unwrap(), "Serious");
        assert_eq!(codec.encode("Slight").unwrap(), 2);
        assert_eq!(codec.decode(3).unwrap_err().code(), "SEV-2002");
        assert_eq!(codec.encode("Minor").unwrap_err().code(), "SEV-2003");
    }

    #[test]
    fn rejects_bad_label_space() {
        assert!(LabelCodec::new(Vec::<String>::new()).is_err());
        assert!(LabelCodec::new(["a", "a"]).is_err());
        assert!(serde_json::from_str::<LabelCodec>(r#"["x","x"]"#).is_err());
    }
}
