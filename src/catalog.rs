//! # Catalog
//!
//! The prompt types a user can pick from, loaded from a JSON object such as
//!
//! ```json
//! {
//!   "Zero-shot": {
//!     "template": "Answer the following question: {input}",
//!     "description": "Ask directly, without examples",
//!     "input_placeholder": "Ask a question"
//!   }
//! }
//! ```
//!
//! `description` and `input_placeholder` may be omitted. Entries keep the order of the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prompt::PromptTemplate;
use crate::utils::JsonMap;
use crate::utils::prompt_processing::suggest_input_placeholder;

/// Error when the catalog file is absent or unreadable; the catalog is then empty.
#[derive(Debug, Error)]
#[error("prompt type catalog {path} could not be loaded: {reason}")]
pub struct ConfigMissing {
    pub path: PathBuf,
    pub reason: String,
}

/// One prompt type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptType {
    pub template: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub input_placeholder: String,
}

/// Prompt types by name, in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<(String, PromptType)>,
}

impl Catalog {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let object: JsonMap = serde_json::from_str(json).context("catalog must be a JSON object")?;
        let entries = object
            .into_iter()
            .map(|(name, value)| {
                let prompt_type: PromptType = serde_json::from_value(value)
                    .with_context(|| format!("invalid prompt type {}", name))?;
                Ok((name, prompt_type))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let catalog = Self::from_json_str(&json).with_context(|| format!("failed to parse {}", path.display()))?;
        info!("loaded {} prompt types from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Load the catalog, falling back to an empty one when it cannot be read.
    pub fn load_or_empty(path: impl AsRef<Path>) -> (Self, Option<ConfigMissing>) {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(catalog) => (catalog, None),
            Err(e) => {
                let missing = ConfigMissing { path: path.to_path_buf(), reason: format!("{:#}", e) };
                warn!("{}", missing);
                (Self::default(), Some(missing))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item=&str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&PromptType> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, prompt_type)| prompt_type)
    }

    /// Build the [PromptTemplate] of a prompt type. A missing input hint is filled with a suggestion for the name.
    pub fn template(&self, name: &str) -> Option<PromptTemplate> {
        self.get(name).map(|prompt_type| {
            let hint = if prompt_type.input_placeholder.is_empty() {
                suggest_input_placeholder(name).to_string()
            } else {
                prompt_type.input_placeholder.clone()
            };
            PromptTemplate::with_metadata(prompt_type.template.clone(), prompt_type.description.clone(), hint)
        })
    }
}

#[cfg(test)]
mod test_catalog {
    use std::io::Write;
    use super::Catalog;

    const CATALOG: &str = r#"{
        "Zero-shot": {
            "template": "Answer the following question: {input}",
            "description": "Ask directly",
            "input_placeholder": "Ask a question"
        },
        "Translation": {
            "template": "Translate to French: {input}"
        }
    }"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::from_json_str(CATALOG).unwrap();
        assert_eq!(2, catalog.len());
        assert_eq!(vec!["Zero-shot", "Translation"], catalog.names().collect::<Vec<_>>());
        assert_eq!("Ask directly", catalog.get("Zero-shot").unwrap().description);
        assert_eq!("", catalog.get("Translation").unwrap().description);
        assert!(catalog.get("Missing").is_none());
    }

    #[test]
    fn test_template_hint_falls_back_to_suggestion() {
        let catalog = Catalog::from_json_str(CATALOG).unwrap();
        assert_eq!("Ask a question", catalog.template("Zero-shot").unwrap().input_placeholder);
        let translation = catalog.template("Translation").unwrap();
        assert_eq!("Enter text to translate", translation.input_placeholder);
        assert_eq!("Translate to French: bonjour", translation.format("bonjour"));
    }

    #[test]
    fn test_invalid_entries() {
        assert!(Catalog::from_json_str("[1, 2]").is_err());
        assert!(Catalog::from_json_str(r#"{"Bad": {"description": "no template"}}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();
        let (catalog, missing) = Catalog::load_or_empty(file.path());
        assert!(missing.is_none());
        assert_eq!(2, catalog.names().count());
    }

    #[test]
    fn test_missing_file_gives_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, missing) = Catalog::load_or_empty(dir.path().join("prompt_types.json"));
        assert!(catalog.is_empty());
        let missing = missing.unwrap();
        assert!(missing.to_string().contains("prompt_types.json"));
    }
}
