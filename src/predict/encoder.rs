use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{DashboardError, DashboardResult};

/// Integer class code produced by encoders and classifiers.
pub type ClassCode = i64;

/// On-disk form of a label encoder: the class labels in code order.
///
/// ```json
/// { "classes": ["Bronze", "Gold", "Silver"] }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct EncoderArtifact {
    pub classes: Vec<String>,
}

/// Bidirectional label ↔ code mapping fixed at training time.
/// A label's code is its position in `classes`.
#[derive(Debug, Clone)]
pub struct CategoryEncoder {
    name: String,
    classes: Vec<String>,
    codes: HashMap<String, ClassCode>,
}

impl CategoryEncoder {
    /// Build an encoder named `name` (used in error messages).
    /// Fails on an empty class list or duplicate labels.
    pub fn new(name: impl Into<String>, classes: Vec<String>) -> anyhow::Result<Self> {
        let name = name.into();
        if classes.is_empty() {
            anyhow::bail!("{name} encoder has no classes");
        }
        let mut codes = HashMap::with_capacity(classes.len());
        for (code, label) in classes.iter().enumerate() {
            if codes.insert(label.clone(), code as ClassCode).is_some() {
                anyhow::bail!("{name} encoder lists '{label}' twice");
            }
        }
        Ok(Self {
            name,
            classes,
            codes,
        })
    }

    pub fn from_artifact(name: impl Into<String>, artifact: EncoderArtifact) -> anyhow::Result<Self> {
        Self::new(name, artifact.classes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Known labels in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn encode(&self, label: &str) -> DashboardResult<ClassCode> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| DashboardError::InvalidCategory {
                encoder: self.name.clone(),
                label: label.to_string(),
            })
    }

    pub fn decode(&self, code: ClassCode) -> DashboardResult<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
            .ok_or_else(|| DashboardError::InvalidCode {
                encoder: self.name.clone(),
                code,
            })
    }
}
