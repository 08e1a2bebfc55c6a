use serde::{Deserialize, Deserializer, Serialize};

use crate::normalizer::lenient::split_list;

/// A candidate's skills. Accepts a JSON array or a comma-separated string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Skills(Vec<String>);

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// `"Rust, SQL, Docker"` form used inside prompts.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl From<Vec<String>> for Skills {
    fn from(items: Vec<String>) -> Self {
        Self(
            items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for Skills {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            List(Vec<String>),
            Text(String),
            Missing(()),
        }

        Ok(match Wire::deserialize(d)? {
            Wire::List(items) => Skills::from(items),
            Wire::Text(text) => Skills(split_list(&text)),
            Wire::Missing(()) => Skills::default(),
        })
    }
}
