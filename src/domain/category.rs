//! Spending categories as served by the backend.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// Read-only reference data used to label expense transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon: String::new(),
            color: String::new(),
        }
    }

    pub fn with_style(mut self, icon: impl Into<String>, color: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color = color.into();
        self
    }
}

impl Identifiable for Category {
    fn id(&self) -> i64 {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Decorated for Category {
    fn icon(&self) -> &str {
        &self.icon
    }

    fn color(&self) -> &str {
        &self.color
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} (#{})", self.name, self.id)
    }
}
