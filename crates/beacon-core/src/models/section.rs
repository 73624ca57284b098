use serde::{Deserialize, Serialize};

/// One node of a document's heading hierarchy. Level 0 is preamble text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub level: u8,
    pub heading: String,
    pub body: String,
}

impl Section {
    pub fn new(level: u8, heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level,
            heading: heading.into(),
            body: body.into(),
        }
    }

    /// Heading line followed by the body, or just the body for headless sections.
    pub fn text(&self) -> String {
        let heading = self.heading.trim();
        if heading.is_empty() {
            self.body.clone()
        } else if self.body.is_empty() {
            heading.to_string()
        } else {
            format!("{heading}\n{}", self.body)
        }
    }

    pub fn is_blank(&self) -> bool {
        self.heading.trim().is_empty() && self.body.trim().is_empty()
    }
}
