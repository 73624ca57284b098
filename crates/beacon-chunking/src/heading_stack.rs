use beacon_core::models::Section;

/// Open headings from the outermost level down to the current section.
#[derive(Debug, Default, Clone)]
pub struct HeadingStack {
    entries: Vec<(u8, String)>,
}

impl HeadingStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close every heading at or below the section's level, then open its heading.
    pub fn enter(&mut self, section: &Section) {
        while self
            .entries
            .last()
            .is_some_and(|(level, _)| *level >= section.level)
        {
            self.entries.pop();
        }
        let heading = section.heading.trim();
        if !heading.is_empty() {
            self.entries.push((section.level, heading.to_string()));
        }
    }

    pub fn path(&self) -> Vec<String> {
        self.entries.iter().map(|(_, h)| h.clone()).collect()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}
