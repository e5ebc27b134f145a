use std::fmt;

use mold_value::Segment;

/// A reference path: a variable name followed by a `select` projection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path {
    pub name: String,
    pub select: Vec<Segment>,
}

impl Path {
    pub fn new(name: impl Into<String>) -> Self {
        Path {
            name: name.into(),
            select: Vec::new(),
        }
    }

    /// Split `name.a.0.b` into the name and its projection. A leading `$`
    /// is kept on the name; callers strip it when classifying the path.
    pub fn parse_dotted(dotted: &str) -> Self {
        let mut parts = dotted.split('.');
        let name = parts.next().unwrap_or_default().to_string();
        Path {
            name,
            select: parts.map(Segment::parse).collect(),
        }
    }

    #[must_use]
    pub fn with_select(mut self, select: Vec<Segment>) -> Self {
        self.select = select;
        self
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for segment in &self.select {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}
