//! Element groups

use serde::{Deserialize, Serialize};

/// The categories of elements a group can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Point,
    Line,
    Face,
    Curve,
    Curve2D,
    Surface,
}

impl ElementKind {
    /// All kinds in the order the writer emits them
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Point,
        ElementKind::Line,
        ElementKind::Face,
        ElementKind::Curve,
        ElementKind::Curve2D,
        ElementKind::Surface,
    ];
}

/// A named (or default) collection of element references.
///
/// Members are 0-based positions in the owning document's per-kind element
/// lists. Groups never own elements and an element may be listed by several
/// groups at once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Group {
    /// `None` for the default group
    pub name: Option<String>,
    pub points: Vec<usize>,
    pub lines: Vec<usize>,
    pub faces: Vec<usize>,
    pub curves: Vec<usize>,
    pub curves_2d: Vec<usize>,
    pub surfaces: Vec<usize>,
}

impl Group {
    /// Create an empty named group
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Create the unnamed default group
    pub fn default_group() -> Self {
        Self::default()
    }

    /// Members of the given kind
    pub fn members(&self, kind: ElementKind) -> &[usize] {
        match kind {
            ElementKind::Point => &self.points,
            ElementKind::Line => &self.lines,
            ElementKind::Face => &self.faces,
            ElementKind::Curve => &self.curves,
            ElementKind::Curve2D => &self.curves_2d,
            ElementKind::Surface => &self.surfaces,
        }
    }

    /// Record an element as a member of this group
    pub fn push(&mut self, kind: ElementKind, index: usize) {
        let members = match kind {
            ElementKind::Point => &mut self.points,
            ElementKind::Line => &mut self.lines,
            ElementKind::Face => &mut self.faces,
            ElementKind::Curve => &mut self.curves,
            ElementKind::Curve2D => &mut self.curves_2d,
            ElementKind::Surface => &mut self.surfaces,
        };
        members.push(index);
    }

    pub fn contains(&self, kind: ElementKind, index: usize) -> bool {
        self.members(kind).contains(&index)
    }

    /// Check if the group has no members of any kind
    pub fn is_empty(&self) -> bool {
        ElementKind::ALL.iter().all(|kind| self.members(*kind).is_empty())
    }
}
