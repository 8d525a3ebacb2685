//! Attribute state threaded through an OBJ parse
//!
//! OBJ attribute statements (`g`, `o`, `usemtl`, `s`, `cstype`, ...) change the
//! state that every following element is created with. The context is created
//! once per parse and every new element takes a snapshot of it.

use wavecrate_core::{
    ElementAttributes, ElementKind, FreeFormAttributes, FreeFormElement, Group, ObjDocument,
    PolygonalAttributes,
};

/// Where a group name resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupSlot {
    Default,
    Named(usize),
}

/// The free-form element that trailing body statements apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentFreeForm {
    Curve(usize),
    Curve2D(usize),
    Surface(usize),
}

/// Per-parse attribute state
#[derive(Debug, Clone)]
pub struct ObjParseContext {
    pub attributes: ElementAttributes,
    pub polygonal: PolygonalAttributes,
    /// Free-form attribute state, the body lists are always empty
    pub free_form: FreeFormAttributes,
    active_groups: Vec<GroupSlot>,
    current_free_form: Option<CurrentFreeForm>,
}

impl ObjParseContext {
    pub fn new() -> Self {
        Self {
            attributes: ElementAttributes::default(),
            polygonal: PolygonalAttributes::default(),
            free_form: FreeFormAttributes::default(),
            active_groups: vec![GroupSlot::Default],
            current_free_form: None,
        }
    }

    /// Replace the active group set.
    ///
    /// The name `default` stands for the default group. An empty set falls back
    /// to the default group. Named groups are created on first use, or on every
    /// call when `always_create` is set.
    pub fn set_groups<S: AsRef<str>>(
        &mut self,
        document: &mut ObjDocument,
        names: &[S],
        always_create: bool,
    ) {
        self.active_groups.clear();

        for name in names.iter().map(|n| n.as_ref()).filter(|n| *n != "default") {
            let existing = if always_create {
                None
            } else {
                document
                    .groups
                    .iter()
                    .position(|g| g.name.as_deref() == Some(name))
            };

            let index = match existing {
                Some(index) => index,
                None => {
                    document.groups.push(Group::new(name));
                    document.groups.len() - 1
                }
            };

            let slot = GroupSlot::Named(index);
            if !self.active_groups.contains(&slot) {
                self.active_groups.push(slot);
            }
        }

        if self.active_groups.is_empty() {
            self.active_groups.push(GroupSlot::Default);
        }
    }

    /// Record a new element in every active group
    pub fn add_to_groups(&self, document: &mut ObjDocument, kind: ElementKind, index: usize) {
        for slot in &self.active_groups {
            match slot {
                GroupSlot::Default => document.default_group.push(kind, index),
                GroupSlot::Named(i) => document.groups[*i].push(kind, index),
            }
        }
    }

    /// Snapshot of the free-form attribute state for a new element
    pub fn free_form_snapshot(&self) -> FreeFormAttributes {
        FreeFormAttributes {
            parameters_u: Vec::new(),
            parameters_v: Vec::new(),
            outer_trimming_curves: Vec::new(),
            inner_trimming_curves: Vec::new(),
            sequence_curves: Vec::new(),
            special_points: Vec::new(),
            ..self.free_form.clone()
        }
    }

    pub fn set_current_free_form(&mut self, current: Option<CurrentFreeForm>) {
        self.current_free_form = current;
    }

    pub fn current_free_form(&self) -> Option<CurrentFreeForm> {
        self.current_free_form
    }

    /// Body data of the current free-form element, if one is open
    pub fn current_body<'d>(
        &self,
        document: &'d mut ObjDocument,
    ) -> Option<&'d mut FreeFormAttributes> {
        match self.current_free_form? {
            CurrentFreeForm::Curve(i) => document.curves.get_mut(i).map(|e| e.free_form_mut()),
            CurrentFreeForm::Curve2D(i) => document.curves_2d.get_mut(i).map(|e| e.free_form_mut()),
            CurrentFreeForm::Surface(i) => document.surfaces.get_mut(i).map(|e| e.free_form_mut()),
        }
    }
}

impl Default for ObjParseContext {
    fn default() -> Self {
        Self::new()
    }
}
