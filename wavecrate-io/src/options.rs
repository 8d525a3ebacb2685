//! Reader configuration

use serde::{Deserialize, Serialize};

/// Options controlling how OBJ statements are interpreted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjReadOptions {
    /// Treat `o name` as `g name` instead of setting the object name attribute
    pub handle_object_names_as_group: bool,
    /// Create a fresh group for every `g` statement even when the name exists
    pub new_group_per_statement: bool,
    /// Join every name on a `g` line into a single group name
    pub single_group_name_per_line: bool,
    /// Keep embedded whitespace in `mtllib` file names
    pub keep_whitespace_in_library_names: bool,
}

impl ObjReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object_names_as_group(mut self, enabled: bool) -> Self {
        self.handle_object_names_as_group = enabled;
        self
    }

    pub fn with_new_group_per_statement(mut self, enabled: bool) -> Self {
        self.new_group_per_statement = enabled;
        self
    }

    pub fn with_single_group_name_per_line(mut self, enabled: bool) -> Self {
        self.single_group_name_per_line = enabled;
        self
    }

    pub fn with_whitespace_in_library_names(mut self, enabled: bool) -> Self {
        self.keep_whitespace_in_library_names = enabled;
        self
    }
}

/// Options controlling how MTL statements are interpreted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MtlReadOptions {
    /// Keep the original whitespace of texture map file names instead of
    /// re-joining their tokens with single spaces
    pub keep_whitespace_in_map_file_names: bool,
}

impl MtlReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_whitespace_in_map_file_names(mut self, enabled: bool) -> Self {
        self.keep_whitespace_in_map_file_names = enabled;
        self
    }
}
