//! Report renderers
//!
//! Two consumers of the report model: a colorized line diff for humans on a
//! terminal, and a JSON envelope for the message sink. Rendering never
//! mutates a report.

pub mod envelope;
pub mod screen;

pub use envelope::Envelope;
pub use screen::{print_lines, render_branches, render_report, Line};

use crate::branches::BranchInfo;
use crate::diff::{
    FieldChange, MenuChange, MenuEntry, TranslationChange, ViewChange,
};
use crate::records::{Field, Translation, View};

/// A full record as shown in the added/deleted buckets.
pub trait RecordContent {
    /// Enough identity to locate the record.
    fn identity(&self) -> String;
    /// The record's displayable content.
    fn content(&self) -> String;
    /// Tree position, for families that have one.
    fn hierarchy_path(&self) -> Option<&str> {
        None
    }
}

/// A matched pair with changed content, as shown in the updated bucket.
pub trait ChangeContent {
    fn identity(&self) -> String;
    fn original(&self) -> &str;
    fn modified(&self) -> &str;
    fn hierarchy_path(&self) -> Option<&str> {
        None
    }
}

impl RecordContent for View {
    fn identity(&self) -> String {
        self.xml_id.clone()
    }
    fn content(&self) -> String {
        self.arch.clone()
    }
}

impl ChangeContent for ViewChange {
    fn identity(&self) -> String {
        self.xml_id.clone()
    }
    fn original(&self) -> &str {
        &self.original
    }
    fn modified(&self) -> &str {
        &self.modified
    }
}

impl RecordContent for MenuEntry {
    fn identity(&self) -> String {
        self.xml_id.clone()
    }
    fn content(&self) -> String {
        self.name.clone()
    }
    fn hierarchy_path(&self) -> Option<&str> {
        Some(&self.hierarchy_path)
    }
}

impl ChangeContent for MenuChange {
    fn identity(&self) -> String {
        self.xml_id.clone()
    }
    fn original(&self) -> &str {
        &self.original
    }
    fn modified(&self) -> &str {
        &self.modified
    }
    fn hierarchy_path(&self) -> Option<&str> {
        Some(&self.hierarchy_path)
    }
}

impl RecordContent for Translation {
    fn identity(&self) -> String {
        format!("{} [{}]", self.name, self.id)
    }
    fn content(&self) -> String {
        self.value.clone()
    }
}

impl ChangeContent for TranslationChange {
    fn identity(&self) -> String {
        format!("{} [{}]", self.name, self.id)
    }
    fn original(&self) -> &str {
        &self.original
    }
    fn modified(&self) -> &str {
        &self.modified
    }
}

impl RecordContent for Field {
    fn identity(&self) -> String {
        format!("{}.{}", self.model, self.name)
    }
    fn content(&self) -> String {
        format!("{} ({})", self.description, self.r#type)
    }
}

impl ChangeContent for FieldChange {
    fn identity(&self) -> String {
        format!("{}.{} [{}]", self.model, self.name, self.column)
    }
    fn original(&self) -> &str {
        &self.original
    }
    fn modified(&self) -> &str {
        &self.modified
    }
}

impl RecordContent for BranchInfo {
    fn identity(&self) -> String {
        self.name.clone()
    }
    fn content(&self) -> String {
        match &self.commit {
            Some(sha) => format!("{} @ {}", self.branch, sha),
            None => self.branch.clone(),
        }
    }
}
