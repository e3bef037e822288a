//! Report model
//!
//! The canonical shape of a diff result, independent of record family.
//! Both the screen renderer and the JSON envelope consume this; nothing in
//! here knows how the records were fetched.

use crate::branches::BranchInfo;
use crate::records::{Field, Menu, Translation, View};
use serde::{Deserialize, Serialize};

/// A diff result: what was added, what changed, what disappeared.
///
/// `R` is the entry type carried by the `added`/`deleted` buckets (the full
/// record as seen in the snapshot it exists in), `U` the per-change entry
/// type of the `updated` bucket. Matched records whose compared content is
/// equal produce no entry at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report<R, U> {
    pub added: Vec<R>,
    pub updated: Vec<U>,
    pub deleted: Vec<R>,
}

impl<R, U> Default for Report<R, U> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            updated: Vec::new(),
            deleted: Vec::new(),
        }
    }
}

impl<R, U> Report<R, U> {
    /// True when all three buckets are empty.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// An updated view: same `xml_id`, different markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewChange {
    pub xml_id: String,
    pub original: String,
    pub modified: String,
}

/// An added or deleted menu, with its position in the menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub xml_id: String,
    pub name: String,
    pub hierarchy_path: String,
}

/// A renamed menu. The hierarchy path is resolved against the original
/// snapshot, so reviewers can find the entry where it used to live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuChange {
    pub xml_id: String,
    pub original: String,
    pub modified: String,
    pub hierarchy_path: String,
}

/// A translation whose value changed for the same logical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationChange {
    pub id: i32,
    pub name: String,
    pub original: String,
    pub modified: String,
}

/// One changed attribute of one field definition.
///
/// The granularity is per column: a field whose `description` and `type`
/// both changed yields two entries, each tagged with its own `column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub model: String,
    pub name: String,
    pub column: String,
    pub original: String,
    pub modified: String,
}

pub type ViewReport = Report<View, ViewChange>;
pub type MenuReport = Report<MenuEntry, MenuChange>;
pub type TranslationReport = Report<Translation, TranslationChange>;
pub type FieldReport = Report<Field, FieldChange>;

/// Everything the `getall` command produces, keyed by family name in the
/// serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullAudit {
    pub views: ViewReport,
    pub menus: MenuReport,
    pub translations: TranslationReport,
    pub fields: FieldReport,
    pub branches: Vec<BranchInfo>,
}
