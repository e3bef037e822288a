//! Record types for the four audited families
//!
//! Every family is a fixed-shape struct; a fetched row either fills the
//! struct completely or fails as malformed. There is no generic
//! "row as mapping" type that tolerates missing keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four record families an audit can compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Views,
    Menus,
    Translations,
    Fields,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::Views => "views",
            Family::Menus => "menus",
            Family::Translations => "translations",
            Family::Fields => "fields",
        };
        f.write_str(name)
    }
}

/// A UI view: serialized markup registered under an external id.
///
/// `xml_id` is `module.name` from `ir_model_data` and is unique within one
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub xml_id: String,
    pub arch: String,
}

/// A UI menu entry as fetched from `ir_model_data`/`ir_ui_menu`.
///
/// `res_id` is the menu's database id, used to resolve its position in the
/// menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub xml_id: String,
    pub res_id: i32,
    pub name: String,
}

/// One raw row of the self-referential menu table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub name: String,
}

/// A menu node with its resolved ancestry.
///
/// `hierarchy_path` is the root-to-node chain of names joined by `->`,
/// used purely for human display; `depth` is the number of segments in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuTreeNode {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub name: String,
    pub depth: u32,
    pub hierarchy_path: String,
}

/// A translated string.
///
/// The identity key is `id`, which is stable across snapshots and denotes
/// the same logical translatable field. `name` is NOT an identity: several
/// fields on different models can share one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub id: i32,
    pub name: String,
    pub module: String,
    pub value: String,
}

/// A model field definition from `ir_model_fields`.
///
/// Identity is the composite `(model, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub model: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub r#type: String,
}
