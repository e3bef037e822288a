//! Diffing and reconciliation engine
//!
//! The heart of the tool: given two materialized snapshots of a record
//! family, compute what was added, updated and deleted. This module is pure
//! and synchronous - fetching and delivery live elsewhere.
//!
//! - engine: identity matching and content comparison per family
//! - menu_tree: ancestor-chain resolution for menu entries
//! - report: the family-agnostic added/updated/deleted result shape

pub mod engine;
pub mod menu_tree;
pub mod report;

pub use engine::{diff_fields, diff_menus, diff_translations, diff_views};
pub use menu_tree::MenuTree;
pub use report::{
    FieldChange, FieldReport, FullAudit, MenuChange, MenuEntry, MenuReport, Report,
    TranslationChange, TranslationReport, ViewChange, ViewReport,
};
