//! Audit orchestration
//!
//! Glues the record sources to the diff engine: fetch both snapshots of a
//! family, compare, and hand back the report. Families are independent of
//! each other; `everything` computes them all and fails whole if any one
//! fails, so a `getall` report can never silently omit a section.

use crate::branches::{inspect_branches, BranchInfo};
use crate::diff::{
    diff_fields, diff_menus, diff_translations, diff_views, FieldReport, FullAudit, MenuReport,
    TranslationReport, ViewReport,
};
use crate::error::Result;
use crate::source::RecordSource;
use std::path::PathBuf;

/// One comparison run over a pair of snapshot databases.
pub struct Audit<O, M> {
    original: O,
    modified: M,
}

impl<O: RecordSource, M: RecordSource> Audit<O, M> {
    pub fn new(original: O, modified: M) -> Self {
        Self { original, modified }
    }

    pub async fn views(&self) -> Result<ViewReport> {
        let original = self.original.fetch_views().await?;
        let modified = self.modified.fetch_views().await?;
        diff_views(&original, &modified)
    }

    pub async fn menus(&self) -> Result<MenuReport> {
        let original = self.original.fetch_menus().await?;
        let modified = self.modified.fetch_menus().await?;
        let original_tree = self.original.fetch_menu_tree().await?;
        let modified_tree = self.modified.fetch_menu_tree().await?;
        diff_menus(&original, &modified, &original_tree, &modified_tree)
    }

    pub async fn translations(&self) -> Result<TranslationReport> {
        let original = self.original.fetch_translations().await?;
        let modified = self.modified.fetch_translations().await?;
        diff_translations(&original, &modified)
    }

    pub async fn fields(&self) -> Result<FieldReport> {
        let original = self.original.fetch_fields().await?;
        let modified = self.modified.fetch_fields().await?;
        diff_fields(&original, &modified)
    }

    /// Everything at once, plus the addon branch listing.
    pub async fn everything(&self, addons_paths: &[PathBuf]) -> Result<FullAudit> {
        Ok(FullAudit {
            views: self.views().await?,
            menus: self.menus().await?,
            translations: self.translations().await?,
            fields: self.fields().await?,
            branches: self.branches(addons_paths)?,
        })
    }

    pub fn branches(&self, addons_paths: &[PathBuf]) -> Result<Vec<BranchInfo>> {
        inspect_branches(addons_paths)
    }
}
