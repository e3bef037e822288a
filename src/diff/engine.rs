//! Matcher/Differ engine
//!
//! Matches records between two snapshots by identity key and classifies the
//! outcome into added/updated/deleted buckets. Matching is always by
//! explicit key through a hash index, never by position: two records with
//! equal keys at different offsets still pair up. Comparison is exact
//! equality with no normalization - these are machine-serialized config
//! blobs, so even a trailing-whitespace difference is a genuine change.

use crate::diff::menu_tree::MenuTree;
use crate::diff::report::{
    FieldChange, FieldReport, MenuChange, MenuEntry, MenuReport, Report, TranslationChange,
    TranslationReport, ViewChange, ViewReport,
};
use crate::error::{AppError, Result};
use crate::records::{Family, Field, Menu, Translation, View};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;
use tracing::debug;

/// Composite `(model, name)` identity key for fields, rendered as
/// `model.name` when it has to be named in an error.
#[derive(PartialEq, Eq, Hash)]
struct CompositeKey<'a>(&'a str, &'a str);

impl Display for CompositeKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0, self.1)
    }
}

/// Outcome of identity matching, before content comparison.
///
/// Every modified record lands in exactly one of `pairs`/`added`, every
/// unmatched original record in `deleted`; nothing is lost or duplicated.
struct Matched<'a, R> {
    /// (original, modified) pairs sharing an identity key.
    pairs: Vec<(&'a R, &'a R)>,
    /// Modified records with no counterpart, in modified order.
    added: Vec<&'a R>,
    /// Original records with no counterpart, in original order.
    deleted: Vec<&'a R>,
}

/// Index `original` by identity key and walk `modified` against it.
///
/// A duplicate key inside either snapshot violates the identity-uniqueness
/// precondition and fails the whole comparison.
fn match_by_key<'a, R, K, F>(
    family: Family,
    original: &'a [R],
    modified: &'a [R],
    key: F,
) -> Result<Matched<'a, R>>
where
    K: Eq + Hash + Display,
    F: Fn(&'a R) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::with_capacity(original.len());
    for (i, record) in original.iter().enumerate() {
        let k = key(record);
        if let Some(prev) = index.insert(k, i) {
            let k = key(&original[prev]);
            return Err(AppError::DuplicateKey {
                family,
                key: k.to_string(),
            });
        }
    }

    let mut seen: HashSet<K> = HashSet::with_capacity(modified.len());
    let mut consumed: HashSet<usize> = HashSet::new();
    let mut pairs = Vec::new();
    let mut added = Vec::new();

    for record in modified {
        let k = key(record);
        if !seen.insert(key(record)) {
            return Err(AppError::DuplicateKey {
                family,
                key: k.to_string(),
            });
        }
        match index.get(&k) {
            Some(&i) => {
                consumed.insert(i);
                pairs.push((&original[i], record));
            }
            None => added.push(record),
        }
    }

    let deleted = original
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed.contains(i))
        .map(|(_, r)| r)
        .collect();

    Ok(Matched {
        pairs,
        added,
        deleted,
    })
}

/// Compare the view collections of two snapshots by `xml_id`.
pub fn diff_views(original: &[View], modified: &[View]) -> Result<ViewReport> {
    let matched = match_by_key(Family::Views, original, modified, |v| v.xml_id.as_str())?;

    let mut report = Report::default();
    for (org, upd) in matched.pairs {
        if org.arch != upd.arch {
            report.updated.push(ViewChange {
                xml_id: org.xml_id.clone(),
                original: org.arch.clone(),
                modified: upd.arch.clone(),
            });
        }
    }
    report.added = matched.added.into_iter().cloned().collect();
    report.deleted = matched.deleted.into_iter().cloned().collect();

    debug!(
        added = report.added.len(),
        updated = report.updated.len(),
        deleted = report.deleted.len(),
        "views compared"
    );
    Ok(report)
}

/// Compare the menu collections of two snapshots by `xml_id`.
///
/// Updated and deleted entries resolve their hierarchy path against the
/// original snapshot's tree (the entry is located where reviewers knew it),
/// added entries against the modified tree (the only one they exist in).
pub fn diff_menus(
    original: &[Menu],
    modified: &[Menu],
    original_tree: &MenuTree,
    modified_tree: &MenuTree,
) -> Result<MenuReport> {
    let matched = match_by_key(Family::Menus, original, modified, |m| m.xml_id.as_str())?;

    let mut report = Report::default();
    for (org, upd) in matched.pairs {
        if org.name != upd.name {
            let node = original_tree.resolve_path(org.res_id)?;
            report.updated.push(MenuChange {
                xml_id: org.xml_id.clone(),
                original: org.name.clone(),
                modified: upd.name.clone(),
                hierarchy_path: node.hierarchy_path,
            });
        }
    }
    for menu in matched.added {
        let node = modified_tree.resolve_path(menu.res_id)?;
        report.added.push(MenuEntry {
            xml_id: menu.xml_id.clone(),
            name: menu.name.clone(),
            hierarchy_path: node.hierarchy_path,
        });
    }
    for menu in matched.deleted {
        let node = original_tree.resolve_path(menu.res_id)?;
        report.deleted.push(MenuEntry {
            xml_id: menu.xml_id.clone(),
            name: menu.name.clone(),
            hierarchy_path: node.hierarchy_path,
        });
    }

    debug!(
        added = report.added.len(),
        updated = report.updated.len(),
        deleted = report.deleted.len(),
        "menus compared"
    );
    Ok(report)
}

/// Compare translations by stable `id`.
///
/// `name` is deliberately not the key: several fields share names, and the
/// id denotes the same logical translatable field in both snapshots.
pub fn diff_translations(
    original: &[Translation],
    modified: &[Translation],
) -> Result<TranslationReport> {
    let matched = match_by_key(Family::Translations, original, modified, |t| t.id)?;

    let mut report = Report::default();
    for (org, upd) in matched.pairs {
        if org.value != upd.value {
            report.updated.push(TranslationChange {
                id: org.id,
                name: org.name.clone(),
                original: org.value.clone(),
                modified: upd.value.clone(),
            });
        }
    }
    report.added = matched.added.into_iter().cloned().collect();
    report.deleted = matched.deleted.into_iter().cloned().collect();

    debug!(
        added = report.added.len(),
        updated = report.updated.len(),
        deleted = report.deleted.len(),
        "translations compared"
    );
    Ok(report)
}

/// Compare field definitions by the composite `(model, name)` key.
///
/// Changes are reported per column: the same field may appear once for
/// `description` and once for `type`, each entry carrying only that
/// column's before/after values.
pub fn diff_fields(original: &[Field], modified: &[Field]) -> Result<FieldReport> {
    let matched = match_by_key(Family::Fields, original, modified, |f| {
        CompositeKey(f.model.as_str(), f.name.as_str())
    })?;

    let mut report = Report::default();
    for (org, upd) in matched.pairs {
        if org.description != upd.description {
            report.updated.push(FieldChange {
                model: org.model.clone(),
                name: org.name.clone(),
                column: "description".to_string(),
                original: org.description.clone(),
                modified: upd.description.clone(),
            });
        }
        if org.r#type != upd.r#type {
            report.updated.push(FieldChange {
                model: org.model.clone(),
                name: org.name.clone(),
                column: "type".to_string(),
                original: org.r#type.clone(),
                modified: upd.r#type.clone(),
            });
        }
    }
    report.added = matched.added.into_iter().cloned().collect();
    report.deleted = matched.deleted.into_iter().cloned().collect();

    debug!(
        added = report.added.len(),
        updated = report.updated.len(),
        deleted = report.deleted.len(),
        "fields compared"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::MenuNode;
    use pretty_assertions::assert_eq;

    fn view(xml_id: &str, arch: &str) -> View {
        View {
            xml_id: xml_id.to_string(),
            arch: arch.to_string(),
        }
    }

    fn field(model: &str, name: &str, description: &str, r#type: &str) -> Field {
        Field {
            model: model.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            r#type: r#type.to_string(),
        }
    }

    fn translation(id: i32, name: &str, value: &str) -> Translation {
        Translation {
            id,
            name: name.to_string(),
            module: "base".to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_views_added_and_updated() {
        let original = vec![view("m.v1", "<a/>")];
        let modified = vec![view("m.v1", "<b/>"), view("m.v2", "<c/>")];

        let report = diff_views(&original, &modified).unwrap();

        assert_eq!(report.added, vec![view("m.v2", "<c/>")]);
        assert_eq!(
            report.updated,
            vec![ViewChange {
                xml_id: "m.v1".to_string(),
                original: "<a/>".to_string(),
                modified: "<b/>".to_string(),
            }]
        );
        assert!(report.deleted.is_empty());
    }

    #[test]
    fn test_views_match_by_key_not_position() {
        // Same records, reversed order: nothing changed.
        let original = vec![view("m.v1", "<a/>"), view("m.v2", "<b/>")];
        let modified = vec![view("m.v2", "<b/>"), view("m.v1", "<a/>")];

        let report = diff_views(&original, &modified).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_diff_is_idempotent() {
        let snapshot = vec![view("m.v1", "<a/>"), view("m.v2", "<b/>")];
        let report = diff_views(&snapshot, &snapshot).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_added_deleted_symmetry() {
        let a = vec![view("m.v1", "<a/>")];
        let b = vec![view("m.v1", "<a/>"), view("m.v2", "<c/>")];

        let forward = diff_views(&a, &b).unwrap();
        let backward = diff_views(&b, &a).unwrap();

        assert_eq!(forward.added, backward.deleted);
        assert_eq!(forward.deleted, backward.added);
    }

    #[test]
    fn test_duplicate_key_is_a_precondition_failure() {
        let original = vec![view("m.v1", "<a/>"), view("m.v1", "<b/>")];
        let modified = vec![view("m.v1", "<a/>")];

        let err = diff_views(&original, &modified).unwrap_err();
        match err {
            AppError::DuplicateKey { family, key } => {
                assert_eq!(family, Family::Views);
                assert_eq!(key, "m.v1");
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_key_in_modified_snapshot() {
        let original = vec![view("m.v1", "<a/>")];
        let modified = vec![view("m.v2", "<b/>"), view("m.v2", "<b/>")];

        assert!(diff_views(&original, &modified).is_err());
    }

    #[test]
    fn test_partition_completeness() {
        let original = vec![view("m.v1", "<a/>"), view("m.v2", "<b/>"), view("m.v3", "<c/>")];
        let modified = vec![view("m.v2", "<b/>"), view("m.v3", "<x/>"), view("m.v4", "<d/>")];

        let report = diff_views(&original, &modified).unwrap();

        // m.v2 unchanged (absent), m.v3 updated, m.v4 added, m.v1 deleted.
        assert_eq!(report.added.len(), 1);
        assert_eq!(report.updated.len(), 1);
        assert_eq!(report.deleted.len(), 1);
        assert_eq!(report.added[0].xml_id, "m.v4");
        assert_eq!(report.updated[0].xml_id, "m.v3");
        assert_eq!(report.deleted[0].xml_id, "m.v1");

        // No identity key appears in both added and deleted.
        let added: Vec<_> = report.added.iter().map(|v| &v.xml_id).collect();
        assert!(report.deleted.iter().all(|v| !added.contains(&&v.xml_id)));
    }

    #[test]
    fn test_fields_per_column_granularity() {
        let original = vec![field("res.partner", "x", "X", "char")];
        let modified = vec![field("res.partner", "x", "X", "integer")];

        let report = diff_fields(&original, &modified).unwrap();

        assert_eq!(
            report.updated,
            vec![FieldChange {
                model: "res.partner".to_string(),
                name: "x".to_string(),
                column: "type".to_string(),
                original: "char".to_string(),
                modified: "integer".to_string(),
            }]
        );
        assert!(report.added.is_empty());
        assert!(report.deleted.is_empty());
    }

    #[test]
    fn test_fields_two_changed_columns_two_entries() {
        let original = vec![field("res.partner", "x", "X", "char")];
        let modified = vec![field("res.partner", "x", "X renamed", "integer")];

        let report = diff_fields(&original, &modified).unwrap();

        assert_eq!(report.updated.len(), 2);
        assert_eq!(report.updated[0].column, "description");
        assert_eq!(report.updated[1].column, "type");
        assert!(report.updated.iter().all(|c| c.model == "res.partner" && c.name == "x"));
    }

    #[test]
    fn test_fields_composite_key() {
        // Same field name on two models must not cross-match.
        let original = vec![
            field("res.partner", "name", "Name", "char"),
            field("res.users", "name", "Name", "char"),
        ];
        let modified = vec![field("res.partner", "name", "Name", "char")];

        let report = diff_fields(&original, &modified).unwrap();
        assert_eq!(report.deleted, vec![field("res.users", "name", "Name", "char")]);
        assert!(report.updated.is_empty());
    }

    #[test]
    fn test_translations_match_by_id_not_name() {
        // Two translations share a name; only ids pair them up.
        let original = vec![
            translation(1, "name", "translation number one"),
            translation(2, "name", "other model, same name"),
        ];
        let modified = vec![
            translation(1, "name", "translation number one changed"),
            translation(2, "name", "other model, same name"),
        ];

        let report = diff_translations(&original, &modified).unwrap();

        assert_eq!(report.updated.len(), 1);
        assert_eq!(report.updated[0].id, 1);
        assert_eq!(report.updated[0].original, "translation number one");
    }

    #[test]
    fn test_whitespace_difference_is_a_real_change() {
        let original = vec![view("m.v1", "<a/>")];
        let modified = vec![view("m.v1", "<a/> ")];

        let report = diff_views(&original, &modified).unwrap();
        assert_eq!(report.updated.len(), 1);
    }

    #[test]
    fn test_menu_rename_resolves_path_from_original_tree() {
        let original = vec![Menu {
            xml_id: "m.menu1".to_string(),
            res_id: 3,
            name: "Old".to_string(),
        }];
        let modified = vec![Menu {
            xml_id: "m.menu1".to_string(),
            res_id: 3,
            name: "New".to_string(),
        }];

        let nodes = |leaf: &str| {
            vec![
                MenuNode { id: 1, parent_id: None, name: "Root".to_string() },
                MenuNode { id: 2, parent_id: Some(1), name: "Sales".to_string() },
                MenuNode { id: 3, parent_id: Some(2), name: leaf.to_string() },
            ]
        };
        let original_tree = MenuTree::from_nodes(nodes("Old"));
        let modified_tree = MenuTree::from_nodes(nodes("New"));

        let report = diff_menus(&original, &modified, &original_tree, &modified_tree).unwrap();

        assert_eq!(
            report.updated,
            vec![MenuChange {
                xml_id: "m.menu1".to_string(),
                original: "Old".to_string(),
                modified: "New".to_string(),
                hierarchy_path: "Root->Sales->Old".to_string(),
            }]
        );
    }

    #[test]
    fn test_menu_added_and_deleted_carry_paths() {
        let original = vec![Menu {
            xml_id: "m.gone".to_string(),
            res_id: 2,
            name: "Gone".to_string(),
        }];
        let modified = vec![Menu {
            xml_id: "m.fresh".to_string(),
            res_id: 2,
            name: "Fresh".to_string(),
        }];

        let original_tree = MenuTree::from_nodes(vec![
            MenuNode { id: 1, parent_id: None, name: "Root".to_string() },
            MenuNode { id: 2, parent_id: Some(1), name: "Gone".to_string() },
        ]);
        let modified_tree = MenuTree::from_nodes(vec![
            MenuNode { id: 1, parent_id: None, name: "Root".to_string() },
            MenuNode { id: 2, parent_id: Some(1), name: "Fresh".to_string() },
        ]);

        let report = diff_menus(&original, &modified, &original_tree, &modified_tree).unwrap();

        assert_eq!(report.added.len(), 1);
        assert_eq!(report.added[0].hierarchy_path, "Root->Fresh");
        assert_eq!(report.deleted.len(), 1);
        assert_eq!(report.deleted[0].hierarchy_path, "Root->Gone");
    }
}
