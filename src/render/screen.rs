//! Screen renderer
//!
//! Renders a report as plain lines first and colorizes only at print time.
//! Color is a presentation detail: tests assert on line kind and content,
//! never on escape codes.

use crate::branches::BranchInfo;
use crate::diff::Report;
use crate::render::{ChangeContent, RecordContent};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};

/// One rendered output line, tagged with how it should be colorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Bucket or entry header.
    Header(String),
    /// Line present only in the modified content, `+`-prefixed.
    Added(String),
    /// Line present only in the original content, `-`-prefixed.
    Removed(String),
    /// Unchanged context line, unprefixed.
    Context(String),
}

/// Render one family's report in the fixed bucket order added, updated,
/// deleted. Added/deleted entries print their raw content split by line;
/// updated entries print a line-oriented unified diff of original vs
/// modified.
pub fn render_report<R, U>(report: &Report<R, U>, title: &str) -> Vec<Line>
where
    R: RecordContent,
    U: ChangeContent,
{
    let mut lines = Vec::new();

    lines.push(Line::Header(format!("+ Added {title}")));
    for entry in &report.added {
        push_entry_header(&mut lines, title, &entry.identity(), entry.hierarchy_path());
        for line in entry.content().lines() {
            lines.push(Line::Context(line.to_string()));
        }
    }

    lines.push(Line::Header(format!("+ Updated {title}")));
    for entry in &report.updated {
        push_entry_header(&mut lines, title, &entry.identity(), entry.hierarchy_path());
        lines.extend(unified_diff(entry.original(), entry.modified()));
    }

    lines.push(Line::Header(format!("+ Deleted {title}")));
    for entry in &report.deleted {
        push_entry_header(&mut lines, title, &entry.identity(), entry.hierarchy_path());
        for line in entry.content().lines() {
            lines.push(Line::Context(line.to_string()));
        }
    }

    lines
}

/// Render the branch listing: one entry per configured checkout.
pub fn render_branches(branches: &[BranchInfo]) -> Vec<Line> {
    let mut lines = vec![Line::Header("+ Branches".to_string())];
    for info in branches {
        lines.push(Line::Header(format!("+++ {}", info.identity())));
        lines.push(Line::Context(info.content()));
    }
    lines
}

fn push_entry_header(lines: &mut Vec<Line>, title: &str, identity: &str, path: Option<&str>) {
    lines.push(Line::Header(format!("+++ {title} {identity}")));
    if let Some(path) = path {
        lines.push(Line::Header(format!("++++ Check it in: {path}")));
    }
}

/// Line diff between two text blobs: `+`/`-` prefixes, full context.
fn unified_diff(original: &str, modified: &str) -> Vec<Line> {
    let diff = TextDiff::from_lines(original, modified);
    diff.iter_all_changes()
        .map(|change| {
            let value = change.value().trim_end_matches('\n').to_string();
            match change.tag() {
                ChangeTag::Insert => Line::Added(format!("+{value}")),
                ChangeTag::Delete => Line::Removed(format!("-{value}")),
                ChangeTag::Equal => Line::Context(value),
            }
        })
        .collect()
}

/// Print rendered lines, colorized by kind: headers yellow, additions green,
/// removals red, context default.
pub fn print_lines(lines: &[Line]) {
    for line in lines {
        match line {
            Line::Header(s) => println!("{}", s.yellow()),
            Line::Added(s) => println!("{}", s.green()),
            Line::Removed(s) => println!("{}", s.red()),
            Line::Context(s) => println!("{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{ViewChange, ViewReport};
    use crate::records::View;
    use pretty_assertions::assert_eq;

    fn sample_report() -> ViewReport {
        ViewReport {
            added: vec![View {
                xml_id: "m.v2".to_string(),
                arch: "<c/>".to_string(),
            }],
            updated: vec![ViewChange {
                xml_id: "m.v1".to_string(),
                original: "<form>\n  <a/>\n</form>".to_string(),
                modified: "<form>\n  <b/>\n</form>".to_string(),
            }],
            deleted: vec![],
        }
    }

    #[test]
    fn test_buckets_render_in_fixed_order() {
        let lines = render_report(&sample_report(), "views");
        let headers: Vec<_> = lines
            .iter()
            .filter_map(|l| match l {
                Line::Header(s) if s.starts_with("+ ") => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(headers, vec!["+ Added views", "+ Updated views", "+ Deleted views"]);
    }

    #[test]
    fn test_updated_entry_renders_unified_diff() {
        let lines = render_report(&sample_report(), "views");

        assert!(lines.contains(&Line::Header("+++ views m.v1".to_string())));
        assert!(lines.contains(&Line::Removed("-  <a/>".to_string())));
        assert!(lines.contains(&Line::Added("+  <b/>".to_string())));
        assert!(lines.contains(&Line::Context("<form>".to_string())));
    }

    #[test]
    fn test_added_entry_renders_raw_lines() {
        let lines = render_report(&sample_report(), "views");
        let added_header = lines
            .iter()
            .position(|l| l == &Line::Header("+++ views m.v2".to_string()))
            .unwrap();
        assert_eq!(lines[added_header + 1], Line::Context("<c/>".to_string()));
    }

    #[test]
    fn test_menu_entries_render_hierarchy_path() {
        use crate::diff::{MenuEntry, MenuReport};

        let report = MenuReport {
            added: vec![MenuEntry {
                xml_id: "m.menu4".to_string(),
                name: "Reports".to_string(),
                hierarchy_path: "Root->Reports".to_string(),
            }],
            updated: vec![],
            deleted: vec![],
        };
        let lines = render_report(&report, "menus");
        assert!(lines.contains(&Line::Header("++++ Check it in: Root->Reports".to_string())));
    }

    #[test]
    fn test_render_branches() {
        let lines = render_branches(&[BranchInfo {
            name: "backupws".to_string(),
            branch: "8.0".to_string(),
            commit: Some("abc123".to_string()),
        }]);
        assert_eq!(lines[0], Line::Header("+ Branches".to_string()));
        assert_eq!(lines[1], Line::Header("+++ backupws".to_string()));
        assert_eq!(lines[2], Line::Context("8.0 @ abc123".to_string()));
    }
}
