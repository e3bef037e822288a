//! SQL query constants
//!
//! All SQL the record source runs against a snapshot database. External ids
//! come from `ir_model_data`, joined to the table that owns the record, so
//! the same `module.name` identity works across both snapshots regardless of
//! database ids.

/// Views: external id plus serialized markup.
pub const GET_VIEWS: &str = r#"
    SELECT ir_model_data.module || '.' || ir_model_data.name AS xml_id,
           ir_ui_view.arch
    FROM ir_model_data
    JOIN ir_ui_view ON res_id = ir_ui_view.id
    WHERE ir_model_data.model = 'ir.ui.view'
    ORDER BY xml_id
"#;

/// Menus: external id, database id (for tree resolution) and display name.
pub const GET_MENUS: &str = r#"
    SELECT ir_model_data.module || '.' || ir_model_data.name AS xml_id,
           res_id,
           ir_ui_menu.name
    FROM ir_model_data
    JOIN ir_ui_menu ON res_id = ir_ui_menu.id
    WHERE ir_model_data.model = 'ir.ui.menu'
    ORDER BY xml_id
"#;

/// The raw menu tree rows; ancestry is resolved in-process.
pub const GET_MENU_NODES: &str = r#"
    SELECT id, parent_id, name
    FROM ir_ui_menu
    ORDER BY id
"#;

/// Translations: the id is stable across snapshots and is the identity key.
pub const GET_TRANSLATIONS: &str = r#"
    SELECT id, name, COALESCE(module, '') AS module, COALESCE(value, '') AS value
    FROM ir_translation
    WHERE type = 'model'
    ORDER BY id
"#;

/// Field definitions: identity is the composite (model, name).
pub const GET_FIELDS: &str = r#"
    SELECT model, name,
           COALESCE(field_description, '') AS description,
           ttype AS type
    FROM ir_model_fields
    ORDER BY model, name
"#;
