//! Record source
//!
//! Fetches full, materialized record collections from one snapshot database.
//! Pure retrieval: no diff logic lives here. The connection pool is owned by
//! the source and every checkout is scoped, so connections are released on
//! all exit paths including fetch failures.

pub mod queries;

use crate::config::DatabaseConfig;
use crate::diff::MenuTree;
use crate::error::{malformed, AppError, Result};
use crate::records::{Family, Field, Menu, MenuNode, Translation, View};
use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use tokio_postgres::types::FromSql;
use tokio_postgres::{NoTls, Row};
use tracing::{debug, info};

/// One snapshot database's record collections.
///
/// Implementations must return stable, repeatable results within one
/// invocation; the engine materializes everything before comparing.
#[async_trait]
pub trait RecordSource {
    async fn fetch_views(&self) -> Result<Vec<View>>;
    async fn fetch_menus(&self) -> Result<Vec<Menu>>;
    async fn fetch_translations(&self) -> Result<Vec<Translation>>;
    async fn fetch_fields(&self) -> Result<Vec<Field>>;
    /// Materialize the whole menu tree for ancestor resolution.
    async fn fetch_menu_tree(&self) -> Result<MenuTree>;
}

/// Postgres-backed record source for one snapshot database.
pub struct PgRecordSource {
    pool: Pool,
    database: String,
}

impl PgRecordSource {
    /// Build a pool for the given snapshot database and verify it answers.
    pub async fn connect(config: &DatabaseConfig, database: &str) -> Result<Self> {
        let pool = Self::pool_config(config, database)
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| AppError::Config(format!("failed to create pool: {e}")))?;

        // Probe before any fetch so an unreachable snapshot fails fast.
        let client = pool.get().await?;
        client.query_one("SELECT 1", &[]).await?;
        drop(client);

        info!(database, "record source connected");
        Ok(Self {
            pool,
            database: database.to_string(),
        })
    }

    /// Translate the server coordinates into a deadpool configuration,
    /// including the configured pool cap.
    fn pool_config(config: &DatabaseConfig, database: &str) -> Config {
        let mut cfg = Config::new();
        cfg.host = Some(config.host.clone());
        cfg.port = Some(config.port);
        cfg.user = Some(config.user.clone());
        cfg.password = Some(config.password.clone());
        cfg.dbname = Some(database.to_string());
        cfg.pool = Some(PoolConfig::new(config.max_pool_size));
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        cfg
    }

    async fn query(&self, sql: &str) -> Result<Vec<Row>> {
        let client = self.pool.get().await?;
        let rows = client.query(sql, &[]).await?;
        Ok(rows)
    }
}

/// Pull one column out of a row, naming the family and column on failure.
///
/// A NULL or mistyped required column means the record cannot be identified
/// or compared, which is fatal for its family.
fn col<'r, T: FromSql<'r>>(row: &'r Row, family: Family, name: &str) -> Result<T> {
    row.try_get(name)
        .map_err(|e| malformed(family, format!("column {name}: {e}")))
}

#[async_trait]
impl RecordSource for PgRecordSource {
    async fn fetch_views(&self) -> Result<Vec<View>> {
        let rows = self.query(queries::GET_VIEWS).await?;
        let views = rows
            .iter()
            .map(|row| {
                Ok(View {
                    xml_id: col(row, Family::Views, "xml_id")?,
                    arch: col(row, Family::Views, "arch")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(database = %self.database, count = views.len(), "fetched views");
        Ok(views)
    }

    async fn fetch_menus(&self) -> Result<Vec<Menu>> {
        let rows = self.query(queries::GET_MENUS).await?;
        let menus = rows
            .iter()
            .map(|row| {
                Ok(Menu {
                    xml_id: col(row, Family::Menus, "xml_id")?,
                    res_id: col(row, Family::Menus, "res_id")?,
                    name: col(row, Family::Menus, "name")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(database = %self.database, count = menus.len(), "fetched menus");
        Ok(menus)
    }

    async fn fetch_translations(&self) -> Result<Vec<Translation>> {
        let rows = self.query(queries::GET_TRANSLATIONS).await?;
        let translations = rows
            .iter()
            .map(|row| {
                Ok(Translation {
                    id: col(row, Family::Translations, "id")?,
                    name: col(row, Family::Translations, "name")?,
                    module: col(row, Family::Translations, "module")?,
                    value: col(row, Family::Translations, "value")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(database = %self.database, count = translations.len(), "fetched translations");
        Ok(translations)
    }

    async fn fetch_fields(&self) -> Result<Vec<Field>> {
        let rows = self.query(queries::GET_FIELDS).await?;
        let fields = rows
            .iter()
            .map(|row| {
                Ok(Field {
                    model: col(row, Family::Fields, "model")?,
                    name: col(row, Family::Fields, "name")?,
                    description: col(row, Family::Fields, "description")?,
                    r#type: col(row, Family::Fields, "type")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(database = %self.database, count = fields.len(), "fetched fields");
        Ok(fields)
    }

    async fn fetch_menu_tree(&self) -> Result<MenuTree> {
        let rows = self.query(queries::GET_MENU_NODES).await?;
        let nodes = rows
            .iter()
            .map(|row| {
                Ok(MenuNode {
                    id: col(row, Family::Menus, "id")?,
                    parent_id: col(row, Family::Menus, "parent_id")?,
                    name: col(row, Family::Menus, "name")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(database = %self.database, count = nodes.len(), "fetched menu tree");
        Ok(MenuTree::from_nodes(nodes))
    }
}
