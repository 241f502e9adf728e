//! PostgreSQL post backend.

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, ColumnDef, Expr, Query, SimpleExpr, Table};
use sea_orm::{ConnectionTrait, DbConn, DbErr, FromQueryResult, Statement, StatementBuilder};

use blog_core::domain::{FieldAssignment, Post};
use blog_core::error::RepoError;
use blog_core::ports::PostBackend;

use super::entity::post::{self, COLUMNS, column_name};

/// PostgreSQL backend storing one collection of posts as one table.
///
/// The table name is injected, so several isolated collections (one per test,
/// say) can share a database.
#[derive(Clone)]
pub struct PostgresPostBackend {
    pub(crate) db: DbConn,
    collection: String,
}

impl PostgresPostBackend {
    pub fn new(db: DbConn, collection: impl Into<String>) -> Self {
        Self {
            db,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Create the collection table if it does not exist yet.
    pub async fn ensure_collection(&self) -> Result<(), RepoError> {
        let stmt = Table::create()
            .table(self.table())
            .if_not_exists()
            .col(
                ColumnDef::new(Alias::new("id"))
                    .string()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(Alias::new("title")).string().not_null())
            .col(ColumnDef::new(Alias::new("date")).string().not_null())
            .col(
                ColumnDef::new(Alias::new("link"))
                    .string()
                    .not_null()
                    .default(""),
            )
            .col(
                ColumnDef::new(Alias::new("comment"))
                    .text()
                    .not_null()
                    .default(""),
            )
            .to_owned();

        self.db.execute(self.build(&stmt)).await.map_err(map_db_err)?;
        tracing::info!(collection = %self.collection, "Collection ready");
        Ok(())
    }

    /// Delete every post in the collection.
    pub async fn truncate(&self) -> Result<u64, RepoError> {
        let stmt = Query::delete().from_table(self.table()).to_owned();

        let result = self.db.execute(self.build(&stmt)).await.map_err(map_db_err)?;
        tracing::debug!(
            collection = %self.collection,
            removed = result.rows_affected(),
            "Collection truncated"
        );
        Ok(result.rows_affected())
    }

    fn table(&self) -> Alias {
        Alias::new(self.collection.as_str())
    }

    fn build<S: StatementBuilder>(&self, stmt: &S) -> Statement {
        self.db.get_database_backend().build(stmt)
    }
}

#[async_trait]
impl PostBackend for PostgresPostBackend {
    async fn scan_all(&self) -> Result<Vec<Post>, RepoError> {
        let stmt = Query::select()
            .columns(COLUMNS.map(Alias::new))
            .from(self.table())
            .to_owned();

        let rows = post::Model::find_by_statement(self.build(&stmt))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let stmt = Query::select()
            .columns(COLUMNS.map(Alias::new))
            .from(self.table())
            .and_where(Expr::col(Alias::new("id")).eq(id))
            .limit(1)
            .to_owned();

        let row = post::Model::find_by_statement(self.build(&stmt))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }

    async fn insert_one(&self, post: Post) -> Result<(), RepoError> {
        let row = post::Model::from(post);
        let mut stmt = Query::insert();
        stmt.into_table(self.table())
            .columns(COLUMNS.map(Alias::new))
            .values([
                row.id.into(),
                row.title.into(),
                row.date.into(),
                row.link.into(),
                row.comment.into(),
            ])
            .map_err(|e| RepoError::Serialization(e.to_string()))?;

        self.db.execute(self.build(&stmt)).await.map_err(map_db_err)?;
        Ok(())
    }

    async fn set_fields(&self, id: &str, fields: &FieldAssignment) -> Result<u64, RepoError> {
        if fields.is_empty() {
            // An UPDATE without SET is not valid SQL.
            return Ok(0);
        }

        let values: Vec<(Alias, SimpleExpr)> = fields
            .iter()
            .map(|(field, value)| (Alias::new(column_name(field)), value.to_owned().into()))
            .collect();

        let stmt = Query::update()
            .table(self.table())
            .values(values)
            .and_where(Expr::col(Alias::new("id")).eq(id))
            .to_owned();

        let result = self.db.execute(self.build(&stmt)).await.map_err(map_db_err)?;
        Ok(result.rows_affected())
    }

    async fn delete_one(&self, id: &str) -> Result<u64, RepoError> {
        let stmt = Query::delete()
            .from_table(self.table())
            .and_where(Expr::col(Alias::new("id")).eq(id))
            .to_owned();

        let result = self.db.execute(self.build(&stmt)).await.map_err(map_db_err)?;
        Ok(result.rows_affected())
    }
}

fn map_db_err(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
        DbErr::Json(_) | DbErr::Type(_) => RepoError::Serialization(e.to_string()),
        _ => {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Post already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}
