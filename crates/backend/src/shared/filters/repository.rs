use anyhow::Result;
use contracts::shared::filter::{Combinator, SavedFilter, SavedFilterSummary, SerializedQuery};
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, FromQueryResult, Statement, Value,
};

/// Create the saved filters table if missing
pub async fn ensure_table(db: &DatabaseConnection) -> Result<()> {
    let sql = r#"
        CREATE TABLE IF NOT EXISTS sys_saved_filters (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            entity TEXT NOT NULL,
            query_json TEXT NOT NULL,
            combinator TEXT NOT NULL DEFAULT 'AND',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
    "#;
    db.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
        .await?;

    let index = "CREATE INDEX IF NOT EXISTS idx_sys_saved_filters_entity ON sys_saved_filters (entity);";
    db.execute(Statement::from_string(DatabaseBackend::Sqlite, index.to_string()))
        .await?;

    Ok(())
}

/// Insert a saved filter
pub async fn insert(db: &DatabaseConnection, filter: &SavedFilter) -> Result<()> {
    let sql = r#"
        INSERT INTO sys_saved_filters (id, name, entity, query_json, combinator, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
    "#;

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        sql,
        vec![
            filter.id.clone().into(),
            filter.name.clone().into(),
            filter.entity.clone().into(),
            serde_json::to_string(&filter.query)?.into(),
            filter.combinator.to_sql().into(),
            filter.created_at.clone().into(),
            filter.updated_at.clone().into(),
        ],
    );

    db.execute(stmt).await?;
    Ok(())
}

/// Update name and conditions; returns false if the id is unknown
pub async fn update(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
    query: &SerializedQuery,
    combinator: Combinator,
    updated_at: &str,
) -> Result<bool> {
    let sql = r#"
        UPDATE sys_saved_filters
        SET name = ?, query_json = ?, combinator = ?, updated_at = ?
        WHERE id = ?
    "#;

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        sql,
        vec![
            name.into(),
            serde_json::to_string(query)?.into(),
            combinator.to_sql().into(),
            updated_at.into(),
            id.into(),
        ],
    );

    let result = db.execute(stmt).await?;
    Ok(result.rows_affected() > 0)
}

/// Get a saved filter by id
pub async fn find(db: &DatabaseConnection, id: &str) -> Result<Option<SavedFilter>> {
    let sql = r#"
        SELECT id, name, entity, query_json, combinator, created_at, updated_at
        FROM sys_saved_filters
        WHERE id = ?
    "#;

    let stmt = Statement::from_sql_and_values(DatabaseBackend::Sqlite, sql, vec![id.into()]);

    match SavedFilterRow::find_by_statement(stmt).one(db).await? {
        Some(row) => Ok(Some(row.try_into()?)),
        None => Ok(None),
    }
}

/// List saved filters, newest first, optionally for one entity
pub async fn list(db: &DatabaseConnection, entity: Option<&str>) -> Result<Vec<SavedFilterSummary>> {
    let (sql, params): (&str, Vec<Value>) = if let Some(entity) = entity {
        (
            r#"
                SELECT id, name, entity, created_at, updated_at
                FROM sys_saved_filters
                WHERE entity = ?
                ORDER BY updated_at DESC
            "#,
            vec![entity.into()],
        )
    } else {
        (
            r#"
                SELECT id, name, entity, created_at, updated_at
                FROM sys_saved_filters
                ORDER BY updated_at DESC
            "#,
            vec![],
        )
    };

    let stmt = Statement::from_sql_and_values(DatabaseBackend::Sqlite, sql, params);
    let rows = SavedFilterSummaryRow::find_by_statement(stmt).all(db).await?;

    Ok(rows
        .into_iter()
        .map(|row| SavedFilterSummary {
            id: row.id,
            name: row.name,
            entity: row.entity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
        .collect())
}

/// Delete a saved filter; returns false if the id is unknown
pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "DELETE FROM sys_saved_filters WHERE id = ?",
        vec![id.into()],
    );

    let result = db.execute(stmt).await?;
    Ok(result.rows_affected() > 0)
}

#[derive(Debug, Clone, FromQueryResult)]
struct SavedFilterRow {
    id: String,
    name: String,
    entity: String,
    query_json: String,
    combinator: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<SavedFilterRow> for SavedFilter {
    type Error = anyhow::Error;

    fn try_from(row: SavedFilterRow) -> Result<Self> {
        Ok(SavedFilter {
            query: serde_json::from_str(&row.query_json)?,
            combinator: Combinator::parse(&row.combinator).unwrap_or_default(),
            id: row.id,
            name: row.name,
            entity: row.entity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, FromQueryResult)]
struct SavedFilterSummaryRow {
    id: String,
    name: String,
    entity: String,
    created_at: String,
    updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::memory_connection;

    fn sample(id: &str, entity: &str, updated_at: &str) -> SavedFilter {
        SavedFilter {
            id: id.to_string(),
            name: format!("Filter {}", id),
            entity: entity.to_string(),
            query: [("status.statusName", "eq:Active"), ("priority", "in:High,Critical")]
                .into_iter()
                .collect(),
            combinator: Combinator::Or,
            created_at: updated_at.to_string(),
            updated_at: updated_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = memory_connection().await.unwrap();
        insert(&db, &sample("f1", "task", "2025-01-01T00:00:00Z")).await.unwrap();

        let found = find(&db, "f1").await.unwrap().unwrap();
        assert_eq!(found.name, "Filter f1");
        assert_eq!(found.combinator, Combinator::Or);
        assert_eq!(
            found.query.keys().collect::<Vec<_>>(),
            vec!["status.statusName", "priority"]
        );

        assert!(find(&db, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_entity_newest_first() {
        let db = memory_connection().await.unwrap();
        insert(&db, &sample("a", "task", "2025-01-01T00:00:00Z")).await.unwrap();
        insert(&db, &sample("b", "task", "2025-02-01T00:00:00Z")).await.unwrap();
        insert(&db, &sample("c", "deal", "2025-03-01T00:00:00Z")).await.unwrap();

        let tasks: Vec<_> = list(&db, Some("task")).await.unwrap().into_iter().map(|f| f.id).collect();
        assert_eq!(tasks, vec!["b", "a"]);
        assert_eq!(list(&db, None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = memory_connection().await.unwrap();
        insert(&db, &sample("f1", "task", "2025-01-01T00:00:00Z")).await.unwrap();

        let query: SerializedQuery = [("tags", "nin:archived")].into_iter().collect();
        let updated = update(&db, "f1", "Renamed", &query, Combinator::And, "2025-01-02T00:00:00Z")
            .await
            .unwrap();
        assert!(updated);

        let found = find(&db, "f1").await.unwrap().unwrap();
        assert_eq!(found.name, "Renamed");
        assert_eq!(found.query, query);
        assert_eq!(found.combinator, Combinator::And);

        assert!(!update(&db, "nope", "x", &query, Combinator::And, "t").await.unwrap());
        assert!(delete(&db, "f1").await.unwrap());
        assert!(!delete(&db, "f1").await.unwrap());
    }
}
