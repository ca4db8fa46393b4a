use std::future::Future;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::entities::{SqliteStore, dao::DishRecord};

type DishRow = (String, String, String, String, bool, i64, String);

const DISH_COLUMNS: &str =
    "id, dish_id, dish_name, image_url, is_published, revision, created_at";

pub trait DishStore: Send + Sync + 'static {
    /// All records, newest `created_at` first.
    fn list_dishes(&self) -> impl Future<Output = Result<Vec<DishRecord>, sqlx::Error>> + Send;

    fn get_dish(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<DishRecord>, sqlx::Error>> + Send;

    /// Flip `is_published` and bump `revision` in one statement.
    ///
    /// Returns `None` without writing anything when `id` is unknown.
    fn toggle_published(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<DishRecord>, sqlx::Error>> + Send;

    /// Delete every record and insert `records`, atomically.
    fn replace_all(
        &self,
        records: &[DishRecord],
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    fn count_dishes(&self) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;
}

impl DishStore for SqliteStore {
    async fn list_dishes(&self) -> Result<Vec<DishRecord>, sqlx::Error> {
        let rows: Vec<DishRow> = sqlx::query_as(&format!(
            "SELECT {DISH_COLUMNS} FROM dishes ORDER BY created_at DESC, dish_id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(into_record).collect()
    }

    async fn get_dish(&self, id: Uuid) -> Result<Option<DishRecord>, sqlx::Error> {
        let row: Option<DishRow> =
            sqlx::query_as(&format!("SELECT {DISH_COLUMNS} FROM dishes WHERE id = ?1"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;
        row.map(into_record).transpose()
    }

    async fn toggle_published(&self, id: Uuid) -> Result<Option<DishRecord>, sqlx::Error> {
        let row: Option<DishRow> = sqlx::query_as(&format!(
            "UPDATE dishes SET is_published = NOT is_published, revision = revision + 1 \
             WHERE id = ?1 RETURNING {DISH_COLUMNS}"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.map(into_record).transpose()
    }

    async fn replace_all(&self, records: &[DishRecord]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM dishes").execute(&mut *tx).await?;
        for record in records {
            sqlx::query(
                "INSERT INTO dishes (id, dish_id, dish_name, image_url, is_published, revision, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(record.id.to_string())
            .bind(&record.dish_id)
            .bind(&record.dish_name)
            .bind(&record.image_url)
            .bind(record.is_published)
            .bind(record.revision)
            .bind(encode_timestamp(record.created_at))
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    async fn count_dishes(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dishes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Fixed-width UTC timestamps so that `ORDER BY created_at` on the text
/// column matches chronological order.
fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn into_record(row: DishRow) -> Result<DishRecord, sqlx::Error> {
    let (id, dish_id, dish_name, image_url, is_published, revision, created_at) = row;
    let id = id
        .parse::<Uuid>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    Ok(DishRecord {
        id,
        dish_id,
        dish_name,
        image_url,
        is_published,
        revision,
        created_at: created_at.parse().unwrap_or_else(|e: chrono::ParseError| {
            tracing::warn!(raw = %created_at, error = %e, "failed to parse dish created_at; using now");
            Utc::now()
        }),
    })
}
