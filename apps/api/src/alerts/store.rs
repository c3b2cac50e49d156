use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::alert::{AlertChanges, AlertFrequency, AlertKind, AlertRow, NewAlert};

pub async fn insert_alert(pool: &PgPool, alert: &NewAlert) -> Result<AlertRow, sqlx::Error> {
    sqlx::query_as::<_, AlertRow>(
        r#"
        INSERT INTO alerts (owner_id, kind, title, criteria, frequency)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(alert.owner_id)
    .bind(alert.kind.as_str())
    .bind(&alert.title)
    .bind(Json(&alert.criteria))
    .bind(alert.frequency.as_str())
    .fetch_one(pool)
    .await
}

pub async fn find_alert(pool: &PgPool, id: Uuid) -> Result<Option<AlertRow>, sqlx::Error> {
    sqlx::query_as::<_, AlertRow>("SELECT * FROM alerts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Active alerts of one owner, newest first.
pub async fn list_alerts(
    pool: &PgPool,
    owner_id: Uuid,
    kind: Option<AlertKind>,
) -> Result<Vec<AlertRow>, sqlx::Error> {
    sqlx::query_as::<_, AlertRow>(
        r#"
        SELECT * FROM alerts
        WHERE owner_id = $1
          AND is_active
          AND ($2::text IS NULL OR kind = $2)
        ORDER BY created_at DESC
        "#,
    )
    .bind(owner_id)
    .bind(kind.map(AlertKind::as_str))
    .fetch_all(pool)
    .await
}

/// Counts every alert of `kind` the owner holds, active or paused.
pub async fn count_alerts(
    pool: &PgPool,
    owner_id: Uuid,
    kind: AlertKind,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM alerts WHERE owner_id = $1 AND kind = $2")
        .bind(owner_id)
        .bind(kind.as_str())
        .fetch_one(pool)
        .await
}

pub async fn update_alert(
    pool: &PgPool,
    id: Uuid,
    changes: &AlertChanges,
) -> Result<AlertRow, sqlx::Error> {
    sqlx::query_as::<_, AlertRow>(
        r#"
        UPDATE alerts SET
            title      = COALESCE($2, title),
            criteria   = COALESCE($3, criteria),
            frequency  = COALESCE($4, frequency),
            is_active  = COALESCE($5, is_active),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(changes.title.as_deref())
    .bind(changes.criteria.as_ref().map(Json))
    .bind(changes.frequency.map(AlertFrequency::as_str))
    .bind(changes.is_active)
    .fetch_one(pool)
    .await
}

/// Returns false when no row was deleted.
pub async fn delete_alert(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM alerts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Alerts that must be evaluated the moment a matching event arrives.
pub async fn list_instant_alerts(
    pool: &PgPool,
    kind: AlertKind,
) -> Result<Vec<AlertRow>, sqlx::Error> {
    sqlx::query_as::<_, AlertRow>(
        r#"
        SELECT * FROM alerts
        WHERE kind = $1 AND is_active AND frequency = 'Instant'
        ORDER BY created_at ASC
        "#,
    )
    .bind(kind.as_str())
    .fetch_all(pool)
    .await
}

/// Bumps match statistics after a notification went out.
pub async fn record_match(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE alerts SET
            matching_count = matching_count + 1,
            emails_sent    = emails_sent + 1,
            last_match_at  = now()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}
