use std::collections::BTreeMap;

use sqlx::PgPool;

use crate::core::database::{violation, Violation};
use crate::core::error::{AppError, Result};
use crate::core::settings::EvalLevelSetting;
use crate::features::evaluations::dtos::CreateEvaluationLevelDto;
use crate::features::evaluations::models::EvaluationLevel;

pub struct EvaluationService {
    pool: PgPool,
}

impl EvaluationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<EvaluationLevel>> {
        sqlx::query_as::<_, EvaluationLevel>(
            r#"
            SELECT short_name, full_name, color
            FROM evaluation_levels
            ORDER BY short_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list evaluation levels: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn create(&self, dto: CreateEvaluationLevelDto) -> Result<EvaluationLevel> {
        let level = sqlx::query_as::<_, EvaluationLevel>(
            r#"
            INSERT INTO evaluation_levels (short_name, full_name, color)
            VALUES ($1, $2, $3)
            RETURNING short_name, full_name, color
            "#,
        )
        .bind(dto.short_name.trim())
        .bind(dto.full_name.trim())
        .bind(dto.color.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violation(&e) {
            Some(Violation::Unique) => AppError::Conflict(format!(
                "An evaluation level with code '{}', name '{}' or color '{}' already exists",
                dto.short_name, dto.full_name, dto.color
            )),
            _ => {
                tracing::error!("Failed to create evaluation level: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!("Evaluation level created: {}", level.short_name);
        Ok(level)
    }

    /// Delete a level; refused while reports still use it
    pub async fn delete(&self, short_name: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM evaluation_levels WHERE short_name = $1")
            .bind(short_name)
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::ForeignKey) => AppError::Conflict(format!(
                    "Evaluation level '{}' is in use and cannot be deleted",
                    short_name
                )),
                _ => {
                    tracing::error!("Failed to delete evaluation level: {:?}", e);
                    AppError::Database(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Evaluation level '{}' not found",
                short_name
            )));
        }

        tracing::info!("Evaluation level deleted: {}", short_name);
        Ok(())
    }

    /// Insert the configured levels that are not in the database yet.
    ///
    /// Existing rows are left untouched. A level whose name or color is taken
    /// by another row is skipped with a warning.
    pub async fn ensure_levels(&self, levels: &[EvalLevelSetting]) -> Result<u64> {
        let mut inserted = 0;
        for level in levels {
            let result = sqlx::query(
                r#"
                INSERT INTO evaluation_levels (short_name, full_name, color)
                VALUES ($1, $2, $3)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(&level.db)
            .bind(&level.display)
            .bind(&level.marker_color)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to ensure evaluation level {}: {:?}", level.db, e);
                AppError::Database(e)
            })?;
            if result.rows_affected() == 0 && !self.exists(&level.db).await? {
                tracing::warn!(
                    "Evaluation level '{}' not inserted: name '{}' or color '{}' is already used",
                    level.db,
                    level.display,
                    level.marker_color
                );
            }
            inserted += result.rows_affected();
        }

        if inserted > 0 {
            tracing::info!("Inserted {} configured evaluation levels", inserted);
        }
        Ok(inserted)
    }

    async fn exists(&self, short_name: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM evaluation_levels WHERE short_name = $1)")
            .bind(short_name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up evaluation level {}: {:?}", short_name, e);
                AppError::Database(e)
            })
    }
}

/// Marker color per evaluation code, plus a `default` entry
pub fn color_map(levels: &[EvaluationLevel], default_color: &str) -> BTreeMap<String, String> {
    let mut colors: BTreeMap<String, String> = levels
        .iter()
        .map(|level| (level.short_name.clone(), level.color.clone()))
        .collect();
    colors.insert("default".to_string(), default_color.to_string());
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_map_has_default() {
        let levels = vec![
            EvaluationLevel {
                short_name: "NEG".to_string(),
                full_name: "Negativa".to_string(),
                color: "red".to_string(),
            },
            EvaluationLevel {
                short_name: "POS".to_string(),
                full_name: "Positiva".to_string(),
                color: "green".to_string(),
            },
        ];
        let colors = color_map(&levels, "gray");
        assert_eq!(colors.len(), 3);
        assert_eq!(colors["NEG"], "red");
        assert_eq!(colors["default"], "gray");
    }

    #[test]
    fn test_color_map_without_levels() {
        let colors = color_map(&[], "#777");
        assert_eq!(colors.len(), 1);
        assert_eq!(colors["default"], "#777");
    }

    #[sqlx::test(migrator = "crate::core::database::MIGRATOR")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_ensure_levels_is_idempotent_and_skips_clashes(pool: sqlx::PgPool) {
        let service = EvaluationService::new(pool);
        let levels = vec![
            EvalLevelSetting {
                db: "TOP".to_string(),
                display: "Ottima".to_string(),
                marker_color: "blue".to_string(),
            },
            // Color already taken by the default 'NEG' level
            EvalLevelSetting {
                db: "BAD".to_string(),
                display: "Pessima".to_string(),
                marker_color: "red".to_string(),
            },
        ];

        assert_eq!(service.ensure_levels(&levels).await.unwrap(), 1);
        assert_eq!(service.ensure_levels(&levels).await.unwrap(), 0);

        let codes: Vec<String> = service.list().await.unwrap().into_iter().map(|l| l.short_name).collect();
        assert!(codes.contains(&"TOP".to_string()));
        assert!(!codes.contains(&"BAD".to_string()));
    }
}
