use axum::{
    routing::{get, post},
    Router,
};

use crate::features::entities::handlers::{self, EntityPagesState};

/// Report pages, relative to the mount prefix.
///
/// Publish and unpublish only accept POST; other methods get 405.
pub fn routes(state: EntityPagesState) -> Router {
    Router::new()
        .route("/entities/", get(handlers::list_entities))
        .route("/entities/{id}/", get(handlers::get_entity))
        .route("/entities/{id}/publish/", post(handlers::publish_entity))
        .route("/entities/{id}/unpublish/", post(handlers::unpublish_entity))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{header, StatusCode};
    use axum_test::TestServer;

    use super::*;
    use crate::features::categories::CategoryService;
    use crate::features::entities::services::EntityService;
    use crate::features::evaluations::EvaluationService;
    use crate::shared::test_helpers::{lazy_pool, test_site};

    fn test_state() -> EntityPagesState {
        let pool = lazy_pool();
        EntityPagesState {
            entities: Arc::new(EntityService::new(pool.clone())),
            categories: Arc::new(CategoryService::new(pool.clone())),
            evaluations: Arc::new(EvaluationService::new(pool)),
            site: Arc::new(test_site()),
        }
    }

    #[tokio::test]
    async fn test_publish_requires_post() {
        let server = TestServer::new(routes(test_state())).unwrap();
        let response = server.get("/entities/1/publish/").await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);

        let response = server.get("/entities/1/unpublish/").await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_anonymous_publish_redirects_to_login() {
        let server = TestServer::new(routes(test_state())).unwrap();
        let response = server.post("/entities/4/publish/").await;
        response.assert_status(StatusCode::FOUND);
        assert_eq!(
            response.header(header::LOCATION),
            "/accounts/login/?next=/entities/4/publish/"
        );
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_not_found() {
        let server = TestServer::new(routes(test_state())).unwrap();
        let response = server.get("/entities/abc/").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    mod db {
        use sqlx::PgPool;

        use super::*;
        use crate::shared::test_helpers::with_user_auth;

        fn state(pool: PgPool) -> EntityPagesState {
            EntityPagesState {
                entities: Arc::new(EntityService::new(pool.clone())),
                categories: Arc::new(CategoryService::new(pool.clone())),
                evaluations: Arc::new(EvaluationService::new(pool)),
                site: Arc::new(test_site()),
            }
        }

        async fn draft(pool: &PgPool) -> i64 {
            sqlx::query_scalar(
                "WITH c AS (INSERT INTO categories (name, slug) VALUES ('test', 'test') RETURNING id) \
                 INSERT INTO entities (category_id, title) SELECT id, 'Bar Bozza' FROM c RETURNING id",
            )
            .fetch_one(pool)
            .await
            .unwrap()
        }

        async fn is_published(pool: &PgPool, id: i64) -> bool {
            sqlx::query_scalar("SELECT published FROM entities WHERE id = $1")
                .bind(id)
                .fetch_one(pool)
                .await
                .unwrap()
        }

        #[sqlx::test(migrator = "crate::core::database::MIGRATOR")]
        #[ignore = "requires a Postgres DATABASE_URL"]
        async fn test_publish_flow(pool: PgPool) {
            let id = draft(&pool).await;

            let anonymous = TestServer::new(routes(state(pool.clone()))).unwrap();
            anonymous.get(&format!("/entities/{}/", id)).await.assert_status_not_found();
            anonymous
                .post(&format!("/entities/{}/publish/", id))
                .await
                .assert_status(StatusCode::FOUND);
            assert!(!is_published(&pool, id).await);

            let editor = TestServer::new(with_user_auth(routes(state(pool.clone())))).unwrap();
            let response = editor.post(&format!("/entities/{}/publish/", id)).await;
            response.assert_status(StatusCode::FOUND);
            assert_eq!(response.header(header::LOCATION), format!("/entities/{}/", id));
            assert!(is_published(&pool, id).await);

            anonymous.get(&format!("/entities/{}/", id)).await.assert_status_ok();

            editor
                .post(&format!("/entities/{}/unpublish/", id))
                .await
                .assert_status(StatusCode::FOUND);
            assert!(!is_published(&pool, id).await);
        }

        #[sqlx::test(migrator = "crate::core::database::MIGRATOR")]
        #[ignore = "requires a Postgres DATABASE_URL"]
        async fn test_list_visibility_and_order(pool: PgPool) {
            let draft_id = draft(&pool).await;
            sqlx::query(
                "INSERT INTO entities (category_id, title, published) \
                 SELECT category_id, 'Bar Pubblicato', TRUE FROM entities WHERE id = $1",
            )
            .bind(draft_id)
            .execute(&pool)
            .await
            .unwrap();

            let anonymous = TestServer::new(routes(state(pool.clone()))).unwrap();
            let response = anonymous.get("/entities/").add_query_param("category", "test").await;
            response.assert_status_ok();
            let html = response.text();
            assert!(html.contains("Bar Pubblicato"));
            assert!(!html.contains("Bar Bozza"));

            let editor = TestServer::new(with_user_auth(routes(state(pool)))).unwrap();
            let response = editor.get("/entities/").add_query_param("category", "test").await;
            response.assert_status_ok();
            let html = response.text();
            let draft_at = html.find("Bar Bozza").unwrap();
            let published_at = html.find("Bar Pubblicato").unwrap();
            assert!(draft_at < published_at);
        }

        #[sqlx::test(migrator = "crate::core::database::MIGRATOR")]
        #[ignore = "requires a Postgres DATABASE_URL"]
        async fn test_publish_unknown_report_is_not_found(pool: PgPool) {
            let editor = TestServer::new(with_user_auth(routes(state(pool)))).unwrap();
            editor
                .post("/entities/999/publish/")
                .await
                .assert_status_not_found();
        }
    }
}
