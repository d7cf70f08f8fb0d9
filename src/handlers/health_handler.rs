use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ready once every store setting is present. Missing settings are listed.
#[get("/health/ready")]
async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let missing = state.config.missing_store_settings();
    let ready = missing.is_empty();

    let response = serde_json::json!({
        "status": if ready { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "content_store": if ready { "configured" } else { "incomplete" }
        },
        "missing_settings": missing,
    });

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[get("/health/live")]
async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    use crate::config::Config;

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_ready_lists_missing_settings() {
        let mut config = Config::test_config();
        config.quizzes_database_id = None;
        let state = AppState::new(config).expect("state should build");

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(health_check_ready),
        )
        .await;

        let req = test::TestRequest::get().uri("/health/ready").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["missing_settings"][0], "NOTION_DATABASE_ID_QUIZZES");
    }
}
