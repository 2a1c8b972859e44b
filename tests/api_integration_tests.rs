// API Integration Tests
//
// Purpose: Exercise every endpoint through the router without binding a socket
// Run with: cargo test --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use soil_analysis_rust::{create_router, ApiConfig, AppState};
    use tower::ServiceExt; // for oneshot

    // Helper: Create test app
    fn create_test_app() -> axum::Router {
        create_router(AppState::new(ApiConfig::default()))
    }

    fn create_test_app_with_batch_limit(max_batch_size: usize) -> axum::Router {
        create_router(AppState::new(ApiConfig {
            max_batch_size,
            ..ApiConfig::default()
        }))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Manual Analysis
    // =========================================================================

    #[tokio::test]
    async fn test_manual_analysis_numbers() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/soil-analysis/manual",
                json!({"ph": 6.5, "nitrogen": 180, "phosphorus": 25, "potassium": 150}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["soilType"], "Neutral Loamy Soil");
        assert_eq!(body["nitrogenLevel"], "Medium");
        assert_eq!(body["phosphorusLevel"], "Medium");
        assert_eq!(body["potassiumLevel"], "Medium");
        assert_eq!(body["fertilizerRecommendations"].as_array().unwrap().len(), 3);
        assert_eq!(body["suitableCrops"][0], "Rice");
    }

    #[tokio::test]
    async fn test_manual_analysis_form_strings() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/soil-analysis/manual",
                json!({"ph": "5.0", "nitrogen": "50", "phosphorus": "10", "potassium": "50"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["soilType"], "Acidic Sandy Soil");
        assert_eq!(body["phAmendment"]["amendment"], "lime");
        assert_eq!(body["phAmendment"]["kgPerAcre"], 300);
        assert_eq!(body["fertilizerRecommendations"][0], "Urea (46-0-0): 326 kg/acre");
    }

    #[tokio::test]
    async fn test_manual_invalid_number() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/soil-analysis/manual",
                json!({"ph": "abc", "nitrogen": 180, "phosphorus": 25, "potassium": 150}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_response(response).await;
        assert_eq!(body["code"], "invalid_number");
        assert_eq!(body["field"], "ph");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_manual_missing_field() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/soil-analysis/manual",
                json!({"ph": 6.5, "nitrogen": 180, "phosphorus": 25}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_response(response).await;
        assert_eq!(body["code"], "invalid_number");
        assert_eq!(body["field"], "potassium");
    }

    #[tokio::test]
    async fn test_manual_ph_out_of_range() {
        for ph in [2.9, 10.1] {
            let response = create_test_app()
                .oneshot(post_json(
                    "/api/soil-analysis/manual",
                    json!({"ph": ph, "nitrogen": 180, "phosphorus": 25, "potassium": 150}),
                ))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body = json_response(response).await;
            assert_eq!(body["code"], "ph_out_of_range");
        }
    }

    #[tokio::test]
    async fn test_manual_overflowing_number() {
        // 1e400 is valid JSON but has no finite f64 value
        for (field, body) in [
            ("ph", r#"{"ph": 1e400, "nitrogen": 180, "phosphorus": 25, "potassium": 150}"#),
            ("nitrogen", r#"{"ph": 6.5, "nitrogen": 1e400, "phosphorus": 25, "potassium": 150}"#),
            ("potassium", r#"{"ph": 6.5, "nitrogen": 180, "phosphorus": 25, "potassium": -1e400}"#),
        ] {
            let request = Request::builder()
                .method("POST")
                .uri("/api/soil-analysis/manual")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap();
            let response = create_test_app().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body = json_response(response).await;
            assert_eq!(body["code"], "invalid_number");
            assert_eq!(body["field"], field);
        }
    }

    #[tokio::test]
    async fn test_manual_non_numeric_json_value() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/soil-analysis/manual",
                json!({"ph": 6.5, "nitrogen": true, "phosphorus": 25, "potassium": 150}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_response(response).await;
        assert_eq!(body["code"], "invalid_number");
        assert_eq!(body["field"], "nitrogen");
    }

    #[tokio::test]
    async fn test_manual_malformed_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/soil-analysis/manual")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"ph": 6.5, "nitrogen": "#))
            .unwrap();
        let response = create_test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_response(response).await;
        assert_eq!(body["code"], "invalid_json");
        assert!(body.get("field").is_none());
    }

    // =========================================================================
    // Section 3: Batch Analysis
    // =========================================================================

    #[tokio::test]
    async fn test_batch_mixed_results() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/soil-analysis/batch",
                json!({"samples": [
                    {"ph": 6.5, "nitrogen": 180, "phosphorus": 25, "potassium": 150},
                    {"ph": 11, "nitrogen": 180, "phosphorus": 25, "potassium": 150},
                    {"ph": 8.8, "nitrogen": 250, "phosphorus": 40, "potassium": 220},
                ]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["count"], 3);
        assert_eq!(body["succeeded"], 2);
        assert_eq!(body["failed"], 1);

        let results = body["results"].as_array().unwrap();
        assert_eq!(results[0]["ok"], true);
        assert_eq!(results[0]["result"]["soilType"], "Neutral Loamy Soil");
        assert_eq!(results[1]["ok"], false);
        assert_eq!(results[1]["error"]["code"], "ph_out_of_range");
        assert!(results[1].get("result").is_none());
        assert_eq!(results[2]["result"]["soilType"], "Highly Alkaline Soil");
        assert!(results[2]["result"]["fertilizerRecommendations"]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_batch_overflowing_number_isolated() {
        let body = r#"{"samples": [
            {"ph": 6.5, "nitrogen": 1e400, "phosphorus": 25, "potassium": 150},
            {"ph": 6.5, "nitrogen": 180, "phosphorus": 25, "potassium": 150}
        ]}"#;
        let request = Request::builder()
            .method("POST")
            .uri("/api/soil-analysis/batch")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = create_test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["succeeded"], 1);
        assert_eq!(body["results"][0]["error"]["code"], "invalid_number");
        assert_eq!(body["results"][0]["error"]["field"], "nitrogen");
        assert_eq!(body["results"][1]["ok"], true);
    }

    #[tokio::test]
    async fn test_batch_empty() {
        let response = create_test_app()
            .oneshot(post_json("/api/soil-analysis/batch", json!({"samples": []})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["count"], 0);
        assert!(body["results"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_too_large() {
        let sample = json!({"ph": 6.5, "nitrogen": 180, "phosphorus": 25, "potassium": 150});
        let response = create_test_app_with_batch_limit(2)
            .oneshot(post_json(
                "/api/soil-analysis/batch",
                json!({"samples": [sample.clone(), sample.clone(), sample]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = json_response(response).await;
        assert_eq!(body["code"], "batch_too_large");
    }

    // =========================================================================
    // Section 4: Markdown Report
    // =========================================================================

    #[tokio::test]
    async fn test_report_markdown() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/soil-analysis/report",
                json!({"ph": 8.8, "nitrogen": 250, "phosphorus": 40, "potassium": 220}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/markdown; charset=utf-8"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("# Highly Alkaline Soil"));
        assert!(text.contains("Add 90 kg/acre of elemental sulfur to lower pH"));
    }

    #[tokio::test]
    async fn test_report_rejects_invalid() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/soil-analysis/report",
                json!({"ph": "", "nitrogen": 250, "phosphorus": 40, "potassium": 220}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
