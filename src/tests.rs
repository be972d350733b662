#[cfg(test)]
mod integration_tests {
    use crate::test_utils::test_utils::{init_test_tracing, setup_test_app, setup_test_db};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::http::{header, StatusCode};
    use axum_test::TestServer;
    use calamine::{open_workbook_from_rs, Reader, Xlsx};
    use serde_json::{json, Value};
    use std::io::Cursor;

    async fn test_server() -> TestServer {
        let app = setup_test_app().await;
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_root_banner() {
        let server = test_server().await;

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        response.assert_text("Backend funcionando correctamente 🚀");
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = test_server().await;

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_default_categories_seeded() {
        let server = test_server().await;

        let response = server.get("/categories").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["Transporte", "Comida", "Compras", "Entretenimiento", "Servicios", "Salud", "Otros"]
        );
        assert_eq!(body[0]["id"], 1);
        assert_eq!(body[0]["color"], "#3498db");
        assert_eq!(body[6]["id"], 7);
    }

    #[tokio::test]
    async fn test_default_rules_seeded() {
        let server = test_server().await;

        let response = server.get("/rules").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body.as_array().unwrap().len(), 39);
        assert_eq!(body[0], json!({"id": 1, "containsText": "uber", "categoryId": 1}));
    }

    #[tokio::test]
    async fn test_create_expense_first_matching_rule_wins() {
        let server = test_server().await;

        // "uber" (Transporte) is scanned before "comida" (Comida)
        let response = server
            .post("/expenses")
            .json(&json!({"description": "Uber to comida place", "amount": 12.5, "date": "2024-03-01"}))
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["categoryId"], 1);
        assert_eq!(body["description"], "Uber to comida place");
        assert_eq!(body["amount"], 12.5);
        assert!(body["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_create_expense_explicit_category_overrides_rules() {
        let server = test_server().await;

        let response = server
            .post("/expenses")
            .json(&json!({"description": "Uber", "amount": 3, "date": "2024-03-01", "categoryId": 7}))
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["categoryId"], 7);
    }

    #[tokio::test]
    async fn test_create_expense_without_match_is_uncategorized() {
        let server = test_server().await;

        let response = server
            .post("/expenses")
            .json(&json!({"description": "Regalo cumpleaños", "amount": 20, "date": "2024-03-01"}))
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["categoryId"], Value::Null);
    }

    #[tokio::test]
    async fn test_create_expense_with_unknown_category() {
        let server = test_server().await;

        let response = server
            .post("/expenses")
            .json(&json!({"description": "Algo", "amount": 1, "date": "2024-03-01", "categoryId": 99}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Categoría no encontrada: 99");
    }

    #[tokio::test]
    async fn test_list_expenses_with_buckets() {
        let server = test_server().await;
        server
            .post("/expenses")
            .json(&json!({"description": "Taxi", "amount": 10, "date": "2024-03-02"}))
            .await
            .assert_status(StatusCode::OK);
        server
            .post("/expenses")
            .json(&json!({"description": "Regalo", "amount": 5, "date": "2024-03-01"}))
            .await
            .assert_status(StatusCode::OK);

        let response = server.get("/expenses").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["total"], 15.0);
        assert_eq!(body["expenses"][0]["description"], "Taxi");
        assert_eq!(body["expenses"][0]["categoryName"], "Transporte");
        assert_eq!(body["expenses"][1]["categoryName"], "Sin categorizar");
        assert_eq!(body["expenses"][1]["categoryColor"], "#cccccc");

        let categories = body["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0]["id"], 1);
        assert_eq!(categories[0]["total"], 10.0);
        assert_eq!(categories[1]["id"], "sin-categoria");
        assert_eq!(categories[1]["name"], "Sin categorizar");
        assert_eq!(categories[1]["total"], 5.0);
        assert_eq!(categories[1]["expenses"][0]["description"], "Regalo");
    }

    #[tokio::test]
    async fn test_delete_expense() {
        let server = test_server().await;
        let created: Value = server
            .post("/expenses")
            .json(&json!({"description": "Cine", "amount": 8, "date": "2024-03-01"}))
            .await
            .json();

        let response = server
            .delete(&format!("/expenses/{}", created["id"]))
            .await;

        response.assert_status(StatusCode::OK);
        response.assert_json(&json!({"message": "Gasto eliminado correctamente"}));
        let list: Value = server.get("/expenses").await.json();
        assert!(list["expenses"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_expense_reports_success() {
        let server = test_server().await;

        let response = server.delete("/expenses/9999").await;

        response.assert_status(StatusCode::OK);
        response.assert_json(&json!({"message": "Gasto eliminado correctamente"}));
    }

    #[tokio::test]
    async fn test_create_category_and_rule() {
        let server = test_server().await;

        let category = server
            .post("/categories")
            .json(&json!({"name": "Viajes", "color": "#123456"}))
            .await;
        category.assert_status(StatusCode::OK);
        let category: Value = category.json();
        assert_eq!(category["id"], 8);

        let rule = server
            .post("/rules")
            .json(&json!({"containsText": "Vuelo", "categoryId": 8}))
            .await;
        rule.assert_status(StatusCode::OK);
        let rule: Value = rule.json();
        assert_eq!(rule["containsText"], "Vuelo");
        assert_eq!(rule["categoryId"], 8);

        // New rule matches case-insensitively
        let expense: Value = server
            .post("/expenses")
            .json(&json!({"description": "VUELO a Lima", "amount": 300, "date": "2024-05-01"}))
            .await
            .json();
        assert_eq!(expense["categoryId"], 8);
    }

    #[tokio::test]
    async fn test_create_rule_for_unknown_category() {
        let server = test_server().await;

        let response = server
            .post("/rules")
            .json(&json!({"containsText": "algo", "categoryId": 42}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Categoría no encontrada: 42");
    }

    #[tokio::test]
    async fn test_income_lifecycle() {
        let server = test_server().await;

        let created = server
            .post("/api/income")
            .json(&json!({"description": "Nómina", "amount": 1500, "date": "2024-03-01"}))
            .await;
        created.assert_status(StatusCode::CREATED);
        let created: Value = created.json();
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["description"], "Nómina");
        assert!(created["createdAt"].is_string());

        let updated = server
            .put(&format!("/api/income/{}", id))
            .json(&json!({"description": "Nómina marzo", "amount": 1600, "date": "2024-03-31"}))
            .await;
        updated.assert_status(StatusCode::OK);
        let updated: Value = updated.json();
        assert_eq!(updated["description"], "Nómina marzo");
        assert_eq!(updated["amount"], 1600.0);
        assert_eq!(updated["createdAt"], created["createdAt"]);

        let deleted = server.delete(&format!("/api/income/{}", id)).await;
        deleted.assert_status(StatusCode::OK);
        deleted.assert_json(&json!({"message": "Ingreso eliminado correctamente"}));

        let list: Value = server.get("/api/income").await.json();
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_income_listed_newest_first() {
        let server = test_server().await;
        for (description, date) in [("Enero", "2024-01-15"), ("Marzo", "2024-03-15"), ("Febrero", "2024-02-15")] {
            server
                .post("/api/income")
                .json(&json!({"description": description, "amount": 100, "date": date}))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let list: Value = server.get("/api/income").await.json();

        let order: Vec<&str> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["description"].as_str().unwrap())
            .collect();
        assert_eq!(order, vec!["Marzo", "Febrero", "Enero"]);
    }

    #[tokio::test]
    async fn test_delete_nonexistent_income() {
        let server = test_server().await;

        let response = server.delete("/api/income/9999").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"error": "Ingreso no encontrado"}));
    }

    #[tokio::test]
    async fn test_update_nonexistent_income() {
        let server = test_server().await;

        let response = server
            .put("/api/income/9999")
            .json(&json!({"description": "x", "amount": 1, "date": "2024-01-01"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"error": "Ingreso no encontrado"}));
    }

    #[tokio::test]
    async fn test_balance() {
        let server = test_server().await;

        let empty: Value = server.get("/api/balance").await.json();
        assert_eq!(empty, json!({"totalIncome": 0.0, "totalExpenses": 0.0, "balance": 0.0}));

        server
            .post("/api/income")
            .json(&json!({"description": "Nómina", "amount": 1000, "date": "2024-03-01"}))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/expenses")
            .json(&json!({"description": "Farmacia", "amount": 250.5, "date": "2024-03-02"}))
            .await
            .assert_status(StatusCode::OK);

        let response = server.get("/api/balance").await;

        response.assert_status(StatusCode::OK);
        response.assert_json(&json!({"totalIncome": 1000.0, "totalExpenses": 250.5, "balance": 749.5}));
    }

    #[tokio::test]
    async fn test_export_excel() {
        let server = test_server().await;
        server
            .post("/expenses")
            .json(&json!({"description": "Supermercado", "amount": 42, "date": "2024-03-02"}))
            .await
            .assert_status(StatusCode::OK);

        let response = server.get("/export/excel").await;

        response.assert_status(StatusCode::OK);
        assert_eq!(
            response.header(header::CONTENT_TYPE),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(
            response.header(header::CONTENT_DISPOSITION),
            "attachment; filename=gastos.xlsx"
        );

        let bytes = response.as_bytes().to_vec();
        let workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Resumen", "Gastos", "Ingresos"]);
    }

    #[tokio::test]
    async fn test_unknown_path_returns_json_404() {
        let server = test_server().await;

        let response = server.get("/api/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({"error": "Endpoint no encontrado"}));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let server = test_server().await;

        let response = server
            .post("/expenses")
            .content_type("application/json")
            .bytes("{not json".into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let server = test_server().await;

        let response = server.delete("/api/income/abc").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_openapi_document_lists_routes() {
        let server = test_server().await;

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        for path in ["/expenses", "/expenses/{id}", "/api/income/{id}", "/api/balance", "/export/excel"] {
            assert!(body["paths"].get(path).is_some(), "missing {}", path);
        }
    }

    #[tokio::test]
    async fn test_unseeded_database_starts_empty() {
        let _tracing = init_test_tracing();
        let db = setup_test_db().await;
        let server = TestServer::new(create_router(AppState { db })).unwrap();

        let categories: Value = server.get("/categories").await.json();
        let expenses: Value = server.get("/expenses").await.json();

        assert!(categories.as_array().unwrap().is_empty());
        assert_eq!(expenses, json!({"expenses": [], "total": 0.0, "categories": []}));
    }
}
