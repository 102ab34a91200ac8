#[cfg(test)]
mod integration_tests {
    use crate::budget::NewBudget;
    use crate::fixtures::{FixtureConfig, populate};
    use crate::schemas::{API_KEY_HEADER, CreateBudgetResponse, ErrorResponse, HealthResponse, PersistenceFailureMode};
    use crate::test_utils::test_utils::{
        TEST_API_KEY, TEST_USER_ID, insert_test_user, setup_test_db, setup_test_server,
        setup_test_server_with_mode,
    };
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::{TestRequest, TestServer};
    use chrono::{TimeZone, Utc};
    use model::entities::category::Category;
    use model::entities::{budget, purchase, receipt, transaction, user};
    use sea_orm::{
        ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set,
    };

    fn budget_request(amount: i32) -> NewBudget {
        NewBudget::from_fn(|_| amount)
    }

    fn post_budget(server: &TestServer, user_id: i32) -> TestRequest {
        server
            .post(&format!("/user/{}/budgets/", user_id))
            .add_header(
                HeaderName::from_static(API_KEY_HEADER),
                HeaderValue::from_static(TEST_API_KEY),
            )
    }

    async fn budget_count(db: &DatabaseConnection) -> u64 {
        budget::Entity::find().count(db).await.unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (server, _db) = setup_test_server().await;

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.database, "connected");
    }

    #[tokio::test]
    async fn test_health_check_needs_no_api_key() {
        let (server, _db) = setup_test_server().await;

        let response = server
            .get("/health")
            .add_header(
                HeaderName::from_static(API_KEY_HEADER),
                HeaderValue::from_static("wrong"),
            )
            .await;

        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let (server, _db) = setup_test_server().await;

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert!(body["paths"]["/user/{user_id}/budgets/"]["post"].is_object());
    }

    #[tokio::test]
    async fn test_create_budget() {
        let (server, db) = setup_test_server().await;
        let request = NewBudget::from_fn(|category| category.budget_column().len() as i32 * 10);

        let response = post_budget(&server, TEST_USER_ID).json(&request).await;

        response.assert_status(StatusCode::OK);
        let body: CreateBudgetResponse = response.json();
        let budget_id = body.budget_id.expect("budget id should be present");
        assert!(budget_id > 0);

        let stored = budget::Entity::find_by_id(budget_id)
            .one(&db)
            .await
            .unwrap()
            .expect("budget should be stored");
        assert_eq!(stored.user_id, TEST_USER_ID);
        assert_eq!(stored.amounts(), request.amounts());
    }

    #[tokio::test]
    async fn test_create_budget_without_trailing_slash() {
        let (server, _db) = setup_test_server().await;

        let response = server
            .post(&format!("/user/{}/budgets", TEST_USER_ID))
            .add_header(
                HeaderName::from_static(API_KEY_HEADER),
                HeaderValue::from_static(TEST_API_KEY),
            )
            .json(&budget_request(100))
            .await;

        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_budget_twice_gives_distinct_ids() {
        let (server, db) = setup_test_server().await;

        let first: CreateBudgetResponse = post_budget(&server, TEST_USER_ID)
            .json(&budget_request(10))
            .await
            .json();
        let second: CreateBudgetResponse = post_budget(&server, TEST_USER_ID)
            .json(&budget_request(20))
            .await
            .json();

        assert!(first.budget_id.is_some());
        assert!(second.budget_id.is_some());
        assert_ne!(first.budget_id, second.budget_id);
        assert_eq!(budget_count(&db).await, 2);
    }

    #[tokio::test]
    async fn test_create_budget_accepts_zero_amounts() {
        let (server, _db) = setup_test_server().await;

        let response = post_budget(&server, TEST_USER_ID).json(&budget_request(0)).await;

        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_budget_for_unknown_user() {
        let (server, db) = setup_test_server().await;

        let response = post_budget(&server, 9999).json(&budget_request(100)).await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "USER_NOT_FOUND");
        assert!(!body.success);
        assert_eq!(budget_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_create_budget_with_negative_amount() {
        let (server, db) = setup_test_server().await;
        let request = NewBudget {
            travel: -5,
            ..budget_request(100)
        };

        let response = post_budget(&server, TEST_USER_ID).json(&request).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_BUDGET");
        assert!(body.error.contains("Travel"));
        assert_eq!(budget_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_negative_amount_for_unknown_user_is_rejected_as_invalid() {
        let (server, _db) = setup_test_server().await;
        let request = NewBudget {
            pets: -1,
            ..budget_request(100)
        };

        let response = post_budget(&server, 9999).json(&request).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_budget_with_missing_field() {
        let (server, db) = setup_test_server().await;
        let mut body = serde_json::to_value(budget_request(100)).unwrap();
        body.as_object_mut().unwrap().remove("groceries");

        let response = post_budget(&server, TEST_USER_ID).json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(budget_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_create_budget_without_api_key() {
        let (server, db) = setup_test_server().await;

        let response = server
            .post(&format!("/user/{}/budgets/", TEST_USER_ID))
            .json(&budget_request(100))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_API_KEY");
        assert_eq!(budget_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_create_budget_with_wrong_api_key() {
        let (server, db) = setup_test_server().await;

        let response = server
            .post(&format!("/user/{}/budgets/", TEST_USER_ID))
            .add_header(
                HeaderName::from_static(API_KEY_HEADER),
                HeaderValue::from_static("not-the-key"),
            )
            .json(&budget_request(100))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(budget_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_api_key_is_checked_before_the_body() {
        let (server, _db) = setup_test_server().await;

        let response = server
            .post("/user/9999/budgets/")
            .json(&serde_json::json!({ "travel": "lots" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported_as_server_error() {
        let (server, db) = setup_test_server().await;
        db.execute_unprepared("DROP TABLE budgets").await.unwrap();

        let response = post_budget(&server, TEST_USER_ID).json(&budget_request(100)).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "BUDGET_NOT_CREATED");
    }

    #[tokio::test]
    async fn test_storage_failure_in_null_id_mode() {
        let (server, db) = setup_test_server_with_mode(PersistenceFailureMode::NullBudgetId).await;
        db.execute_unprepared("DROP TABLE budgets").await.unwrap();

        let response = post_budget(&server, TEST_USER_ID).json(&budget_request(100)).await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body, serde_json::json!({ "budget_id": null }));
    }

    #[tokio::test]
    async fn test_deleting_user_removes_budgets_and_transactions() {
        let (server, db) = setup_test_server().await;
        post_budget(&server, TEST_USER_ID)
            .json(&budget_request(100))
            .await
            .assert_status(StatusCode::OK);
        transaction::ActiveModel {
            user_id: Set(TEST_USER_ID),
            merchant: Set("Corner Shop".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        user::Entity::delete_by_id(TEST_USER_ID).exec(&db).await.unwrap();

        assert_eq!(budget_count(&db).await, 0);
        assert_eq!(transaction::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_transaction_defaults_and_cascade() {
        let db = setup_test_db().await;
        insert_test_user(&db, 7, "Grace").await;

        let stored = transaction::ActiveModel {
            user_id: Set(7),
            merchant: Set("Hardware Store".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        assert!(stored.description.is_none());
        assert!(stored.created_at.timestamp() > 0);

        let item = purchase::ActiveModel {
            transaction_id: Set(stored.id),
            item: Set("Hammer".to_string()),
            price: Set(25),
            warranty_date: Set(None),
            return_date: Set(None),
            category: Set(Category::HomeAndGarden),
            quantity: Set(1),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        assert_eq!(item.category, Category::HomeAndGarden);

        receipt::ActiveModel {
            transaction_id: Set(Some(stored.id)),
            url: Set("https://receipts.example.com/1.png".to_string()),
            parsed_data: Set("Hammer 25".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        transaction::Entity::delete_by_id(stored.id).exec(&db).await.unwrap();

        assert_eq!(purchase::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(receipt::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_purchase_column_defaults() {
        let db = setup_test_db().await;
        insert_test_user(&db, 1, "Linus").await;
        db.execute_unprepared("INSERT INTO transactions (id, user_id, merchant) VALUES (1, 1, 'Kiosk')")
            .await
            .unwrap();
        db.execute_unprepared("INSERT INTO purchases (transaction_id, item, price) VALUES (1, 'Gum', 2)")
            .await
            .unwrap();

        let stored = purchase::Entity::find().one(&db).await.unwrap().unwrap();
        assert_eq!(stored.category, Category::Other);
        assert_eq!(stored.quantity, 1);
    }

    #[tokio::test]
    async fn test_receipt_may_exist_without_transaction() {
        let db = setup_test_db().await;

        let stored = receipt::ActiveModel {
            transaction_id: Set(None),
            url: Set("https://receipts.example.com/orphan.png".to_string()),
            parsed_data: Set(String::new()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        assert!(stored.transaction_id.is_none());
    }

    #[tokio::test]
    async fn test_schema_rejects_invalid_rows() {
        let db = setup_test_db().await;
        insert_test_user(&db, 1, "Linus").await;
        db.execute_unprepared("INSERT INTO transactions (id, user_id, merchant) VALUES (1, 1, 'Kiosk')")
            .await
            .unwrap();

        let rejected = [
            "INSERT INTO users (name, email) VALUES ('Bad', 'not-an-email')",
            "INSERT INTO users (name, email) VALUES ('Bad', 'a@b')",
            "INSERT INTO purchases (transaction_id, item, price, category) VALUES (1, 'Sword', 5, 'Weapons')",
            "INSERT INTO purchases (transaction_id, item, price) VALUES (1, 'Refund', -1)",
            "INSERT INTO purchases (transaction_id, item, price, quantity) VALUES (1, 'Nothing', 5, 0)",
            "INSERT INTO purchases (transaction_id, item, price) VALUES (99, 'Orphan', 5)",
            "INSERT INTO budgets (user_id, travel) VALUES (1, -5)",
            "INSERT INTO budgets (user_id) VALUES (99)",
        ];
        for statement in rejected {
            assert!(
                db.execute_unprepared(statement).await.is_err(),
                "statement should fail: {statement}"
            );
        }

        db.execute_unprepared("INSERT INTO users (name, email) VALUES ('Good', 'first.last+tag@mail.example.org')")
            .await
            .expect("valid email should be accepted");
    }

    #[tokio::test]
    async fn test_populate_fills_every_table() {
        let db = setup_test_db().await;
        let config = FixtureConfig {
            users: 12,
            seed: 5,
            anchor: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        };

        let report = populate(&db, &config).await.unwrap();

        assert_eq!(report.users, 12);
        assert_eq!(report.failed_users, 0);
        assert_eq!(user::Entity::find().count(&db).await.unwrap(), 12);
        assert_eq!(
            transaction::Entity::find().count(&db).await.unwrap(),
            report.transactions as u64
        );
        assert_eq!(
            purchase::Entity::find().count(&db).await.unwrap(),
            report.purchases as u64
        );
        assert_eq!(
            receipt::Entity::find().count(&db).await.unwrap(),
            report.receipts as u64
        );
        assert_eq!(budget_count(&db).await, 12);
        assert!(report.transactions >= 12 && report.transactions <= 48);

        for stored in budget::Entity::find().all(&db).await.unwrap() {
            for (_, amount) in stored.amounts() {
                assert!((50..=499).contains(&amount));
            }
        }
    }

    #[tokio::test]
    async fn test_populate_replaces_previous_data() {
        let db = setup_test_db().await;
        insert_test_user(&db, 500, "Leftover").await;
        let config = FixtureConfig {
            users: 3,
            seed: 11,
            anchor: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        };

        let first = populate(&db, &config).await.unwrap();
        let second = populate(&db, &config).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(user::Entity::find().count(&db).await.unwrap(), 3);
        assert!(user::Entity::find_by_id(500).one(&db).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_populated_users_accept_budgets() {
        let (server, db) = setup_test_server().await;
        let config = FixtureConfig {
            users: 2,
            ..FixtureConfig::default()
        };
        populate(&db, &config).await.unwrap();
        let owner = user::Entity::find().one(&db).await.unwrap().unwrap();

        let response = post_budget(&server, owner.id).json(&budget_request(75)).await;

        response.assert_status(StatusCode::OK);
        assert_eq!(budget_count(&db).await, 3);
    }
}
