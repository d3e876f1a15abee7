use std::sync::Arc;

use actix_web::{http::StatusCode, test, App};
use bigdecimal::BigDecimal;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use crate::{
	models::{ErrorResponse, MessageResponse, Transaction},
	repo::{MockRepository, RepoError, Repository},
	tests::{
		fixtures::TestFixtures,
		test_utils::{bearer, configure_app, MemoryRepository},
	},
};

#[actix_web::test]
async fn test_create_transaction() {
	let repo = Arc::new(MemoryRepository::default());
	let app = test::init_service(App::new().configure(configure_app(repo.clone()))).await;

	let before = Utc::now();
	let resp = test::TestRequest::post()
		.uri("/transactions")
		.insert_header(bearer(1))
		.set_json(TestFixtures::coffee())
		.send_request(&app)
		.await;
	let after = Utc::now();

	assert_eq!(resp.status(), StatusCode::OK);
	let created: Transaction = test::read_body_json(resp).await;
	assert!(created.id > 0);
	assert_eq!(created.user_id, 1);
	assert_eq!(created.amount, BigDecimal::from(50));
	assert_eq!(created.description, "coffee");
	assert_eq!(created.category, "Food");
	assert_eq!(created.source_type, "CASH");
	assert!(created.is_expense);
	assert!(created.date >= before && created.date <= after);

	assert_eq!(repo.all_transactions(), vec![created]);
}

#[actix_web::test]
async fn test_create_transaction_ignores_client_owner() {
	let repo = Arc::new(MemoryRepository::default());
	let app = test::init_service(App::new().configure(configure_app(repo.clone()))).await;

	let resp = test::TestRequest::post()
		.uri("/transactions")
		.insert_header(bearer(1))
		.set_json(json!({ "user_id": 2, "amount": 10, "description": "lunch" }))
		.send_request(&app)
		.await;

	assert_eq!(resp.status(), StatusCode::OK);
	let created: Transaction = test::read_body_json(resp).await;
	assert_eq!(created.user_id, 1);
	assert_eq!(created.category, "Uncategorized");
	assert!(repo.list_transactions(2, 0, 100).unwrap().is_empty());
}

#[actix_web::test]
async fn test_invalid_transaction_payloads() {
	let repo = Arc::new(MemoryRepository::default());
	let app = test::init_service(App::new().configure(configure_app(repo.clone()))).await;

	let payloads = [
		json!({ "amount": "fifty", "description": "coffee" }),
		json!({ "amount": -100, "description": "refund?" }),
		json!({ "amount": 10, "description": "coffee", "source_type": "CHEQUE" }),
		json!({ "amount": 10, "description": "coffee", "category": "" }),
		json!({ "description": "no amount" }),
	];

	for payload in payloads {
		let resp = test::TestRequest::post()
			.uri("/transactions")
			.insert_header(bearer(1))
			.set_json(&payload)
			.send_request(&app)
			.await;

		assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "payload: {}", payload);
		let body: ErrorResponse = test::read_body_json(resp).await;
		assert_eq!(body.status, 422);
		assert!(!body.error.is_empty());
	}

	assert!(repo.all_transactions().is_empty());
}

#[actix_web::test]
async fn test_unauthorized_transaction() {
	let repo = Arc::new(MemoryRepository::default());
	let app = test::init_service(App::new().configure(configure_app(repo.clone()))).await;

	let resp = test::TestRequest::get().uri("/transactions").send_request(&app).await;
	assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

	let resp = test::TestRequest::post()
		.uri("/transactions")
		.insert_header(("Authorization", "Bearer not-a-token"))
		.set_json(TestFixtures::coffee())
		.send_request(&app)
		.await;
	assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
	assert!(repo.all_transactions().is_empty());
}

#[actix_web::test]
async fn test_get_transactions_only_returns_own_rows() {
	let repo = Arc::new(MemoryRepository::default());
	let app = test::init_service(App::new().configure(configure_app(repo.clone()))).await;

	for (user_id, payload) in
		[(1, TestFixtures::coffee()), (2, TestFixtures::salary()), (1, TestFixtures::salary())]
	{
		let resp = test::TestRequest::post()
			.uri("/transactions")
			.insert_header(bearer(user_id))
			.set_json(payload)
			.send_request(&app)
			.await;
		assert!(resp.status().is_success());
	}

	let resp =
		test::TestRequest::get().uri("/transactions").insert_header(bearer(1)).send_request(&app).await;
	assert_eq!(resp.status(), StatusCode::OK);
	let listed: Vec<Transaction> = test::read_body_json(resp).await;

	assert_eq!(listed.len(), 2);
	assert!(listed.iter().all(|t| t.user_id == 1));
	// newest first: the coffee was stamped now, the salary carries a 2024 date
	assert_eq!(listed[0].description, "coffee");
	assert_eq!(listed[1].description, "salary");
}

#[actix_web::test]
async fn test_get_transactions_paginates() {
	let repo = Arc::new(MemoryRepository::default());
	let app = test::init_service(App::new().configure(configure_app(repo.clone()))).await;

	for day in 1..=5 {
		let resp = test::TestRequest::post()
			.uri("/transactions")
			.insert_header(bearer(1))
			.set_json(json!({
				"amount": day,
				"description": format!("day {}", day),
				"date": Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
			}))
			.send_request(&app)
			.await;
		assert!(resp.status().is_success());
	}

	let resp = test::TestRequest::get()
		.uri("/transactions?skip=1&limit=2")
		.insert_header(bearer(1))
		.send_request(&app)
		.await;
	assert_eq!(resp.status(), StatusCode::OK);
	let page: Vec<Transaction> = test::read_body_json(resp).await;
	let descriptions: Vec<&str> = page.iter().map(|t| t.description.as_str()).collect();
	assert_eq!(descriptions, vec!["day 4", "day 3"]);

	let resp = test::TestRequest::get()
		.uri("/transactions?limit=-1")
		.insert_header(bearer(1))
		.send_request(&app)
		.await;
	assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

	let resp = test::TestRequest::get()
		.uri("/transactions?skip=abc")
		.insert_header(bearer(1))
		.send_request(&app)
		.await;
	assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_update_transaction_replaces_fields() {
	let repo = Arc::new(MemoryRepository::default());
	let app = test::init_service(App::new().configure(configure_app(repo.clone()))).await;

	let resp = test::TestRequest::post()
		.uri("/transactions")
		.insert_header(bearer(1))
		.set_json(TestFixtures::coffee())
		.send_request(&app)
		.await;
	let created: Transaction = test::read_body_json(resp).await;

	let resp = test::TestRequest::put()
		.uri(&format!("/transactions/{}", created.id))
		.insert_header(bearer(1))
		.set_json(TestFixtures::salary())
		.send_request(&app)
		.await;
	assert_eq!(resp.status(), StatusCode::OK);
	let updated: Transaction = test::read_body_json(resp).await;

	assert_eq!(updated.id, created.id);
	assert_eq!(updated.user_id, 1);
	assert_eq!(updated.amount, BigDecimal::from(2500));
	assert_eq!(updated.description, "salary");
	assert_eq!(updated.category, "Income");
	assert_eq!(updated.source_type, "UPI");
	assert_eq!(updated.date, Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
	assert!(!updated.is_expense);
	assert_eq!(repo.all_transactions(), vec![updated]);
}

#[actix_web::test]
async fn test_update_without_date_keeps_stored_date() {
	let repo = Arc::new(MemoryRepository::default());
	let app = test::init_service(App::new().configure(configure_app(repo.clone()))).await;

	let resp = test::TestRequest::post()
		.uri("/transactions")
		.insert_header(bearer(1))
		.set_json(TestFixtures::salary())
		.send_request(&app)
		.await;
	let created: Transaction = test::read_body_json(resp).await;

	let resp = test::TestRequest::put()
		.uri(&format!("/transactions/{}", created.id))
		.insert_header(bearer(1))
		.set_json(json!({ "amount": 2600, "description": "salary + bonus" }))
		.send_request(&app)
		.await;
	assert_eq!(resp.status(), StatusCode::OK);
	let updated: Transaction = test::read_body_json(resp).await;

	assert_eq!(updated.date, created.date);
	assert_eq!(updated.amount, BigDecimal::from(2600));
	// omitted optional fields fall back to their defaults
	assert_eq!(updated.category, "Uncategorized");
	assert_eq!(updated.source_type, "CASH");
	assert!(updated.is_expense);
}

#[actix_web::test]
async fn test_fractional_amount_is_returned_as_sent() {
	let app = test::init_service(
		App::new().configure(configure_app(Arc::new(MemoryRepository::default()))),
	)
	.await;

	let resp = test::TestRequest::post()
		.uri("/transactions")
		.insert_header(bearer(1))
		.set_json(json!({ "amount": 19.99, "description": "book", "category": "Education" }))
		.send_request(&app)
		.await;
	assert_eq!(resp.status(), StatusCode::OK);
	let created: Value = test::read_body_json(resp).await;
	assert!(created["amount"].is_number());
	assert_eq!(created["amount"], json!(19.99));

	let resp = test::TestRequest::put()
		.uri(&format!("/transactions/{}", created["id"]))
		.insert_header(bearer(1))
		.set_json(json!({ "amount": 0.1, "description": "bus", "category": "Travel" }))
		.send_request(&app)
		.await;
	assert_eq!(resp.status(), StatusCode::OK);
	let updated: Value = test::read_body_json(resp).await;
	assert_eq!(updated["amount"], json!(0.1));

	let resp =
		test::TestRequest::get().uri("/transactions").insert_header(bearer(1)).send_request(&app).await;
	let listed: Value = test::read_body_json(resp).await;
	assert_eq!(listed[0]["amount"], json!(0.1));
}

#[actix_web::test]
async fn test_update_other_users_transaction_is_not_found() {
	let repo = Arc::new(MemoryRepository::default());
	let app = test::init_service(App::new().configure(configure_app(repo.clone()))).await;

	let resp = test::TestRequest::post()
		.uri("/transactions")
		.insert_header(bearer(1))
		.set_json(TestFixtures::coffee())
		.send_request(&app)
		.await;
	let created: Transaction = test::read_body_json(resp).await;

	let resp = test::TestRequest::put()
		.uri(&format!("/transactions/{}", created.id))
		.insert_header(bearer(2))
		.set_json(TestFixtures::salary())
		.send_request(&app)
		.await;
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	let body: ErrorResponse = test::read_body_json(resp).await;
	assert_eq!(body.error, "Transaction not found");

	let resp = test::TestRequest::delete()
		.uri(&format!("/transactions/{}", created.id))
		.insert_header(bearer(2))
		.send_request(&app)
		.await;
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);

	assert_eq!(repo.all_transactions(), vec![created]);
}

#[actix_web::test]
async fn test_missing_and_foreign_ids_look_the_same() {
	let repo = Arc::new(MemoryRepository::default());
	let app = test::init_service(App::new().configure(configure_app(repo.clone()))).await;

	let resp = test::TestRequest::post()
		.uri("/transactions")
		.insert_header(bearer(1))
		.set_json(TestFixtures::coffee())
		.send_request(&app)
		.await;
	let created: Transaction = test::read_body_json(resp).await;

	let foreign = test::TestRequest::delete()
		.uri(&format!("/transactions/{}", created.id))
		.insert_header(bearer(2))
		.send_request(&app)
		.await;
	let missing = test::TestRequest::delete()
		.uri("/transactions/9999")
		.insert_header(bearer(2))
		.send_request(&app)
		.await;

	assert_eq!(foreign.status(), missing.status());
	let foreign: ErrorResponse = test::read_body_json(foreign).await;
	let missing: ErrorResponse = test::read_body_json(missing).await;
	assert_eq!(foreign.error, missing.error);
}

#[actix_web::test]
async fn test_delete_transaction() {
	let repo = Arc::new(MemoryRepository::default());
	let app = test::init_service(App::new().configure(configure_app(repo.clone()))).await;

	let resp = test::TestRequest::post()
		.uri("/transactions")
		.insert_header(bearer(1))
		.set_json(TestFixtures::coffee())
		.send_request(&app)
		.await;
	let created: Transaction = test::read_body_json(resp).await;
	let uri = format!("/transactions/{}", created.id);

	let resp = test::TestRequest::delete().uri(&uri).insert_header(bearer(1)).send_request(&app).await;
	assert_eq!(resp.status(), StatusCode::OK);
	let body: MessageResponse = test::read_body_json(resp).await;
	assert_eq!(body.message, "Transaction deleted successfully");
	assert!(repo.all_transactions().is_empty());

	let resp = test::TestRequest::delete().uri(&uri).insert_header(bearer(1)).send_request(&app).await;
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);

	let resp = test::TestRequest::put()
		.uri(&uri)
		.insert_header(bearer(1))
		.set_json(TestFixtures::coffee())
		.send_request(&app)
		.await;
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_non_numeric_transaction_id() {
	let repo = Arc::new(MemoryRepository::default());
	let app = test::init_service(App::new().configure(configure_app(repo))).await;

	let resp = test::TestRequest::delete()
		.uri("/transactions/latest")
		.insert_header(bearer(1))
		.send_request(&app)
		.await;
	assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_store_failure_is_internal_error() {
	let mut repo = MockRepository::new();
	repo.expect_list_transactions()
		.withf(|user_id, skip, limit| *user_id == 7 && *skip == 0 && *limit == 100)
		.times(1)
		.returning(|_, _, _| Err(RepoError::Database(diesel::result::Error::BrokenTransactionManager)));
	let app = test::init_service(App::new().configure(configure_app(Arc::new(repo)))).await;

	let resp =
		test::TestRequest::get().uri("/transactions").insert_header(bearer(7)).send_request(&app).await;

	assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
	let body: ErrorResponse = test::read_body_json(resp).await;
	assert_eq!(body.error, "Internal server error");
}
