use axum::http::StatusCode;
use axum_test::TestServer;
use pousada_axum::{config::AxumConfig, router};
use pousada_sqlite::{Db, config::SqliteConfig};
use rstest::*;
use serde_json::{Value, json};

mod app;
use app::TestApp;

#[fixture]
async fn server() -> TestServer {
    let db = Db::open(&SqliteConfig::default()).await.unwrap();
    TestServer::new(router(TestApp::new(db), AxumConfig::default())).unwrap()
}

fn booking(room_id: &str, check_in: &str, check_out: &str) -> Value {
    json!({
        "roomId": room_id,
        "checkIn": check_in,
        "checkOut": check_out,
        "numberOfRooms": 1,
        "isBreakfastIncluded": true,
        "numberOfGuests": 2,
        "totalPrice": 600.0,
        "roomType": "Standard",
    })
}

async fn create(server: &TestServer, user: &str, body: Value) -> Value {
    let response = server
        .post("/booking")
        .authorization_bearer(user)
        .json(&body)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

// Without a multithreaded runtime, the tests cannot make progress
#[rstest]
#[case("/booking")]
#[case("/booking/available-rooms?checkIn=2030-05-15T14:00:00Z&checkOut=2030-05-18T10:00:00Z")]
#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn requests_without_a_session_are_rejected(
    #[future] server: TestServer,
    #[case] path: &str,
) {
    let server = server.await;

    server.get(path).await.assert_status(StatusCode::UNAUTHORIZED);
    server
        .get(path)
        .authorization_bearer("invalid")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[rstest]
#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn bookings_are_created_and_private(#[future] server: TestServer) {
    let server = server.await;

    let created = create(
        &server,
        "alice",
        booking("standard-101", "2030-05-15T14:00:00Z", "2030-05-18T10:00:00Z"),
    )
    .await;
    let booking = &created["booking"];
    let id = booking["id"].as_str().unwrap();
    assert_eq!(booking["status"], "created");
    assert_eq!(booking["userId"], "alice");
    assert!(booking["confirmationCode"].as_str().unwrap().starts_with("RES-"));
    assert_eq!(created["paymentPreference"]["id"], format!("pref-{id}"));

    let mine = server.get("/booking").authorization_bearer("alice").await;
    mine.assert_status_ok();
    assert_eq!(mine.json::<Value>().as_array().unwrap().len(), 1);

    let theirs = server.get("/booking").authorization_bearer("bob").await;
    assert_eq!(theirs.json::<Value>(), json!([]));

    server
        .get(&format!("/booking/{id}"))
        .authorization_bearer("alice")
        .await
        .assert_status_ok();
    server
        .get(&format!("/booking/{id}"))
        .authorization_bearer("bob")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[rstest]
#[case(booking("standard-101", "2030-05-18T10:00:00Z", "2030-05-15T14:00:00Z"))]
#[case(booking("", "2030-05-15T14:00:00Z", "2030-05-18T10:00:00Z"))]
#[case({
    let mut body = booking("standard-101", "2030-05-15T14:00:00Z", "2030-05-18T10:00:00Z");
    body["numberOfGuests"] = json!(0);
    body
})]
#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn invalid_bookings_are_bad_requests(#[future] server: TestServer, #[case] body: Value) {
    let server = server.await;
    server
        .post("/booking")
        .authorization_bearer("alice")
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[rstest]
#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn malformed_ids_are_bad_requests(#[future] server: TestServer) {
    let server = server.await;
    server
        .get("/booking/not-a-uuid")
        .authorization_bearer("alice")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[rstest]
#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn payment_flow_confirms_and_blocks_the_room(#[future] server: TestServer) {
    let server = server.await;

    let created = create(
        &server,
        "alice",
        booking("suite-301", "2030-05-15T14:00:00Z", "2030-05-18T10:00:00Z"),
    )
    .await;
    let id = created["booking"]["id"].as_str().unwrap().to_owned();

    let attached = server
        .post(&format!("/booking/{id}/payment"))
        .authorization_bearer("alice")
        .json(&json!({ "paymentId": "987654321" }))
        .await;
    attached.assert_status_ok();
    assert_eq!(attached.json::<Value>()["status"], "pending_payment");

    let ack = server
        .post("/payment/webhook/mercadopago")
        .json(&json!({
            "id": 12345,
            "action": "payment.updated",
            "type": "payment",
            "data": { "id": 987654321 },
        }))
        .await;
    ack.assert_status_ok();
    assert_eq!(
        ack.json::<Value>(),
        json!({ "received": true, "processed": true, "bookingId": id })
    );

    let confirmed = server
        .get(&format!("/booking/{id}"))
        .authorization_bearer("alice")
        .await
        .json::<Value>();
    assert_eq!(confirmed["status"], "confirmed");
    assert_eq!(confirmed["paymentId"], "987654321");

    let availability = server
        .get("/booking/availability/suite-301")
        .add_query_param("checkIn", "2030-05-17T14:00:00Z")
        .add_query_param("checkOut", "2030-05-19T10:00:00Z")
        .authorization_bearer("bob")
        .await;
    assert_eq!(
        availability.json::<Value>(),
        json!({ "roomId": "suite-301", "available": false })
    );

    // same-day turnover
    server
        .post("/booking")
        .authorization_bearer("bob")
        .json(&booking("suite-301", "2030-05-18T14:00:00Z", "2030-05-20T10:00:00Z"))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/booking")
        .authorization_bearer("bob")
        .json(&booking("suite-301", "2030-05-16T14:00:00Z", "2030-05-17T10:00:00Z"))
        .await
        .assert_status(StatusCode::CONFLICT);

    // confirmed bookings cannot be edited or cancelled
    server
        .put(&format!("/booking/{id}"))
        .authorization_bearer("alice")
        .json(&json!({ "numberOfGuests": 3 }))
        .await
        .assert_status(StatusCode::CONFLICT);
    server
        .delete(&format!("/booking/{id}"))
        .authorization_bearer("alice")
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[rstest]
#[case(json!({ "action": "payment.updated", "data": { "id": "unknown" } }), "Booking not found")]
#[case(json!({ "action": "merchant_order.updated", "data": { "id": "1" } }), "Unhandled action")]
#[case(json!({ "action": "payment.created" }), "Missing payment id")]
#[case(json!("not a notification"), "Malformed notification")]
#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn webhooks_always_succeed(
    #[future] server: TestServer,
    #[case] body: Value,
    #[case] reason: &str,
) {
    let server = server.await;
    let ack = server.post("/payment/webhook/mercadopago").json(&body).await;
    ack.assert_status_ok();
    assert_eq!(
        ack.json::<Value>(),
        json!({ "received": true, "processed": false, "reason": reason })
    );
}

#[rstest]
#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn bookings_are_edited_and_cancelled(#[future] server: TestServer) {
    let server = server.await;

    let created = create(
        &server,
        "alice",
        booking("standard-101", "2030-05-15T14:00:00Z", "2030-05-18T10:00:00Z"),
    )
    .await;
    let id = created["booking"]["id"].as_str().unwrap().to_owned();

    let updated = server
        .put(&format!("/booking/{id}"))
        .authorization_bearer("alice")
        .json(&json!({ "numberOfGuests": 3, "specialRequests": "late arrival" }))
        .await;
    updated.assert_status_ok();
    let updated = updated.json::<Value>();
    assert_eq!(updated["numberOfGuests"], 3);
    assert_eq!(updated["specialRequests"], "late arrival");

    server
        .put(&format!("/booking/{id}"))
        .authorization_bearer("alice")
        .json(&json!({ "userId": "mallory" }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    server
        .post(&format!("/booking/{id}/cancel"))
        .authorization_bearer("bob")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let cancelled = server
        .post(&format!("/booking/{id}/cancel"))
        .authorization_bearer("alice")
        .await;
    cancelled.assert_status_ok();
    assert_eq!(cancelled.json::<Value>()["status"], "cancelled");

    server
        .delete(&format!("/booking/{id}"))
        .authorization_bearer("alice")
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[rstest]
#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn rooms_are_listed_for_a_period(#[future] server: TestServer) {
    let server = server.await;

    let rooms = server
        .get("/booking/available-rooms")
        .add_query_param("checkIn", "2030-05-15T14:00:00Z")
        .add_query_param("checkOut", "2030-05-17T10:00:00Z")
        .add_query_param("roomType", "standard, SUITE")
        .authorization_bearer("alice")
        .await;
    rooms.assert_status_ok();
    let rooms = rooms.json::<Value>();
    let ids: Vec<&str> = rooms
        .as_array()
        .unwrap()
        .iter()
        .map(|room| room["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["standard-101", "standard-102", "suite-301"]);
    assert_eq!(rooms[2]["nights"], 2);
    assert_eq!(rooms[2]["totalPrice"], 1000.0);

    let many = server
        .post("/booking/availability")
        .authorization_bearer("alice")
        .json(&json!({
            "roomIds": ["suite-301", "deluxe-201"],
            "checkIn": "2030-05-15T14:00:00Z",
            "checkOut": "2030-05-17T10:00:00Z",
        }))
        .await;
    many.assert_status_ok();
    assert_eq!(
        many.json::<Value>(),
        json!([
            { "roomId": "suite-301", "available": true },
            { "roomId": "deluxe-201", "available": true },
        ])
    );

    server
        .get("/booking/available-rooms")
        .add_query_param("checkIn", "2030-05-17T10:00:00Z")
        .add_query_param("checkOut", "2030-05-17T10:00:00Z")
        .authorization_bearer("alice")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[rstest]
#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn health_and_docs_are_public(#[future] server: TestServer) {
    let server = server.await;

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>(), json!({ "status": "ok" }));

    let docs = server.get("/docs/api.json").await;
    docs.assert_status_ok();
    let docs = docs.json::<Value>();
    assert_eq!(docs["info"]["title"], "Pousada Booking API");
    assert!(docs["paths"]["/booking/{bookingId}/payment"].is_object());
    assert!(docs["paths"]["/payment/webhook/mercadopago"].is_object());
}
