mod common;

use actix_web::{
    cookie::{time::Duration as CookieDuration, SameSite},
    http::StatusCode,
    test,
};
use serde_json::{json, Value};

#[actix_web::test]
async fn jwt_sets_a_secure_cookie_for_the_email() {
    let (_store, state) = common::memory_state();
    let tokens = state.tokens.clone();
    let app = test::init_service(common::app(state)).await;

    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({ "email": "a@x.com", "displayName": "Ada" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "token")
        .expect("token cookie")
        .into_owned();
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::None));
    assert_eq!(cookie.max_age(), Some(CookieDuration::hours(1)));
    assert_eq!(tokens.verify(cookie.value()).unwrap().email, "a@x.com");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": true }));
}

#[actix_web::test]
async fn jwt_without_a_usable_email_sets_nothing() {
    let (_store, state) = common::memory_state();
    let app = test::init_service(common::app(state)).await;

    for body in [json!({}), json!({ "email": "nobody" })] {
        let req = test::TestRequest::post().uri("/jwt").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.response().cookies().count(), 0);
    }
}

#[actix_web::test]
async fn logout_expires_the_cookie() {
    let (_store, state) = common::memory_state();
    let app = test::init_service(common::app(state)).await;

    let resp = test::call_service(&app, test::TestRequest::post().uri("/logout").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "token")
        .expect("token cookie")
        .into_owned();
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
    assert_eq!(cookie.same_site(), Some(SameSite::None));
}

#[actix_web::test]
async fn issued_cookie_opens_the_protected_listing() {
    let (_store, state) = common::memory_state();
    let app = test::init_service(common::app(state)).await;

    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({ "email": "a@x.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "token")
        .expect("token cookie")
        .into_owned();

    let req = test::TestRequest::get()
        .uri("/submittedAssignments?email=a@x.com")
        .cookie(cookie)
        .to_request();
    let listed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(listed.is_empty());
}
