//! End-to-end flows through the assembled application.

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{test, web};
use async_trait::async_trait;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use portal::domain::ports::{FixtureLoginService, FixtureUserDirectory, UserDirectory};
use portal::domain::{AuthError, TRACE_ID_HEADER, User, UserId};
use portal::inbound::http::health::HealthState;
use portal::inbound::http::state::{HttpState, HttpStatePorts};
use portal::server::{AppDependencies, SESSION_COOKIE_NAME, build_app};

/// Directory that answers correctly, but only after `delay`.
struct SlowDirectory {
    delay: Duration,
}

#[async_trait]
impl UserDirectory for SlowDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        tokio::time::sleep(self.delay).await;
        FixtureUserDirectory.find_user(id).await
    }
}

/// Directory whose lookups never finish.
struct HungDirectory;

#[async_trait]
impl UserDirectory for HungDirectory {
    async fn find_user(&self, _id: &UserId) -> Result<Option<User>, AuthError> {
        std::future::pending().await
    }
}

fn deps_with(directory: Arc<dyn UserDirectory>, timeout: Option<Duration>) -> AppDependencies {
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    AppDependencies {
        health_state,
        http_state: web::Data::new(HttpState::new(
            HttpStatePorts {
                login: Arc::new(FixtureLoginService),
                directory,
            },
            timeout,
            "BBA Premium",
        )),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

#[fixture]
fn deps() -> AppDependencies {
    deps_with(Arc::new(FixtureUserDirectory), Some(Duration::from_secs(5)))
}

fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

async fn login_as<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": username, "password": "password" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login as {username}");
    session_cookie(&res)
}

fn location(res: &ServiceResponse) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
}

#[rstest]
#[case("/")]
#[case("/report/42")]
#[case("/create-report")]
#[case("/admin/users")]
#[actix_web::test]
async fn anonymous_visitors_are_sent_to_login(deps: AppDependencies, #[case] path: &str) {
    let app = test::init_service(build_app(deps)).await;
    let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["reason"], "unauthenticated");
}

#[rstest]
#[actix_web::test]
async fn city_admin_is_bounced_from_user_management(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;
    let cookie = login_as(&app, "kota").await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/admin/users")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
}

#[rstest]
#[actix_web::test]
async fn super_admin_sees_full_navigation(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;
    let cookie = login_as(&app, "admin").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/admin/locations")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let shell: Value = test::read_body_json(res).await;
    assert_eq!(shell["page"]["name"], "location_management");
    let labels: Vec<&str> = shell["navigation"]["items"]
        .as_array()
        .expect("items")
        .iter()
        .filter_map(|item| item["label"].as_str())
        .collect();
    assert_eq!(labels, ["Beranda", "Manajemen Akun", "Manajemen Lokasi"]);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/navigation?path=/admin/users")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let nav: Value = test::read_body_json(res).await;
    let active: Vec<&str> = nav["items"]
        .as_array()
        .expect("items")
        .iter()
        .filter(|item| item["active"] == true)
        .filter_map(|item| item["path"].as_str())
        .collect();
    assert_eq!(active, ["/admin/users"]);
}

#[rstest]
#[actix_web::test]
async fn branch_user_reaches_report_detail(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;
    let cookie = login_as(&app, "cabang").await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/report/42")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let shell: Value = test::read_body_json(res).await;
    assert_eq!(shell["page"]["name"], "report_detail");
    assert_eq!(shell["page"]["params"]["id"], "42");
    assert_eq!(shell["account"]["name"], "Siti Rahma");
}

#[rstest]
#[actix_web::test]
async fn unknown_paths_render_not_found(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/some/unknown/path")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let shell: Value = test::read_body_json(res).await;
    assert_eq!(shell["page"]["name"], "not_found");
    assert_eq!(shell["navigation"], Value::Null);
}

#[rstest]
#[actix_web::test]
async fn logout_returns_to_login(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;
    let cookie = login_as(&app, "wilayah").await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cleared = session_cookie(&res);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "redirect": "/login" }));

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(cleared).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
}

#[rstest]
#[actix_web::test]
async fn slow_directory_keeps_the_session_loading() {
    let slow = Arc::new(SlowDirectory {
        delay: Duration::from_millis(200),
    });
    let app = test::init_service(build_app(deps_with(slow, Some(Duration::from_millis(20))))).await;
    let cookie = login_as(&app, "admin").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/admin/users")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        res.headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok()),
        Some("1")
    );
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "state": "loading", "message": "Memuat..." }));

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/session")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["isLoading"], true);
    assert_eq!(body["user"], Value::Null);
}

/// Call `app`, failing the test if no answer comes within two seconds.
async fn within<S>(app: &S, req: Request) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    tokio::time::timeout(Duration::from_secs(2), test::call_service(app, req))
        .await
        .expect("answered without waiting on the directory")
}

#[rstest]
#[case("/login", StatusCode::OK, "login")]
#[case("/some/unknown/path", StatusCode::NOT_FOUND, "not_found")]
#[actix_web::test]
async fn unguarded_pages_render_while_the_session_loads(
    #[case] path: &str,
    #[case] status: StatusCode,
    #[case] page: &str,
) {
    let app = test::init_service(build_app(deps_with(Arc::new(HungDirectory), None))).await;
    let cookie = login_as(&app, "admin").await;

    let res = within(&app, test::TestRequest::get().uri(path).cookie(cookie).to_request()).await;
    assert_eq!(res.status(), status);
    let shell: Value = test::read_body_json(res).await;
    assert_eq!(shell["page"]["name"], page);
    assert_eq!(shell["navigation"], Value::Null);
    assert_eq!(shell["account"], Value::Null);
}

#[rstest]
#[actix_web::test]
async fn logout_succeeds_while_the_directory_hangs() {
    let app = test::init_service(build_app(deps_with(Arc::new(HungDirectory), None))).await;
    let cookie = login_as(&app, "kota").await;

    let res = within(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(session_cookie(&res).value().is_empty());
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "redirect": "/login" }));
}

#[rstest]
#[actix_web::test]
async fn guarded_pages_still_wait_for_a_hung_directory() {
    let deps = deps_with(Arc::new(HungDirectory), Some(Duration::from_millis(20)));
    let app = test::init_service(build_app(deps)).await;
    let cookie = login_as(&app, "cabang").await;

    let res = within(&app, test::TestRequest::get().uri("/").cookie(cookie).to_request()).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[rstest]
#[actix_web::test]
async fn responses_carry_a_trace_id(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": "kota", "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["traceId"], header_id.as_str());
}

#[rstest]
#[actix_web::test]
async fn probes_report_readiness(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;
    for path in ["/health/ready", "/health/live"] {
        let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK, "{path}");
    }
}
