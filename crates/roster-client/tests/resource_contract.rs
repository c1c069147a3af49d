//! Resource client behaviour against the in-process mock API.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use roster_auth::{Credentials, MemoryTokenStore, TokenStore};
use roster_client::mock::{MockApiServer, issued_token};
use roster_client::{ApiClient, ClientError};
use roster_core::entities::{EmployeeDraft, NameDraft, Reference};
use roster_core::{Departments, EntityId, Navigator, Record, Resource, ResourceKind, Route};

#[derive(Default)]
struct RecordingNavigator(Mutex<Vec<Route>>);

impl RecordingNavigator {
    fn routes(&self) -> Vec<Route> {
        self.0.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.0.lock().unwrap().push(route);
    }
}

struct Harness {
    server: MockApiServer,
    tokens: Arc<MemoryTokenStore>,
    navigator: Arc<RecordingNavigator>,
    api: ApiClient,
}

fn harness(token: Option<&str>) -> Harness {
    let server = MockApiServer::start().expect("mock server");
    let tokens = Arc::new(token.map_or_else(MemoryTokenStore::new, |t| MemoryTokenStore::with_token(t)));
    let navigator = Arc::new(RecordingNavigator::default());
    let api = ApiClient::with_http(
        reqwest::Client::new(),
        server.base_url(),
        tokens.clone(),
        navigator.clone(),
    );
    Harness {
        server,
        tokens,
        navigator,
        api,
    }
}

fn name_draft(name: &str) -> NameDraft {
    NameDraft { name: name.into() }
}

#[tokio::test]
async fn list_pages_never_exceed_requested_size() {
    let h = harness(Some("t"));
    for i in 0..7 {
        h.server.seed(ResourceKind::Courses, &format!("Course {i}"));
    }

    let first = h.api.courses().list(0, 5).await.unwrap();
    let second = h.api.courses().list(1, 5).await.unwrap();

    assert_eq!(first.content.len(), 5);
    assert_eq!(second.content.len(), 2);
    assert_eq!(first.total_pages, 2);
    assert_eq!(second.total_pages, first.total_pages);
    assert_eq!(second.content[1].name(), "Course 6");

    let request = &h.server.requests()[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/api/courses");
    assert_eq!(request.query_param("page"), Some("0"));
    assert_eq!(request.query_param("size"), Some("5"));
}

#[tokio::test]
async fn empty_collection_lists_one_empty_page() {
    let h = harness(Some("t"));
    let page = h.api.departments().list(0, 5).await.unwrap();
    assert!(page.content.is_empty());
    assert_eq!(page.page_count(), 1);
}

#[tokio::test]
async fn created_record_appears_in_listing() {
    let h = harness(Some("t"));

    let created = h.api.departments().create(&name_draft("Sales")).await.unwrap();
    let page = h.api.departments().list(0, 100).await.unwrap();

    assert_eq!(created.name, "Sales");
    assert!(page.content.iter().any(|d| d.id == created.id && d.name == "Sales"));
}

#[tokio::test]
async fn create_then_list_in_server_order() {
    let h = harness(Some("t"));
    h.api.departments().create(&name_draft("Sales")).await.unwrap();
    h.api
        .departments()
        .create(&name_draft("Engineering"))
        .await
        .unwrap();

    let page = h.api.departments().list(0, 5).await.unwrap();
    let names: Vec<&str> = page.content.iter().map(Record::name).collect();
    assert_eq!(names, vec!["Sales", "Engineering"]);
}

#[tokio::test]
async fn repeated_update_is_idempotent() {
    let h = harness(Some("t"));
    let id = h.server.seed(ResourceKind::Courses, "Algebra");
    let draft = name_draft("Linear Algebra");

    let once = h.api.courses().update(id, &draft).await.unwrap();
    let twice = h.api.courses().update(id, &draft).await.unwrap();

    assert_eq!(once, twice);
    assert_eq!(
        h.server.records(ResourceKind::Courses),
        vec![serde_json::json!({"id": id.get(), "name": "Linear Algebra"})]
    );
    let request = h.server.requests().pop().unwrap();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, format!("/api/courses/{id}"));
}

#[tokio::test]
async fn delete_removes_record_from_listing() {
    let h = harness(Some("t"));
    let keep = h.server.seed(ResourceKind::Departments, "Sales");
    let gone = h.server.seed(ResourceKind::Departments, "Legal");

    h.api.departments().delete(gone).await.unwrap();

    let page = h.api.departments().list(0, 5).await.unwrap();
    let ids: Vec<EntityId> = page.content.iter().map(Record::id).collect();
    assert_eq!(ids, vec![keep]);
}

#[tokio::test]
async fn employee_create_embeds_department() {
    let h = harness(Some("t"));
    let dept = h.server.seed(ResourceKind::Departments, "Engineering");

    let created = h
        .api
        .employees()
        .create(&EmployeeDraft {
            name: "Ada".into(),
            department: Some(Reference { id: dept }),
        })
        .await
        .unwrap();

    assert_eq!(
        created.reference().map(|choice| choice.name),
        Some("Engineering".to_string())
    );
    let sent = h.server.requests().pop().unwrap().body.unwrap();
    assert_eq!(
        sent,
        serde_json::json!({"name": "Ada", "department": {"id": dept.get()}})
    );
}

#[tokio::test]
async fn every_call_carries_the_current_token() {
    let h = harness(Some("abc"));
    let id = h.server.seed(ResourceKind::Departments, "Sales");

    h.api.departments().list(0, 5).await.unwrap();
    h.api.departments().create(&name_draft("Ops")).await.unwrap();
    h.api.departments().update(id, &name_draft("Sales EU")).await.unwrap();
    h.api.departments().delete(id).await.unwrap();

    let headers: Vec<Option<String>> = h
        .server
        .requests()
        .into_iter()
        .map(|request| request.authorization)
        .collect();
    assert_eq!(headers, vec![Some("Bearer abc".to_string()); 4]);
}

#[tokio::test]
async fn missing_token_still_sends_bearer_prefix() {
    let h = harness(None);
    h.api.courses().list(0, 5).await.unwrap();

    let header = h.server.requests()[0].authorization.clone().unwrap();
    assert_eq!(header.trim_end(), "Bearer");
}

#[tokio::test]
async fn forbidden_redirects_to_login_once_and_fails() {
    let h = harness(Some("stale"));
    h.server.require_token(true);

    let err = h.api.students().list(0, 5).await.unwrap_err();

    assert!(err.is_forbidden());
    assert_eq!(h.navigator.routes(), vec![Route::Login]);
}

#[tokio::test]
async fn forbidden_on_mutation_also_redirects() {
    let h = harness(None);
    h.server.require_token(true);

    let err = h.api.departments().create(&name_draft("Sales")).await.unwrap_err();

    assert!(matches!(err, ClientError::Forbidden));
    assert_eq!(h.navigator.routes(), vec![Route::Login]);
    assert!(h.server.records(ResourceKind::Departments).is_empty());
}

#[tokio::test]
async fn server_error_propagates_without_navigation() {
    let h = harness(Some("t"));
    h.server.fail_next(500);

    let err = h.api.departments().list(0, 5).await.unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("injected failure"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(h.navigator.routes().is_empty());
}

#[tokio::test]
async fn login_stores_token_used_by_later_calls() {
    let h = harness(None);
    h.server.add_user("admin", "secret");
    h.server.require_token(true);

    h.api
        .login(&Credentials::new("admin", "secret"))
        .await
        .expect("login");
    assert_eq!(h.tokens.token(), Some(issued_token("admin")));

    h.api.departments().list(0, 5).await.expect("authorized list");
    assert!(h.navigator.routes().is_empty());

    let requests = h.server.requests();
    assert_eq!(requests[0].path, "/authenticate");
    assert!(requests[0].authorization.is_none());
    assert_eq!(
        requests[1].authorization,
        Some(format!("Bearer {}", issued_token("admin")))
    );
}

#[tokio::test]
async fn choices_list_reference_candidates() {
    let h = harness(Some("t"));
    let sales = h.server.seed(ResourceKind::Departments, "Sales");
    let eng = h.server.seed(ResourceKind::Departments, "Engineering");

    let choices = h.api.choices(ResourceKind::Departments, 100).await.unwrap();

    let pairs: Vec<(EntityId, String)> = choices.into_iter().map(|c| (c.id, c.name)).collect();
    assert_eq!(
        pairs,
        vec![(sales, "Sales".to_string()), (eng, "Engineering".to_string())]
    );
    assert_eq!(h.server.requests()[0].query_param("size"), Some("100"));
}

#[test]
fn generic_client_matches_named_accessor() {
    let h = harness(None);
    assert_eq!(
        h.api.resource::<Departments>().collection_url(),
        format!("{}/api/{}", h.server.base_url(), Departments::KIND.path())
    );
}
