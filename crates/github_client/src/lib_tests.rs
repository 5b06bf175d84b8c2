//! Unit tests for the github_client crate.

use super::*; // Import items from lib.rs
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_ORG: &str = "test-org";

fn create_test_client(mock_server: &MockServer) -> GitHubClient {
    let octocrab = octocrab::Octocrab::builder()
        .base_uri(mock_server.uri())
        .unwrap()
        .personal_token("ghp_test_token".to_string())
        .build()
        .unwrap();
    GitHubClient::new(octocrab)
}

fn repo_json(name: &str) -> serde_json::Value {
    json!({
        "id": 123456,
        "name": name,
        "full_name": format!("{TEST_ORG}/{name}"),
        "url": format!("https://api.github.com/repos/{TEST_ORG}/{name}")
    })
}

fn link_header(base: &str, route: &str, links: &[(&str, u32)]) -> String {
    links
        .iter()
        .map(|(rel, page)| format!("<{base}{route}?per_page=100&page={page}>; rel=\"{rel}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[tokio::test]
async fn test_list_org_repositories_reads_cursor_from_link_header() {
    let mock_server = MockServer::start().await;
    let route = format!("/orgs/{TEST_ORG}/repos");
    let link = link_header(
        &mock_server.uri(),
        &route,
        &[("prev", 1), ("next", 3), ("last", 5), ("first", 1)],
    );

    Mock::given(method("GET"))
        .and(path(route.as_str()))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link.as_str())
                .set_body_json(json!([repo_json("alpha"), repo_json("-beta")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_org_repositories(TEST_ORG, 2, 100).await;

    if let Err(e) = &result {
        eprintln!("list_org_repositories error: {e:?}");
    }
    let page = result.unwrap();
    let names: Vec<&str> = page.repositories.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["alpha", "-beta"]);
    assert_eq!(page.repositories[0].full_name(), "test-org/alpha");
    assert_eq!(
        page.cursor,
        PageCursor {
            next: Some(3),
            prev: Some(1),
            last: Some(5),
        }
    );
}

#[tokio::test]
async fn test_list_org_repositories_last_page_has_no_next() {
    let mock_server = MockServer::start().await;
    let route = format!("/orgs/{TEST_ORG}/repos");
    let link = link_header(&mock_server.uri(), &route, &[("prev", 1), ("first", 1)]);

    Mock::given(method("GET"))
        .and(path(route.as_str()))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link.as_str())
                .set_body_json(json!([repo_json("omega")])),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let page = client
        .list_org_repositories(TEST_ORG, 2, 100)
        .await
        .expect("listing should succeed");

    assert_eq!(page.repositories.len(), 1);
    assert_eq!(page.cursor.next, None);
    assert_eq!(page.cursor.last, None);
    assert_eq!(page.cursor.prev, Some(1));
}

#[tokio::test]
async fn test_list_org_repositories_without_link_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/orgs/{TEST_ORG}/repos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo_json("only")])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let page = client
        .list_org_repositories(TEST_ORG, 1, 100)
        .await
        .expect("listing should succeed");

    assert_eq!(page.repositories.len(), 1);
    assert_eq!(page.cursor, PageCursor::default());
}

#[tokio::test]
async fn test_list_org_repositories_unknown_org() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/missing-org/repos"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest/repos/repos#list-organization-repositories"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_org_repositories("missing-org", 1, 100).await;

    match result {
        Err(Error::NotFound(resource)) => assert_eq!(resource, "missing-org"),
        other => panic!("Expected NotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_org_repositories_forbidden_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/orgs/{TEST_ORG}/repos")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "API rate limit exceeded",
            "documentation_url": "https://docs.github.com/rest/overview/resources-in-the-rest-api#rate-limiting"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_org_repositories(TEST_ORG, 1, 100).await;

    match result {
        Err(err @ Error::Api { .. }) => {
            let message = err.to_string();
            assert!(
                message.starts_with("Failed to list organization repositories"),
                "unexpected message: {message}"
            );
        }
        other => panic!("Expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_search_repositories_success() {
    let mock_server = MockServer::start().await;
    let query = format!("org:{TEST_ORG} gitops");
    let link = link_header(
        &mock_server.uri(),
        "/search/repositories",
        &[("next", 2), ("last", 2)],
    );

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", query.as_str()))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link.as_str())
                .set_body_json(json!({
                    "total_count": 2,
                    "incomplete_results": false,
                    "items": [repo_json("gitops-one"), repo_json("gitops-two")]
                })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.search_repositories(&query, 1, 100).await;

    if let Err(e) = &result {
        eprintln!("search_repositories error: {e:?}");
    }
    let page = result.unwrap();
    let names: Vec<&str> = page.repositories.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["gitops-one", "gitops-two"]);
    assert_eq!(page.cursor.next, Some(2));
}

#[tokio::test]
async fn test_search_repositories_validation_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "errors": [{ "resource": "Search", "field": "q", "code": "invalid" }],
            "documentation_url": "https://docs.github.com/v3/search"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.search_repositories("org:test-org", 1, 100).await;

    assert!(matches!(result, Err(Error::Api { .. })));
}

#[tokio::test]
async fn test_delete_repository_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/repos/{TEST_ORG}/-broken-repo")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.delete_repository(TEST_ORG, "-broken-repo").await;

    if let Err(e) = &result {
        eprintln!("delete_repository error: {e:?}");
    }
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_delete_repository_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/repos/{TEST_ORG}/gone")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest/repos/repos#delete-a-repository"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.delete_repository(TEST_ORG, "gone").await;

    match result {
        Err(Error::NotFound(resource)) => assert_eq!(resource, "test-org/gone"),
        other => panic!("Expected NotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_repository_permission_denied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/repos/{TEST_ORG}/protected")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Must have admin rights to Repository.",
            "documentation_url": "https://docs.github.com/rest/repos/repos#delete-a-repository"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.delete_repository(TEST_ORG, "protected").await;

    assert!(matches!(result, Err(Error::Api { .. })));
}

#[tokio::test]
async fn test_create_token_client_without_token() {
    let result = create_token_client(None);

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_token_client_with_token() {
    let token = SecretString::from("ghp_test_token".to_string());

    let result = create_token_client(Some(&token));

    assert!(result.is_ok());
}
