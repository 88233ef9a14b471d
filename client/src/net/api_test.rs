use super::*;

#[test]
fn user_exists_endpoint_formats_expected_path() {
    assert_eq!(user_exists_endpoint("u123"), "/api/users/u123/exists");
}

#[test]
fn status_error_prefers_server_body() {
    let body = ApiError::new("DB_ERROR", "user lookup failed");
    assert_eq!(status_error(500, Some(body.clone())), body);
}

#[test]
fn status_error_falls_back_to_http_code() {
    assert_eq!(status_error(502, None), ApiError::new("HTTP_502", "request failed"));
}

#[test]
fn network_error_keeps_transport_message() {
    assert_eq!(network_error("connection refused"), ApiError::new("NETWORK", "connection refused"));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn http_lookup_is_unavailable_outside_the_browser() {
    let credential = Credential { username: "alice".to_owned(), password: "secret".to_owned() };
    let result = futures::executor::block_on(HttpLookup.check_user(&credential));
    assert_eq!(result.unwrap_err().code, "UNAVAILABLE");
    let exists = futures::executor::block_on(HttpLookup.user_exists("42"));
    assert!(exists.is_err());
}
