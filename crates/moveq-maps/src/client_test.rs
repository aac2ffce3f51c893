use super::*;

fn test_client(base_url: &str) -> DistanceMatrixClient {
    DistanceMatrixClient::new(&ProviderConfig {
        api_key: Some("test-key".to_string()),
        base_url: base_url.to_string(),
        timeout_secs: 5,
        units: Units::Imperial,
    })
    .expect("client construction should not fail")
}

fn parse(body: &serde_json::Value) -> DistanceMatrixResponse {
    serde_json::from_value(body.clone()).expect("valid response shape")
}

#[test]
fn build_url_constructs_query_string() {
    let client = test_client("https://maps.example.com/distancematrix/json");
    let url = client.build_url("test-key", "Austin, TX", "Dallas, TX");
    assert_eq!(
        url.as_str(),
        "https://maps.example.com/distancematrix/json?origins=Austin%2C+TX&destinations=Dallas%2C+TX&mode=driving&units=imperial&key=test-key"
    );
}

#[test]
fn build_url_encodes_special_characters() {
    let client = test_client("https://maps.example.com/json");
    let url = client.build_url("k", "12 Elm & 3rd", "x");
    assert!(
        url.as_str().contains("12+Elm+%26+3rd"),
        "origin should be percent-encoded: {url}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = DistanceMatrixClient::new(&ProviderConfig {
        api_key: None,
        base_url: "not a url".to_string(),
        timeout_secs: 5,
        units: Units::Metric,
    });
    assert!(matches!(result, Err(MapsError::InvalidBaseUrl { .. })));
}

#[test]
fn extract_distance_reads_first_element() {
    let body = serde_json::json!({
        "status": "OK",
        "rows": [{ "elements": [{
            "status": "OK",
            "distance": { "text": "12.3 mi", "value": 19795 },
            "duration": { "text": "20 mins", "value": 1200 }
        }]}]
    });
    let distance = DistanceMatrixClient::extract_distance(&parse(&body)).unwrap();
    assert_eq!(distance.text, "12.3 mi");
}

#[test]
fn extract_distance_rejects_non_ok_envelope() {
    let body = serde_json::json!({
        "status": "REQUEST_DENIED",
        "error_message": "The provided API key is invalid."
    });
    let err = DistanceMatrixClient::extract_distance(&parse(&body)).unwrap_err();
    assert!(
        matches!(err, MapsError::RequestStatus { ref status, .. } if status == "REQUEST_DENIED")
    );
    assert!(!err.is_route_not_found());
}

#[test]
fn extract_distance_rejects_non_ok_element() {
    let body = serde_json::json!({
        "status": "OK",
        "rows": [{ "elements": [{ "status": "NOT_FOUND" }] }]
    });
    let err = DistanceMatrixClient::extract_distance(&parse(&body)).unwrap_err();
    assert!(matches!(err, MapsError::ElementStatus(ref s) if s == "NOT_FOUND"));
    assert!(err.is_route_not_found());
}

#[test]
fn extract_distance_handles_empty_rows() {
    let body = serde_json::json!({ "status": "OK", "rows": [] });
    let err = DistanceMatrixClient::extract_distance(&parse(&body)).unwrap_err();
    assert!(err.is_route_not_found());
}

#[test]
fn provider_config_debug_redacts_key() {
    let config = ProviderConfig {
        api_key: Some("secret".to_string()),
        base_url: "https://maps.example.com".to_string(),
        timeout_secs: 5,
        units: Units::Imperial,
    };
    assert!(!format!("{config:?}").contains("secret"));
}
