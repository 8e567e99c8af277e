use serde_json::json;

use super::*;

#[test]
fn join_path_strips_trailing_slash() {
    assert_eq!(
        join_path("https://api.tuki.test/productos/", "12"),
        "https://api.tuki.test/productos/12"
    );
}

#[test]
fn join_path_encodes_like_a_browser() {
    assert_eq!(
        join_path("https://api.tuki.test/productos", "a b/c"),
        "https://api.tuki.test/productos/a%20b%2Fc"
    );
    assert_eq!(encode_segment("x-1_(ok)"), "x-1_(ok)");
}

#[test]
fn embedded_message_prefers_mensaje() {
    assert_eq!(
        embedded_message(&json!({ "mensaje": " Sin stock ", "error": "x" })),
        Some("Sin stock".to_string())
    );
    assert_eq!(
        embedded_message(&json!({ "error": "Bad Request" })),
        Some("Bad Request".to_string())
    );
    assert_eq!(embedded_message(&json!({ "mensaje": 4 })), None);
    assert_eq!(embedded_message(&json!([1])), None);
}

#[test]
fn confirmation_message_reads_json_or_text() {
    assert_eq!(
        confirmation_message(r#"{"mensaje":"Categoría eliminada"}"#),
        Some("Categoría eliminada".to_string())
    );
    assert_eq!(
        confirmation_message("  Producto eliminado \n"),
        Some("Producto eliminado".to_string())
    );
    assert_eq!(confirmation_message("\"Listo\""), Some("Listo".to_string()));
    assert_eq!(confirmation_message(r#"{"id":3}"#), None);
    assert_eq!(confirmation_message("   "), None);
}

#[test]
fn parse_url_rejects_relative_paths() {
    let err = parse_url("/api/productos").unwrap_err();
    assert!(matches!(err, ApiError::InvalidUrl { .. }));
}

#[test]
fn client_builds_with_and_without_timeout() {
    assert!(ApiClient::new("tuki-test", None).is_ok());
    assert!(ApiClient::new("tuki-test", Some(Duration::from_secs(5))).is_ok());
}
