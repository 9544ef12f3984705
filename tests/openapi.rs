use cardlist::openapi::ApiDoc;
use utoipa::OpenApi;

#[test]
fn documents_every_route() {
    let doc = ApiDoc::openapi();
    for path in ["/card", "/card/{id}", "/list", "/list/{id}"] {
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
    let json = doc.to_json().unwrap();
    assert!(json.contains("\"bearer\""));
    assert!(json.contains("cardIds"));
}
