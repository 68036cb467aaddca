//! Resolution cascade tests against mocked upstreams.
//!
//! Every tier of the fact and image cascades is simulated as up, down or
//! misbehaving; the resolver must hand back a complete record in all cases
//! and must never touch the network for a blank name.

use faunad::config::Config;
use faunad::resolver::{AnimalInfoResolver, ResolveError};
use fauna_common::Provenance;
use httpmock::prelude::*;
use serde_json::json;

/// Point every upstream at the mock server. Paths are distinct so each
/// provider can be mocked independently.
fn test_config(server: &MockServer, api_key: Option<&str>) -> Config {
    Config {
        api_key: api_key.map(str::to_string),
        mock_mode: false,
        knowledge_query_url: server.url("/knowledge/query"),
        knowledge_chat_url: server.url("/knowledge/chat"),
        completion_url: server.url("/responses"),
        cat_api_url: server.url("/cats"),
        dog_api_url: server.url("/dogs"),
        media_api_url: server.url("/media"),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_resolve_survives_total_upstream_outage() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/knowledge/chat");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/media");
        then.status(503);
    });

    let resolver = AnimalInfoResolver::new(&test_config(&server, Some("gsk_test")));
    let record = resolver.resolve("dodo").await.unwrap();

    assert_eq!(record.source, Provenance::ReferenceTable);
    assert_eq!(record.name, "Dodo");
    assert!(record.description.contains("pas dans notre base"));
    assert!(!record.species.is_empty());
    assert!(!record.size.is_empty());
    assert!(!record.weight.is_empty());
    assert!(record.image.url.starts_with("data:image/svg+xml;base64,"));
}

#[tokio::test]
async fn test_knowledge_failure_falls_back_to_reference_table() {
    let server = MockServer::start();
    let chat_mock = server.mock(|when, then| {
        when.method(POST).path("/knowledge/chat");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/media");
        then.status(500);
    });

    let resolver = AnimalInfoResolver::new(&test_config(&server, Some("gsk_test")));
    let record = resolver.resolve("elephant").await.unwrap();

    // One attempt, no retries.
    chat_mock.assert();
    assert_eq!(record.source, Provenance::ReferenceTable);
    assert_eq!(record.species, "Loxodonta africana");
}

#[tokio::test]
async fn test_knowledge_success_stamps_remote_provenance() {
    let server = MockServer::start();
    let chat_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/knowledge/chat")
            .header("authorization", "Bearer gsk_test");
        then.status(200).json_body(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Voici les informations demandées:\n{\"name\": \"Dodo\", \"species\": \"Raphus cucullatus\", \"size\": \"1 m\", \"weight\": \"10-18 kg\", \"description\": \"Oiseau disparu de l'île Maurice.\"}"
                }
            }]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/media");
        then.status(200).json_body(json!({ "query": { "search": [] } }));
    });

    let resolver = AnimalInfoResolver::new(&test_config(&server, Some("gsk_test")));
    let record = resolver.resolve("dodo").await.unwrap();

    chat_mock.assert();
    assert_eq!(record.source, Provenance::RemoteKnowledgeSource);
    assert_eq!(record.species, "Raphus cucullatus");
    assert_eq!(record.weight, "10-18 kg");
    // Empty search results still end in a usable image.
    assert!(record.image.url.starts_with("data:image/svg+xml;base64,"));
}

#[tokio::test]
async fn test_blank_name_attempts_no_upstream_call() {
    let server = MockServer::start();
    let chat_mock = server.mock(|when, then| {
        when.method(POST).path("/knowledge/chat");
        then.status(200);
    });
    let cat_mock = server.mock(|when, then| {
        when.method(GET).path("/cats");
        then.status(200);
    });
    let media_mock = server.mock(|when, then| {
        when.method(GET).path("/media");
        then.status(200);
    });

    let resolver = AnimalInfoResolver::new(&test_config(&server, Some("gsk_test")));
    assert!(matches!(
        resolver.resolve("   ").await,
        Err(ResolveError::EmptyName)
    ));

    chat_mock.assert_hits(0);
    cat_mock.assert_hits(0);
    media_mock.assert_hits(0);
}

#[tokio::test]
async fn test_feline_provider_short_circuits_the_cascade() {
    let server = MockServer::start();
    let cat_mock = server.mock(|when, then| {
        when.method(GET).path("/cats");
        then.status(200)
            .json_body(json!([{ "url": "https://cdn2.thecatapi.com/images/abc.jpg" }]));
    });
    let media_mock = server.mock(|when, then| {
        when.method(GET).path("/media");
        then.status(200);
    });

    // No credential: facts come straight from the reference table.
    let resolver = AnimalInfoResolver::new(&test_config(&server, None));
    let record = resolver.resolve("chat").await.unwrap();

    cat_mock.assert();
    media_mock.assert_hits(0);
    assert_eq!(record.image.url, "https://cdn2.thecatapi.com/images/abc.jpg");
    assert_eq!(record.species, "Felis catus");
    assert_eq!(record.source, Provenance::ReferenceTable);
}

#[tokio::test]
async fn test_canine_provider_failure_falls_through_to_media_search() {
    let server = MockServer::start();
    let dog_mock = server.mock(|when, then| {
        when.method(GET).path("/dogs");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/media")
            .query_param("list", "search");
        then.status(200).json_body(json!({
            "query": { "search": [{ "title": "File:Canis familiaris.jpg" }] }
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/media")
            .query_param("prop", "imageinfo");
        then.status(200).json_body(json!({
            "query": { "pages": {
                "123": { "imageinfo": [{ "url": "https://upload.wikimedia.org/wikipedia/commons/c/c1/Canis_familiaris.jpg" }] }
            } }
        }));
    });

    let resolver = AnimalInfoResolver::new(&test_config(&server, None));
    let record = resolver.resolve("chien").await.unwrap();

    dog_mock.assert();
    assert_eq!(
        record.image.url,
        "https://upload.wikimedia.org/wikipedia/commons/c/c1/Canis_familiaris.jpg"
    );
}

#[tokio::test]
async fn test_off_domain_media_results_are_rejected() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/media")
            .query_param("list", "search");
        then.status(200).json_body(json!({
            "query": { "search": [{ "title": "File:Dodo specimen.jpg" }] }
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/media")
            .query_param("prop", "imageinfo");
        then.status(200).json_body(json!({
            "query": { "pages": {
                "9": { "imageinfo": [{ "url": "https://cdn.example.com/dodo.jpg" }] }
            } }
        }));
    });

    let resolver = AnimalInfoResolver::new(&test_config(&server, None));
    let record = resolver.resolve("dodo").await.unwrap();

    // The only candidate resolved outside the accepted domains, so the
    // cascade must end in the synthetic tier.
    assert!(record.image.url.starts_with("data:image/svg+xml;base64,"));
}

#[tokio::test]
async fn test_media_search_skips_non_image_titles() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/media")
            .query_param("list", "search");
        then.status(200).json_body(json!({
            "query": { "search": [
                { "title": "File:Dodo call.ogg" },
                { "title": "File:Dodo reconstruction.png" }
            ] }
        }));
    });
    let lookup_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/media")
            .query_param("prop", "imageinfo")
            .query_param("titles", "File:Dodo reconstruction.png");
        then.status(200).json_body(json!({
            "query": { "pages": {
                "42": { "imageinfo": [{ "url": "https://upload.wikimedia.org/wikipedia/commons/d/d2/Dodo.png" }] }
            } }
        }));
    });

    let resolver = AnimalInfoResolver::new(&test_config(&server, None));
    let record = resolver.resolve("dodo").await.unwrap();

    // The audio file never triggers a lookup; only the PNG does.
    lookup_mock.assert();
    assert_eq!(
        record.image.url,
        "https://upload.wikimedia.org/wikipedia/commons/d/d2/Dodo.png"
    );
}
