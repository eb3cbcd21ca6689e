#![allow(clippy::unwrap_used)]
// End-to-end tests for `Catalog` against a wiremock catalog.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rickdex_api::CatalogClient;
use rickdex_core::{
    CachePolicy, CacheStats, Catalog, CatalogConfig, Clock, CoreError, EntityKind, ListView,
    ManualClock, PageInfo,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Arc<ManualClock>, Catalog) {
    let server = MockServer::start().await;
    let base = format!("{}/api/", server.uri());
    let clock = Arc::new(ManualClock::new());
    let config = CatalogConfig {
        base_url: Url::parse(&base).unwrap(),
        cache: CachePolicy {
            ttl: Duration::from_secs(300),
            max_entries: 50,
        },
        preview_limit: 2,
        ..CatalogConfig::default()
    };
    let client = CatalogClient::from_reqwest(&base, reqwest::Client::new()).unwrap();
    let catalog = Catalog::from_client(config, client, Arc::clone(&clock) as Arc<dyn Clock>);
    (server, clock, catalog)
}

fn character(id: u32, name: &str, episodes: &[u32]) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": "Alive",
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": { "name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1" },
        "location": { "name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3" },
        "image": format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        "episode": episodes
            .iter()
            .map(|e| format!("https://rickandmortyapi.com/api/episode/{e}"))
            .collect::<Vec<_>>(),
        "url": format!("https://rickandmortyapi.com/api/character/{id}"),
        "created": "2017-11-04T18:48:46.250Z"
    })
}

fn episode(id: u32, name: &str, code: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "air_date": "December 2, 2013",
        "episode": code,
        "characters": [
            "https://rickandmortyapi.com/api/character/1",
            "https://rickandmortyapi.com/api/character/2",
            "https://rickandmortyapi.com/api/character/3"
        ],
        "url": format!("https://rickandmortyapi.com/api/episode/{id}"),
        "created": "2017-11-10T12:56:33.798Z"
    })
}

fn page(count: i64, pages: i64, results: Vec<Value>) -> Value {
    json!({
        "info": { "count": count, "pages": pages, "next": null, "prev": null },
        "results": results
    })
}

fn episode_urls(ids: impl IntoIterator<Item = u32>) -> Vec<String> {
    ids.into_iter()
        .map(|n| format!("https://rickandmortyapi.com/api/episode/{n}"))
        .collect()
}

// ── List caching ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_is_served_from_cache() {
    let (server, _, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(1, 1, vec![character(1, "Rick Sanchez", &[1])])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let view = ListView::new(EntityKind::Character);
    let first = catalog.list(EntityKind::Character, &view.request()).await.unwrap();
    let second = catalog.list(EntityKind::Character, &view.request()).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.items[0].name(), "Rick Sanchez");
    assert_eq!(catalog.cache_stats().lists, 1);
}

#[tokio::test]
async fn test_list_refetches_after_ttl() {
    let (server, clock, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/episode"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(1, 1, vec![episode(1, "Pilot", "S01E01")])),
        )
        .expect(2)
        .mount(&server)
        .await;

    let view = ListView::new(EntityKind::Episode);
    catalog.list(EntityKind::Episode, &view.request()).await.unwrap();
    clock.advance(Duration::from_secs(299));
    catalog.list(EntityKind::Episode, &view.request()).await.unwrap();
    clock.advance(Duration::from_secs(1));
    catalog.list(EntityKind::Episode, &view.request()).await.unwrap();
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let (server, _, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/location"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/location"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 1, vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let view = ListView::new(EntityKind::Location);
    let err = catalog
        .list(EntityKind::Location, &view.request())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Upstream { status: Some(500), .. }));
    assert_eq!(err.to_error_body().error, "API Error 500: boom");

    let retry = catalog.list(EntityKind::Location, &view.request()).await;
    assert!(retry.is_ok());
}

#[tokio::test]
async fn test_bare_404_on_list_is_an_error() {
    let (server, _, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/character"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Cannot GET /api/character"))
        .mount(&server)
        .await;

    let view = ListView::new(EntityKind::Character);
    let err = catalog
        .list(EntityKind::Character, &view.request())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Upstream { status: Some(404), .. }));
    assert_eq!(catalog.cache_stats().lists, 0);
}

#[tokio::test]
async fn test_invalidate_expired_prunes_both_caches() {
    let (server, clock, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/episode"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(1, 1, vec![episode(1, "Pilot", "S01E01")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/episode/1,2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            episode(1, "Pilot", "S01E01"),
            episode(2, "Lawnmower Dog", "S01E02")
        ])))
        .mount(&server)
        .await;

    let view = ListView::new(EntityKind::Episode);
    catalog.list(EntityKind::Episode, &view.request()).await.unwrap();
    clock.advance(Duration::from_secs(200));
    let resolved = catalog.resolve_batch(&episode_urls(1..=2), 10).await;
    assert_eq!(resolved.entities.len(), 2);
    assert_eq!(catalog.cache_stats(), CacheStats { lists: 1, lookups: 1 });

    assert_eq!(catalog.invalidate_expired(), 0);

    clock.advance(Duration::from_secs(100));
    assert_eq!(catalog.invalidate_expired(), 1);
    assert_eq!(catalog.cache_stats(), CacheStats { lists: 0, lookups: 1 });

    clock.advance(Duration::from_secs(200));
    assert_eq!(catalog.invalidate_expired(), 1);
    assert_eq!(catalog.cache_stats(), CacheStats { lists: 0, lookups: 0 });
}

// ── Pagination reconciliation ───────────────────────────────────────

#[tokio::test]
async fn test_narrowed_filter_resets_page() {
    let (server, _, catalog) = setup().await;

    let results: Vec<Value> = (1..=5).map(|n| character(n, "Rick", &[1])).collect();
    for requested in ["2", "1"] {
        Mock::given(method("GET"))
            .and(path("/api/character"))
            .and(query_param("status", "alive"))
            .and(query_param("page", requested))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(5, 1, results.clone())))
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut view = ListView::new(EntityKind::Character);
    view.set_filter("status", "alive").unwrap();
    *view.pager_mut() = rickdex_core::Pager::starting_at(2);
    assert_eq!(view.page(), 2);

    let loaded = catalog.load_view(&mut view).await.unwrap();

    assert_eq!(loaded.reset_from, Some(2));
    assert_eq!(view.page(), 1);
    assert_eq!(view.pager().total_pages(), 1);
    assert_eq!(loaded.response.page_info.current_page, 1);
    assert_eq!(loaded.response.items.len(), 5);
}

#[tokio::test]
async fn test_no_matches_is_an_empty_page() {
    let (server, _, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("name", "zzzz"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "There is nothing here" })),
        )
        .mount(&server)
        .await;

    let mut view = ListView::new(EntityKind::Character);
    view.set_filter("name", "zzzz").unwrap();
    *view.pager_mut() = rickdex_core::Pager::starting_at(3);

    let loaded = catalog.load_view(&mut view).await.unwrap();
    assert!(loaded.response.is_empty());
    assert_eq!(loaded.response.page_info, PageInfo::empty(1));
    assert_eq!(loaded.reset_from, Some(3));
    assert_eq!(view.page(), 1);
    assert_eq!(catalog.cache_stats().lists, 0);
}

#[tokio::test]
async fn test_in_range_page_is_kept() {
    let (server, _, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/episode"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(51, 3, vec![episode(21, "The Wedding Squanchers", "S02E10")])),
        )
        .mount(&server)
        .await;

    let mut view = ListView::new(EntityKind::Episode);
    *view.pager_mut() = rickdex_core::Pager::starting_at(2);
    let loaded = catalog.load_view(&mut view).await.unwrap();

    assert_eq!(loaded.reset_from, None);
    assert_eq!(view.page(), 2);
    assert!(view.pager().has_next());
    assert!(view.pager_mut().next());
    assert!(!view.pager_mut().next());
}

// ── Batch resolution ────────────────────────────────────────────────

#[tokio::test]
async fn test_empty_batch_makes_no_request() {
    let (server, _, catalog) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    for n in [0, 1, 10, usize::MAX] {
        let resolved = catalog.resolve_batch(&[], n).await;
        assert!(resolved.is_empty());
        assert!(resolved.notice.is_none());
    }
}

#[tokio::test]
async fn test_batch_truncates_to_max_count() {
    let (server, _, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/episode/1,2,3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            episode(1, "Pilot", "S01E01"),
            episode(2, "Lawnmower Dog", "S01E02"),
            episode(3, "Anatomy Park", "S01E03")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let resolved = catalog.resolve_batch(&episode_urls(1..=12), 3).await;
    let names: Vec<&str> = resolved.entities.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["Pilot", "Lawnmower Dog", "Anatomy Park"]);
}

#[tokio::test]
async fn test_single_id_bare_object_is_normalized() {
    let (server, _, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/episode/28"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(episode(28, "The Ricklantis Mixup", "S03E07")),
        )
        .mount(&server)
        .await;

    let refs = vec![
        "https://rickandmortyapi.com/api/episode/28".to_owned(),
        "https://rickandmortyapi.com/api/episode/".to_owned(),
    ];
    let resolved = catalog.resolve_batch(&refs, 10).await;

    assert_eq!(resolved.entities.len(), 1);
    assert_eq!(resolved.entities[0].id(), 28);
    assert_eq!(resolved.entities[0].kind(), EntityKind::Episode);
}

#[tokio::test]
async fn test_batch_failure_is_a_notice() {
    let (server, _, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/character/1,2"))
        .respond_with(ResponseTemplate::new(502))
        .expect(2)
        .mount(&server)
        .await;

    let refs = vec![
        "https://rickandmortyapi.com/api/character/1".to_owned(),
        "https://rickandmortyapi.com/api/character/2".to_owned(),
    ];
    for _ in 0..2 {
        let resolved = catalog.resolve_batch(&refs, 10).await;
        assert!(resolved.entities.is_empty());
        let notice = resolved.notice.unwrap();
        assert!(notice.contains("characters"), "unexpected notice: {notice}");
    }
}

#[tokio::test]
async fn test_batches_are_cached() {
    let (server, _, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/episode/1,2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            episode(1, "Pilot", "S01E01"),
            episode(2, "Lawnmower Dog", "S01E02")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let refs = episode_urls(1..=2);
    let first = catalog.resolve_batch(&refs, 10).await;
    let second = catalog.resolve_batch(&refs, 10).await;
    assert_eq!(first, second);
    assert_eq!(catalog.cache_stats().lookups, 1);
}

// ── Detail & previews ───────────────────────────────────────────────

#[tokio::test]
async fn test_entity_detail_and_episodes() {
    let (server, _, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/character/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(character(1, "Rick Sanchez", &[1, 2, 3])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/episode/1,2,3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            episode(1, "Pilot", "S01E01"),
            episode(2, "Lawnmower Dog", "S01E02"),
            episode(3, "Anatomy Park", "S01E03")
        ])))
        .mount(&server)
        .await;

    let rick = catalog.entity(EntityKind::Character, 1).await.unwrap();
    assert_eq!(rick.name(), "Rick Sanchez");

    let episodes = catalog.resolve_field(&rick, "episode").await;
    assert_eq!(episodes.entities.len(), 3);
    assert!(episodes.notice.is_none());
}

#[tokio::test]
async fn test_entity_not_found() {
    let (server, _, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/character/9999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Character not found" })),
        )
        .mount(&server)
        .await;

    let err = catalog.entity(EntityKind::Character, 9999).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::NotFound {
            kind: EntityKind::Character,
            id: 9999
        }
    ));
}

#[tokio::test]
async fn test_previews_follow_item_order_and_limit() {
    let (server, _, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/episode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            2,
            1,
            vec![episode(1, "Pilot", "S01E01"), episode(2, "Lawnmower Dog", "S01E02")],
        )))
        .mount(&server)
        .await;
    // preview_limit is 2: only the first two cast members are requested.
    Mock::given(method("GET"))
        .and(path("/api/character/1,2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            character(1, "Rick Sanchez", &[1]),
            character(2, "Morty Smith", &[1])
        ])))
        .mount(&server)
        .await;

    let mut view = ListView::new(EntityKind::Episode);
    let loaded = catalog.load_view(&mut view).await.unwrap();
    let previews = catalog.previews(&loaded.response.items).await;

    assert_eq!(previews.len(), 2);
    for preview in &previews {
        assert!(preview.notice.is_none());
        let names: Vec<&str> = preview.entities.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Rick Sanchez", "Morty Smith"]);
    }
}
