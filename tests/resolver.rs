use filmscore::config::{build_client, SiteConfig};
use filmscore::infrastructure::{HttpFetcher, MemoryStore, ScoreSite};
use filmscore::services::cache::CacheStore;
use filmscore::{Resolver, ResolverOptions, ScorePair};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODERN_PAGE: &str = r#"<html><body>
  <div class="c-siteReviewScore c-siteReviewScore_green" title="Metascore 81 out of 100"><span>81</span></div>
  <div class="c-siteReviewScore c-siteReviewScore_user" title="User score 7.6 out of 10"><span>7.6</span></div>
</body></html>"#;

const USER_ONLY_PAGE: &str = r#"<html><body>
  <div class="c-siteReviewScore c-siteReviewScore_user" title="User score 6.8 out of 10"><span>6.8</span></div>
</body></html>"#;

const LEGACY_PAGE: &str = r#"<span class="metascore_w larger movie positive">66</span>"#;

const NO_SCORES_PAGE: &str = "<html><body><h1>Napoleon</h1><p>No reviews yet</p></body></html>";

struct Harness {
    server: MockServer,
    backend: Arc<MemoryStore>,
}

impl Harness {
    async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            backend: Arc::new(MemoryStore::new()),
        }
    }

    fn resolver(&self) -> Resolver {
        let site = SiteConfig {
            base_url: self.server.uri(),
            mirror_prefix: format!("{}/proxy/", self.server.uri()),
            ..SiteConfig::default()
        };
        let client = build_client(&site, Duration::from_secs(5)).unwrap();
        let fetcher = Arc::new(HttpFetcher::new(client));
        let site = Arc::new(ScoreSite::new(fetcher, site));

        Resolver::with_site(self.cache(), site, ResolverOptions::default())
    }

    fn cache(&self) -> CacheStore {
        CacheStore::new(self.backend.clone())
    }

    async fn request_count(&self) -> usize {
        self.server.received_requests().await.unwrap().len()
    }
}

fn page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(body)
}

#[tokio::test]
async fn direct_slug_page_resolves_noisy_title() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/avatar/"))
        .respond_with(page(MODERN_PAGE))
        .expect(1)
        .mount(&harness.server)
        .await;

    let scores = harness
        .resolver()
        .resolve("Avatar: El Camino del Agua (2022) 3D Subtitulada")
        .await;

    assert_eq!(scores, ScorePair::new(Some(81), Some(7.6)));
}

#[tokio::test]
async fn mirror_is_used_when_primary_fails() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/matrix/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/proxy/.*/movie/matrix/$"))
        .respond_with(page("Title: The Matrix\n\nMetascore: 73\n\nUser Score 9.1\n"))
        .expect(1)
        .mount(&harness.server)
        .await;

    let scores = harness.resolver().resolve("The Matrix").await;

    assert_eq!(scores, ScorePair::new(Some(73), Some(9.1)));
}

#[tokio::test]
async fn search_fallback_result_is_returned_and_cached() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/napoleon/"))
        .respond_with(page(NO_SCORES_PAGE))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/napoleon/"))
        .and(query_param("category", "2"))
        .respond_with(page(
            r#"<a href="/browse/movie/">Movies</a><a href="/movie/napoleon-2023/">Napoleon</a>"#,
        ))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/napoleon-2023/"))
        .respond_with(page(USER_ONLY_PAGE))
        .expect(1)
        .mount(&harness.server)
        .await;

    let resolver = harness.resolver();
    let expected = ScorePair::new(None, Some(6.8));

    assert_eq!(resolver.resolve("Napoleón Subtitulada").await, expected);
    assert_eq!(
        harness.cache().get("napoleon").await.map(|entry| entry.scores),
        Some(expected)
    );

    // Served from the cache; the mocks above expect exactly one hit each.
    assert_eq!(resolver.resolve("NAPOLEON (2023)").await, expected);
}

#[tokio::test]
async fn legacy_search_path_is_tried_after_primary_search() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path("/search/wonka/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/movie/wonka/results"))
        .respond_with(page(
            r#"<ul class="search_results"><li><a href="/movie/wonka-2023">Wonka</a></li></ul>"#,
        ))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/wonka-2023/"))
        .respond_with(page(LEGACY_PAGE))
        .expect(1)
        .mount(&harness.server)
        .await;

    let scores = harness.resolver().resolve("Wonka Doblada").await;

    assert_eq!(scores, ScorePair::new(Some(66), None));
}

#[tokio::test]
async fn nothing_found_is_cached_without_refetching() {
    let harness = Harness::start().await;
    let resolver = harness.resolver();

    assert_eq!(resolver.resolve("Película Inexistente").await, ScorePair::empty());
    let after_first = harness.request_count().await;
    // Detail page and its mirror, then four search variants.
    assert_eq!(after_first, 6);

    assert_eq!(resolver.resolve("pelicula inexistente").await, ScorePair::empty());
    assert_eq!(harness.request_count().await, after_first);
}

#[tokio::test]
async fn blank_title_makes_no_requests() {
    let harness = Harness::start().await;

    assert_eq!(harness.resolver().resolve("3D Subtitulada").await, ScorePair::empty());
    assert_eq!(harness.request_count().await, 0);
}
