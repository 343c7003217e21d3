/// End-to-end grouping passes against the in-memory product store
mod utils;

use std::sync::Arc;

use mebli_lib::modules::identity::domain::services::{SequenceSuffix, VariantMatcher};
use mebli_lib::modules::identity::{
    AssignmentMode, InMemoryProductRepository, ProductFilter, ProductId, ProductRepository,
    SeriesAssignmentService, SeriesToken,
};
use mebli_lib::shared::errors::AppError;
use utils::factories::{everest_batch, everest_ruleset, ProductFactory};

fn setup() -> (Arc<InMemoryProductRepository>, SeriesAssignmentService) {
    let repository = Arc::new(InMemoryProductRepository::from_records(everest_batch()));
    let service = SeriesAssignmentService::new(
        repository.clone(),
        VariantMatcher::standard(),
        Arc::new(SequenceSuffix::default()),
    );
    (repository, service)
}

async fn series_of(repository: &InMemoryProductRepository, id: &str) -> Option<SeriesToken> {
    repository
        .find_by_id(&ProductId::new(id))
        .await
        .unwrap()
        .and_then(|record| record.series)
}

#[tokio::test]
async fn apply_persists_series_for_the_collection() {
    let (repository, service) = setup();

    let outcome = service
        .assign_series(
            &ProductFilter::collection("everest"),
            &everest_ruleset(),
            AssignmentMode::Apply,
        )
        .await
        .unwrap();

    assert_eq!(outcome.groups.len(), 2);
    assert_eq!(outcome.singletons, vec![ProductId::new("p1")]);
    assert_eq!(outcome.pending_writes.len(), 5);

    let komod = series_of(&repository, "k1").await.unwrap();
    assert_eq!(komod.as_str(), "everest-комод-1600-1");
    assert_eq!(series_of(&repository, "k2").await, Some(komod.clone()));
    assert_eq!(series_of(&repository, "k3").await, Some(komod));

    let wardrobe = series_of(&repository, "w1").await.unwrap();
    assert_eq!(wardrobe.as_str(), "everest-шафа-соната-800-2");
    assert_eq!(series_of(&repository, "w2").await, Some(wardrobe));

    assert_eq!(series_of(&repository, "p1").await, None);
    // Same name, other collection: outside the filter
    assert_eq!(series_of(&repository, "v1").await, None);
}

#[tokio::test]
async fn rerun_on_unchanged_catalog_is_a_no_op() {
    let (repository, service) = setup();
    let filter = ProductFilter::collection("everest");
    let ruleset = everest_ruleset();

    service
        .assign_series(&filter, &ruleset, AssignmentMode::Apply)
        .await
        .unwrap();
    let before = repository.snapshot();

    let rerun = service
        .assign_series(&filter, &ruleset, AssignmentMode::Apply)
        .await
        .unwrap();

    assert!(rerun.pending_writes.is_empty());
    assert_eq!(rerun.report.reused_token_count, 2);
    assert_eq!(rerun.report.minted_token_count, 0);
    assert_eq!(repository.snapshot(), before);
}

#[tokio::test]
async fn new_member_joins_existing_series() {
    let (repository, service) = setup();
    let filter = ProductFilter::collection("everest");
    let ruleset = everest_ruleset();

    service
        .assign_series(&filter, &ruleset, AssignmentMode::Apply)
        .await
        .unwrap();
    let existing = series_of(&repository, "k1").await.unwrap();

    repository.insert(
        ProductFactory::new("k4", "Комод EVEREST 1600 Дуб крафт золотий + Графіт").build(),
    );
    let outcome = service
        .assign_series(&filter, &ruleset, AssignmentMode::Apply)
        .await
        .unwrap();

    assert_eq!(outcome.pending_writes.len(), 1);
    assert_eq!(outcome.pending_writes[0].product_id, ProductId::new("k4"));
    assert_eq!(series_of(&repository, "k4").await, Some(existing));
}

#[tokio::test]
async fn dry_run_leaves_storage_untouched() {
    let (repository, service) = setup();
    let before = repository.snapshot();

    let outcome = service
        .assign_series(&ProductFilter::all(), &everest_ruleset(), AssignmentMode::DryRun)
        .await
        .unwrap();

    // Without the filter v1 joins the chest of drawers
    assert_eq!(outcome.groups[0].member_ids.len(), 4);
    assert_eq!(outcome.pending_writes.len(), 6);
    assert_eq!(repository.snapshot(), before);
}

#[tokio::test]
async fn variant_lookup_after_grouping() {
    let (_, service) = setup();
    service
        .assign_series(
            &ProductFilter::collection("everest"),
            &everest_ruleset(),
            AssignmentMode::Apply,
        )
        .await
        .unwrap();

    let graphite = service
        .resolve_variant(&ProductId::new("k1"), "Сонома Графит")
        .await
        .unwrap();
    assert_eq!(graphite.map(|p| p.id), Some(ProductId::new("k2")));

    let golden = service
        .resolve_variant(&ProductId::new("k1"), "Дуб крафт золотой")
        .await
        .unwrap();
    assert_eq!(golden.map(|p| p.id), Some(ProductId::new("k3")));

    let missing = service
        .resolve_variant(&ProductId::new("k1"), "Венге")
        .await
        .unwrap();
    assert_eq!(missing, None);

    let links = service.variant_links(&ProductId::new("k1")).await.unwrap();
    let linked: Vec<Option<&str>> = links
        .iter()
        .map(|link| link.product_id.as_ref().map(|id| id.as_str()))
        .collect();
    assert_eq!(linked, vec![Some("k1"), Some("k2")]);
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let (_, service) = setup();

    let result = service.variant_links(&ProductId::new("nope")).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn filtered_pass_does_not_reuse_token_held_by_other_collection() {
    let old = "old-token";
    let repository = Arc::new(InMemoryProductRepository::from_records(vec![
        ProductFactory::new("a1", "Комод 1600 Сонома + Білий")
            .collection("a")
            .series(old)
            .build(),
        ProductFactory::new("a2", "Комод 1600 Сонома + Графіт")
            .collection("a")
            .series(old)
            .build(),
        ProductFactory::new("b1", "Стіл 900").collection("b").series(old).build(),
    ]));
    let service = SeriesAssignmentService::new(
        repository.clone(),
        VariantMatcher::standard(),
        Arc::new(SequenceSuffix::default()),
    );

    let outcome = service
        .assign_series(
            &ProductFilter::collection("a"),
            &everest_ruleset(),
            AssignmentMode::Apply,
        )
        .await
        .unwrap();

    assert!(!outcome.groups[0].reused);
    let fresh = series_of(&repository, "a1").await.unwrap();
    assert_ne!(fresh.as_str(), old);
    assert_eq!(series_of(&repository, "a2").await, Some(fresh));
    assert_eq!(series_of(&repository, "b1").await, Some(SeriesToken::new(old)));
}
