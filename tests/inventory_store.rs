use stockbook::{AppError, InventoryStore};

async fn store() -> InventoryStore {
    InventoryStore::open_in_memory().await.unwrap()
}

#[tokio::test]
async fn create_then_get_round_trips_fields() {
    let store = store().await;

    let id = store
        .create_item("Blue Widget", "04210000526", "WID-B", Some("A blue one"), 7)
        .await
        .unwrap();
    assert!(id > 0);

    let item = store.get_item_by_sku("WID-B").await.unwrap().unwrap();
    assert_eq!(item.id, id);
    assert_eq!(item.name, "Blue Widget");
    assert_eq!(item.upc, "04210000526");
    assert_eq!(item.sku, "WID-B");
    assert_eq!(item.short_description.as_deref(), Some("A blue one"));
    assert_eq!(item.quantity, 7);
}

#[tokio::test]
async fn create_trims_inputs_and_defaults_missing_description() {
    let store = store().await;

    store
        .create_item("  Widget  ", " 111 ", " A-1 ", None, 3)
        .await
        .unwrap();

    let item = store.get_item_by_sku("A-1").await.unwrap().unwrap();
    assert_eq!(item.name, "Widget");
    assert_eq!(item.upc, "111");
    assert_eq!(item.short_description, None);

    // Lookup with surrounding whitespace hits the same row.
    assert!(store.item_exists_by_sku("  A-1 ").await.unwrap());
}

#[tokio::test]
async fn duplicate_sku_or_upc_is_rejected_and_leaves_original_untouched() {
    let store = store().await;

    store.create_item("X", "111", "A", None, 0).await.unwrap();

    let dup_sku = store.create_item("Y", "222", "A", None, 5).await;
    assert!(matches!(dup_sku, Err(AppError::Conflict)));

    let dup_upc = store.create_item("Z", "111", "B", None, 5).await;
    assert!(matches!(dup_upc, Err(AppError::Conflict)));

    let original = store.get_item_by_sku("A").await.unwrap().unwrap();
    assert_eq!(original.name, "X");
    assert_eq!(original.quantity, 0);
    assert_eq!(store.list_all_items().await.unwrap().len(), 1);
}

#[tokio::test]
async fn existence_probes() {
    let store = store().await;
    store.create_item("X", "111", "A", None, 0).await.unwrap();

    assert!(store.item_exists_by_sku("A").await.unwrap());
    assert!(!store.item_exists_by_sku("B").await.unwrap());
    assert!(store.item_exists_by_upc("111").await.unwrap());
    assert!(!store.item_exists_by_upc("222").await.unwrap());
}

#[tokio::test]
async fn negative_create_quantity_is_clamped_to_zero() {
    let store = store().await;
    store.create_item("X", "111", "A", None, -4).await.unwrap();
    let item = store.get_item_by_sku("A").await.unwrap().unwrap();
    assert_eq!(item.quantity, 0);
}

#[tokio::test]
async fn adjust_floors_at_zero_and_reports_before_and_after() {
    let store = store().await;
    store.create_item("X", "111", "A", None, 2).await.unwrap();

    let change = store.adjust_quantity_by_sku("A", -1).await.unwrap().unwrap();
    assert_eq!((change.before, change.after), (2, 1));

    let change = store.adjust_quantity_by_sku("A", -5).await.unwrap().unwrap();
    assert_eq!((change.before, change.after), (1, 0));

    let change = store.adjust_quantity_by_sku("A", -1).await.unwrap().unwrap();
    assert_eq!((change.before, change.after), (0, 0));

    let change = store.adjust_quantity_by_sku("A", 3).await.unwrap().unwrap();
    assert_eq!((change.before, change.after), (0, 3));

    assert_eq!(store.get_item_by_sku("A").await.unwrap().unwrap().quantity, 3);
}

#[tokio::test]
async fn adjust_unknown_sku_is_a_no_op() {
    let store = store().await;
    assert!(store.adjust_quantity_by_sku("NOPE", -1).await.unwrap().is_none());
}

#[tokio::test]
async fn update_sets_absolute_value_with_clamp() {
    let store = store().await;
    store.create_item("X", "111", "A", None, 5).await.unwrap();

    let change = store.update_quantity_by_sku("A", 12).await.unwrap().unwrap();
    assert_eq!((change.before, change.after), (5, 12));

    let change = store.update_quantity_by_sku("A", -3).await.unwrap().unwrap();
    assert_eq!((change.before, change.after), (12, 0));

    assert!(store.update_quantity_by_sku("NOPE", 1).await.unwrap().is_none());
}

#[tokio::test]
async fn list_all_orders_by_name_case_sensitive() {
    let store = store().await;
    store.create_item("apple", "1", "S1", None, 1).await.unwrap();
    store.create_item("Banana", "2", "S2", None, 1).await.unwrap();

    let names: Vec<String> = store
        .list_all_items()
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    // BINARY collation puts uppercase first.
    assert_eq!(names, vec!["Banana", "apple"]);
}

#[tokio::test]
async fn search_is_case_insensitive_and_sorted() {
    let store = store().await;
    store.create_item("green Widget", "1", "S1", None, 1).await.unwrap();
    store.create_item("Blue Widget", "2", "S2", None, 1).await.unwrap();
    store.create_item("Gadget", "3", "S3", None, 1).await.unwrap();

    let names: Vec<String> = store
        .list_items_by_name("wid")
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, vec!["Blue Widget", "green Widget"]);
}

#[tokio::test]
async fn search_treats_wildcards_as_literals() {
    let store = store().await;
    store.create_item("100% Cotton", "1", "S1", None, 1).await.unwrap();
    store.create_item("100x Cotton", "2", "S2", None, 1).await.unwrap();
    store.create_item("a_b", "3", "S3", None, 1).await.unwrap();
    store.create_item("axb", "4", "S4", None, 1).await.unwrap();

    let hits = store.list_items_by_name("100%").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "100% Cotton");

    let hits = store.list_items_by_name("a_b").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "a_b");
}

#[tokio::test]
async fn zero_quantity_listing() {
    let store = store().await;
    store.create_item("Empty B", "1", "S1", None, 0).await.unwrap();
    store.create_item("Stocked", "2", "S2", None, 4).await.unwrap();
    store.create_item("empty A", "3", "S3", None, 0).await.unwrap();

    let names: Vec<String> = store
        .list_items_with_zero_qty()
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    // NOCASE ordering interleaves cases.
    assert_eq!(names, vec!["empty A", "Empty B"]);
}

#[tokio::test]
async fn deletes_report_rows_affected() {
    let store = store().await;
    let id = store.create_item("X", "111", "A", None, 1).await.unwrap();
    store.create_item("Y", "222", "B", None, 1).await.unwrap();

    assert_eq!(store.delete_by_sku("A").await.unwrap(), 1);
    assert_eq!(store.delete_by_sku("A").await.unwrap(), 0);
    assert!(store.get_item_by_sku("A").await.unwrap().is_none());

    // Deleting a missing sku leaves the table unchanged.
    assert_eq!(store.list_all_items().await.unwrap().len(), 1);

    assert_eq!(store.delete_item_by_id(id).await.unwrap(), 0);
    let id_b = store.get_item_by_sku("B").await.unwrap().unwrap().id;
    assert_eq!(store.delete_item_by_id(id_b).await.unwrap(), 1);
    assert!(store.list_all_items().await.unwrap().is_empty());
}
