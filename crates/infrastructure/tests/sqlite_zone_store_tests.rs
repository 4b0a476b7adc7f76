mod helpers;

use helpers::create_test_pool;
use zonestore_dns_application::ports::ZoneStore;
use zonestore_dns_domain::config::StorageConfig;
use zonestore_dns_domain::dns_record::SoaPayload;
use zonestore_dns_domain::{DomainError, RecordPayload, RecordType, ZoneRecord, CLASS_INET};
use zonestore_dns_infrastructure::database::create_pool;
use zonestore_dns_infrastructure::repositories::SqliteZoneStore;

async fn create_test_store() -> SqliteZoneStore {
    SqliteZoneStore::new(create_test_pool().await)
}

#[tokio::test]
async fn test_list_zones_empty() {
    let store = create_test_store().await;
    assert!(store.list_zones().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_and_list_zones() {
    let store = create_test_store().await;

    store.create_zone("b.zone.").await.unwrap();
    store.create_zone("a.zone.").await.unwrap();

    assert_eq!(store.list_zones().await.unwrap(), vec!["a.zone.", "b.zone."]);
}

#[tokio::test]
async fn test_create_zone_writes_default_soa() {
    let store = create_test_store().await;
    store.create_zone("test.zone.").await.unwrap();

    let rows = store
        .get_records("test.zone.", "@", RecordType::SOA, CLASS_INET)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].payload().unwrap(),
        RecordPayload::SOA(SoaPayload::zone_default())
    );
}

#[tokio::test]
async fn test_create_zone_twice_keeps_existing_soa() {
    let store = create_test_store().await;
    store.create_zone("test.zone.").await.unwrap();

    let custom = RecordPayload::SOA(SoaPayload {
        ns: "ns1.test.zone.".to_string(),
        mbox: "admin.test.zone.".to_string(),
        ..SoaPayload::zone_default()
    });
    store
        .insert_record("test.zone.", &ZoneRecord::from_payload("@", &custom))
        .await
        .unwrap();
    store.create_zone("test.zone.").await.unwrap();

    let rows = store
        .get_records("test.zone.", "@", RecordType::SOA, CLASS_INET)
        .await
        .unwrap();
    assert_eq!(rows[0].payload().unwrap(), custom);
    assert_eq!(store.list_zones().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_soa_insert_creates_zone() {
    let store = create_test_store().await;
    let soa = RecordPayload::SOA(SoaPayload::synthesized("new.zone.", 60));

    store
        .insert_record("new.zone.", &ZoneRecord::from_payload("@", &soa))
        .await
        .unwrap();

    assert_eq!(store.list_zones().await.unwrap(), vec!["new.zone."]);
}

#[tokio::test]
async fn test_insert_and_get_record() {
    let store = create_test_store().await;
    store.create_zone("test.zone.").await.unwrap();

    let record = ZoneRecord::new("record.", RecordType::A, r#"{"ip":"1.1.1.1"}"#);
    let id = store.insert_record("test.zone.", &record).await.unwrap();
    assert!(id > 0);

    let rows = store
        .get_records("test.zone.", "record.", RecordType::A, CLASS_INET)
        .await
        .unwrap();

    assert_eq!(rows, vec![record]);
}

#[tokio::test]
async fn test_get_records_filters_on_full_key() {
    let store = create_test_store().await;
    store
        .insert_record(
            "test.zone.",
            &ZoneRecord::new("www.", RecordType::A, r#"{"ip":"10.0.0.1"}"#),
        )
        .await
        .unwrap();
    store
        .insert_record(
            "test.zone.",
            &ZoneRecord::new("www.", RecordType::AAAA, r#"{"ip":"::1"}"#),
        )
        .await
        .unwrap();
    store
        .insert_record(
            "other.zone.",
            &ZoneRecord::new("www.", RecordType::A, r#"{"ip":"10.0.0.2"}"#),
        )
        .await
        .unwrap();
    store
        .insert_record(
            "test.zone.",
            &ZoneRecord::new("www.", RecordType::A, r#"{"ip":"10.0.0.3"}"#).with_class(3),
        )
        .await
        .unwrap();

    let rows = store
        .get_records("test.zone.", "www.", RecordType::A, CLASS_INET)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(&*rows[0].rdata, r#"{"ip":"10.0.0.1"}"#);

    let chaos = store
        .get_records("test.zone.", "www.", RecordType::A, 3)
        .await
        .unwrap();
    assert_eq!(chaos.len(), 1);
    assert_eq!(chaos[0].class, 3);

    let missing = store
        .get_records("test.zone.", "mail.", RecordType::A, CLASS_INET)
        .await
        .unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn test_rows_keep_insertion_order_and_unique_ids() {
    let store = create_test_store().await;
    let mut ids = Vec::new();
    for i in 1..=5 {
        let record = ZoneRecord::new("mx.", RecordType::A, format!(r#"{{"ip":"10.0.0.{}"}}"#, i));
        ids.push(store.insert_record("test.zone.", &record).await.unwrap());
    }

    let mut unique = ids.clone();
    unique.dedup();
    assert_eq!(unique.len(), 5);

    let rows = store
        .get_records("test.zone.", "mx.", RecordType::A, CLASS_INET)
        .await
        .unwrap();
    assert_eq!(&*rows[0].rdata, r#"{"ip":"10.0.0.1"}"#);
    assert_eq!(&*rows[4].rdata, r#"{"ip":"10.0.0.5"}"#);
}

#[tokio::test]
async fn test_out_of_range_soa_columns_are_skipped() {
    let pool = create_test_pool().await;
    let store = SqliteZoneStore::new(pool.clone());

    sqlx::query(
        "INSERT INTO soa (zone, ns, mbox, refresh, retry, expire, minttl)
         VALUES ('big.zone.', 'ns1.', 'admin.', 5000000000, 7200, 3600, 300),
                ('neg.zone.', 'ns1.', 'admin.', 86400, 7200, 3600, -1)",
    )
    .execute(&pool)
    .await
    .unwrap();

    for zone in ["big.zone.", "neg.zone."] {
        let rows = store
            .get_records(zone, "@", RecordType::SOA, CLASS_INET)
            .await
            .unwrap();
        assert!(rows.is_empty(), "{} returned {:?}", zone, rows);
    }
    assert_eq!(
        store.list_zones().await.unwrap(),
        vec!["big.zone.", "neg.zone."]
    );
}

#[tokio::test]
async fn test_closed_pool_is_backend_unavailable() {
    let pool = create_test_pool().await;
    let store = SqliteZoneStore::new(pool.clone());
    pool.close().await;

    let result = store.list_zones().await;

    assert!(matches!(result, Err(DomainError::BackendUnavailable(_))));
}

#[tokio::test]
async fn test_file_database_persists_between_pools() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        path: dir.path().join("zones.db").to_string_lossy().to_string(),
        ..StorageConfig::default()
    };

    {
        let store = SqliteZoneStore::new(create_pool(&config).await.unwrap());
        store.create_zone("test.zone.").await.unwrap();
        store
            .insert_record(
                "test.zone.",
                &ZoneRecord::new("www.", RecordType::A, r#"{"ip":"1.1.1.1"}"#),
            )
            .await
            .unwrap();
    }

    let store = SqliteZoneStore::new(create_pool(&config).await.unwrap());
    assert_eq!(store.list_zones().await.unwrap(), vec!["test.zone."]);
    let rows = store
        .get_records("test.zone.", "www.", RecordType::A, CLASS_INET)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}
