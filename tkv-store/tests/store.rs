//! End-to-end tests: the raw client against a live ephemeral store.

use std::time::Duration;

use tkv_client::{ClientConfig, RawClient};
use tkv_store::EphemeralStore;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn connect(store: &EphemeralStore) -> RawClient {
    let config = ClientConfig {
        addr: store.addr(),
        connect_timeout: Some(Duration::from_secs(1)),
        read_timeout: Some(Duration::from_secs(1)),
        write_timeout: Some(Duration::from_secs(1)),
    };
    RawClient::with_config(config).expect("client")
}

#[test]
fn ping_round_trip() {
    init_tracing();
    let store = EphemeralStore::launch().expect("launch");
    let client = connect(&store);
    assert_eq!(client.ping().expect("ping"), b"PONG".to_vec());
}

#[test]
fn set_get_del_lifecycle() {
    init_tracing();
    let store = EphemeralStore::launch().expect("launch");
    let client = connect(&store);

    assert_eq!(client.get(b"key").expect("get before set"), None);
    client.set(b"key", b"1234").expect("set");
    assert_eq!(
        client.get(b"key").expect("get after set"),
        Some(b"1234".to_vec())
    );
    assert!(client.del(b"key").expect("del"));
    assert_eq!(client.get(b"key").expect("get after del"), None);
}

#[test]
fn flush_all_clears_store() {
    init_tracing();
    let store = EphemeralStore::launch().expect("launch");
    let client = connect(&store);

    client.set(b"a", b"1").expect("set a");
    client.set(b"b", b"2").expect("set b");
    client.flush_all().expect("flushall");
    assert_eq!(client.get(b"a").expect("get a"), None);
    assert_eq!(client.get(b"b").expect("get b"), None);
}

#[test]
fn binary_values_survive_the_wire() {
    init_tracing();
    let store = EphemeralStore::launch().expect("launch");
    let client = connect(&store);

    let raw = [0xB1u8, 0x4B, 0x00, 0xFF, 0x0D, 0x0A];
    client.set(b"bin", &raw).expect("set");
    assert_eq!(client.get(b"bin").expect("get"), Some(raw.to_vec()));
}

#[test]
fn two_clients_see_the_same_data() {
    init_tracing();
    let store = EphemeralStore::launch().expect("launch");
    let writer = connect(&store);
    let reader = connect(&store);

    writer.set(b"key", b"1235").expect("set");
    assert_eq!(reader.get(b"key").expect("get"), Some(b"1235".to_vec()));
}

#[test]
fn store_stops_on_drop() {
    init_tracing();
    let store = EphemeralStore::launch().expect("launch");
    let addr = store.addr();
    drop(store);

    let config = ClientConfig {
        addr,
        connect_timeout: Some(Duration::from_millis(200)),
        ..ClientConfig::default()
    };
    assert!(RawClient::with_config(config).is_err());
}
