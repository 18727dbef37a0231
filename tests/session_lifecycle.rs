//! End-to-end session lifecycle across simulated and real restarts.

use recipebox::{
    FileStore, Identity, KeyValueStore, MemoryStore, MockVerifier, Session, SessionConfig, SessionManager,
    SessionPhase, should_redirect_unauth,
};
use tempfile::TempDir;

fn boot<S: KeyValueStore>(store: S) -> SessionManager<S> {
    let mut manager = SessionManager::new(store, MockVerifier::default(), "user");
    manager.restore();
    manager
}

#[test]
fn sign_in_then_sign_out_from_empty_store() {
    let store = MemoryStore::new();
    let mut manager = boot(store.clone());
    assert_eq!(manager.current_session(), Session { identity: None, loading: false });
    assert!(should_redirect_unauth(&manager.current_session()));

    manager.sign_in("a@b.com", "x").unwrap();
    let expected = Identity::new("user-1", "Demo User", "a@b.com");
    assert_eq!(manager.current_session().identity, Some(expected.clone()));

    let raw = store.get("user").unwrap().unwrap();
    let persisted: Identity = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, expected);

    manager.sign_out().unwrap();
    assert_eq!(manager.current_session().identity, None);
    assert_eq!(store.get("user").unwrap(), None);
    assert!(store.is_empty());
}

#[test]
fn sign_up_survives_restart() {
    let store = MemoryStore::new();
    let pairs = [("Alice", "alice@example.com"), ("Bob O'Neil", "bob+recipes@example.org"), ("", "")];

    for (name, email) in pairs {
        let mut first = boot(store.clone());
        first.sign_up(name, email, "pw").unwrap();
        drop(first);

        let second = boot(store.clone());
        let identity = second.current_session().identity.unwrap();
        assert_eq!(identity.name, name);
        assert_eq!(identity.email, email);
        assert_eq!(identity.id, "user-1");
        assert_eq!(identity.image, None);
        assert_eq!(second.phase(), SessionPhase::Authenticated);
    }
}

#[test]
fn sign_out_survives_restart() {
    let store = MemoryStore::new();
    let mut first = boot(store.clone());
    first.sign_in("a@b.com", "x").unwrap();
    first.sign_out().unwrap();

    let second = boot(store);
    assert_eq!(second.phase(), SessionPhase::Unauthenticated);
}

#[test]
fn corrupt_store_boots_signed_out_and_recovers_on_sign_in() {
    let store = MemoryStore::new();
    store.set("user", "undefined").unwrap();

    let mut manager = boot(store.clone());
    assert_eq!(manager.current_session(), Session { identity: None, loading: false });

    manager.sign_in("a@b.com", "x").unwrap();
    let restarted = boot(store);
    assert_eq!(restarted.current_session().identity.unwrap().email, "a@b.com");
}

fn file_config(dir: &TempDir) -> SessionConfig {
    SessionConfig { store_path: Some(dir.path().join("session.json")), ..SessionConfig::default() }
}

#[test]
fn file_backed_session_survives_restart() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    let mut first = SessionManager::from_config(&config);
    first.restore();
    first.sign_up("Alice", "alice@example.com", "pw").unwrap();
    drop(first);

    let mut second = SessionManager::from_config(&config);
    second.restore();
    assert_eq!(
        second.current_session().identity,
        Some(Identity::new("user-1", "Alice", "alice@example.com"))
    );

    second.sign_out().unwrap();
    let file = FileStore::new(dir.path().join("session.json"));
    assert_eq!(file.get("user").unwrap(), None);
}

#[test]
fn garbage_store_file_does_not_lock_out_sign_in() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);
    std::fs::write(dir.path().join("session.json"), "garbage").unwrap();

    let mut first = SessionManager::from_config(&config);
    first.restore();
    assert_eq!(first.current_session(), Session { identity: None, loading: false });

    first.sign_in("a@b.com", "x").unwrap();
    first.sign_in("b@c.com", "x").unwrap();
    drop(first);

    let mut second = SessionManager::from_config(&config);
    second.restore();
    assert_eq!(
        second.current_session().identity,
        Some(Identity::new("user-1", "Demo User", "b@c.com"))
    );
    second.sign_out().unwrap();
    second.sign_out().unwrap();
}

#[test]
fn garbage_store_file_allows_sign_out() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);
    std::fs::write(dir.path().join("session.json"), "{\"user\": [").unwrap();

    let mut manager = SessionManager::from_config(&config);
    manager.restore();
    manager.sign_out().unwrap();
    assert_eq!(manager.phase(), SessionPhase::Unauthenticated);
}
