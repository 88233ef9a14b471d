use super::*;
use crate::util::storage::MemoryStore;

fn alice() -> UserRecord {
    UserRecord { id: "42".to_owned(), username: "alice".to_owned() }
}

#[test]
fn remember_logged_in_writes_all_three_keys() {
    let store = MemoryStore::new();
    remember_logged_in(&store, true, &alice()).unwrap();
    assert_eq!(store.get(REMEMBER_KEY).as_deref(), Some("true"));
    assert_eq!(store.get(USER_ID_KEY).as_deref(), Some("42"));
    assert_eq!(store.get(USERNAME_KEY).as_deref(), Some("alice"));
    assert_eq!(store.len(), 3);
}

#[test]
fn read_session_round_trips_written_flag() {
    let store = MemoryStore::new();
    remember_logged_in(&store, true, &alice()).unwrap();
    assert_eq!(
        read_session(&store),
        Some(SessionFlag { remember: true, user_id: "42".to_owned(), username: "alice".to_owned() })
    );
}

#[test]
fn read_session_is_none_when_never_written() {
    assert_eq!(read_session(&MemoryStore::new()), None);
}

#[test]
fn later_login_overwrites_earlier_identity() {
    let store = MemoryStore::new();
    remember_logged_in(&store, true, &alice()).unwrap();
    remember_logged_in(&store, true, &UserRecord { id: "7".to_owned(), username: "bob".to_owned() }).unwrap();
    let flag = read_session(&store).unwrap();
    assert_eq!(flag.user_id, "7");
    assert_eq!(flag.username, "bob");
}

#[test]
fn remember_false_is_not_remembered() {
    let store = MemoryStore::new();
    remember_logged_in(&store, false, &alice()).unwrap();
    assert!(!read_session(&store).unwrap().is_remembered());
}

#[test]
fn flag_without_user_id_is_not_remembered() {
    let store = MemoryStore::new();
    store.set(REMEMBER_KEY, "true").unwrap();
    let flag = read_session(&store).unwrap();
    assert!(flag.remember);
    assert!(!flag.is_remembered());
}
