use super::*;

#[derive(Debug, Clone, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

#[test]
fn test_set_get() {
    let mut store = AttributeStore::new();
    store.set("hp", 5i32);
    store.set("target", Position { x: 1., y: 2. });

    assert_eq!(*store.get::<i32>("hp"), 5);
    assert_eq!(store.get::<Position>("target"), &Position { x: 1., y: 2. });
    assert!(store.has_key::<i32>("hp"));
    assert!(!store.has_key::<i64>("hp"));
    assert!(!store.has_key::<Position>("hp"));
    assert_eq!(store.len(), 2);
}

#[test]
fn test_try_get_misses() {
    let mut store = AttributeStore::new();
    assert!(store.try_get::<i32>("missing").is_none());

    store.set("hp", 5i32);
    assert!(store.try_get::<u8>("hp").is_none());
    assert_eq!(store.try_get::<i32>("hp"), Some(&5));
    assert!(store.contains("hp"));
    assert!(!store.has_key::<i32>("missing"));
}

#[test]
fn test_rebind_in_place() {
    let mut store = AttributeStore::new();
    store.set("count", 1u32);
    store.set("count", 2u32);
    *store.get_mut::<u32>("count") += 10;
    assert_eq!(*store.get::<u32>("count"), 12);

    if let Some(count) = store.try_get_mut::<u32>("count") {
        *count = 0;
    }
    assert_eq!(store.try_get::<u32>("count"), Some(&0));
    assert_eq!(store.len(), 1);
}

#[test]
#[should_panic(expected = "type mismatch")]
fn test_get_mismatch_panics() {
    let mut store = AttributeStore::new();
    store.set("hp", 5i32);
    let _ = store.get::<f64>("hp");
}

#[test]
#[should_panic(expected = "is not set")]
fn test_get_missing_panics() {
    let store = AttributeStore::new();
    let _ = store.get::<i32>("hp");
}

#[test]
#[should_panic(expected = "type mismatch")]
fn test_set_mismatch_panics() {
    let mut store = AttributeStore::new();
    store.set("hp", 5i32);
    store.set("hp", 5.0f32);
}

#[test]
fn test_remove_and_clear() {
    let mut store = AttributeStore::new();
    store.set("a", 1u8);
    store.set("b", "two");
    assert!(store.remove("a"));
    assert!(!store.remove("a"));
    store.clear();
    assert!(store.is_empty());
    assert!(store.try_get::<&str>("b").is_none());

    // Cleared keys can be bound to a new type
    store.set("b", 2.5f64);
    assert_eq!(*store.get::<f64>("b"), 2.5);
}

#[test]
fn test_get_parse() {
    let mut store = AttributeStore::new();
    store.set("n", "3");
    store.set("m", "4".to_string());
    store.set("k", 5usize);
    store.set("bad", "five");

    assert_eq!(store.get_parse::<usize>("n"), Some(3));
    assert_eq!(store.get_parse::<usize>("m"), Some(4));
    assert_eq!(store.get_parse::<usize>("k"), Some(5));
    assert_eq!(store.get_parse::<usize>("bad"), None);
    assert_eq!(store.get_parse::<usize>("none"), None);
}

#[test]
fn test_previews() {
    struct Opaque;

    let mut store = AttributeStore::new();
    store.set_debug("target", Position { x: 1., y: 2. });
    store.set("opaque", Opaque);
    store.set_debug("hp", 7i32);

    assert_eq!(
        store.preview("target").as_deref(),
        Some("Position { x: 1.0, y: 2.0 }")
    );
    assert!(store.preview("opaque").unwrap().starts_with('<'));
    assert_eq!(store.preview("missing"), None);
    assert_eq!(store.type_name("hp"), Some("i32"));

    store.set("speed", 1.5f32);
    store.set("name", String::from("Bob"));
    store.set("alert", true);
    assert_eq!(store.preview("speed").as_deref(), Some("1.5"));
    assert_eq!(store.preview("name").as_deref(), Some("Bob"));
    assert_eq!(store.preview("alert").as_deref(), Some("true"));

    let keys: Vec<_> = store.previews().into_iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["alert", "hp", "name", "opaque", "speed", "target"]);

    // A plain rebind keeps the debug preview of the binding
    store.set("target", Position { x: 3., y: 4. });
    assert_eq!(
        store.preview("target").as_deref(),
        Some("Position { x: 3.0, y: 4.0 }")
    );
}
