use crate::NamePool;

#[test]
fn first_request_returns_bare_prefix() {
    let mut pool = NamePool::new();

    assert_eq!(pool.free_name("color"), "color");
    assert_eq!(pool.len(), 1);
}

#[test]
fn repeated_prefix_gets_numeric_suffix() {
    let mut pool = NamePool::new();

    assert_eq!(pool.free_name("color"), "color");
    assert_eq!(pool.free_name("color"), "color1");
    assert_eq!(pool.free_name("color"), "color2");
}

#[test]
fn reserved_words_start_at_zero() {
    let mut pool = NamePool::new();

    assert_eq!(pool.free_name("output"), "output0");
    assert_eq!(pool.free_name("output"), "output1");
    assert_eq!(pool.free_name("texture"), "texture0");
}

#[test]
fn non_word_characters_are_stripped() {
    let mut pool = NamePool::new();

    assert_eq!(pool.free_name("world pos.x"), "worldposx");
}

#[test]
fn empty_or_numeric_prefix_gets_letter() {
    let mut pool = NamePool::new();

    assert_eq!(pool.free_name("..."), "v");
    assert_eq!(pool.free_name("2d"), "v2d");
}

#[test]
fn skips_names_already_taken() {
    let mut pool = NamePool::new();
    pool.reserve("uv");
    pool.reserve("uv1");

    assert_eq!(pool.free_name("uv"), "uv2");
    assert!(pool.contains("uv2"));
}

#[test]
fn suffixed_collision_with_other_prefix() {
    let mut pool = NamePool::new();

    // "a1" requested as its own prefix first
    assert_eq!(pool.free_name("a1"), "a1");
    assert_eq!(pool.free_name("a"), "a");
    // The natural next name for "a" is taken, so it moves on
    assert_eq!(pool.free_name("a"), "a2");
}
