use std::collections::HashSet;

use super::*;

#[test]
fn decorator_lookup_finds_aliases() {
    assert_eq!(decorator("be").map(|d| d.doc), Some("Alias for @big_endian."));
    assert_eq!(decorator("import").map(|d| d.usage), Some("import(\"path/to/file.cnd\")"));
    assert!(decorator("nonexistent").is_none());
}

#[test]
fn tables_have_no_duplicates() {
    let decorators: HashSet<_> = DECORATORS.iter().map(|d| d.name).collect();
    assert_eq!(decorators.len(), DECORATORS.len());
    let types: HashSet<_> = PRIMITIVE_TYPES.iter().collect();
    assert_eq!(types.len(), PRIMITIVE_TYPES.len());
}

#[test]
fn enum_int_types_are_primitive_types() {
    for ty in ENUM_INT_TYPES {
        assert!(PRIMITIVE_TYPES.contains(ty), "{ty} missing from primitive types");
    }
}
