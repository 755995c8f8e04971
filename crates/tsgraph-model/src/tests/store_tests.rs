use crate::*;

fn interface(ref_id: &str, name: &str) -> TypeNode {
    TypeNode::Interface(InterfaceType {
        name: name.to_string(),
        ref_id: ref_id.to_string(),
        properties: vec![],
        methods: vec![],
        extends: vec![],
        constructors: vec![],
        call_signatures: vec![],
        type_parameters: vec![],
        index_signatures: vec![],
    })
}

fn alias(ref_id: &str, name: &str, value: Lazy) -> TypeNode {
    TypeNode::Alias(AliasType {
        name: name.to_string(),
        ref_id: ref_id.to_string(),
        value,
        type_parameters: vec![],
        generic_alias: None,
    })
}

#[test]
fn intrinsics_are_pre_interned() {
    let store = TypeStore::new();
    assert_eq!(store.node(TypeId::STRING).name(), "string");
    assert_eq!(store.node(TypeId::UNIQUE_SYMBOL).name(), "unique symbol");
    assert_eq!(store.node(TypeId::TRUE).kind(), TypeKind::BooleanLiteral);
    assert_eq!(store.node(TypeId::UNSUPPORTED).kind(), TypeKind::Unsupported);
    // Singletons are not registered refs.
    assert!(store.is_empty());
    assert!(!store.has("string"));
}

#[test]
fn add_registers_by_ref() {
    let mut store = TypeStore::new();
    let id = store.add(interface("src/a.ts__Foo", "Foo")).unwrap();
    assert!(store.has("src/a.ts__Foo"));
    assert_eq!(store.get("src/a.ts__Foo"), Some(id));
    assert_eq!(store.get_or_fail("src/a.ts__Foo"), id);
    assert_eq!(store.len(), 1);
}

#[test]
fn add_rejects_empty_ref() {
    let mut store = TypeStore::new();
    let err = store.add(interface("", "Anon")).unwrap_err();
    assert_eq!(
        err,
        StoreError::EmptyRef {
            name: "Anon".to_string()
        }
    );
}

#[test]
fn add_rejects_duplicate_ref() {
    let mut store = TypeStore::new();
    store.add(interface("src/a.ts__Foo", "Foo")).unwrap();
    let err = store.add(interface("src/a.ts__Foo", "Foo")).unwrap_err();
    assert_eq!(
        err,
        StoreError::DuplicateRef {
            ref_id: "src/a.ts__Foo".to_string()
        }
    );
}

#[test]
#[should_panic(expected = "type not found. ref: src/missing.ts__Gone")]
fn get_or_fail_panics_on_missing_ref() {
    let store = TypeStore::new();
    store.get_or_fail("src/missing.ts__Gone");
}

#[test]
fn alloc_does_not_register() {
    let mut store = TypeStore::new();
    let id = store.alloc(interface("", "anon"));
    assert!(store.is_empty());
    assert_eq!(store.node(id).name(), "anon");
}

#[test]
fn typed_accessors_preserve_insertion_order() {
    let mut store = TypeStore::new();
    let a = store.add(interface("src/a.ts__A", "A")).unwrap();
    let al = store
        .add(alias("src/a.ts__B", "B", Lazy::built(TypeId::STRING)))
        .unwrap();
    let c = store.add(interface("src/a.ts__C", "C")).unwrap();

    assert_eq!(store.interfaces(), vec![a, c]);
    assert_eq!(store.aliases(), vec![al]);
    assert!(store.classes().is_empty());
    assert!(store.modules().is_empty());

    let found = store.find(|n| n.name() == "C");
    assert_eq!(found, Some(c));
}

#[test]
fn same_compares_literals_by_value() {
    let mut store = TypeStore::new();
    let a = store.alloc(TypeNode::StringLiteral("hi".to_string()));
    let b = store.alloc(TypeNode::StringLiteral("hi".to_string()));
    let c = store.alloc(TypeNode::NumberLiteral(42.0));
    let d = store.alloc(TypeNode::NumberLiteral(42.0));
    assert_ne!(a, b);
    assert!(store.same(a, b));
    assert!(store.same(c, d));
    assert!(!store.same(a, c));
}

#[test]
fn same_compares_functions_by_non_empty_ref() {
    let mut store = TypeStore::new();
    let f = |ref_id: &str| {
        TypeNode::Function(FunctionType {
            name: "f".to_string(),
            ref_id: ref_id.to_string(),
            signatures: vec![],
        })
    };
    let a = store.alloc(f("src/a.ts__f"));
    let b = store.alloc(f("src/a.ts__f"));
    let anon1 = store.alloc(f(""));
    let anon2 = store.alloc(f(""));
    assert!(store.same(a, b));
    // Anonymous functions only equal themselves.
    assert!(!store.same(anon1, anon2));
    assert!(store.same(anon1, anon1));
}

#[test]
fn same_is_reference_identity_for_structural_nodes() {
    let mut store = TypeStore::new();
    let a = store.alloc(interface("", "shape"));
    let b = store.alloc(interface("", "shape"));
    assert!(!store.same(a, b));
}
