use tsgraph_model::{TypeKind, TypeNode, TypeStore};
use tsgraph_oracle::FixtureOracle;

use super::trace_init;
use crate::{ModuleWalker, TypeGraphBuilder};

#[test]
fn module_registers_its_export_surface() {
    trace_init();
    let mut fx = FixtureOracle::new();
    let iface = fx.interface_in("src/api.ts", "Client");
    let void = fx.void_type();
    let sig = fx.signature(&[], void);
    let func = fx.function_in("src/api.ts", "connect", &[sig]);
    let module = fx.module_in("src/api.ts");
    fx.add_export(module, iface);
    fx.add_export(module, func);

    let mut store = TypeStore::new();
    let mut builder = TypeGraphBuilder::new(&fx, &mut store);
    let id = ModuleWalker::walk(&mut builder, module).unwrap();

    assert_eq!(store.get("src/api.ts"), Some(id));
    let TypeNode::Module(node) = store.node(id) else {
        panic!("expected a module node");
    };
    assert_eq!(node.file_name, "src/api.ts");
    assert_eq!(node.exports.len(), 2);
    assert_eq!(node.exports[0].name, "Client");
    assert_eq!(
        store.node(node.exports[0].ty.get(&store)).kind(),
        TypeKind::Interface
    );
    assert_eq!(node.exports[1].name, "connect");
    assert_eq!(
        store.node(node.exports[1].ty.get(&store)).kind(),
        TypeKind::Function
    );
    assert!(node.default_export.is_none());
}

#[test]
fn default_export_is_tracked_separately() {
    let mut fx = FixtureOracle::new();
    let number = fx.number();
    let answer = fx.param("value", number);
    let sig = fx.signature(&[answer], number);
    let func = fx.function_in("src/main.ts", "default", &[sig]);
    let module = fx.module_in("src/main.ts");
    fx.add_export(module, func);

    let mut store = TypeStore::new();
    let mut builder = TypeGraphBuilder::new(&fx, &mut store);
    let id = ModuleWalker::walk(&mut builder, module).unwrap();

    let TypeNode::Module(node) = store.node(id) else {
        panic!("expected a module node");
    };
    let default = node.default_export.as_ref().expect("default export set");
    assert_eq!(
        store.node(default.get(&store)).kind(),
        TypeKind::Function
    );
}

#[test]
fn untypeable_exports_are_skipped() {
    let mut fx = FixtureOracle::new();
    let iface = fx.interface_in("src/api.ts", "Kept");
    let module = fx.module_in("src/api.ts");
    fx.add_export(module, iface);
    // A symbol with neither a declared nor a value type.
    let ghost = fx.module_in("ghost");
    fx.add_export_symbol(module, ghost);

    let mut store = TypeStore::new();
    let mut builder = TypeGraphBuilder::new(&fx, &mut store);
    let id = ModuleWalker::walk(&mut builder, module).unwrap();
    let TypeNode::Module(node) = store.node(id) else {
        panic!("expected a module node");
    };
    assert_eq!(node.exports.len(), 1);
    assert_eq!(node.exports[0].name, "Kept");
}

#[test]
fn walking_a_module_twice_reuses_the_node() {
    let mut fx = FixtureOracle::new();
    let iface = fx.interface_in("src/api.ts", "Client");
    let module = fx.module_in("src/api.ts");
    fx.add_export(module, iface);

    let mut store = TypeStore::new();
    let mut builder = TypeGraphBuilder::new(&fx, &mut store);
    let first = ModuleWalker::walk(&mut builder, module).unwrap();
    let second = ModuleWalker::walk(&mut builder, module).unwrap();
    assert_eq!(first, second);
    assert_eq!(store.modules().len(), 1);
}

#[test]
fn exported_enums_resolve_through_their_alias_symbol() {
    let mut fx = FixtureOracle::new();
    let color = fx.enum_in(
        "src/enums.ts",
        "Color",
        &[tsgraph_oracle::LiteralValue::Str("red".to_string())],
    );
    fx.set_alias_declared_type(color, color);
    let module = fx.module_in("src/enums.ts");
    fx.add_export(module, color);

    let mut store = TypeStore::new();
    let mut builder = TypeGraphBuilder::new(&fx, &mut store);
    let id = ModuleWalker::walk(&mut builder, module).unwrap();
    let TypeNode::Module(node) = store.node(id) else {
        panic!("expected a module node");
    };
    assert_eq!(node.exports[0].name, "Color");
    assert_eq!(
        store.node(node.exports[0].ty.get(&store)).kind(),
        TypeKind::Enum
    );
    assert!(store.has("src/enums.ts__Color"));
}
