use tsgraph_model::{EnumValue, TypeId, TypeKind, TypeNode, TypeStore};
use tsgraph_oracle::{FixtureOracle, LiteralValue, ObjectFlags, TypeFlags};

use super::{build_into, trace_init};
use crate::{Boundary, TypeGraphBuilder};

#[test]
fn intrinsics_resolve_to_interned_singletons() {
    let fx = FixtureOracle::new();
    let (store, id) = build_into(&fx, fx.string());
    assert_eq!(id, TypeId::STRING);
    assert_eq!(store.len(), TypeStore::new().len());
}

#[test]
fn boolean_literals_are_interned() {
    let mut fx = FixtureOracle::new();
    let yes = fx.bool_literal(true);
    let no = fx.bool_literal(false);
    let (_, id) = build_into(&fx, yes);
    assert_eq!(id, TypeId::TRUE);
    let (_, id) = build_into(&fx, no);
    assert_eq!(id, TypeId::FALSE);
}

#[test]
fn valueless_literal_descriptor_degrades_to_unsupported() {
    let mut fx = FixtureOracle::new();
    let bogus = fx.new_type(TypeFlags::BOOLEAN_LITERAL, ObjectFlags::empty());
    let (_, id) = build_into(&fx, bogus);
    assert_eq!(id, TypeId::UNSUPPORTED);
}

#[test]
fn literal_nodes_carry_their_value() {
    let mut fx = FixtureOracle::new();
    let greeting = fx.string_literal("hi");
    let count = fx.number_literal(3.0);
    let (store, id) = build_into(&fx, greeting);
    assert!(matches!(store.node(id), TypeNode::StringLiteral(s) if s == "hi"));
    let (store, id) = build_into(&fx, count);
    assert!(matches!(store.node(id), TypeNode::NumberLiteral(n) if *n == 3.0));
}

#[test]
fn interface_end_to_end() {
    trace_init();
    let mut fx = FixtureOracle::new();
    let iface = fx.interface_in("src/main.ts", "Primitives");
    let (string, number, boolean) = (fx.string(), fx.number(), fx.boolean());
    fx.property(iface, "str", string);
    fx.property(iface, "num", number);
    fx.property(iface, "flag", boolean);

    let (store, id) = build_into(&fx, iface);
    assert_eq!(store.get("src/main.ts__Primitives"), Some(id));
    let TypeNode::Interface(node) = store.node(id) else {
        panic!("expected an interface node");
    };
    assert_eq!(node.name, "Primitives");
    assert_eq!(node.properties.len(), 3);
    assert_eq!(node.properties[0].name, "str");
    assert_eq!(node.properties[0].ty.get(&store), TypeId::STRING);
    assert_eq!(node.properties[1].ty.get(&store), TypeId::NUMBER);
    assert_eq!(node.properties[2].ty.get(&store), TypeId::BOOLEAN);
    assert!(node.extends.is_empty());
}

#[test]
fn rebuilding_a_registered_type_reuses_the_node() {
    let mut fx = FixtureOracle::new();
    let iface = fx.interface_in("src/main.ts", "Config");
    let string = fx.string();
    fx.property(iface, "name", string);

    let mut store = TypeStore::new();
    let mut builder = TypeGraphBuilder::new(&fx, &mut store);
    let first = builder.build(iface).unwrap();
    let count = builder.store().len();
    let second = builder.build(iface).unwrap();
    assert_eq!(builder.store().len(), count);
    assert_eq!(first.get(&store), second.get(&store));
}

#[test]
fn anonymous_objects_build_fresh_nodes_every_time() {
    let mut fx = FixtureOracle::new();
    let shape = fx.object_literal();
    let string = fx.string();
    fx.property(shape, "field", string);

    let mut store = TypeStore::new();
    let mut builder = TypeGraphBuilder::new(&fx, &mut store);
    let first = builder.build(shape).unwrap();
    let second = builder.build(shape).unwrap();
    assert_ne!(first.get(&store), second.get(&store));
    assert!(!store.has(""));
    let TypeNode::Object(node) = store.node(first.get(&store)) else {
        panic!("expected an object node");
    };
    assert_eq!(node.ref_id, "");
    assert_eq!(node.properties.len(), 1);
}

#[test]
fn union_reduces_boolean_literal_pair() {
    let mut fx = FixtureOracle::new();
    let yes = fx.bool_literal(true);
    let no = fx.bool_literal(false);
    let string = fx.string();
    let union = fx.union_of(&[yes, no, string]);

    let (store, id) = build_into(&fx, union);
    let TypeNode::Union(node) = store.node(id) else {
        panic!("expected a union node");
    };
    assert_eq!(node.members(&store), &[TypeId::STRING, TypeId::BOOLEAN]);
    assert!(node.contains(&store, TypeId::TRUE));
    assert!(node.contains(&store, TypeId::FALSE));
    assert!(!node.contains(&store, TypeId::NUMBER));
}

#[test]
fn union_keeps_a_lone_boolean_literal() {
    let mut fx = FixtureOracle::new();
    let yes = fx.bool_literal(true);
    let string = fx.string();
    let union = fx.union_of(&[yes, string]);

    let (store, id) = build_into(&fx, union);
    let TypeNode::Union(node) = store.node(id) else {
        panic!("expected a union node");
    };
    assert_eq!(node.members(&store), &[TypeId::TRUE, TypeId::STRING]);
}

#[test]
fn intersection_resolves_members_in_order() {
    let mut fx = FixtureOracle::new();
    let a = fx.interface_in("src/a.ts", "Left");
    let b = fx.interface_in("src/b.ts", "Right");
    let both = fx.intersection_of(&[a, b]);

    let (store, id) = build_into(&fx, both);
    let TypeNode::Intersection(node) = store.node(id) else {
        panic!("expected an intersection node");
    };
    let members = node.members(&store);
    assert_eq!(members.len(), 2);
    assert_eq!(store.node(members[0]).name(), "Left");
    assert_eq!(store.node(members[1]).name(), "Right");
}

#[test]
fn enum_literal_union_becomes_an_enum() {
    let mut fx = FixtureOracle::new();
    let color = fx.enum_in(
        "src/enums.ts",
        "Color",
        &[
            LiteralValue::Str("red".to_string()),
            LiteralValue::Str("green".to_string()),
        ],
    );

    let (store, id) = build_into(&fx, color);
    assert_eq!(store.get("src/enums.ts__Color"), Some(id));
    let TypeNode::Enum(node) = store.node(id) else {
        panic!("expected an enum node");
    };
    assert_eq!(node.name, "Color");
    assert_eq!(
        node.values,
        vec![
            EnumValue::Str("red".to_string()),
            EnumValue::Str("green".to_string()),
        ]
    );
}

#[test]
fn non_literal_enum_member_is_fatal() {
    let mut fx = FixtureOracle::new();
    let broken = fx.enum_in("src/enums.ts", "Broken", &[LiteralValue::Bool(true)]);
    let mut store = TypeStore::new();
    let mut builder = TypeGraphBuilder::new(&fx, &mut store);
    let err = builder.build(broken).unwrap_err();
    assert!(
        matches!(err, crate::BuildError::NonLiteralEnumMember { enum_name } if enum_name == "Broken")
    );
}

#[test]
fn numeric_enum_keeps_member_values() {
    let mut fx = FixtureOracle::new();
    let status = fx.enum_in(
        "src/enums.ts",
        "Status",
        &[LiteralValue::Num(0.0), LiteralValue::Num(1.0)],
    );
    let (store, id) = build_into(&fx, status);
    let TypeNode::Enum(node) = store.node(id) else {
        panic!("expected an enum node");
    };
    assert_eq!(node.values, vec![EnumValue::Num(0.0), EnumValue::Num(1.0)]);
}

#[test]
fn tuples_keep_element_order() {
    let mut fx = FixtureOracle::new();
    let (string, number) = (fx.string(), fx.number());
    let pair = fx.tuple_of(&[string, number]);

    let (store, id) = build_into(&fx, pair);
    let TypeNode::Tuple(node) = store.node(id) else {
        panic!("expected a tuple node");
    };
    let members: Vec<TypeId> = node.members.iter().map(|m| m.get(&store)).collect();
    assert_eq!(members, vec![TypeId::STRING, TypeId::NUMBER]);
}

#[test]
fn alias_wraps_its_value() {
    let mut fx = FixtureOracle::new();
    let (string, number) = (fx.string(), fx.number());
    let union = fx.union_of(&[string, number]);
    let aliased = fx.alias_in("src/types.ts", "Mix", union);

    let (store, id) = build_into(&fx, aliased);
    assert_eq!(store.get("src/types.ts__Mix"), Some(id));
    let TypeNode::Alias(node) = store.node(id) else {
        panic!("expected an alias node");
    };
    assert_eq!(node.name, "Mix");
    let value = node.value.get(&store);
    assert_eq!(store.node(value).kind(), TypeKind::Union);
}

#[test]
fn function_declarations_become_function_nodes() {
    let mut fx = FixtureOracle::new();
    let (string, void) = (fx.string(), fx.void_type());
    let name = fx.param("name", string);
    let sig = fx.signature(&[name], void);
    let greet = fx.function_in("src/util.ts", "greet", &[sig]);

    let (store, id) = build_into(&fx, greet);
    assert_eq!(store.get("src/util.ts__greet"), Some(id));
    let TypeNode::Function(node) = store.node(id) else {
        panic!("expected a function node");
    };
    assert_eq!(node.name, "greet");
    assert_eq!(node.signatures.len(), 1);
    assert_eq!(node.signatures[0].parameters[0].name, "name");
    assert!(!node.signatures[0].parameters[0].optional);
    assert_eq!(node.signatures[0].return_type.get(&store), TypeId::VOID);
}

#[test]
fn callable_type_literal_is_reclassified_as_function() {
    let mut fx = FixtureOracle::new();
    let number = fx.number();
    let sig = fx.signature(&[], number);
    let shape = fx.object_literal();
    fx.add_call_sig(shape, sig);
    let handler = fx.alias_in("src/types.ts", "Handler", shape);

    let (store, id) = build_into(&fx, handler);
    let TypeNode::Alias(node) = store.node(id) else {
        panic!("expected an alias node");
    };
    let value = node.value.get(&store);
    assert_eq!(store.node(value).kind(), TypeKind::Function);
}

#[test]
fn generic_instantiations_are_distinct_nodes() {
    let mut fx = FixtureOracle::new();
    let container = fx.interface_in("src/lib.ts", "Container");
    let t = fx.type_param("T");
    fx.add_type_param(container, t);
    let (string, number) = (fx.string(), fx.number());
    let of_string = fx.instantiate(container, &[string]);
    let of_number = fx.instantiate(container, &[number]);

    let mut store = TypeStore::new();
    let mut builder = TypeGraphBuilder::new(&fx, &mut store);
    let first = builder.build(of_string).unwrap().get(builder.store());
    let second = builder.build(of_number).unwrap().get(builder.store());
    assert_ne!(first, second);

    let TypeNode::GenericInstance(node) = store.node(first) else {
        panic!("expected a generic instance node");
    };
    assert_eq!(node.ref_id, "src/lib.ts__Container<string>");
    let generic = node.generic.get(&store);
    assert_eq!(store.get("src/lib.ts__Container"), Some(generic));
    let args: Vec<TypeId> = node.type_arguments.iter().map(|a| a.get(&store)).collect();
    assert_eq!(args, vec![TypeId::STRING]);
}

#[test]
fn external_declarations_collapse_to_stubs() {
    let mut fx = FixtureOracle::new();
    let widget = fx.interface_in("node_modules/widgets/index.d.ts", "Widget");
    let string = fx.string();
    fx.property(widget, "label", string);

    let mut store = TypeStore::new();
    let mut builder = TypeGraphBuilder::new(&fx, &mut store);
    let first = builder.build(widget).unwrap();
    let second = builder.build(widget).unwrap();
    assert_eq!(first.get(&store), second.get(&store));

    let TypeNode::External(node) = store.node(first.get(&store)) else {
        panic!("expected an external stub");
    };
    assert_eq!(node.name, "Widget");
    assert_eq!(node.ref_id, "node_modules/widgets/index.d.ts__Widget");
}

#[test]
fn custom_boundary_markers_are_honored() {
    let mut fx = FixtureOracle::new();
    let dep = fx.interface_in("vendor/pkg/types.ts", "Dep");
    let mut store = TypeStore::new();
    let boundary = Boundary::new(vec!["vendor".to_string()], Vec::new());
    let mut builder = TypeGraphBuilder::with_boundary(&fx, &mut store, boundary);
    let id = builder.build(dep).unwrap().get(builder.store());
    assert_eq!(store.node(id).kind(), TypeKind::External);
}

const HOST_LIB: &str = "node_modules/typescript/lib/lib.es5.d.ts";

#[test]
fn host_library_containers_keep_their_shape() {
    let mut fx = FixtureOracle::new();
    let promise = fx.interface_in(HOST_LIB, "Promise");
    let string = fx.string();
    let of_string = fx.instantiate(promise, &[string]);

    let (store, id) = build_into(&fx, of_string);
    let TypeNode::Promise(node) = store.node(id) else {
        panic!("expected a promise node");
    };
    assert_eq!(node.value.get(&store), TypeId::STRING);
}

#[test]
fn host_library_map_and_set_keep_their_shape() {
    let mut fx = FixtureOracle::new();
    let map = fx.interface_in(HOST_LIB, "Map");
    let set = fx.interface_in(HOST_LIB, "Set");
    let (string, number) = (fx.string(), fx.number());
    let of_pairs = fx.instantiate(map, &[string, number]);
    let of_numbers = fx.instantiate(set, &[number]);

    let (store, id) = build_into(&fx, of_pairs);
    let TypeNode::Map(node) = store.node(id) else {
        panic!("expected a map node");
    };
    assert_eq!(node.key.get(&store), TypeId::STRING);
    assert_eq!(node.value.get(&store), TypeId::NUMBER);

    let (store, id) = build_into(&fx, of_numbers);
    let TypeNode::Set(node) = store.node(id) else {
        panic!("expected a set node");
    };
    assert_eq!(node.element.get(&store), TypeId::NUMBER);
}

#[test]
fn host_library_arrays_and_iterators_keep_their_shape() {
    let mut fx = FixtureOracle::new();
    let array = fx.interface_in(HOST_LIB, "Array");
    let iterator = fx.interface_in(HOST_LIB, "IterableIterator");
    let string = fx.string();
    let of_strings = fx.instantiate(array, &[string]);
    let iter_strings = fx.instantiate(iterator, &[string]);

    let (store, id) = build_into(&fx, of_strings);
    let TypeNode::Array(node) = store.node(id) else {
        panic!("expected an array node");
    };
    assert_eq!(node.element.get(&store), TypeId::STRING);

    let (store, id) = build_into(&fx, iter_strings);
    let TypeNode::GenericBuiltIn(node) = store.node(id) else {
        panic!("expected a generic built-in node");
    };
    assert_eq!(node.name, "IterableIterator");
    assert_eq!(node.type_arguments.len(), 1);
}

#[test]
fn host_library_singletons_are_interned() {
    let mut fx = FixtureOracle::new();
    let function = fx.interface_in(HOST_LIB, "Function");
    let date = fx.interface_in(HOST_LIB, "Date");
    let error = fx.interface_in(HOST_LIB, "Error");
    let regexp = fx.interface_in(HOST_LIB, "RegExp");

    assert_eq!(build_into(&fx, function).1, TypeId::FUNCTION_OBJECT);
    assert_eq!(build_into(&fx, date).1, TypeId::DATE);
    assert_eq!(build_into(&fx, error).1, TypeId::ERROR);
    assert_eq!(build_into(&fx, regexp).1, TypeId::REGEXP);
}

#[test]
fn unparameterized_host_container_degrades_to_stub() {
    let mut fx = FixtureOracle::new();
    // `Promise` referenced without resolvable type arguments.
    let promise = fx.interface_in(HOST_LIB, "Promise");
    let (store, id) = build_into(&fx, promise);
    assert_eq!(store.node(id).kind(), TypeKind::External);
}

#[test]
fn indexed_access_degrades_to_unsupported() {
    let mut fx = FixtureOracle::new();
    let lookup = fx.indexed_access();
    let (_, id) = build_into(&fx, lookup);
    assert_eq!(id, TypeId::UNSUPPORTED);
}

#[test]
fn type_parameters_carry_constraint_and_default() {
    let mut fx = FixtureOracle::new();
    let t = fx.type_param("T");
    let string = fx.string();
    fx.set_constraint(t, string);
    fx.set_default(t, string);

    let (store, id) = build_into(&fx, t);
    let TypeNode::TypeParameter(node) = store.node(id) else {
        panic!("expected a type parameter node");
    };
    assert_eq!(node.name, "T");
    assert_eq!(node.constraint.as_ref().unwrap().get(&store), TypeId::STRING);
    assert_eq!(node.default.as_ref().unwrap().get(&store), TypeId::STRING);
}

#[test]
fn generic_alias_records_applied_arguments() {
    let mut fx = FixtureOracle::new();
    let (string, null) = (fx.string(), fx.null());
    let applied = fx.union_of(&[string, null]);
    let aliased = fx.alias_in("src/types.ts", "Maybe", applied);
    fx.set_alias_type_args(aliased, &[string]);

    let (store, id) = build_into(&fx, aliased);
    assert_eq!(store.get("src/types.ts__Maybe<string>"), Some(id));
    let TypeNode::Alias(node) = store.node(id) else {
        panic!("expected an alias node");
    };
    let params: Vec<TypeId> = node.type_parameters.iter().map(|p| p.get(&store)).collect();
    assert_eq!(params, vec![TypeId::STRING]);
}

#[test]
fn identity_survives_rebuild_into_fresh_store() {
    let mut fx = FixtureOracle::new();
    let iface = fx.interface_in("src/main.ts", "Stable");
    let number = fx.number();
    fx.property(iface, "n", number);

    let (store_a, id_a) = build_into(&fx, iface);
    let (store_b, id_b) = build_into(&fx, iface);
    assert_eq!(store_a.node(id_a).ref_id(), store_b.node(id_b).ref_id());
    assert_eq!(store_a.node(id_a).ref_id(), Some("src/main.ts__Stable"));
}
