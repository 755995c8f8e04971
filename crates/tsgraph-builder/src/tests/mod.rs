mod builder_tests;
mod module_tests;

use tsgraph_model::{TypeId, TypeStore};
use tsgraph_oracle::{Descriptor, FixtureOracle};

use crate::TypeGraphBuilder;

fn trace_init() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Builds one root descriptor into a fresh store and resolves the root.
fn build_into(fx: &FixtureOracle, ty: Descriptor) -> (TypeStore, TypeId) {
    let mut store = TypeStore::new();
    let mut builder = TypeGraphBuilder::new(fx, &mut store);
    let root = builder.build(ty).expect("fixture builds cleanly");
    let id = root.get(&store);
    (store, id)
}
