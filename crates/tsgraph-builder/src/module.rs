//! Walks a module's export surface and registers a module pseudo-type.

use tracing::trace;

use tsgraph_model::{Lazy, ModuleExport, ModuleType, TypeId, TypeNode};
use tsgraph_oracle::{SymbolDesc, TypeOracle};

use crate::builder::{warn_untyped_export, TypeGraphBuilder};
use crate::errors::BuildError;

/// Builds the graph for every export of a module symbol and registers a
/// [`ModuleType`] node keyed by the module's path.
pub struct ModuleWalker;

impl ModuleWalker {
    pub fn walk<O: TypeOracle>(
        builder: &mut TypeGraphBuilder<'_, O>,
        module: SymbolDesc,
    ) -> Result<TypeId, BuildError> {
        let path = builder
            .oracle
            .declaration_of(module)
            .and_then(|decl| builder.oracle.declaring_module_path(decl))
            .unwrap_or_else(|| builder.oracle.symbol_name(module));
        trace!(module = %path, "walking module exports");

        if let Some(existing) = builder.store.get(&path) {
            return Ok(existing);
        }

        let mut exports = Vec::new();
        let mut default_export: Option<Lazy> = None;
        for export in builder.oracle.exports_of(module) {
            let name = builder.oracle.symbol_name(export);
            // Type-only exports answer through their declared type; value
            // exports through the type of the value.
            let ty = builder
                .oracle
                .declared_type_of(export)
                .or_else(|| builder.oracle.type_of_symbol(export));
            let Some(ty) = ty else {
                warn_untyped_export(&name);
                continue;
            };
            trace!(export = %name, "building export");
            let built = builder.build(ty)?;
            if name == "default" {
                default_export = Some(built.clone());
            }
            exports.push(ModuleExport { name, ty: built });
        }

        let node = TypeNode::Module(ModuleType {
            ref_id: path.clone(),
            file_name: path,
            exports,
            default_export,
        });
        Ok(builder.store.add(node)?)
    }
}
