//! The recursive type graph builder.
//!
//! One entry point: [`TypeGraphBuilder::build`] takes an oracle
//! descriptor and returns a lazy producer of the corresponding node,
//! registering every referable node in the store keyed by its identity.
//! Construction is eager; only cross-references are deferred, which is
//! what lets self- and mutually-referential types come out as one node
//! each.
//!
//! Classification priority matters: several kinds are reported as flag
//! supersets (an enum-literal union is also a union, an applied generic
//! is also an object), so the order of checks below is policy, not an
//! implementation accident.

use tracing::{trace, warn};

use tsgraph_model::{
    AliasType, ClassLocation, ClassType, EnumType, EnumValue, ExternalType, FunctionType,
    GenericInstance, IndexSignature, InterfaceType, IntersectionType, Lazy, ObjectType, Statics,
    TupleType, TypeId, TypeNode, TypeParameter, TypeStore, UnionType,
};
use tsgraph_oracle::{
    Descriptor, LiteralValue, ObjectFlags, SymbolDesc, SymbolFlags, TypeFlags, TypeOracle,
};

use crate::builtins::Boundary;
use crate::errors::BuildError;
use crate::guard::InFlight;
use crate::identity::{self, IdOptions};
use crate::members::Member;

/// Builds type nodes from oracle descriptors into a store.
///
/// Single-threaded and synchronous; one builder per build run, over a
/// fresh store. Cyclic definitions are broken by the in-flight identity
/// set, never by locks.
pub struct TypeGraphBuilder<'a, O: TypeOracle> {
    pub(crate) oracle: &'a O,
    pub(crate) store: &'a mut TypeStore,
    in_flight: InFlight,
    boundary: Boundary,
}

impl<'a, O: TypeOracle> TypeGraphBuilder<'a, O> {
    pub fn new(oracle: &'a O, store: &'a mut TypeStore) -> Self {
        Self {
            oracle,
            store,
            in_flight: InFlight::new(),
            boundary: Boundary::default(),
        }
    }

    pub fn with_boundary(oracle: &'a O, store: &'a mut TypeStore, boundary: Boundary) -> Self {
        Self {
            oracle,
            store,
            in_flight: InFlight::new(),
            boundary,
        }
    }

    pub fn store(&self) -> &TypeStore {
        self.store
    }

    /// Builds the node graph for `ty` and returns a lazy producer for
    /// its root. Fully follows relationships and builds related types
    /// as well.
    pub fn build(&mut self, ty: Descriptor) -> Result<Lazy, BuildError> {
        let flags = self.oracle.kind_flags(ty);
        trace!(?flags, "handling descriptor");

        if let Some(alias) = self.oracle.alias_symbol_of(ty) {
            if !flags.contains(TypeFlags::ENUM_LITERAL) {
                return self.build_alias(ty, alias);
            }
        }
        self.build_inner(ty)
    }

    fn build_alias(&mut self, ty: Descriptor, alias: SymbolDesc) -> Result<Lazy, BuildError> {
        let name = self.oracle.symbol_name(alias);
        trace!(alias = %name, "detected alias");
        let id = identity::calculate(self.oracle, ty, IdOptions::prefer_alias())?;
        if !id.is_empty() && (self.in_flight.contains(&id) || self.store.has(&id)) {
            trace!(ref_id = %id, "returning store activator for alias");
            return Ok(Lazy::by_ref(id));
        }
        if !id.is_empty() {
            self.in_flight.enter(id.clone());
        }

        // The unapplied generic form, reached through the alias's own
        // declaration. For a non-generic alias this comes back as a
        // self-reference via the in-flight set.
        let generic_alias = match self.oracle.declared_type_of(alias) {
            Some(declared) => Some(self.build(declared)?),
            None => None,
        };

        let value = self.build_inner(ty)?;
        let type_parameters = self.build_all(&self.oracle.alias_type_arguments_of(ty))?;

        let node = TypeNode::Alias(AliasType {
            name,
            ref_id: id.clone(),
            value,
            type_parameters,
            generic_alias,
        });
        let built = self.store.add(node)?;
        if !id.is_empty() {
            self.in_flight.leave(&id);
        }
        Ok(Lazy::built(built))
    }

    fn build_inner(&mut self, ty: Descriptor) -> Result<Lazy, BuildError> {
        let flags = self.oracle.kind_flags(ty);

        if let Some(intrinsic) = intrinsic_id(flags) {
            return Ok(Lazy::built(intrinsic));
        }
        if flags.contains(TypeFlags::NUMBER_LITERAL) {
            if let Some(LiteralValue::Num(n)) = self.oracle.literal_value(ty) {
                return Ok(Lazy::built(self.store.alloc(TypeNode::NumberLiteral(n))));
            }
        }
        if flags.contains(TypeFlags::STRING_LITERAL) {
            if let Some(LiteralValue::Str(s)) = self.oracle.literal_value(ty) {
                return Ok(Lazy::built(self.store.alloc(TypeNode::StringLiteral(s))));
            }
        }
        if flags.contains(TypeFlags::BOOLEAN_LITERAL) {
            // A literal kind without a value is a malformed oracle
            // answer; let it fall through to the unsupported sentinel.
            if let Some(LiteralValue::Bool(b)) = self.oracle.literal_value(ty) {
                let id = if b { TypeId::TRUE } else { TypeId::FALSE };
                return Ok(Lazy::built(id));
            }
        }
        if flags.contains(TypeFlags::OBJECT) {
            return self.build_object(ty);
        }
        if flags.contains(TypeFlags::UNION) && flags.contains(TypeFlags::ENUM_LITERAL) {
            return self.build_enum(ty);
        }
        if flags.contains(TypeFlags::UNION) {
            let members = self.build_all(&self.oracle.constituents_of(ty))?;
            let node = TypeNode::Union(UnionType::new(members));
            return Ok(Lazy::built(self.store.alloc(node)));
        }
        if flags.contains(TypeFlags::INTERSECTION) {
            let members = self.build_all(&self.oracle.constituents_of(ty))?;
            let node = TypeNode::Intersection(IntersectionType { members });
            return Ok(Lazy::built(self.store.alloc(node)));
        }
        if flags.contains(TypeFlags::INDEXED_ACCESS) {
            return Ok(Lazy::built(TypeId::UNSUPPORTED));
        }
        if flags.contains(TypeFlags::TYPE_PARAMETER) {
            return self.build_type_param(ty);
        }
        trace!(?flags, "kind not modeled, degrading to unsupported");
        Ok(Lazy::built(TypeId::UNSUPPORTED))
    }

    fn build_type_param(&mut self, ty: Descriptor) -> Result<Lazy, BuildError> {
        trace!("handling type parameter");
        let name = match self.oracle.symbol_of(ty) {
            Some(sym) => self.oracle.symbol_name(sym),
            None => String::new(),
        };
        let constraint = match self.oracle.constraint_of(ty) {
            Some(c) => Some(self.build(c)?),
            None => None,
        };
        let default = match self.oracle.default_of(ty) {
            Some(d) => Some(self.build(d)?),
            None => None,
        };
        let node = TypeNode::TypeParameter(TypeParameter {
            name,
            constraint,
            default,
        });
        Ok(Lazy::built(self.store.alloc(node)))
    }

    fn build_object(&mut self, ty: Descriptor) -> Result<Lazy, BuildError> {
        let id = identity::calculate(self.oracle, ty, IdOptions::default())?;
        trace!(ref_id = %id, "object type identity");

        let symbol = self.oracle.symbol_of(ty);
        let name = symbol.map(|s| self.oracle.symbol_name(s)).unwrap_or_default();
        let object_flags = self.oracle.object_flags(ty);
        let type_args = if object_flags.contains(ObjectFlags::REFERENCE) {
            self.oracle.type_arguments_of(ty)
        } else {
            Vec::new()
        };

        // Host-library containers keep their well-known generic shape
        // instead of being flattened to structural objects.
        if self.boundary.is_host_lib(&id) {
            if let Some(node) = self.build_builtin(&name, &type_args)? {
                trace!(name = %name, "returning canned built-in type");
                return Ok(node);
            }
        }
        if self.boundary.is_external(&id) {
            trace!(ref_id = %id, "returning external type stub");
            if self.store.has(&id) {
                return Ok(Lazy::by_ref(id));
            }
            let node = TypeNode::External(ExternalType {
                name,
                ref_id: id,
            });
            return Ok(Lazy::built(self.store.add(node)?));
        }

        if !id.is_empty() && (self.store.has(&id) || self.in_flight.contains(&id)) {
            trace!(ref_id = %id, "returning store activator");
            return Ok(Lazy::by_ref(id));
        }
        if !id.is_empty() {
            self.in_flight.enter(id.clone());
        }
        trace!(name = %name, "handling object type");

        let target = if object_flags.contains(ObjectFlags::REFERENCE) {
            self.oracle.target_of(ty)
        } else {
            None
        };

        if target.is_some_and(|t| self.oracle.object_flags(t).contains(ObjectFlags::TUPLE)) {
            let members = self.build_all(&type_args)?;
            let built = self.store.alloc(TypeNode::Tuple(TupleType { members }));
            self.leave(&id);
            return Ok(Lazy::built(built));
        }

        let symbol_flags = symbol
            .map(|s| self.oracle.symbol_flags(s))
            .unwrap_or_else(SymbolFlags::empty);
        if symbol_flags.contains(SymbolFlags::FUNCTION) {
            trace!(name = %name, "object subtype - function");
            let signatures = self.assemble_call_signatures(ty)?;
            let node = TypeNode::Function(FunctionType {
                name,
                ref_id: id.clone(),
                signatures,
            });
            let built = if id.is_empty() {
                self.store.alloc(node)
            } else {
                self.store.add(node)?
            };
            self.leave(&id);
            return Ok(Lazy::built(built));
        }

        let mut properties = Vec::new();
        let mut methods = Vec::new();
        for member in self.oracle.properties_of(ty) {
            match self.assemble_member(member)? {
                Member::Property(p) => properties.push(p),
                Member::Method(m) => methods.push(m),
            }
        }
        let index_signatures = self.assemble_index_signatures(ty)?;

        if object_flags.contains(ObjectFlags::CLASS) {
            return self.build_class(ty, id, name, properties, methods, index_signatures);
        }

        let constructors = self.assemble_construct_signatures(ty)?;
        let call_signatures = self.assemble_call_signatures(ty)?;

        if object_flags.contains(ObjectFlags::INTERFACE) {
            trace!(name = %name, "object subtype - interface");
            let extends = self.build_all(&self.oracle.base_types_of(ty))?;
            let type_parameters = self.build_all(&self.oracle.type_parameters_of(ty))?;
            let node = TypeNode::Interface(InterfaceType {
                name,
                ref_id: id.clone(),
                properties,
                methods,
                extends,
                constructors,
                call_signatures,
                type_parameters,
                index_signatures,
            });
            let built = self.store.add(node)?;
            self.leave(&id);
            return Ok(Lazy::built(built));
        }

        let node = if symbol_flags.contains(SymbolFlags::TYPE_LITERAL)
            && properties.is_empty()
            && methods.is_empty()
            && constructors.is_empty()
            && !call_signatures.is_empty()
        {
            // A type literal whose only structure is call signatures is
            // a function in object clothing.
            trace!("object subtype - function alias");
            TypeNode::Function(FunctionType {
                name,
                ref_id: id.clone(),
                signatures: call_signatures,
            })
        } else if let Some(target) = target.filter(|_| !symbol_flags.contains(SymbolFlags::TYPE_LITERAL)) {
            trace!(name = %name, "object subtype - generic instantiation");
            let generic = self.build(target)?;
            let type_arguments = self.build_all(&type_args)?;
            TypeNode::GenericInstance(GenericInstance {
                name,
                ref_id: id.clone(),
                properties,
                methods,
                generic,
                type_arguments,
                constructors,
                index_signatures,
            })
        } else {
            trace!(name = %name, "object subtype - object");
            TypeNode::Object(ObjectType {
                name,
                ref_id: id.clone(),
                properties,
                methods,
                constructors,
                call_signatures,
                index_signatures,
            })
        };

        let built = if id.is_empty() {
            self.store.alloc(node)
        } else {
            self.store.add(node)?
        };
        self.leave(&id);
        Ok(Lazy::built(built))
    }

    fn build_class(
        &mut self,
        ty: Descriptor,
        id: String,
        name: String,
        properties: Vec<tsgraph_model::Property>,
        methods: Vec<tsgraph_model::Method>,
        index_signatures: Vec<IndexSignature>,
    ) -> Result<Lazy, BuildError> {
        trace!(name = %name, "object subtype - class");
        let super_type = match self.oracle.base_types_of(ty).first() {
            Some(&base) => {
                trace!("calculating super type of class");
                Some(self.build(base)?)
            }
            None => None,
        };

        let symbol = self.oracle.symbol_of(ty);
        let decl = symbol.and_then(|s| self.oracle.declaration_of(s));
        let decorators = self.assemble_decorators(decl, &name)?;
        let implements = self.build_all(&self.oracle.implemented_types_of(ty))?;
        let type_parameters = self.build_all(&self.oracle.type_parameters_of(ty))?;

        let location = symbol
            .and_then(|s| self.oracle.export_binding_of(s))
            .map(|binding| {
                trace!(export = %binding.export_name, "found ctor export");
                ClassLocation {
                    file_name: binding.file_name,
                    export_name: binding.export_name,
                }
            });

        // Constructors and statics live on the class's static side, the
        // constructor function type. The synthetic `prototype` slot is
        // not a static declaration.
        let mut constructors = Vec::new();
        let mut statics = Statics::default();
        if let Some(side) = self.oracle.static_side_of(ty) {
            constructors = self.assemble_construct_signatures(side)?;
            for member in self.oracle.properties_of(side) {
                if self
                    .oracle
                    .symbol_flags(member)
                    .contains(SymbolFlags::PROTOTYPE)
                {
                    continue;
                }
                match self.assemble_member(member)? {
                    Member::Property(p) => statics.properties.push(p),
                    Member::Method(m) => statics.methods.push(m),
                }
            }
        }

        let node = TypeNode::Class(ClassType {
            name,
            ref_id: id.clone(),
            properties,
            methods,
            super_type,
            implements,
            type_parameters,
            location,
            constructors,
            decorators,
            statics,
            index_signatures,
        });
        let built = self.store.add(node)?;
        self.leave(&id);
        Ok(Lazy::built(built))
    }

    fn build_enum(&mut self, ty: Descriptor) -> Result<Lazy, BuildError> {
        let alias = self
            .oracle
            .alias_symbol_of(ty)
            .ok_or(BuildError::MissingSymbol {
                flags: self.oracle.kind_flags(ty),
            })?;
        let name = self.oracle.symbol_name(alias);
        let id = identity::symbol_id(self.oracle, alias, "");
        if self.store.has(&id) {
            return Ok(Lazy::by_ref(id));
        }
        let mut values = Vec::new();
        for member in self.oracle.constituents_of(ty) {
            match self.oracle.literal_value(member) {
                Some(LiteralValue::Str(s)) => values.push(EnumValue::Str(s)),
                Some(LiteralValue::Num(n)) => values.push(EnumValue::Num(n)),
                _ => {
                    return Err(BuildError::NonLiteralEnumMember { enum_name: name });
                }
            }
        }
        let node = TypeNode::Enum(EnumType {
            name,
            ref_id: id,
            values,
        });
        Ok(Lazy::built(self.store.add(node)?))
    }

    pub(crate) fn build_all(&mut self, types: &[Descriptor]) -> Result<Vec<Lazy>, BuildError> {
        types.iter().map(|&t| self.build(t)).collect()
    }

    fn leave(&mut self, id: &str) {
        if !id.is_empty() {
            self.in_flight.leave(id);
        }
    }
}

/// Warn-level escape hatch used by the module walker for exports the
/// oracle cannot type.
pub(crate) fn warn_untyped_export(name: &str) {
    warn!(export = %name, "export has no resolvable type, skipping");
}

fn intrinsic_id(flags: TypeFlags) -> Option<TypeId> {
    // Priority order mirrors identity calculation.
    let id = if flags.contains(TypeFlags::ANY) {
        TypeId::ANY
    } else if flags.contains(TypeFlags::NEVER) {
        TypeId::NEVER
    } else if flags.contains(TypeFlags::VOID) {
        TypeId::VOID
    } else if flags.contains(TypeFlags::NULL) {
        TypeId::NULL
    } else if flags.contains(TypeFlags::UNDEFINED) {
        TypeId::UNDEFINED
    } else if flags.contains(TypeFlags::UNKNOWN) {
        TypeId::UNKNOWN
    } else if flags.contains(TypeFlags::STRING) {
        TypeId::STRING
    } else if flags.contains(TypeFlags::NUMBER) {
        TypeId::NUMBER
    } else if flags.contains(TypeFlags::BOOLEAN) {
        TypeId::BOOLEAN
    } else if flags.contains(TypeFlags::BIGINT) {
        TypeId::BIGINT
    } else if flags.contains(TypeFlags::UNIQUE_ES_SYMBOL) {
        TypeId::UNIQUE_SYMBOL
    } else if flags.contains(TypeFlags::ES_SYMBOL) {
        TypeId::SYMBOL
    } else {
        return None;
    };
    Some(id)
}
