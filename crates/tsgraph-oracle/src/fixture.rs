//! A programmable, arena-backed [`TypeOracle`] for tests.
//!
//! `FixtureOracle` lets a test script a type universe descriptor by
//! descriptor: intrinsics are pre-registered, nominal types are declared
//! with a module path, and cyclic fixtures are closed with post-hoc
//! mutators (`set_property_type`, `add_base`) after both sides exist.
//!
//! The fixture mirrors the flag superset behavior of a real checker: an
//! enum-literal union reports `UNION | ENUM_LITERAL`, a tuple is a
//! `REFERENCE` whose target carries `TUPLE`, and so on.

use crate::flags::{ModifierFlags, ObjectFlags, SymbolFlags, TypeFlags};
use crate::oracle::{
    DeclDesc, Descriptor, ExportBinding, LiteralValue, SigDesc, SymbolDesc, TypeOracle,
};

#[derive(Default, Clone)]
struct TypeRecord {
    flags: TypeFlags,
    object_flags: ObjectFlags,
    symbol: Option<SymbolDesc>,
    alias: Option<SymbolDesc>,
    literal: Option<LiteralValue>,
    properties: Vec<SymbolDesc>,
    call_sigs: Vec<SigDesc>,
    ctor_sigs: Vec<SigDesc>,
    bases: Vec<Descriptor>,
    implements: Vec<Descriptor>,
    type_args: Vec<Descriptor>,
    alias_type_args: Vec<Descriptor>,
    type_params: Vec<Descriptor>,
    target: Option<Descriptor>,
    constituents: Vec<Descriptor>,
    constraint: Option<Descriptor>,
    default: Option<Descriptor>,
    string_index: Option<Descriptor>,
    number_index: Option<Descriptor>,
    static_side: Option<Descriptor>,
}

#[derive(Default, Clone)]
struct SymbolRecord {
    name: String,
    flags: SymbolFlags,
    decl: Option<DeclDesc>,
    value_type: Option<Descriptor>,
    declared_type: Option<Descriptor>,
    export_binding: Option<ExportBinding>,
    exports: Vec<SymbolDesc>,
}

#[derive(Default, Clone)]
struct DeclRecord {
    module_path: Option<String>,
    modifiers: ModifierFlags,
    decorators: Vec<Option<Descriptor>>,
}

#[derive(Clone)]
struct SigRecord {
    params: Vec<SymbolDesc>,
    ret: Descriptor,
}

/// Scripted in-memory type universe.
pub struct FixtureOracle {
    types: Vec<TypeRecord>,
    symbols: Vec<SymbolRecord>,
    decls: Vec<DeclRecord>,
    sigs: Vec<SigRecord>,
}

macro_rules! intrinsic_accessors {
    ($($name:ident => $idx:expr),* $(,)?) => {
        $(pub fn $name(&self) -> Descriptor { Descriptor($idx) })*
    };
}

impl FixtureOracle {
    pub fn new() -> Self {
        let mut fx = Self {
            types: Vec::new(),
            symbols: Vec::new(),
            decls: Vec::new(),
            sigs: Vec::new(),
        };
        // Intrinsic descriptors occupy the first twelve slots, in the
        // order of the accessor table below.
        for flags in [
            TypeFlags::ANY,
            TypeFlags::UNKNOWN,
            TypeFlags::STRING,
            TypeFlags::NUMBER,
            TypeFlags::BOOLEAN,
            TypeFlags::BIGINT,
            TypeFlags::ES_SYMBOL,
            TypeFlags::UNIQUE_ES_SYMBOL,
            TypeFlags::VOID,
            TypeFlags::UNDEFINED,
            TypeFlags::NULL,
            TypeFlags::NEVER,
        ] {
            fx.new_type(flags, ObjectFlags::empty());
        }
        fx
    }

    intrinsic_accessors! {
        any => 0, unknown => 1, string => 2, number => 3, boolean => 4,
        bigint => 5, symbol_type => 6, unique_symbol => 7, void_type => 8,
        undefined => 9, null => 10, never => 11,
    }

    // --- raw arena --------------------------------------------------------

    pub fn new_type(&mut self, flags: TypeFlags, object_flags: ObjectFlags) -> Descriptor {
        self.types.push(TypeRecord {
            flags,
            object_flags,
            ..TypeRecord::default()
        });
        Descriptor(self.types.len() as u32 - 1)
    }

    fn ty(&mut self, d: Descriptor) -> &mut TypeRecord {
        &mut self.types[d.0 as usize]
    }

    fn decl_in(&mut self, path: &str) -> DeclDesc {
        self.decls.push(DeclRecord {
            module_path: Some(path.to_string()),
            ..DeclRecord::default()
        });
        DeclDesc(self.decls.len() as u32 - 1)
    }

    fn new_symbol(&mut self, name: &str, flags: SymbolFlags, decl: Option<DeclDesc>) -> SymbolDesc {
        self.symbols.push(SymbolRecord {
            name: name.to_string(),
            flags,
            decl,
            ..SymbolRecord::default()
        });
        SymbolDesc(self.symbols.len() as u32 - 1)
    }

    // --- literals ---------------------------------------------------------

    pub fn string_literal(&mut self, value: &str) -> Descriptor {
        let d = self.new_type(TypeFlags::STRING_LITERAL, ObjectFlags::empty());
        self.ty(d).literal = Some(LiteralValue::Str(value.to_string()));
        d
    }

    pub fn number_literal(&mut self, value: f64) -> Descriptor {
        let d = self.new_type(TypeFlags::NUMBER_LITERAL, ObjectFlags::empty());
        self.ty(d).literal = Some(LiteralValue::Num(value));
        d
    }

    pub fn bool_literal(&mut self, value: bool) -> Descriptor {
        let d = self.new_type(TypeFlags::BOOLEAN_LITERAL, ObjectFlags::empty());
        self.ty(d).literal = Some(LiteralValue::Bool(value));
        d
    }

    // --- nominal declarations ---------------------------------------------

    pub fn interface_in(&mut self, path: &str, name: &str) -> Descriptor {
        let d = self.new_type(TypeFlags::OBJECT, ObjectFlags::INTERFACE);
        let decl = self.decl_in(path);
        let sym = self.new_symbol(name, SymbolFlags::empty(), Some(decl));
        self.symbols[sym.0 as usize].declared_type = Some(d);
        self.ty(d).symbol = Some(sym);
        d
    }

    /// Declares a class along with its static side (the constructor
    /// function type owning construct signatures and static members).
    pub fn class_in(&mut self, path: &str, name: &str) -> Descriptor {
        let d = self.new_type(TypeFlags::OBJECT, ObjectFlags::CLASS);
        let decl = self.decl_in(path);
        let sym = self.new_symbol(name, SymbolFlags::empty(), Some(decl));
        self.symbols[sym.0 as usize].declared_type = Some(d);
        self.ty(d).symbol = Some(sym);
        let side = self.new_type(TypeFlags::OBJECT, ObjectFlags::ANONYMOUS);
        self.ty(side).symbol = Some(sym);
        self.ty(d).static_side = Some(side);
        d
    }

    pub fn static_side_desc(&self, class: Descriptor) -> Descriptor {
        self.types[class.0 as usize]
            .static_side
            .expect("class fixtures always carry a static side")
    }

    /// A named function declaration (object type with a `FUNCTION` symbol).
    pub fn function_in(&mut self, path: &str, name: &str, sigs: &[SigDesc]) -> Descriptor {
        let d = self.new_type(TypeFlags::OBJECT, ObjectFlags::ANONYMOUS);
        let decl = self.decl_in(path);
        let sym = self.new_symbol(name, SymbolFlags::FUNCTION, Some(decl));
        self.symbols[sym.0 as usize].value_type = Some(d);
        self.ty(d).symbol = Some(sym);
        self.ty(d).call_sigs = sigs.to_vec();
        d
    }

    /// An anonymous structural object shape (`{ ... }` in type position).
    pub fn object_literal(&mut self) -> Descriptor {
        let d = self.new_type(TypeFlags::OBJECT, ObjectFlags::ANONYMOUS);
        let sym = self.new_symbol("__type", SymbolFlags::TYPE_LITERAL, None);
        self.ty(d).symbol = Some(sym);
        d
    }

    /// Marks an existing type as reached through `type <name> = ...` at
    /// `path`. Returns the same descriptor: the alias symbol rides on the
    /// aliased type, as in a real checker.
    pub fn alias_in(&mut self, path: &str, name: &str, value: Descriptor) -> Descriptor {
        let decl = self.decl_in(path);
        let sym = self.new_symbol(name, SymbolFlags::empty(), Some(decl));
        self.ty(value).alias = Some(sym);
        value
    }

    /// Records the unapplied generic form on an alias's symbol, exposed
    /// through `declared_type_of`.
    pub fn set_alias_declared_type(&mut self, aliased: Descriptor, unapplied: Descriptor) {
        let sym = self.types[aliased.0 as usize]
            .alias
            .expect("descriptor has an alias symbol");
        self.symbols[sym.0 as usize].declared_type = Some(unapplied);
    }

    pub fn set_alias_type_args(&mut self, aliased: Descriptor, args: &[Descriptor]) {
        self.ty(aliased).alias_type_args = args.to_vec();
    }

    // --- compound types ---------------------------------------------------

    pub fn union_of(&mut self, members: &[Descriptor]) -> Descriptor {
        let d = self.new_type(TypeFlags::UNION, ObjectFlags::empty());
        self.ty(d).constituents = members.to_vec();
        d
    }

    pub fn intersection_of(&mut self, members: &[Descriptor]) -> Descriptor {
        let d = self.new_type(TypeFlags::INTERSECTION, ObjectFlags::empty());
        self.ty(d).constituents = members.to_vec();
        d
    }

    pub fn enum_in(&mut self, path: &str, name: &str, values: &[LiteralValue]) -> Descriptor {
        let members: Vec<Descriptor> = values
            .iter()
            .map(|v| match v {
                LiteralValue::Str(s) => {
                    let s = s.clone();
                    self.string_literal(&s)
                }
                LiteralValue::Num(n) => {
                    let n = *n;
                    self.number_literal(n)
                }
                LiteralValue::Bool(b) => {
                    let b = *b;
                    self.bool_literal(b)
                }
            })
            .collect();
        let d = self.new_type(
            TypeFlags::UNION | TypeFlags::ENUM_LITERAL,
            ObjectFlags::empty(),
        );
        self.ty(d).constituents = members;
        self.alias_in(path, name, d)
    }

    pub fn tuple_of(&mut self, members: &[Descriptor]) -> Descriptor {
        let target = self.new_type(TypeFlags::OBJECT, ObjectFlags::TUPLE);
        let d = self.new_type(TypeFlags::OBJECT, ObjectFlags::REFERENCE);
        self.ty(d).target = Some(target);
        self.ty(d).type_args = members.to_vec();
        d
    }

    pub fn type_param(&mut self, name: &str) -> Descriptor {
        let d = self.new_type(TypeFlags::TYPE_PARAMETER, ObjectFlags::empty());
        let sym = self.new_symbol(name, SymbolFlags::empty(), None);
        self.ty(d).symbol = Some(sym);
        d
    }

    pub fn set_constraint(&mut self, tp: Descriptor, constraint: Descriptor) {
        self.ty(tp).constraint = Some(constraint);
    }

    pub fn set_default(&mut self, tp: Descriptor, default: Descriptor) {
        self.ty(tp).default = Some(default);
    }

    pub fn indexed_access(&mut self) -> Descriptor {
        self.new_type(TypeFlags::INDEXED_ACCESS, ObjectFlags::empty())
    }

    /// A generic declaration applied to concrete arguments. The instance
    /// shares the target's symbol, as references do in a real checker.
    pub fn instantiate(&mut self, target: Descriptor, args: &[Descriptor]) -> Descriptor {
        let d = self.new_type(TypeFlags::OBJECT, ObjectFlags::REFERENCE);
        self.ty(d).target = Some(target);
        self.ty(d).type_args = args.to_vec();
        let sym = self.types[target.0 as usize].symbol;
        self.ty(d).symbol = sym;
        d
    }

    pub fn add_type_param(&mut self, owner: Descriptor, tp: Descriptor) {
        self.ty(owner).type_params.push(tp);
    }

    // --- members ----------------------------------------------------------

    pub fn property(&mut self, owner: Descriptor, name: &str, ty: Descriptor) -> SymbolDesc {
        let path = self.path_of(owner);
        let decl = match path {
            Some(p) => {
                let p = p.clone();
                Some(self.decl_in(&p))
            }
            None => Some(self.anonymous_decl()),
        };
        let sym = self.new_symbol(name, SymbolFlags::empty(), decl);
        self.symbols[sym.0 as usize].value_type = Some(ty);
        self.ty(owner).properties.push(sym);
        sym
    }

    /// A declared property symbol the oracle cannot type; builds must
    /// reject these.
    pub fn untyped_property(&mut self, owner: Descriptor, name: &str) -> SymbolDesc {
        let decl = self.anonymous_decl();
        let sym = self.new_symbol(name, SymbolFlags::empty(), Some(decl));
        self.ty(owner).properties.push(sym);
        sym
    }

    /// A property symbol with no locatable declaration; builds must
    /// reject these.
    pub fn undeclared_property(&mut self, owner: Descriptor, name: &str, ty: Descriptor) -> SymbolDesc {
        let sym = self.new_symbol(name, SymbolFlags::empty(), None);
        self.symbols[sym.0 as usize].value_type = Some(ty);
        self.ty(owner).properties.push(sym);
        sym
    }

    pub fn method(&mut self, owner: Descriptor, name: &str, sigs: &[SigDesc]) -> SymbolDesc {
        let fn_ty = self.new_type(TypeFlags::OBJECT, ObjectFlags::ANONYMOUS);
        self.ty(fn_ty).call_sigs = sigs.to_vec();
        let decl = self.anonymous_decl();
        let sym = self.new_symbol(name, SymbolFlags::METHOD, Some(decl));
        self.symbols[sym.0 as usize].value_type = Some(fn_ty);
        self.ty(owner).properties.push(sym);
        sym
    }

    pub fn param(&mut self, name: &str, ty: Descriptor) -> SymbolDesc {
        let decl = self.anonymous_decl();
        let sym = self.new_symbol(name, SymbolFlags::empty(), Some(decl));
        self.symbols[sym.0 as usize].value_type = Some(ty);
        sym
    }

    pub fn optional_param(&mut self, name: &str, ty: Descriptor) -> SymbolDesc {
        let sym = self.param(name, ty);
        self.symbols[sym.0 as usize].flags |= SymbolFlags::OPTIONAL;
        sym
    }

    pub fn signature(&mut self, params: &[SymbolDesc], ret: Descriptor) -> SigDesc {
        self.sigs.push(SigRecord {
            params: params.to_vec(),
            ret,
        });
        SigDesc(self.sigs.len() as u32 - 1)
    }

    pub fn add_ctor_sig(&mut self, owner: Descriptor, sig: SigDesc) {
        self.ty(owner).ctor_sigs.push(sig);
    }

    pub fn add_call_sig(&mut self, owner: Descriptor, sig: SigDesc) {
        self.ty(owner).call_sigs.push(sig);
    }

    fn anonymous_decl(&mut self) -> DeclDesc {
        self.decls.push(DeclRecord::default());
        DeclDesc(self.decls.len() as u32 - 1)
    }

    fn path_of(&self, owner: Descriptor) -> Option<&String> {
        let rec = &self.types[owner.0 as usize];
        let sym = rec.symbol.or(rec.alias)?;
        let decl = self.symbols[sym.0 as usize].decl?;
        self.decls[decl.0 as usize].module_path.as_ref()
    }

    // --- post-hoc mutators (cycles, modifiers, decorators) ----------------

    pub fn set_property_type(&mut self, sym: SymbolDesc, ty: Descriptor) {
        self.symbols[sym.0 as usize].value_type = Some(ty);
    }

    pub fn set_symbol_flags(&mut self, sym: SymbolDesc, flags: SymbolFlags) {
        self.symbols[sym.0 as usize].flags |= flags;
    }

    pub fn set_modifiers(&mut self, sym: SymbolDesc, modifiers: ModifierFlags) {
        let decl = self.symbols[sym.0 as usize]
            .decl
            .expect("symbol has a declaration");
        self.decls[decl.0 as usize].modifiers = modifiers;
    }

    pub fn add_decorator(&mut self, sym: SymbolDesc, decorator: Option<Descriptor>) {
        let decl = self.symbols[sym.0 as usize]
            .decl
            .expect("symbol has a declaration");
        self.decls[decl.0 as usize].decorators.push(decorator);
    }

    pub fn add_type_decorator(&mut self, ty: Descriptor, decorator: Option<Descriptor>) {
        let sym = self.types[ty.0 as usize].symbol.expect("type has a symbol");
        self.add_decorator(sym, decorator);
    }

    pub fn add_base(&mut self, ty: Descriptor, base: Descriptor) {
        self.ty(ty).bases.push(base);
    }

    pub fn add_implements(&mut self, ty: Descriptor, iface: Descriptor) {
        self.ty(ty).implements.push(iface);
    }

    pub fn set_string_index(&mut self, ty: Descriptor, value: Descriptor) {
        self.ty(ty).string_index = Some(value);
    }

    pub fn set_number_index(&mut self, ty: Descriptor, value: Descriptor) {
        self.ty(ty).number_index = Some(value);
    }

    pub fn set_export_binding(&mut self, ty: Descriptor, binding: ExportBinding) {
        let sym = self.types[ty.0 as usize].symbol.expect("type has a symbol");
        self.symbols[sym.0 as usize].export_binding = Some(binding);
    }

    // --- modules ----------------------------------------------------------

    pub fn module_in(&mut self, path: &str) -> SymbolDesc {
        let decl = self.decl_in(path);
        self.new_symbol(path, SymbolFlags::empty(), Some(decl))
    }

    pub fn add_export(&mut self, module: SymbolDesc, export: Descriptor) {
        let sym = {
            let rec = &self.types[export.0 as usize];
            rec.alias.or(rec.symbol).expect("export has a symbol")
        };
        self.symbols[module.0 as usize].exports.push(sym);
    }

    pub fn add_export_symbol(&mut self, module: SymbolDesc, export: SymbolDesc) {
        self.symbols[module.0 as usize].exports.push(export);
    }
}

impl Default for FixtureOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeOracle for FixtureOracle {
    fn kind_flags(&self, ty: Descriptor) -> TypeFlags {
        self.types[ty.0 as usize].flags
    }

    fn object_flags(&self, ty: Descriptor) -> ObjectFlags {
        self.types[ty.0 as usize].object_flags
    }

    fn symbol_of(&self, ty: Descriptor) -> Option<SymbolDesc> {
        self.types[ty.0 as usize].symbol
    }

    fn alias_symbol_of(&self, ty: Descriptor) -> Option<SymbolDesc> {
        self.types[ty.0 as usize].alias
    }

    fn symbol_name(&self, sym: SymbolDesc) -> String {
        self.symbols[sym.0 as usize].name.clone()
    }

    fn symbol_flags(&self, sym: SymbolDesc) -> SymbolFlags {
        self.symbols[sym.0 as usize].flags
    }

    fn declaration_of(&self, sym: SymbolDesc) -> Option<DeclDesc> {
        self.symbols[sym.0 as usize].decl
    }

    fn declaring_module_path(&self, decl: DeclDesc) -> Option<String> {
        self.decls[decl.0 as usize].module_path.clone()
    }

    fn modifier_flags(&self, decl: DeclDesc) -> ModifierFlags {
        self.decls[decl.0 as usize].modifiers
    }

    fn decorators_of(&self, decl: DeclDesc) -> Vec<Option<Descriptor>> {
        self.decls[decl.0 as usize].decorators.clone()
    }

    fn export_binding_of(&self, sym: SymbolDesc) -> Option<ExportBinding> {
        self.symbols[sym.0 as usize].export_binding.clone()
    }

    fn type_of_symbol(&self, sym: SymbolDesc) -> Option<Descriptor> {
        self.symbols[sym.0 as usize].value_type
    }

    fn declared_type_of(&self, sym: SymbolDesc) -> Option<Descriptor> {
        self.symbols[sym.0 as usize].declared_type
    }

    fn properties_of(&self, ty: Descriptor) -> Vec<SymbolDesc> {
        self.types[ty.0 as usize].properties.clone()
    }

    fn call_signatures_of(&self, ty: Descriptor) -> Vec<SigDesc> {
        self.types[ty.0 as usize].call_sigs.clone()
    }

    fn construct_signatures_of(&self, ty: Descriptor) -> Vec<SigDesc> {
        self.types[ty.0 as usize].ctor_sigs.clone()
    }

    fn signature_parameters(&self, sig: SigDesc) -> Vec<SymbolDesc> {
        self.sigs[sig.0 as usize].params.clone()
    }

    fn signature_return_type(&self, sig: SigDesc) -> Descriptor {
        self.sigs[sig.0 as usize].ret
    }

    fn base_types_of(&self, ty: Descriptor) -> Vec<Descriptor> {
        self.types[ty.0 as usize].bases.clone()
    }

    fn implemented_types_of(&self, ty: Descriptor) -> Vec<Descriptor> {
        self.types[ty.0 as usize].implements.clone()
    }

    fn type_arguments_of(&self, ty: Descriptor) -> Vec<Descriptor> {
        self.types[ty.0 as usize].type_args.clone()
    }

    fn alias_type_arguments_of(&self, ty: Descriptor) -> Vec<Descriptor> {
        self.types[ty.0 as usize].alias_type_args.clone()
    }

    fn type_parameters_of(&self, ty: Descriptor) -> Vec<Descriptor> {
        self.types[ty.0 as usize].type_params.clone()
    }

    fn target_of(&self, ty: Descriptor) -> Option<Descriptor> {
        self.types[ty.0 as usize].target
    }

    fn constituents_of(&self, ty: Descriptor) -> Vec<Descriptor> {
        self.types[ty.0 as usize].constituents.clone()
    }

    fn literal_value(&self, ty: Descriptor) -> Option<LiteralValue> {
        self.types[ty.0 as usize].literal.clone()
    }

    fn constraint_of(&self, ty: Descriptor) -> Option<Descriptor> {
        self.types[ty.0 as usize].constraint
    }

    fn default_of(&self, ty: Descriptor) -> Option<Descriptor> {
        self.types[ty.0 as usize].default
    }

    fn string_index_type_of(&self, ty: Descriptor) -> Option<Descriptor> {
        self.types[ty.0 as usize].string_index
    }

    fn number_index_type_of(&self, ty: Descriptor) -> Option<Descriptor> {
        self.types[ty.0 as usize].number_index
    }

    fn static_side_of(&self, ty: Descriptor) -> Option<Descriptor> {
        self.types[ty.0 as usize].static_side
    }

    fn exports_of(&self, module: SymbolDesc) -> Vec<SymbolDesc> {
        self.symbols[module.0 as usize].exports.clone()
    }
}
