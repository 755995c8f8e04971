//! Identity calculation: the canonical string key a type is stored and
//! deduplicated under.
//!
//! Identity combines the declaring module path, the declared name, and
//! the recursively computed identities of generic arguments, so
//! `Box<string>` and `Box<number>` are distinct identities sharing one
//! declaration path. Primitives and literals short-circuit to fixed
//! well-known names, and anonymous structural types yield the empty
//! string: do not register, rebuild in place every time.
//!
//! Union and intersection identities join member identities in
//! oracle-reported order without sorting; differently-ordered but
//! semantically equal unions therefore get distinct identities (see
//! DESIGN.md for the rationale).

use tsgraph_model::number_text;
use tsgraph_oracle::{
    Descriptor, LiteralValue, ObjectFlags, SymbolDesc, SymbolFlags, TypeFlags, TypeOracle,
};

use crate::errors::BuildError;

#[derive(Copy, Clone, Debug)]
pub struct IdOptions {
    /// Short-circuit primitive and literal kinds to well-known names.
    pub primitives: bool,
    /// Derive identity from the alias symbol when one is present.
    pub prefer_alias: bool,
}

impl Default for IdOptions {
    fn default() -> Self {
        Self {
            primitives: true,
            prefer_alias: false,
        }
    }
}

impl IdOptions {
    pub fn prefer_alias() -> Self {
        Self {
            prefer_alias: true,
            ..Self::default()
        }
    }
}

/// Computes the canonical identity of `ty`.
///
/// Fails loudly (`BuildError::MissingSymbol`) for a non-primitive,
/// non-union, non-anonymous type without a symbol: returning an empty
/// identity there would silently merge unrelated types.
pub fn calculate<O: TypeOracle>(
    oracle: &O,
    ty: Descriptor,
    opts: IdOptions,
) -> Result<String, BuildError> {
    let flags = oracle.kind_flags(ty);

    if opts.prefer_alias {
        if let Some(alias) = oracle.alias_symbol_of(ty) {
            let generic = generic_argument_list(oracle, &oracle.alias_type_arguments_of(ty))?;
            return Ok(symbol_id(oracle, alias, &generic));
        }
    }

    let symbol = oracle.symbol_of(ty).or_else(|| oracle.alias_symbol_of(ty));

    // Anonymous structural shapes have no identity, unless the symbol is
    // a named function (function declarations report anonymous object
    // flags but are perfectly nominal).
    if flags.contains(TypeFlags::OBJECT)
        && oracle.object_flags(ty).contains(ObjectFlags::ANONYMOUS)
        && !symbol.is_some_and(|s| oracle.symbol_flags(s).contains(SymbolFlags::FUNCTION))
    {
        return Ok(String::new());
    }

    if opts.primitives {
        if let Some(name) = intrinsic_name(flags) {
            return Ok(name.to_string());
        }
        if flags.intersects(TypeFlags::LITERAL) {
            if let Some(value) = oracle.literal_value(ty) {
                return Ok(match value {
                    LiteralValue::Str(s) => s,
                    LiteralValue::Num(n) => number_text(n),
                    LiteralValue::Bool(b) => b.to_string(),
                });
            }
        }
    }

    if flags.contains(TypeFlags::UNION) {
        return joined_constituents(oracle, ty, " | ");
    }
    if flags.contains(TypeFlags::INTERSECTION) {
        return joined_constituents(oracle, ty, " & ");
    }

    let Some(symbol) = symbol else {
        // Tuple references carry no symbol; they are anonymous by design.
        let tuple = oracle
            .target_of(ty)
            .is_some_and(|t| oracle.object_flags(t).contains(ObjectFlags::TUPLE));
        if tuple {
            return Ok(String::new());
        }
        return Err(BuildError::MissingSymbol { flags });
    };

    if flags.contains(TypeFlags::TYPE_PARAMETER) {
        return Ok(oracle.symbol_name(symbol));
    }

    let generic = generic_argument_list(oracle, &oracle.type_arguments_of(ty))?;
    Ok(symbol_id(oracle, symbol, &generic))
}

/// `<path-to-declaring-module>__<declared-name><generic-argument-list>`.
pub(crate) fn symbol_id<O: TypeOracle>(oracle: &O, symbol: SymbolDesc, generic: &str) -> String {
    let name = oracle.symbol_name(symbol);
    let path = oracle
        .declaration_of(symbol)
        .and_then(|decl| oracle.declaring_module_path(decl))
        .unwrap_or_default();
    format!("{path}__{name}{generic}")
}

fn generic_argument_list<O: TypeOracle>(
    oracle: &O,
    args: &[Descriptor],
) -> Result<String, BuildError> {
    if args.is_empty() {
        return Ok(String::new());
    }
    let opts = IdOptions {
        primitives: true,
        prefer_alias: true,
    };
    let ids = args
        .iter()
        .map(|&arg| calculate(oracle, arg, opts))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("<{}>", ids.join(", ")))
}

fn joined_constituents<O: TypeOracle>(
    oracle: &O,
    ty: Descriptor,
    sep: &str,
) -> Result<String, BuildError> {
    let ids = oracle
        .constituents_of(ty)
        .iter()
        .map(|&m| calculate(oracle, m, IdOptions::prefer_alias()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids.join(sep))
}

fn intrinsic_name(flags: TypeFlags) -> Option<&'static str> {
    // Checked in priority order; some kinds report supersets.
    let name = if flags.contains(TypeFlags::ANY) {
        "any"
    } else if flags.contains(TypeFlags::NEVER) {
        "never"
    } else if flags.contains(TypeFlags::VOID) {
        "void"
    } else if flags.contains(TypeFlags::NULL) {
        "null"
    } else if flags.contains(TypeFlags::UNDEFINED) {
        "undefined"
    } else if flags.contains(TypeFlags::UNKNOWN) {
        "unknown"
    } else if flags.contains(TypeFlags::STRING) {
        "string"
    } else if flags.contains(TypeFlags::NUMBER) {
        "number"
    } else if flags.contains(TypeFlags::BOOLEAN) {
        "boolean"
    } else if flags.contains(TypeFlags::BIGINT) {
        "bigint"
    } else if flags.contains(TypeFlags::UNIQUE_ES_SYMBOL) {
        "unique symbol"
    } else if flags.contains(TypeFlags::ES_SYMBOL) {
        "symbol"
    } else {
        return None;
    };
    Some(name)
}
