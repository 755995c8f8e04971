//! Bitset classifications reported by the type oracle.
//!
//! These mirror the flag vocabulary of a TypeScript-style checker: a type
//! carries [`TypeFlags`], object types additionally carry [`ObjectFlags`],
//! symbols carry [`SymbolFlags`], and declarations carry [`ModifierFlags`].
//!
//! Some kinds are reported as a superset of flags (an enum-literal union
//! reports both `UNION` and `ENUM_LITERAL`), so consumers must check flags
//! in a defined priority order rather than assuming exclusivity.

use bitflags::bitflags;

bitflags! {
    /// Primary kind classification of a type descriptor.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u32 {
        const ANY              = 1 << 0;
        const UNKNOWN          = 1 << 1;
        const STRING           = 1 << 2;
        const NUMBER           = 1 << 3;
        const BOOLEAN          = 1 << 4;
        const BIGINT           = 1 << 5;
        const ES_SYMBOL        = 1 << 6;
        const UNIQUE_ES_SYMBOL = 1 << 7;
        const VOID             = 1 << 8;
        const UNDEFINED        = 1 << 9;
        const NULL             = 1 << 10;
        const NEVER            = 1 << 11;
        const STRING_LITERAL   = 1 << 12;
        const NUMBER_LITERAL   = 1 << 13;
        const BOOLEAN_LITERAL  = 1 << 14;
        /// Set on unions backing a declared enum (alongside `UNION`).
        const ENUM_LITERAL     = 1 << 15;
        const OBJECT           = 1 << 16;
        const UNION            = 1 << 17;
        const INTERSECTION     = 1 << 18;
        const INDEXED_ACCESS   = 1 << 19;
        const TYPE_PARAMETER   = 1 << 20;
    }
}

bitflags! {
    /// Sub-classification of `OBJECT` kinded descriptors.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ObjectFlags: u32 {
        const CLASS     = 1 << 0;
        const INTERFACE = 1 << 1;
        /// A generic declaration applied to type arguments; `target_of`
        /// reports the unapplied declaration.
        const REFERENCE = 1 << 2;
        /// Set on the target of a tuple reference.
        const TUPLE     = 1 << 3;
        /// Structural type with no nominal declaration.
        const ANONYMOUS = 1 << 4;
    }
}

bitflags! {
    /// Semantic classification of a symbol.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SymbolFlags: u32 {
        const FUNCTION     = 1 << 0;
        const METHOD       = 1 << 1;
        /// Anonymous type literal (`{ ... }` in type position).
        const TYPE_LITERAL = 1 << 2;
        const GET_ACCESSOR = 1 << 3;
        const SET_ACCESSOR = 1 << 4;
        const OPTIONAL     = 1 << 5;
        /// The synthetic `prototype` member on a class's static side.
        const PROTOTYPE    = 1 << 6;
    }
}

bitflags! {
    /// Declared modifiers on a declaration.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u32 {
        const PUBLIC    = 1 << 0;
        const PRIVATE   = 1 << 1;
        const PROTECTED = 1 << 2;
        const READONLY  = 1 << 3;
    }
}

impl TypeFlags {
    /// Kinds that collapse to interned singleton nodes.
    pub const INTRINSIC: Self = Self::ANY
        .union(Self::UNKNOWN)
        .union(Self::STRING)
        .union(Self::NUMBER)
        .union(Self::BOOLEAN)
        .union(Self::BIGINT)
        .union(Self::ES_SYMBOL)
        .union(Self::UNIQUE_ES_SYMBOL)
        .union(Self::VOID)
        .union(Self::UNDEFINED)
        .union(Self::NULL)
        .union(Self::NEVER);

    /// Kinds whose identity is the literal's own text.
    pub const LITERAL: Self = Self::STRING_LITERAL
        .union(Self::NUMBER_LITERAL)
        .union(Self::BOOLEAN_LITERAL);
}
