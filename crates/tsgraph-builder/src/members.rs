//! Member assembly: turning member symbols into properties and methods,
//! and signature handles into call/construct signatures.

use tracing::trace;

use tsgraph_model::{
    AccessModifier, CallSignature, ConstructSignature, Decorator, IndexSignature, Lazy, Method,
    Parameter, Property, TypeId,
};
use tsgraph_oracle::{DeclDesc, Descriptor, ModifierFlags, SigDesc, SymbolDesc, SymbolFlags, TypeOracle};

use crate::builder::TypeGraphBuilder;
use crate::errors::BuildError;

/// A classified member: data slot or callable.
pub(crate) enum Member {
    Property(Property),
    Method(Method),
}

impl<O: TypeOracle> TypeGraphBuilder<'_, O> {
    pub(crate) fn assemble_member(&mut self, sym: SymbolDesc) -> Result<Member, BuildError> {
        let name = self.oracle.symbol_name(sym);
        let flags = self.oracle.symbol_flags(sym);
        let decl = self
            .oracle
            .declaration_of(sym)
            .ok_or_else(|| BuildError::MissingMemberDeclaration {
                member: name.clone(),
            })?;
        let modifiers = self.oracle.modifier_flags(decl);
        let access = access_of(&name, modifiers);
        let decorators = self.assemble_decorators(Some(decl), &name)?;

        let member_type = self
            .oracle
            .type_of_symbol(sym)
            .ok_or_else(|| BuildError::MissingMemberType {
                member: name.clone(),
            })?;

        if flags.contains(SymbolFlags::METHOD) {
            trace!(member = %name, "assembling method");
            let signatures = self.assemble_call_signatures(member_type)?;
            return Ok(Member::Method(Method {
                name,
                access,
                signatures,
                decorators,
            }));
        }

        let has_getter = flags.contains(SymbolFlags::GET_ACCESSOR);
        let has_setter = flags.contains(SymbolFlags::SET_ACCESSOR);
        trace!(member = %name, "assembling property");
        Ok(Member::Property(Property {
            name,
            ty: self.build(member_type)?,
            access,
            has_getter,
            has_setter,
            read_only: modifiers.contains(ModifierFlags::READONLY) || (has_getter && !has_setter),
            optional: flags.contains(SymbolFlags::OPTIONAL),
            decorators,
        }))
    }

    pub(crate) fn assemble_call_signatures(
        &mut self,
        ty: Descriptor,
    ) -> Result<Vec<CallSignature>, BuildError> {
        self.oracle
            .call_signatures_of(ty)
            .into_iter()
            .map(|sig| self.assemble_signature(sig))
            .collect()
    }

    pub(crate) fn assemble_construct_signatures(
        &mut self,
        ty: Descriptor,
    ) -> Result<Vec<ConstructSignature>, BuildError> {
        self.oracle
            .construct_signatures_of(ty)
            .into_iter()
            .map(|sig| self.assemble_signature(sig))
            .collect()
    }

    fn assemble_signature(&mut self, sig: SigDesc) -> Result<CallSignature, BuildError> {
        let parameters = self
            .oracle
            .signature_parameters(sig)
            .into_iter()
            .map(|param| self.assemble_parameter(param))
            .collect::<Result<Vec<_>, _>>()?;
        let return_type = self.build(self.oracle.signature_return_type(sig))?;
        Ok(CallSignature {
            parameters,
            return_type,
        })
    }

    fn assemble_parameter(&mut self, sym: SymbolDesc) -> Result<Parameter, BuildError> {
        let name = self.oracle.symbol_name(sym);
        let ty = self
            .oracle
            .type_of_symbol(sym)
            .ok_or_else(|| BuildError::MissingMemberType {
                member: name.clone(),
            })?;
        let decorators = match self.oracle.declaration_of(sym) {
            Some(decl) => self.assemble_decorators(Some(decl), &name)?,
            None => Vec::new(),
        };
        Ok(Parameter {
            name,
            ty: self.build(ty)?,
            optional: self.oracle.symbol_flags(sym).contains(SymbolFlags::OPTIONAL),
            decorators,
        })
    }

    /// An unresolvable decorator entry is fatal: a half-described
    /// decoration list would silently change run-time dispatch answers.
    pub(crate) fn assemble_decorators(
        &mut self,
        decl: Option<DeclDesc>,
        owner: &str,
    ) -> Result<Vec<Decorator>, BuildError> {
        let Some(decl) = decl else {
            return Ok(Vec::new());
        };
        self.oracle
            .decorators_of(decl)
            .into_iter()
            .map(|entry| match entry {
                Some(ty) => Ok(Decorator {
                    function: self.build(ty)?,
                }),
                None => Err(BuildError::UnresolvedDecorator {
                    owner: owner.to_string(),
                }),
            })
            .collect()
    }

    pub(crate) fn assemble_index_signatures(
        &mut self,
        ty: Descriptor,
    ) -> Result<Vec<IndexSignature>, BuildError> {
        let mut signatures = Vec::new();
        if let Some(value) = self.oracle.string_index_type_of(ty) {
            signatures.push(IndexSignature {
                key: Lazy::built(TypeId::STRING),
                value: self.build(value)?,
            });
        }
        if let Some(value) = self.oracle.number_index_type_of(ty) {
            signatures.push(IndexSignature {
                key: Lazy::built(TypeId::NUMBER),
                value: self.build(value)?,
            });
        }
        Ok(signatures)
    }
}

/// A `#`-prefixed name is runtime-private regardless of declared
/// modifiers.
fn access_of(name: &str, modifiers: ModifierFlags) -> AccessModifier {
    if name.starts_with('#') || modifiers.contains(ModifierFlags::PRIVATE) {
        AccessModifier::Private
    } else if modifiers.contains(ModifierFlags::PROTECTED) {
        AccessModifier::Protected
    } else {
        AccessModifier::Public
    }
}
