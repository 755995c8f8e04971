//! Project boundary detection and the host-library container catalogue.
//!
//! Types declared outside the project collapse to opaque stubs, except
//! for a small set of well-known host-library generics which keep a
//! dedicated shape so consumers can see through them.

use tracing::trace;

use tsgraph_model::{ArrayType, GenericBuiltIn, Lazy, MapType, PromiseType, SetType, TypeId, TypeNode};
use tsgraph_oracle::{Descriptor, TypeOracle};

use crate::builder::TypeGraphBuilder;
use crate::errors::BuildError;

/// Path markers that classify where a type's declaration lives.
///
/// A ref id embeds the declaring module path, so marker matching is a
/// substring test against the id itself.
#[derive(Debug, Clone)]
pub struct Boundary {
    external_markers: Vec<String>,
    host_lib_markers: Vec<String>,
}

impl Default for Boundary {
    fn default() -> Self {
        Self {
            external_markers: vec!["node_modules".to_string()],
            host_lib_markers: vec!["node_modules/typescript/lib/".to_string()],
        }
    }
}

impl Boundary {
    pub fn new(external_markers: Vec<String>, host_lib_markers: Vec<String>) -> Self {
        Self {
            external_markers,
            host_lib_markers,
        }
    }

    pub fn is_external(&self, ref_id: &str) -> bool {
        self.external_markers.iter().any(|m| ref_id.contains(m.as_str()))
    }

    pub fn is_host_lib(&self, ref_id: &str) -> bool {
        self.host_lib_markers.iter().any(|m| ref_id.contains(m.as_str()))
    }
}

impl<O: TypeOracle> TypeGraphBuilder<'_, O> {
    /// Recognizes well-known host-library generics by name and returns
    /// a canned node for them. `None` means the name is not in the
    /// catalogue, or its expected type arguments are missing; callers
    /// fall back to the external stub path.
    pub(crate) fn build_builtin(
        &mut self,
        name: &str,
        type_args: &[Descriptor],
    ) -> Result<Option<Lazy>, BuildError> {
        let node = match name {
            "Promise" => {
                let Some(&value) = type_args.first() else {
                    return Ok(None);
                };
                TypeNode::Promise(PromiseType {
                    value: self.build(value)?,
                })
            }
            "Array" | "ReadonlyArray" => {
                let Some(&element) = type_args.first() else {
                    return Ok(None);
                };
                TypeNode::Array(ArrayType {
                    element: self.build(element)?,
                })
            }
            "Map" => {
                let [key, value] = type_args else {
                    return Ok(None);
                };
                TypeNode::Map(MapType {
                    key: self.build(*key)?,
                    value: self.build(*value)?,
                })
            }
            "Set" => {
                let Some(&element) = type_args.first() else {
                    return Ok(None);
                };
                TypeNode::Set(SetType {
                    element: self.build(element)?,
                })
            }
            "Iterator" | "IterableIterator" | "AsyncIterator" | "AsyncIterableIterator"
            | "Generator" | "AsyncGenerator" => {
                trace!(name = %name, "returning generic iterator built-in");
                TypeNode::GenericBuiltIn(GenericBuiltIn {
                    name: name.to_string(),
                    type_arguments: self.build_all(type_args)?,
                })
            }
            "Function" => return Ok(Some(Lazy::built(TypeId::FUNCTION_OBJECT))),
            "Date" => return Ok(Some(Lazy::built(TypeId::DATE))),
            "Error" => return Ok(Some(Lazy::built(TypeId::ERROR))),
            "RegExp" => return Ok(Some(Lazy::built(TypeId::REGEXP))),
            _ => return Ok(None),
        };
        Ok(Some(Lazy::built(self.store.alloc(node))))
    }
}
