use alloc::string::String;

use crate::{any::TypeInfo, reflect::Shape};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProvideErrorKind {
    #[error("Expected object value to be a pointer to a struct or a function, but got type {type_info} ({shape})")]
    UnsupportedType { type_info: TypeInfo, shape: Shape },
    #[error("Unsupported two unnamed objects of the same type. Graph already has {type_info} with value {existing}")]
    DuplicateType { type_info: TypeInfo, existing: String },
    #[error("Unsupported two objects with the same name. Graph already has {type_info} with name {name:?}")]
    DuplicateName { type_info: TypeInfo, name: String },
}
