#![no_std]

extern crate alloc;

#[macro_use]
pub(crate) mod macros;

pub(crate) mod any;
pub(crate) mod classify;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod graph;
pub(crate) mod logger;
pub(crate) mod object;
pub(crate) mod reflect;
pub(crate) mod utils;

pub use any::TypeInfo;
pub use config::GraphConfig;
pub use errors::ProvideErrorKind;
pub use graph::Graph;
pub use logger::{Logger, TracingLogger};
pub use object::{Object, ObjectKey, ObjectKind};
pub use reflect::{Reflect, Shape, TypeDescriptor};

#[cfg(feature = "derive")]
pub use wiregraph_macros::Reflect;
