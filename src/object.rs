use alloc::{boxed::Box, string::String};
use core::{
    any::Any,
    fmt::{self, Debug, Display, Formatter},
};

use crate::{
    any::TypeInfo,
    reflect::{Reflect, TypeDescriptor},
    utils::thread_safety::{BoxAnyThreadSafety, SendSafety, SyncSafety},
};

/// Supported shape of a provided value, assigned by the graph when the object is provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Shared pointer to a struct, e.g. `Arc<Db>`. Its fields can be injected in place.
    StructPointer,
    /// Function pointer or boxed `dyn Fn`/`FnMut`/`FnOnce` used as a constructor.
    Function,
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::StructPointer => f.write_str("struct pointer"),
            ObjectKind::Function => f.write_str("function"),
        }
    }
}

/// Key under which an object is stored in the graph pool.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectKey {
    Name(String),
    Type(TypeInfo),
}

/// Node of a [`crate::Graph`]: a pre-built instance or a constructor, optionally named.
///
/// Objects are created by the caller with [`Object::new`] or [`Object::named`].
/// The type descriptor and kind are filled in by [`crate::Graph::provide`] and can't be set otherwise.
pub struct Object {
    value: BoxAnyThreadSafety,
    pub(crate) name: String,
    reflect: fn() -> TypeDescriptor,
    type_descriptor: Option<TypeDescriptor>,
    pub(crate) kind: Option<ObjectKind>,
    pub(crate) complete: bool,
}

impl Object {
    /// Creates an unnamed object, keyed by the type of `value` only.
    #[inline]
    #[must_use]
    pub fn new<T>(value: T) -> Self
    where
        T: Reflect + SendSafety + SyncSafety,
    {
        Self::named(String::new(), value)
    }

    /// Creates an object keyed by `name`.
    /// Use it to provide several objects of the same type.
    ///
    /// An empty name is the same as [`Object::new`].
    #[inline]
    #[must_use]
    pub fn named<T>(name: impl Into<String>, value: T) -> Self
    where
        T: Reflect + SendSafety + SyncSafety,
    {
        Self {
            value: Box::new(value),
            name: name.into(),
            reflect: TypeDescriptor::of::<T>,
            type_descriptor: None,
            kind: None,
            complete: false,
        }
    }

    /// Attaches the descriptor of the value type and returns it.
    pub(crate) fn reflect(&mut self) -> TypeDescriptor {
        *self.type_descriptor.get_or_insert_with(self.reflect)
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// Kind assigned by the graph, `None` if the object wasn't provided yet
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Option<ObjectKind> {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn type_descriptor(&self) -> Option<&TypeDescriptor> {
        self.type_descriptor.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn type_info(&self) -> Option<TypeInfo> {
        self.type_descriptor.map(|descriptor| descriptor.info)
    }

    /// Whether the object was marked as fully resolved.
    /// Providing never sets it, see [`crate::Graph::mark_complete`].
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &dyn Any {
        &*self.value
    }

    #[inline]
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// Pool key of the object, `None` if an unnamed object wasn't provided yet
    #[must_use]
    pub fn key(&self) -> Option<ObjectKey> {
        if self.is_named() {
            Some(ObjectKey::Name(self.name.clone()))
        } else {
            self.type_info().map(ObjectKey::Type)
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.type_descriptor {
            Some(descriptor) => Display::fmt(&descriptor.info, f),
            None => f.write_str("<unreflected>"),
        }
    }
}

impl Debug for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("name", &self.name)
            .field("type_descriptor", &self.type_descriptor)
            .field("kind", &self.kind)
            .field("complete", &self.complete)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{Object, ObjectKey};
    use crate::{any::TypeInfo, reflect::Reflect, Shape};

    use alloc::{format, string::ToString as _, sync::Arc};

    struct Db(u8);

    impl Reflect for Db {
        const SHAPE: Shape = Shape::Struct;
    }

    #[test]
    fn test_new_is_unreflected() {
        let object = Object::new(Arc::new(Db(1)));

        assert!(!object.is_named());
        assert_eq!(object.kind(), None);
        assert_eq!(object.type_info(), None);
        assert_eq!(object.key(), None);
        assert!(!object.is_complete());
        assert_eq!(object.to_string(), "<unreflected>");
    }

    #[test]
    fn test_reflect_attaches_descriptor() {
        let mut object = Object::named("primary", Arc::new(Db(1)));
        let descriptor = object.reflect();

        assert_eq!(descriptor.info, TypeInfo::of::<Arc<Db>>());
        assert_eq!(object.type_descriptor(), Some(&descriptor));
        assert_eq!(object.key(), Some(ObjectKey::Name("primary".to_string())));
        assert_eq!(object.to_string(), descriptor.info.name);
        assert!(format!("{object:?}").contains("primary"));
    }

    #[test]
    fn test_empty_name_is_unnamed() {
        let mut object = Object::named("", Arc::new(Db(1)));
        object.reflect();

        assert!(!object.is_named());
        assert_eq!(object.key(), Some(ObjectKey::Type(TypeInfo::of::<Arc<Db>>())));
    }

    #[test]
    fn test_downcast() {
        let object = Object::new(Arc::new(Db(7)));

        assert_eq!(object.downcast_ref::<Arc<Db>>().map(|db| db.0), Some(7));
        assert!(object.downcast_ref::<Db>().is_none());
        assert!(object.value().is::<Arc<Db>>());
    }
}
