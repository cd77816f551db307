use tracing::debug;

use crate::{
    errors::ProvideErrorKind,
    object::{Object, ObjectKind},
    reflect::{Shape, TypeDescriptor},
};

impl ObjectKind {
    /// Kind of a value with the given shape, `None` if such values can't be provided.
    #[inline]
    #[must_use]
    pub const fn of_shape(shape: &Shape) -> Option<Self> {
        if shape.is_struct_pointer() {
            Some(ObjectKind::StructPointer)
        } else if shape.is_function() {
            Some(ObjectKind::Function)
        } else {
            None
        }
    }
}

/// Assigns the kind of `object` from its type descriptor.
///
/// # Errors
/// Returns [`ProvideErrorKind::UnsupportedType`] if the type is neither a pointer to a struct nor a function,
/// the object's kind is left unset then.
pub(crate) fn classify(object: &mut Object, descriptor: &TypeDescriptor) -> Result<ObjectKind, ProvideErrorKind> {
    let Some(kind) = ObjectKind::of_shape(&descriptor.shape) else {
        return Err(ProvideErrorKind::UnsupportedType {
            type_info: descriptor.info,
            shape: descriptor.shape,
        });
    };

    object.kind = Some(kind);
    debug!(%kind, "Classified");

    Ok(kind)
}
