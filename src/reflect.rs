use alloc::{boxed::Box, rc::Rc, string::String, sync::Arc, vec::Vec};
use core::{
    any::Any,
    fmt::{self, Display, Formatter},
};

use crate::any::TypeInfo;

/// Runtime shape of a type, the part of its layout the graph cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Unit,
    Bool,
    Char,
    Int,
    Uint,
    Float,
    Str,
    Tuple,
    Array,
    Slice,
    Struct,
    Enum,
    Union,
    /// Callable value: a function pointer or a boxed `dyn Fn`/`FnMut`/`FnOnce`.
    Function,
    /// Type-erased value, e.g. `Box<dyn Any>`.
    Interface,
    /// Shared pointer (`Arc`, `Rc`, `&'static`) to a value of the given shape.
    Pointer(&'static Shape),
}

impl Shape {
    #[inline]
    #[must_use]
    pub const fn is_struct_pointer(&self) -> bool {
        matches!(self, Shape::Pointer(Shape::Struct))
    }

    #[inline]
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self, Shape::Function)
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Unit => f.write_str("unit"),
            Shape::Bool => f.write_str("bool"),
            Shape::Char => f.write_str("char"),
            Shape::Int => f.write_str("int"),
            Shape::Uint => f.write_str("uint"),
            Shape::Float => f.write_str("float"),
            Shape::Str => f.write_str("string"),
            Shape::Tuple => f.write_str("tuple"),
            Shape::Array => f.write_str("array"),
            Shape::Slice => f.write_str("slice"),
            Shape::Struct => f.write_str("struct"),
            Shape::Enum => f.write_str("enum"),
            Shape::Union => f.write_str("union"),
            Shape::Function => f.write_str("function"),
            Shape::Interface => f.write_str("interface"),
            Shape::Pointer(inner) => write!(f, "pointer to {inner}"),
        }
    }
}

/// Types that can describe their own [`Shape`].
///
/// Implemented here for primitives, strings, collections, shared pointers, `dyn Any`,
/// function pointers and boxed `dyn Fn`/`FnMut`/`FnOnce` with up to 12 arguments.
/// Functions may take their first argument by shared reference (`fn(&Config) -> Db`);
/// references in other argument positions aren't covered.
/// Use `#[derive(Reflect)]` for your own structs, enums and unions.
///
/// # Examples
/// ```rust
/// use std::sync::Arc;
/// use wiregraph::{Reflect, Shape};
///
/// struct Db;
///
/// impl Reflect for Db {
///     const SHAPE: Shape = Shape::Struct;
/// }
///
/// assert!(<Arc<Db> as Reflect>::SHAPE.is_struct_pointer());
/// ```
pub trait Reflect: 'static {
    const SHAPE: Shape;
}

/// Type identity and shape of a value, attached to an object when it's provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub info: TypeInfo,
    pub shape: Shape,
}

impl TypeDescriptor {
    #[inline]
    #[must_use]
    pub fn of<T: Reflect + ?Sized>() -> Self {
        Self {
            info: TypeInfo::of::<T>(),
            shape: T::SHAPE,
        }
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.info, self.shape)
    }
}

macro_rules! impl_reflect_primitive {
    ($shape:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                const SHAPE: Shape = Shape::$shape;
            }
        )+
    };
}

impl_reflect_primitive!(Bool => bool);
impl_reflect_primitive!(Char => char);
impl_reflect_primitive!(Int => i8, i16, i32, i64, i128, isize);
impl_reflect_primitive!(Uint => u8, u16, u32, u64, u128, usize);
impl_reflect_primitive!(Float => f32, f64);
impl_reflect_primitive!(Str => str, String);
impl_reflect_primitive!(Interface => dyn Any, dyn Any + Send, dyn Any + Send + Sync);
impl_reflect_primitive!(Interface => Box<dyn Any>, Box<dyn Any + Send>, Box<dyn Any + Send + Sync>);

impl<T: Reflect> Reflect for [T] {
    const SHAPE: Shape = Shape::Slice;
}

impl<T: Reflect> Reflect for Vec<T> {
    const SHAPE: Shape = Shape::Slice;
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    const SHAPE: Shape = Shape::Array;
}

impl<T: Reflect> Reflect for Option<T> {
    const SHAPE: Shape = Shape::Enum;
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    const SHAPE: Shape = Shape::Pointer(&T::SHAPE);
}

impl<T: Reflect + ?Sized> Reflect for Rc<T> {
    const SHAPE: Shape = Shape::Pointer(&T::SHAPE);
}

impl<T: Reflect + ?Sized> Reflect for &'static T {
    const SHAPE: Shape = Shape::Pointer(&T::SHAPE);
}

macro_rules! impl_reflect_tuple {
    ([]) => {
        impl Reflect for () {
            const SHAPE: Shape = Shape::Unit;
        }
    };
    ([$($ty:ident),+]) => {
        impl<$($ty: Reflect,)+> Reflect for ($($ty,)+) {
            const SHAPE: Shape = Shape::Tuple;
        }
    };
}

all_the_tuples!(impl_reflect_tuple);

macro_rules! impl_reflect_function {
    ([$($ty:ident),*]) => {
        impl<Response: 'static, $($ty: 'static,)*> Reflect for fn($($ty,)*) -> Response {
            const SHAPE: Shape = Shape::Function;
        }

        impl_reflect_function!(@boxed [$($ty),*] Fn, FnMut, FnOnce);
    };
    (@boxed $tys:tt $($fn_trait:ident),+) => {
        $(
            impl_reflect_function!(@boxed_one $tys $fn_trait);
        )+
    };
    (@boxed_one [$($ty:ident),*] $fn_trait:ident) => {
            impl<Response: 'static, $($ty: 'static,)*> Reflect for Box<dyn $fn_trait($($ty,)*) -> Response> {
                const SHAPE: Shape = Shape::Function;
            }

            impl<Response: 'static, $($ty: 'static,)*> Reflect for Box<dyn $fn_trait($($ty,)*) -> Response + Send + Sync> {
                const SHAPE: Shape = Shape::Function;
            }
    };
}

all_the_tuples!(impl_reflect_function);

// Constructors borrowing their first argument, e.g. `fn(&Config) -> Pool`.
// These are higher-ranked over the borrow, so they are distinct types from `fn(T1, ..)`.
macro_rules! impl_reflect_borrowing_function {
    ([]) => {};
    ([$head:ident $(, $ty:ident)*]) => {
        #[allow(coherence_leak_check)]
        impl<Response: 'static, $head: ?Sized + 'static, $($ty: 'static,)*> Reflect for fn(&$head, $($ty,)*) -> Response {
            const SHAPE: Shape = Shape::Function;
        }

        #[allow(coherence_leak_check)]
        impl<Response: 'static, $head: ?Sized + 'static, $($ty: 'static,)*> Reflect for Box<dyn Fn(&$head, $($ty,)*) -> Response> {
            const SHAPE: Shape = Shape::Function;
        }

        #[allow(coherence_leak_check)]
        impl<Response: 'static, $head: ?Sized + 'static, $($ty: 'static,)*> Reflect
            for Box<dyn Fn(&$head, $($ty,)*) -> Response + Send + Sync>
        {
            const SHAPE: Shape = Shape::Function;
        }
    };
}

all_the_tuples!(impl_reflect_borrowing_function);
