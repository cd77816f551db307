#[cfg(feature = "thread_safe")]
mod thread_safe {
    use alloc::boxed::Box;
    use core::any::Any;

    pub trait SendSafety: Send {}
    pub trait SyncSafety: Sync {}

    impl<T: Send + ?Sized> SendSafety for T {}
    impl<T: Sync + ?Sized> SyncSafety for T {}

    pub type BoxAnyThreadSafety = Box<dyn Any + Send + Sync>;
}

#[cfg(not(feature = "thread_safe"))]
mod thread_unsafe {
    use alloc::boxed::Box;
    use core::any::Any;

    pub trait SendSafety {}
    pub trait SyncSafety {}

    impl<T: ?Sized> SendSafety for T {}
    impl<T: ?Sized> SyncSafety for T {}

    pub type BoxAnyThreadSafety = Box<dyn Any>;
}

#[cfg(feature = "thread_safe")]
pub(crate) use thread_safe::{BoxAnyThreadSafety, SendSafety, SyncSafety};

#[cfg(not(feature = "thread_safe"))]
pub(crate) use thread_unsafe::{BoxAnyThreadSafety, SendSafety, SyncSafety};
