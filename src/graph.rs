use alloc::{
    boxed::Box,
    collections::{btree_map::Entry, BTreeMap},
    format,
    string::String,
    vec::Vec,
};
use core::fmt::{self, Debug, Formatter};
use tracing::{debug, error, info_span};

use crate::{
    any::TypeInfo,
    classify::classify,
    config::GraphConfig,
    errors::ProvideErrorKind,
    logger::Logger,
    object::{Object, ObjectKey},
    reflect::TypeDescriptor,
};

/// Pool of provided objects, the starting point for building a graph of their dependencies.
///
/// Objects are keyed by name if they have one and by type otherwise,
/// so there is only one object for each key.
/// Type keys are exact: `Arc<Db>`, `Rc<Db>` and `&'static Db` are different types,
/// so one unnamed object of each can be provided.
/// The pool is append-only: objects can't be removed or replaced once provided.
///
/// # Examples
/// ```rust
/// use std::sync::Arc;
/// use wiregraph::{Graph, GraphConfig, Object, ProvideErrorKind, Reflect};
///
/// #[derive(Reflect)]
/// struct Db;
///
/// let mut graph = Graph::new(GraphConfig::default());
/// graph.provide([Object::new(Arc::new(Db)), Object::named("replica", Arc::new(Db))])?;
///
/// assert_eq!(graph.len(), 2);
/// assert!(matches!(
///     graph.provide_one(Object::new(Arc::new(Db))),
///     Err(ProvideErrorKind::DuplicateType { .. })
/// ));
/// # Ok::<(), ProvideErrorKind>(())
/// ```
pub struct Graph {
    logger: Option<Box<dyn Logger>>,
    /// Provided objects in the order they were accepted, pools index into it
    start_points: Vec<Object>,
    name_pool: BTreeMap<String, usize>,
    type_pool: BTreeMap<TypeInfo, usize>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl Graph {
    #[inline]
    #[must_use]
    pub fn new(GraphConfig { logger }: GraphConfig) -> Self {
        Self {
            logger,
            start_points: Vec::new(),
            name_pool: BTreeMap::new(),
            type_pool: BTreeMap::new(),
        }
    }

    /// Provides objects to the graph in iteration order.
    ///
    /// # Errors
    /// Returns the first error of [`Self::provide_one`].
    /// Objects accepted before the failing one stay in the graph, the rest aren't provided.
    pub fn provide<I>(&mut self, objects: I) -> Result<(), ProvideErrorKind>
    where
        I: IntoIterator<Item = Object>,
    {
        for object in objects {
            self.provide_one(object)?;
        }
        Ok(())
    }

    /// Classifies the object and adds it to the pool of its key.
    ///
    /// # Errors
    /// - Returns [`ProvideErrorKind::UnsupportedType`] if the value is neither a pointer to a struct nor a function
    /// - Returns [`ProvideErrorKind::DuplicateType`] if the object is unnamed and the graph already has an unnamed object of the type
    /// - Returns [`ProvideErrorKind::DuplicateName`] if the graph already has an object with the name
    ///
    /// A rejected object is dropped.
    pub fn provide_one(&mut self, mut object: Object) -> Result<(), ProvideErrorKind> {
        let descriptor = object.reflect();

        let span = info_span!("provide", object = descriptor.info.name, name = object.name());
        let _guard = span.enter();

        let kind = match classify(&mut object, &descriptor) {
            Ok(kind) => kind,
            Err(err) => return Err(self.reject(&descriptor, err)),
        };

        let index = self.start_points.len();
        if object.is_named() {
            match self.name_pool.entry(object.name.clone()) {
                Entry::Occupied(entry) => {
                    let err = ProvideErrorKind::DuplicateName {
                        type_info: descriptor.info,
                        name: entry.key().clone(),
                    };
                    return Err(self.reject(&descriptor, err));
                }
                Entry::Vacant(entry) => {
                    entry.insert(index);
                }
            }
            debug!("Added to name pool");
        } else {
            match self.type_pool.entry(descriptor.info) {
                Entry::Occupied(entry) => {
                    let existing = &self.start_points[*entry.get()];
                    let err = ProvideErrorKind::DuplicateType {
                        type_info: descriptor.info,
                        existing: match existing.kind() {
                            Some(kind) => format!("{existing} ({kind})"),
                            None => format!("{existing}"),
                        },
                    };
                    return Err(self.reject(&descriptor, err));
                }
                Entry::Vacant(entry) => {
                    entry.insert(index);
                }
            }
            debug!("Added to type pool");
        }

        if object.is_named() {
            narrate!(self.logger, "Provided {} {:?} as {}", descriptor.info, object.name(), kind);
        } else {
            narrate!(self.logger, "Provided {} as {}", descriptor.info, kind);
        }
        self.start_points.push(object);

        Ok(())
    }

    fn reject(&self, descriptor: &TypeDescriptor, err: ProvideErrorKind) -> ProvideErrorKind {
        error!("{}", err);
        narrate!(self.logger, "Rejected {}: {}", descriptor, err);
        err
    }

    /// Marks the object with the key as fully resolved.
    /// Returns `false` if the graph has no such object.
    pub fn mark_complete(&mut self, key: &ObjectKey) -> bool {
        let Some(index) = self.index_of(key) else {
            return false;
        };

        let object = &mut self.start_points[index];
        object.complete = true;
        debug!(object = %object, name = object.name(), "Marked complete");

        true
    }
}

impl Graph {
    /// All provided objects in the order they were accepted
    #[inline]
    #[must_use]
    pub fn start_points(&self) -> &[Object] {
        &self.start_points
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: &ObjectKey) -> Option<&Object> {
        self.index_of(key).map(|index| &self.start_points[index])
    }

    #[inline]
    #[must_use]
    pub fn named(&self, name: &str) -> Option<&Object> {
        self.name_pool.get(name).map(|&index| &self.start_points[index])
    }

    #[inline]
    #[must_use]
    pub fn unnamed(&self, type_info: &TypeInfo) -> Option<&Object> {
        self.type_pool.get(type_info).map(|&index| &self.start_points[index])
    }

    #[inline]
    #[must_use]
    pub fn unnamed_of<T: ?Sized + 'static>(&self) -> Option<&Object> {
        self.unnamed(&TypeInfo::of::<T>())
    }

    /// Keys of the name pool in lexicographic order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.name_pool.keys().map(String::as_str)
    }

    /// Types of unnamed objects
    pub fn types(&self) -> impl Iterator<Item = &TypeInfo> + '_ {
        self.type_pool.keys()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.start_points.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start_points.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn named_len(&self) -> usize {
        self.name_pool.len()
    }

    #[inline]
    #[must_use]
    pub fn unnamed_len(&self) -> usize {
        self.type_pool.len()
    }

    #[inline]
    fn index_of(&self, key: &ObjectKey) -> Option<usize> {
        match key {
            ObjectKey::Name(name) => self.name_pool.get(name.as_str()).copied(),
            ObjectKey::Type(type_info) => self.type_pool.get(type_info).copied(),
        }
    }
}

impl Debug for Graph {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("has_logger", &self.logger.is_some())
            .field("start_points", &self.start_points)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::Graph;
    use crate::{
        any::TypeInfo,
        config::GraphConfig,
        errors::ProvideErrorKind,
        object::{Object, ObjectKey, ObjectKind},
        reflect::{Reflect, Shape},
    };

    use alloc::{
        boxed::Box,
        format,
        string::{String, ToString as _},
        sync::Arc,
        vec,
        vec::Vec,
    };
    use core::fmt::Arguments;
    use parking_lot::Mutex;
    use tracing_test::traced_test;

    struct Foo(u8);
    struct Bar;

    impl Reflect for Foo {
        const SHAPE: Shape = Shape::Struct;
    }

    impl Reflect for Bar {
        const SHAPE: Shape = Shape::Struct;
    }

    fn new_bar(_foo: Arc<Foo>) -> Bar {
        Bar
    }

    fn recording_graph() -> (Graph, Arc<Mutex<Vec<String>>>) {
        let lines: Arc<Mutex<Vec<String>>> = Arc::default();
        let graph = Graph::new(GraphConfig::new().with_logger({
            let lines = lines.clone();
            move |args: Arguments<'_>| lines.lock().push(args.to_string())
        }));
        (graph, lines)
    }

    #[test]
    fn test_new_is_empty() {
        let graph = Graph::default();

        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert_eq!(graph.named_len(), 0);
        assert_eq!(graph.unnamed_len(), 0);
        assert_eq!(graph.names().count(), 0);
        assert_eq!(graph.types().count(), 0);
    }

    #[test]
    #[traced_test]
    fn test_duplicate_type_scenario() {
        let mut graph = Graph::default();

        graph.provide_one(Object::new(Arc::new(Foo(1)))).unwrap();
        assert_eq!(graph.unnamed_len(), 1);

        let err = graph.provide_one(Object::new(Arc::new(Foo(2)))).unwrap_err();
        assert!(matches!(
            &err,
            ProvideErrorKind::DuplicateType { type_info, existing }
                if *type_info == TypeInfo::of::<Arc<Foo>>() && existing.ends_with("(struct pointer)")
        ));
        assert_eq!(graph.unnamed_len(), 1);
        assert_eq!(graph.unnamed_of::<Arc<Foo>>().and_then(|object| object.downcast_ref::<Arc<Foo>>()).map(|foo| foo.0), Some(1));

        graph.provide_one(Object::named("alt", Arc::new(Foo(3)))).unwrap();
        assert_eq!(graph.named_len(), 1);
        assert_eq!(graph.unnamed_len(), 1);
        assert_eq!(graph.len(), 2);

        assert!(logs_contain("Added to type pool"));
        assert!(logs_contain("Added to name pool"));
        assert!(logs_contain("Unsupported two unnamed objects of the same type"));
    }

    #[test]
    fn test_duplicate_name_across_types() {
        let mut graph = Graph::default();

        graph.provide_one(Object::named("main", Arc::new(Foo(1)))).unwrap();
        let err = graph.provide_one(Object::named("main", Arc::new(Bar))).unwrap_err();

        assert_eq!(
            err,
            ProvideErrorKind::DuplicateName {
                type_info: TypeInfo::of::<Arc<Bar>>(),
                name: "main".to_string(),
            }
        );
        assert_eq!(graph.len(), 1);
        assert!(graph.named("main").and_then(|object| object.downcast_ref::<Arc<Foo>>()).is_some());
    }

    #[test]
    fn test_named_and_unnamed_coexist() {
        let mut graph = Graph::default();

        graph
            .provide([
                Object::named("primary", Arc::new(Foo(1))),
                Object::new(Arc::new(Foo(2))),
                Object::named("replica", Arc::new(Foo(3))),
            ])
            .unwrap();

        assert_eq!(graph.named_len(), 2);
        assert_eq!(graph.unnamed_len(), 1);
        assert_eq!(graph.names().collect::<Vec<_>>(), ["primary", "replica"]);
        assert_eq!(graph.types().copied().collect::<Vec<_>>(), [TypeInfo::of::<Arc<Foo>>()]);
    }

    #[test]
    fn test_unsupported_leaves_pool_untouched() {
        let mut graph = Graph::default();

        let err = graph.provide_one(Object::new(42i32)).unwrap_err();
        assert!(matches!(err, ProvideErrorKind::UnsupportedType { shape: Shape::Int, .. }));
        assert!(graph.is_empty());

        graph.provide_one(Object::new(Arc::new(Foo(1)))).unwrap();
        graph.provide_one(Object::new(new_bar as fn(Arc<Foo>) -> Bar)).unwrap();
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_batch_stops_at_first_error() {
        let mut graph = Graph::default();

        let result = graph.provide(vec![
            Object::new(Arc::new(Foo(1))),
            Object::named("bar", Arc::new(Bar)),
            Object::new(Foo(2)),
            Object::new(Arc::new(Bar)),
        ]);

        assert!(matches!(result, Err(ProvideErrorKind::UnsupportedType { .. })));
        assert_eq!(graph.len(), 2);
        assert!(graph.unnamed_of::<Arc<Bar>>().is_none());
    }

    #[test]
    fn test_start_points_order() {
        let mut graph = Graph::default();

        graph.provide([Object::named("b", Arc::new(Foo(1))), Object::new(Arc::new(Bar))]).unwrap();
        graph.provide_one(Object::named("b", Arc::new(Bar))).unwrap_err();
        graph
            .provide([Object::new(Arc::new(Foo(2))), Object::named("a", new_bar as fn(Arc<Foo>) -> Bar)])
            .unwrap();

        let keys = graph.start_points().iter().map(|object| object.key().unwrap()).collect::<Vec<_>>();
        assert_eq!(
            keys,
            [
                ObjectKey::Name("b".to_string()),
                ObjectKey::Type(TypeInfo::of::<Arc<Bar>>()),
                ObjectKey::Type(TypeInfo::of::<Arc<Foo>>()),
                ObjectKey::Name("a".to_string()),
            ]
        );
        assert_eq!(
            graph.start_points().iter().map(|object| object.kind().unwrap()).collect::<Vec<_>>(),
            [ObjectKind::StructPointer, ObjectKind::StructPointer, ObjectKind::StructPointer, ObjectKind::Function]
        );
    }

    #[test]
    fn test_mark_complete() {
        let mut graph = Graph::default();
        graph.provide([Object::new(Arc::new(Foo(1))), Object::named("bar", Arc::new(Bar))]).unwrap();

        let foo_key = ObjectKey::Type(TypeInfo::of::<Arc<Foo>>());
        assert!(!graph.get(&foo_key).unwrap().is_complete());
        assert!(graph.mark_complete(&foo_key));
        assert!(graph.get(&foo_key).unwrap().is_complete());
        assert!(!graph.named("bar").unwrap().is_complete());

        assert!(!graph.mark_complete(&ObjectKey::Name("missing".to_string())));
        assert!(!graph.mark_complete(&ObjectKey::Type(TypeInfo::of::<Arc<Bar>>())));
    }

    #[test]
    fn test_logger_narrates() {
        let (mut graph, lines) = recording_graph();

        graph.provide_one(Object::new(Arc::new(Foo(1)))).unwrap();
        graph.provide_one(Object::named("bar", Arc::new(Bar))).unwrap();
        graph.provide_one(Object::new(1u8)).unwrap_err();

        let lines = lines.lock();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Provided ") && lines[0].ends_with(" as struct pointer"));
        assert!(lines[1].contains("\"bar\""));
        assert!(lines[2].starts_with("Rejected u8 (uint)"));
    }

    #[test]
    #[traced_test]
    fn test_every_rejection_is_logged_and_narrated() {
        let (mut graph, lines) = recording_graph();
        graph.provide_one(Object::named("foo", Arc::new(Foo(1)))).unwrap();
        graph.provide_one(Object::new(Arc::new(Bar))).unwrap();

        let errors = [
            graph.provide_one(Object::new(Foo(2))).unwrap_err(),
            graph.provide_one(Object::named("foo", Arc::new(Bar))).unwrap_err(),
            graph.provide_one(Object::new(Arc::new(Bar))).unwrap_err(),
        ];

        let lines = lines.lock();
        assert_eq!(lines.len(), 5);
        for (line, err) in lines[2..].iter().zip(&errors) {
            assert!(line.starts_with("Rejected "));
            assert!(line.ends_with(&err.to_string()));
            assert!(logs_contain(&err.to_string()));
        }
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_pointer_types_are_separate_keys() {
        static FOO: Foo = Foo(2);

        let mut graph = Graph::default();
        graph.provide([Object::new(Arc::new(Foo(1))), Object::new(&FOO)]).unwrap();

        assert_eq!(graph.unnamed_len(), 2);
        assert_eq!(graph.unnamed_of::<&'static Foo>().and_then(|object| object.downcast_ref::<&'static Foo>()).map(|foo| foo.0), Some(2));
        assert!(matches!(
            graph.provide_one(Object::new(&FOO)),
            Err(ProvideErrorKind::DuplicateType { .. })
        ));
    }

    #[test]
    fn test_logger_does_not_change_outcome() {
        fn outcomes(mut graph: Graph) -> Vec<bool> {
            let objects = vec![
                Object::new(Arc::new(Foo(1))),
                Object::new(Arc::new(Foo(2))),
                Object::named("foo", Arc::new(Foo(3))),
                Object::named("foo", Arc::new(Bar)),
                Object::new(Bar),
                Object::new(Box::new(|_: Arc<Foo>| Bar) as Box<dyn Fn(Arc<Foo>) -> Bar + Send + Sync>),
            ];
            objects.into_iter().map(|object| graph.provide_one(object).is_ok()).collect()
        }

        let (graph, _) = recording_graph();
        let with_logger = outcomes(graph);
        let without_logger = outcomes(Graph::new(GraphConfig::default()));

        assert_eq!(with_logger, without_logger);
        assert_eq!(with_logger, [true, false, true, false, false, true]);
    }

    #[test]
    fn test_debug() {
        let mut graph = Graph::default();
        graph.provide_one(Object::named("foo", Arc::new(Foo(1)))).unwrap();

        let debug = format!("{graph:?}");
        assert!(debug.contains("has_logger: false"));
        assert!(debug.contains("\"foo\""));
    }
}
