//! Process-wide registry cache.
//!
//! One slot per target type, keyed by [`TypeId`]. A slot holds the outcome of
//! the type's single build, so a definition error is reported on every use
//! without re-running the build.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::trace;

use super::{ConverterRegistry, Convertible};
use crate::error::ConverterDefinitionError;

type Built<T> = Result<Arc<ConverterRegistry<T>>, ConverterDefinitionError>;
type Slot = Box<dyn Any + Send + Sync>;

static REGISTRIES: OnceLock<RwLock<HashMap<TypeId, Slot>>> = OnceLock::new();

/// Returns `T`'s converter registry, building it on first use.
///
/// The build runs under the cache's write lock, so concurrent first callers
/// wait for one build instead of racing. `T::converters` must therefore not
/// call back into `registry`.
pub fn registry<T: Convertible>() -> Built<T> {
    let id = TypeId::of::<T>();
    let cache = REGISTRIES.get_or_init(Default::default);

    {
        let slots = cache.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(built) = slots.get(&id).and_then(|slot| slot.downcast_ref::<Built<T>>()) {
            return built.clone();
        }
    }

    let mut slots = cache.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(built) = slots.get(&id).and_then(|slot| slot.downcast_ref::<Built<T>>()) {
        trace!(convertible = std::any::type_name::<T>(), "registry built concurrently");
        return built.clone();
    }
    let built: Built<T> = ConverterRegistry::<T>::build().map(Arc::new);
    slots.insert(id, Box::new(built.clone()));
    built
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{BoxError, Converters};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    struct Counted(i64);

    impl Convertible for Counted {
        fn converters(decl: &mut Converters<Self>) {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            decl.add("convert", |v: i64| Ok::<_, BoxError>(Counted(v)));
        }
    }

    struct Broken;

    impl Convertible for Broken {
        fn converters(decl: &mut Converters<Self>) {
            decl.add("convert", |_: i64, _: i64| Ok::<_, BoxError>(Broken));
        }
    }

    #[test]
    fn concurrent_first_use_builds_once() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| registry::<Counted>().map(|r| Arc::as_ptr(&r) as usize)))
            .collect();
        let ptrs: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        assert!(ptrs.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        assert_eq!(registry::<Counted>().unwrap().convert(4i64).unwrap().0, 4);
    }

    #[test]
    fn definition_errors_are_cached() {
        let first = registry::<Broken>().unwrap_err();
        let second = registry::<Broken>().unwrap_err();
        assert_eq!(first, second);
        assert!(matches!(first, ConverterDefinitionError::Arity { arity: 2, .. }));
    }
}
