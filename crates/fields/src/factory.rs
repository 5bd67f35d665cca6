//! Default-factory helpers.

use fieldkit::{DefaultFactory, ToValue};

/// A default factory producing a one-element list holding `make()`.
///
/// The list is echoed into templates as produced; it is not re-derived from
/// the field's declared type.
///
/// ```ignore
/// ModelSchema::builder("Team")
///     .factory::<Vec<Player>>("players", instance_list_factory(Player::default))
///     .build()
/// ```
pub fn instance_list_factory<T, F>(make: F) -> DefaultFactory
where
    T: ToValue,
    F: Fn() -> T + Send + Sync + 'static,
{
    DefaultFactory::other(move || vec![make()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldkit::{FactoryKind, Value};

    #[test]
    fn produces_single_instance_each_call() {
        let factory = instance_list_factory(|| "guest");
        assert_eq!(factory.kind(), &FactoryKind::Other);
        assert!(!factory.is_templatable());
        assert_eq!(factory.produce(), Value::Seq(vec![Value::from("guest")]));
        assert_eq!(factory.produce(), factory.produce());
    }
}
