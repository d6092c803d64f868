use activity_core::{Container, Error};
use std::sync::Arc;

#[derive(Clone)]
struct TestService {
    name: String,
}

struct DependentService {
    inner: Arc<TestService>,
}

#[test]
fn test_register_and_resolve() {
    let container = Container::new();

    container.register(TestService {
        name: "test".to_string(),
    });

    let resolved = container.resolve::<TestService>().unwrap();
    assert_eq!(resolved.name, "test");
}

#[test]
fn test_resolve_nonexistent() {
    let container = Container::new();
    let result = container.resolve::<TestService>();
    assert!(matches!(result, Err(Error::ProviderNotFound(_))));
}

#[test]
fn test_has_provider() {
    let container = Container::new();
    assert!(!container.has::<TestService>());

    container.register(TestService {
        name: "test".to_string(),
    });

    assert!(container.has::<TestService>());
    assert_eq!(container.len(), 1);
}

#[test]
fn test_singleton_behavior() {
    let container = Container::new();
    container.register(TestService {
        name: "original".to_string(),
    });

    let first = container.resolve::<TestService>().unwrap();
    let second = container.resolve::<TestService>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_clones_share_registry() {
    let container = Container::new();
    let shared = container.clone();

    shared.register(TestService {
        name: "shared".to_string(),
    });

    assert!(container.has::<TestService>());
}

#[test]
fn test_factory_resolves_dependencies() {
    let container = Container::new();
    container.register(TestService {
        name: "inner".to_string(),
    });

    container
        .register_factory(|c| {
            Ok(DependentService {
                inner: c.resolve::<TestService>()?,
            })
        })
        .unwrap();

    let resolved = container.resolve::<DependentService>().unwrap();
    assert_eq!(resolved.inner.name, "inner");
}

#[test]
fn test_factory_propagates_missing_dependency() {
    let container = Container::new();
    let result = container.register_factory(|c| {
        Ok(DependentService {
            inner: c.resolve::<TestService>()?,
        })
    });

    assert!(result.is_err());
    assert!(!container.has::<DependentService>());
}

#[test]
fn test_register_replaces_previous_instance() {
    let container = Container::new();
    container.register(TestService {
        name: "first".to_string(),
    });
    container.register_arc(Arc::new(TestService {
        name: "second".to_string(),
    }));

    assert_eq!(container.len(), 1);
    assert_eq!(container.resolve::<TestService>().unwrap().name, "second");
}
