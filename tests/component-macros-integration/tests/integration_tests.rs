//! 注解宏集成测试
//!
//! 本文件中的结构体由注解宏登记，测试从本文件所在目录扫描并发现它们。

use autowire_common::{global_unit_catalog, ProviderToken};
use autowire_composition::{AutoModule, DiscoveryContext, RegistrationDriver};
use autowire_di_impl::DiContainerImpl;
use autowire_macros::{controller, injectable};
use std::sync::Arc;

/// 问候接口
trait Greeter: Send + Sync {
    fn greet(&self, name: &str) -> String;
}

#[derive(Debug, Default)]
#[injectable(provide = "Greeter", priority = 10)]
pub struct FormalGreeter;

impl Greeter for FormalGreeter {
    fn greet(&self, name: &str) -> String {
        format!("Good day, {name}")
    }
}

#[derive(Debug, Default)]
#[injectable(provide = "Greeter")]
pub struct CasualGreeter;

impl Greeter for CasualGreeter {
    fn greet(&self, name: &str) -> String {
        format!("hi {name}")
    }
}

#[derive(Debug, Default)]
#[injectable]
pub struct RequestCounter {
    count: u64,
}

#[derive(Debug, Default)]
#[controller]
pub struct GreetingController;

#[derive(Debug, Default)]
#[controller(name = "admin")]
pub struct AdminController;

/// 普通值不会被发现
pub const DEFAULT_NAME: &str = "world";

#[test]
fn test_macros_register_into_global_catalog() {
    let entries: Vec<_> = global_unit_catalog()
        .entries()
        .into_iter()
        .filter(|entry| entry.source_file.ends_with("integration_tests.rs"))
        .collect();

    assert_eq!(entries.len(), 5);
    assert!(entries
        .iter()
        .any(|entry| entry.export.name().ends_with("::FormalGreeter")));
    assert!(entries.iter().any(|entry| entry.export.name() == "admin"));
}

#[test]
fn test_discover_annotated_structs_from_own_directory() {
    let host = Arc::new(DiContainerImpl::new());
    let driver = RegistrationDriver::with_context(Arc::new(DiscoveryContext::new()), host.clone());

    // 未指定根目录，从本文件所在目录扫描
    let registered = AutoModule::new("GreetingModule")
        .providers(["integration_tests.rs"])
        .controllers(["integration_tests.rs"])
        .debug(true)
        .register(&driver)
        .unwrap();

    let greeter = driver.context().interface("Greeter").unwrap();
    let tokens = registered.descriptor.provider_tokens();
    assert_eq!(tokens.len(), 2);
    assert!(tokens.contains(&ProviderToken::Interface(greeter.clone())));
    assert!(tokens.iter().any(|token| token.is_self_bound()
        && token.name().ends_with("::RequestCounter")));

    let controllers = registered.descriptor.controller_names();
    assert_eq!(controllers.len(), 2);
    assert!(controllers.iter().any(|name| name.ends_with("::GreetingController")));
    assert!(controllers.contains(&"admin"));

    let instance = host
        .instantiate_as::<FormalGreeter>(&greeter.into())
        .unwrap();
    let greeter: &dyn Greeter = instance.as_ref();
    assert_eq!(greeter.greet(DEFAULT_NAME), "Good day, world");

    let report = registered.report.as_ref().unwrap();
    assert_eq!(report.discovered_providers().count(), 2);
    let counter_token = tokens.iter().find(|token| token.is_self_bound()).unwrap();
    let counter = host.instantiate_as::<RequestCounter>(counter_token).unwrap();
    assert_eq!(counter.count, 0);
}

#[test]
fn test_lower_priority_greeter_loses_binding() {
    let host = Arc::new(DiContainerImpl::new());
    let driver = RegistrationDriver::with_context(Arc::new(DiscoveryContext::new()), host.clone());

    let registered = AutoModule::new("GreeterPriorityModule")
        .providers(["integration_tests.rs"])
        .debug(true)
        .register(&driver)
        .unwrap();

    let token: ProviderToken = driver.context().interface("Greeter").unwrap().into();
    let report = registered.report.as_ref().unwrap();
    let bound = report
        .providers
        .iter()
        .find(|provider| provider.token == "Greeter")
        .unwrap();
    assert_eq!(bound.priority, Some(10));
    assert!(bound.unit.as_deref().unwrap().ends_with("::FormalGreeter"));
    assert!(!report
        .providers
        .iter()
        .any(|provider| provider.unit.as_deref().is_some_and(|unit| unit.ends_with("::CasualGreeter"))));

    // 低优先级实现仍可直接使用，但不会绑定到接口
    assert_eq!(CasualGreeter.greet(DEFAULT_NAME), "hi world");
    assert!(host.instantiate_as::<CasualGreeter>(&token).is_err());
    assert!(host.instantiate_as::<FormalGreeter>(&token).is_ok());
}
