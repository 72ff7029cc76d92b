use autowire_common::global_unit_catalog;
use autowire_macros::controller;

#[derive(Default)]
#[controller]
struct StatusController;

#[derive(Default)]
#[controller(name = "metrics")]
struct MetricsController;

fn main() {
    let entries = global_unit_catalog().entries();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry.source_file.ends_with("ok_controller.rs")));
    assert!(entries
        .iter()
        .any(|entry| entry.export.name().ends_with("::StatusController")));
    assert!(entries.iter().any(|entry| entry.export.name() == "metrics"));
}
