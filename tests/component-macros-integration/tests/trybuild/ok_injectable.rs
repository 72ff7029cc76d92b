use autowire_common::{global_unit_catalog, Export};
use autowire_macros::injectable;

#[derive(Debug, Default)]
#[injectable(provide = "Clock", priority = -1)]
struct SystemClock;

struct Pool {
    size: usize,
}

impl Pool {
    fn create() -> Self {
        Self { size: 4 }
    }
}

#[injectable(name = "pool", constructor = "Pool::create")]
struct PoolHolder;

fn main() {
    let exports = global_unit_catalog()
        .entries()
        .into_iter()
        .map(|entry| entry.export)
        .collect::<Vec<_>>();
    assert_eq!(exports.len(), 2);

    let pool = exports
        .iter()
        .find(|export| export.name() == "pool")
        .expect("pool registered");
    if let Export::Unit { unit, annotations } = pool {
        let instance = unit.construct();
        assert_eq!(instance.downcast_ref::<Pool>().map(|p| p.size), Some(4));
        assert_eq!(annotations.provider.as_ref().and_then(|p| p.priority), None);
    }
    let _ = PoolHolder;
}
