//! 组件发现与绑定的集成测试

use autowire_common::{
    DiscoveryConfig, DiscoveryError, Export, LoadError, ProviderToken, Unit, UnitAnnotations,
    UnitCatalog,
};
use autowire_composition::{
    AutoModule, CatalogModuleLoader, DiscoveryContext, FsStorage, MarkerFilter, RegistrationDriver,
};
use autowire_di_abstractions::{DirEntryInfo, ModuleLoader, SourceStorage};
use autowire_di_impl::DiContainerImpl;
use parking_lot::Mutex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// 测试用用户仓储接口
trait UserRepository: Send + Sync {
    fn find(&self, id: u32) -> Option<String>;
}

#[derive(Debug, Default)]
struct PgUserRepository;

impl UserRepository for PgUserRepository {
    fn find(&self, id: u32) -> Option<String> {
        Some(format!("pg-user-{id}"))
    }
}

/// 磁盘上的源码树和对应的单元目录
struct SourceTree {
    dir: tempfile::TempDir,
    catalog: Arc<UnitCatalog>,
}

impl SourceTree {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            catalog: Arc::new(UnitCatalog::new()),
        }
    }

    fn write(&self, relative: &str, text: &str) -> &Self {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
        self
    }

    fn export(&self, relative: &str, unit: Unit, annotations: UnitAnnotations) -> &Self {
        self.catalog.register(relative, Export::unit(unit, annotations));
        self
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn loader(&self) -> Arc<CatalogModuleLoader> {
        Arc::new(CatalogModuleLoader::with_catalog(Arc::clone(&self.catalog)))
    }
}

fn driver_for(tree: &SourceTree, host: Arc<DiContainerImpl>) -> RegistrationDriver {
    RegistrationDriver::with_context(Arc::new(DiscoveryContext::new()), host)
        .with_module_loader(tree.loader())
}

#[test]
fn test_provider_and_controller_discovery() -> anyhow::Result<()> {
    let tree = SourceTree::new();
    tree.write(
        "users/pg_repository.rs",
        "#[injectable(provide = \"UserRepository\")]\npub struct PgUserRepository;",
    )
    .write(
        "users/controller.rs",
        "#[controller]\npub struct UserController;",
    )
    .write("users/dto.rs", "pub struct UserDto;")
    .export(
        "users/pg_repository.rs",
        Unit::new("PgUserRepository", PgUserRepository::default),
        UnitAnnotations::provider(Some("UserRepository"), None),
    )
    .export(
        "users/controller.rs",
        Unit::new("UserController", || ()),
        UnitAnnotations::controller(),
    );

    let host = Arc::new(DiContainerImpl::new());
    let driver = driver_for(&tree, host.clone());
    let registered = AutoModule::new("UsersModule")
        .base_dir(tree.root())
        .providers(["users/*.rs"])
        .controllers(["users/controller.rs"])
        .register(&driver)?;

    let repository = driver.context().interface("UserRepository")?;
    assert_eq!(
        registered.descriptor.provider_tokens(),
        vec![ProviderToken::Interface(repository.clone())]
    );
    assert_eq!(registered.descriptor.controller_names(), vec!["UserController"]);

    let instance = host.instantiate_as::<PgUserRepository>(&repository.into())?;
    let repository: &dyn UserRepository = instance.as_ref();
    assert_eq!(repository.find(7).as_deref(), Some("pg-user-7"));
    assert_eq!(host.modules(), vec!["UsersModule"]);
    Ok(())
}

#[test]
fn test_conflicting_providers_surface_error() {
    let tree = SourceTree::new();
    for name in ["primary", "replica"] {
        let relative = format!("repos/{name}.rs");
        tree.write(&relative, "#[injectable]")
            .export(
                &relative,
                Unit::new(name, || ()),
                UnitAnnotations::provider(Some("UserRepository"), Some(5)),
            );
    }

    let host = Arc::new(DiContainerImpl::new());
    let driver = driver_for(&tree, host.clone());
    let result = AutoModule::new("ReposModule")
        .base_dir(tree.root())
        .providers(["repos/**/*.rs"])
        .register(&driver);

    match result {
        Err(DiscoveryError::Conflict {
            token,
            priority,
            candidates,
        }) => {
            assert_eq!(token, "UserRepository");
            assert_eq!(priority, 5);
            assert_eq!(candidates, vec!["primary", "replica"]);
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert!(host.modules().is_empty());
}

#[test]
fn test_concurrent_registration_scans_once() {
    let tree = SourceTree::new();
    tree.write("services/clock.rs", "#[injectable]").export(
        "services/clock.rs",
        Unit::new("Clock", || 0_u64),
        UnitAnnotations::provider(None, None),
    );

    let host = Arc::new(DiContainerImpl::new());
    let driver = Arc::new(driver_for(&tree, host.clone()));
    let root = tree.root().to_path_buf();

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let driver = Arc::clone(&driver);
            let root = root.clone();
            thread::spawn(move || {
                AutoModule::new("ClockModule")
                    .base_dir(root)
                    .providers(["services/*.rs"])
                    .register(&driver)
                    .unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(host.modules().len(), 1);
}

/// 统计读取次数的文件系统存储
#[derive(Default)]
struct CountingStorage {
    inner: FsStorage,
    reads: AtomicUsize,
}

impl SourceStorage for CountingStorage {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        self.inner.list_dir(dir)
    }

    fn expand_recursive(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        self.inner.expand_recursive(pattern)
    }

    fn read_source(&self, path: &Path) -> io::Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_source(path)
    }
}

/// 记录加载位置的模块加载器
struct RecordingLoader {
    inner: CatalogModuleLoader,
    loaded: Mutex<Vec<PathBuf>>,
}

impl ModuleLoader for RecordingLoader {
    fn load_exports(&self, location: &Path, source: &str) -> Result<Vec<Export>, LoadError> {
        self.loaded.lock().push(location.to_path_buf());
        self.inner.load_exports(location, source)
    }
}

#[test]
fn test_shared_context_reuses_cache_and_filters_sources() -> anyhow::Result<()> {
    let tree = SourceTree::new();
    tree.write("shared/logger.rs", "#[injectable]")
        .write("shared/constants.rs", "pub const LIMIT: u32 = 3;")
        .export(
            "shared/logger.rs",
            Unit::new("Logger", || ()),
            UnitAnnotations::provider(None, None),
        );

    let context = Arc::new(DiscoveryContext::new());
    let storage = Arc::new(CountingStorage::default());
    let loader = Arc::new(RecordingLoader {
        inner: CatalogModuleLoader::with_catalog(Arc::clone(&tree.catalog)),
        loaded: Mutex::new(Vec::new()),
    });
    let host = Arc::new(DiContainerImpl::new());
    let driver = RegistrationDriver::with_context(Arc::clone(&context), host.clone())
        .with_storage(storage.clone())
        .with_module_loader(loader.clone());

    // 两个模块扫描同一目录
    for name in ["FirstModule", "SecondModule"] {
        AutoModule::new(name)
            .base_dir(tree.root())
            .providers(["shared/*.rs"])
            .register(&driver)?;
    }

    assert_eq!(storage.reads.load(Ordering::SeqCst), 2);
    assert_eq!(context.cache().len(), 2);
    let loaded = loader.loaded.lock().clone();
    assert_eq!(loaded.len(), 2);
    assert!(loaded.iter().all(|path| path.ends_with("shared/logger.rs")));
    assert_eq!(host.modules(), vec!["FirstModule", "SecondModule"]);
    Ok(())
}

#[test]
fn test_custom_markers_from_config() -> anyhow::Result<()> {
    let tree = SourceTree::new();
    tree.write("svc/audit.rs", "@Provider\nstruct Audit;").export(
        "svc/audit.rs",
        Unit::new("Audit", || ()),
        UnitAnnotations::provider(None, Some(2)),
    );

    let config = DiscoveryConfig::from_toml_str(
        r#"
        debug = true
        provider_markers = ["@Provider"]
        controller_markers = ["@Controller"]
        "#,
    )?;
    assert_eq!(MarkerFilter::from_config(&config).markers().len(), 2);

    let driver = driver_for(&tree, Arc::new(DiContainerImpl::new())).with_config(config);
    let registered = AutoModule::new("AuditModule")
        .base_dir(tree.root())
        .providers(["svc/*.rs"])
        .register(&driver)?;

    let report = registered.report.as_ref().expect("诊断模式应生成报告");
    assert_eq!(report.providers.len(), 1);
    assert_eq!(report.providers[0].unit.as_deref(), Some("Audit"));
    assert_eq!(report.providers[0].priority, Some(2));
    assert!(report.providers[0].self_bound);
    Ok(())
}

#[test]
fn test_missing_root_discovers_nothing() -> anyhow::Result<()> {
    let tree = SourceTree::new();
    let driver = driver_for(&tree, Arc::new(DiContainerImpl::new()));

    let registered = AutoModule::new("EmptyModule")
        .base_dir(tree.root().join("does-not-exist"))
        .providers(["*.rs", "**/*.rs"])
        .controllers(["controllers/*.rs"])
        .register(&driver)?;

    assert!(registered.descriptor.providers.is_empty());
    assert!(registered.descriptor.controllers.is_empty());
    Ok(())
}
