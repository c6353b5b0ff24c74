use async_trait::async_trait;
use tracing::info;

use super::repository::{DeductionRepository, RepositoryError};

/// Where the deduction settings live.
///
/// `connection_string` is handed to the matching factory untouched, e.g.
/// `sqlite:tax.db?mode=rwc` or `:memory:` for SQLite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        }
    }
}

/// Opens a deduction store for one backend.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    fn backend_name(&self) -> &'static str;

    /// Open the store with its schema and default deductions in place.
    async fn create(&self, config: &DbConfig) -> Result<Box<dyn DeductionRepository>, RepositoryError>;
}

/// The backends a binary links, looked up by [`DbConfig::backend`].
#[derive(Default)]
pub struct RepositoryRegistry {
    factories: Vec<Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a backend. A later factory with the same name shadows an
    /// earlier one.
    pub fn register(&mut self, factory: Box<dyn RepositoryFactory>) {
        self.factories
            .retain(|existing| existing.backend_name() != factory.backend_name());
        self.factories.push(factory);
    }

    /// Backend names in registration order.
    pub fn backends(&self) -> Vec<&'static str> {
        self.factories.iter().map(|f| f.backend_name()).collect()
    }

    /// Opens the configured store and checks it already holds a deduction
    /// snapshot, so a server never starts against a store where every tax
    /// calculation would fail.
    ///
    /// # Errors
    /// * [`RepositoryError::Configuration`] for an unregistered backend or a
    ///   store without deduction settings.
    /// * Whatever the factory or the first read returns otherwise.
    pub async fn open(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn DeductionRepository>, RepositoryError> {
        let factory = self
            .factories
            .iter()
            .find(|f| f.backend_name() == config.backend)
            .ok_or_else(|| {
                RepositoryError::Configuration(format!(
                    "unknown backend '{}'; available: {}",
                    config.backend,
                    self.backends().join(", ")
                ))
            })?;

        let repo = factory.create(config).await?;
        let snapshot = repo.current_deductions().await.map_err(|e| match e {
            RepositoryError::NotFound => RepositoryError::Configuration(format!(
                "{} store has no deduction settings",
                config.backend
            )),
            other => other,
        })?;

        info!(
            backend = %config.backend,
            personal = snapshot.personal,
            k_receipt = snapshot.k_receipt,
            "deduction store opened"
        );
        Ok(repo)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use crate::models::{DeductionConfig, DeductionKind};

    use super::*;

    // In-memory store; `None` models a store that was never seeded.
    struct MemoryRepository(Mutex<Option<DeductionConfig>>);

    #[async_trait]
    impl DeductionRepository for MemoryRepository {
        async fn current_deductions(&self) -> Result<DeductionConfig, RepositoryError> {
            self.0.lock().unwrap().ok_or(RepositoryError::NotFound)
        }

        async fn set_deduction(
            &self,
            kind: DeductionKind,
            amount: f64,
        ) -> Result<DeductionConfig, RepositoryError> {
            let mut guard = self.0.lock().unwrap();
            let current = guard.as_mut().ok_or(RepositoryError::NotFound)?;
            match kind {
                DeductionKind::Personal => current.personal = amount,
                DeductionKind::KReceipt => current.k_receipt = amount,
            }
            Ok(*current)
        }
    }

    struct MemoryFactory {
        seeded: Option<DeductionConfig>,
    }

    #[async_trait]
    impl RepositoryFactory for MemoryFactory {
        fn backend_name(&self) -> &'static str {
            "memory"
        }

        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Box<dyn DeductionRepository>, RepositoryError> {
            Ok(Box::new(MemoryRepository(Mutex::new(self.seeded))))
        }
    }

    struct UnreachableFactory;

    #[async_trait]
    impl RepositoryFactory for UnreachableFactory {
        fn backend_name(&self) -> &'static str {
            "memory"
        }

        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Box<dyn DeductionRepository>, RepositoryError> {
            Err(RepositoryError::Connection("refused".to_string()))
        }
    }

    fn memory_config() -> DbConfig {
        DbConfig {
            backend: "memory".to_string(),
            connection_string: String::new(),
        }
    }

    fn registry_with(factory: impl RepositoryFactory + 'static) -> RepositoryRegistry {
        let mut registry = RepositoryRegistry::new();
        registry.register(Box::new(factory));
        registry
    }

    #[test]
    fn default_config_is_in_memory_sqlite() {
        assert_eq!(
            DbConfig::default(),
            DbConfig {
                backend: "sqlite".to_string(),
                connection_string: ":memory:".to_string(),
            }
        );
    }

    #[test]
    fn reregistering_a_backend_replaces_it() {
        let mut registry = registry_with(UnreachableFactory);
        registry.register(Box::new(MemoryFactory { seeded: None }));

        assert_eq!(registry.backends(), vec!["memory"]);
    }

    #[tokio::test]
    async fn opens_seeded_store_with_its_snapshot() {
        let registry = registry_with(MemoryFactory {
            seeded: Some(DeductionConfig::default()),
        });

        let repo = registry.open(&memory_config()).await.unwrap();

        assert_eq!(
            repo.current_deductions().await,
            Ok(DeductionConfig {
                personal: 60_000.0,
                k_receipt: 50_000.0,
            })
        );
    }

    #[tokio::test]
    async fn opened_store_applies_updates() {
        let registry = registry_with(MemoryFactory {
            seeded: Some(DeductionConfig::default()),
        });
        let repo = registry.open(&memory_config()).await.unwrap();

        let updated = repo
            .set_deduction(DeductionKind::KReceipt, 20_000.0)
            .await
            .unwrap();

        assert_eq!(updated.k_receipt, 20_000.0);
        assert_eq!(updated.personal, 60_000.0);
    }

    #[tokio::test]
    async fn unseeded_store_is_a_configuration_error() {
        let registry = registry_with(MemoryFactory { seeded: None });

        match registry.open(&memory_config()).await {
            Err(RepositoryError::Configuration(msg)) => {
                assert_eq!(msg, "memory store has no deduction settings");
            }
            Err(other) => panic!("expected Configuration error, got {other:?}"),
            Ok(_) => panic!("expected Configuration error, got a repository"),
        }
    }

    #[tokio::test]
    async fn unknown_backend_lists_registered_ones() {
        let registry = registry_with(MemoryFactory { seeded: None });
        let config = DbConfig {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        };

        match registry.open(&config).await {
            Err(RepositoryError::Configuration(msg)) => {
                assert_eq!(msg, "unknown backend 'sqlite'; available: memory");
            }
            Err(other) => panic!("expected Configuration error, got {other:?}"),
            Ok(_) => panic!("expected Configuration error, got a repository"),
        }
    }

    #[tokio::test]
    async fn factory_errors_pass_through() {
        let registry = registry_with(UnreachableFactory);

        match registry.open(&memory_config()).await {
            Err(err) => assert_eq!(err, RepositoryError::Connection("refused".to_string())),
            Ok(_) => panic!("expected the factory error to surface"),
        }
    }
}
