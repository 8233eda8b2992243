use std::{env, sync::Arc};

use crate::book::Record;
use crate::cli::commands;
use crate::cli::core::{CliError, CommandError};
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::{Config, ConfigManager};
use crate::core::{utils::PathResolver, BookManager};
use crate::storage::JsonStorage;

const TODAY_ENV: &str = "CONTACT_BOOK_TODAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can touch: the open book, configuration,
/// the date source, and the registry itself.
pub struct ShellContext {
    pub mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) manager: BookManager,
    pub(crate) config_manager: ConfigManager,
    pub(crate) config: Config,
    pub(crate) clock: Arc<dyn Clock>,
    pub running: bool,
}

impl ShellContext {
    /// Builds a context rooted at the configured data directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = PathResolver::base_dir();
        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load()?;
        let storage = JsonStorage::new(Some(base), Some(config.backup_retention))?;
        let manager = BookManager::open(Box::new(storage), &config.default_book)?;
        Ok(Self::with_components(
            mode,
            manager,
            config_manager,
            config,
            clock_from_env(),
        ))
    }

    pub fn with_components(
        mode: CliMode,
        manager: BookManager,
        config_manager: ConfigManager,
        config: Config,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        output::set_preferences(OutputPreferences {
            plain: config.plain_output,
        });
        Self {
            mode,
            registry,
            manager,
            config_manager,
            config,
            clock,
            running: true,
        }
    }

    pub fn manager(&self) -> &BookManager {
        &self.manager
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    pub fn prompt(&self) -> String {
        format!("{}> ", self.manager.name())
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn record(&self, name: &str) -> Result<&Record, CommandError> {
        self.manager
            .book()
            .find(name)
            .ok_or_else(|| CommandError::ContactNotFound(name.to_string()))
    }

    /// Mutable access marks the book dirty. Handlers validate their input
    /// before calling this, and a missing contact is reported without it.
    pub(crate) fn record_mut(&mut self, name: &str) -> Result<&mut Record, CommandError> {
        if self.manager.book().find(name).is_none() {
            return Err(CommandError::ContactNotFound(name.to_string()));
        }
        self.manager
            .book_mut()
            .find_mut(name)
            .ok_or_else(|| CommandError::ContactNotFound(name.to_string()))
    }

    pub(crate) fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        output::set_preferences(OutputPreferences {
            plain: self.config.plain_output,
        });
        Ok(())
    }
}

fn clock_from_env() -> Arc<dyn Clock> {
    match env::var(TODAY_ENV) {
        Ok(value) => match FixedClock::parse(&value) {
            Some(clock) => {
                tracing::info!(today = %clock.0, "using fixed date");
                Arc::new(clock)
            }
            None => {
                tracing::warn!(value = %value, "ignoring {TODAY_ENV}; expected YYYY-MM-DD");
                Arc::new(SystemClock)
            }
        },
        Err(_) => Arc::new(SystemClock),
    }
}
