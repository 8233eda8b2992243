mod birthday;
mod book;
mod config;
mod contact;
mod system;

use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    registry.register_group("Contacts", contact::definitions());
    registry.register_group("Birthdays", birthday::definitions());
    registry.register_group("Storage", book::definitions());
    registry.register_group("Configuration", config::definitions());
    registry.register_group("System", system::definitions());
    for alias in system::EXIT_ALIASES {
        registry.alias(alias, "exit");
    }
}
