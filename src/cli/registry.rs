use std::collections::HashMap;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Commands keyed by name, remembered in registration order and grouped for
/// the help overview. Aliases resolve to their target entry.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    aliases: HashMap<&'static str, &'static str>,
    groups: Vec<(&'static str, Vec<&'static str>)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_group(&mut self, group: &'static str, entries: Vec<CommandEntry>) {
        let mut names = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = entry.name;
            if self.commands.insert(name, entry).is_none() {
                names.push(name);
            }
        }
        match self.groups.iter_mut().find(|(existing, _)| *existing == group) {
            Some((_, existing)) => existing.extend(names),
            None => self.groups.push((group, names)),
        }
    }

    /// Ignored when `target` is not registered.
    pub fn alias(&mut self, alias: &'static str, target: &'static str) {
        if self.commands.contains_key(target) {
            self.aliases.insert(alias, target);
        }
    }

    fn resolve<'a>(&self, name: &'a str) -> &'a str {
        self.aliases.get(name).copied().unwrap_or(name)
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(self.resolve(name))
    }

    pub fn groups(&self) -> impl Iterator<Item = (&'static str, Vec<&CommandEntry>)> + '_ {
        self.groups.iter().map(|(group, names)| {
            let entries = names
                .iter()
                .filter_map(|name| self.commands.get(name))
                .collect();
            (*group, entries)
        })
    }

    /// Every invocable name, aliases included.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.groups
            .iter()
            .flat_map(|(_, names)| names.iter().copied())
            .chain(self.aliases.keys().copied())
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn aliases_resolve_to_target_entry() {
        let mut registry = CommandRegistry::new();
        registry.register_group(
            "System",
            vec![CommandEntry::new("exit", "Exit", "exit", noop)],
        );
        registry.alias("q", "exit");
        registry.alias("bye", "missing");

        assert_eq!(registry.get("q").map(|entry| entry.name), Some("exit"));
        assert!(registry.get("bye").is_none());
        let names: Vec<_> = registry.names().collect();
        assert!(names.contains(&"exit"));
        assert!(names.contains(&"q"));
    }

    #[test]
    fn groups_keep_registration_order() {
        let mut registry = CommandRegistry::new();
        registry.register_group(
            "Contacts",
            vec![
                CommandEntry::new("add", "Add", "add", noop),
                CommandEntry::new("all", "All", "all", noop),
            ],
        );
        registry.register_group("System", vec![CommandEntry::new("help", "Help", "help", noop)]);

        let groups: Vec<_> = registry
            .groups()
            .map(|(group, entries)| {
                (group, entries.iter().map(|entry| entry.name).collect::<Vec<_>>())
            })
            .collect();
        assert_eq!(
            groups,
            vec![("Contacts", vec!["add", "all"]), ("System", vec!["help"])]
        );
    }
}
