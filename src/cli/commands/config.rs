use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::config::Config;

const CONFIG_USAGE: &str = "config [show|set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        None => show_config(context),
        Some((sub, rest)) => match sub.to_lowercase().as_str() {
            "show" if rest.is_empty() => show_config(context),
            "set" => {
                if rest.len() < 2 {
                    io::print_hint(format!("Keys: {}", Config::KEYS.join(", ")));
                    return Err(CommandError::usage(CONFIG_USAGE));
                }
                let value = rest[1..].join(" ");
                set_config_value(context, rest[0], &value)
            }
            _ => Err(CommandError::usage(CONFIG_USAGE)),
        },
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output_section("Configuration");
    for (key, value) in context.config.entries() {
        io::print_info(format!("  {:<18} {}", key, value));
    }
    io::print_info(format!(
        "  {:<18} {}",
        "file",
        context.config_manager.path().display()
    ));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let key = key.to_lowercase();
    let mut updated = context.config.clone();
    updated.set(&key, value)?;
    context.config = updated;
    context.persist_config()?;
    io::print_success(format!("Updated `{}`.", key));
    if key != "plain_output" {
        io::print_hint("The new value applies the next time the shell starts.");
    }
    tracing::debug!(key = %key, "configuration updated");
    Ok(())
}
