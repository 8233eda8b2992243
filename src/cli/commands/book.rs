use std::path::Path;

use crate::cli::core::{expect_args, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

const RESTORE_USAGE: &str = "restore <backup-name|number>";
const EXPORT_USAGE: &str = "export <path>";
const IMPORT_USAGE: &str = "import <path>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("save", "Save the address book", "save", cmd_save),
        CommandEntry::new(
            "backup",
            "Snapshot the address book",
            "backup [note]",
            cmd_backup,
        ),
        CommandEntry::new("backups", "List backups, newest first", "backups", cmd_backups),
        CommandEntry::new(
            "restore",
            "Replace the address book with a backup",
            RESTORE_USAGE,
            cmd_restore,
        ),
        CommandEntry::new(
            "export",
            "Write the address book to a JSON file",
            EXPORT_USAGE,
            cmd_export,
        ),
        CommandEntry::new(
            "import",
            "Replace the address book with a JSON file",
            IMPORT_USAGE,
            cmd_import,
        ),
    ]
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::usage("save"));
    }
    let path = context.manager.save()?;
    io::print_success(format!("Address book saved to {}.", path.display()));
    Ok(())
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = (!args.is_empty()).then(|| args.join(" "));
    let path = context.manager.backup(note.as_deref())?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    io::print_success(format!("Backup created: {}", name));
    Ok(())
}

fn cmd_backups(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::usage("backups"));
    }
    let backups = context.manager.list_backups()?;
    if backups.is_empty() {
        io::print_info("No backups yet.");
        return Ok(());
    }
    output_section(format!("Backups of `{}`", context.manager.name()));
    for (idx, name) in backups.iter().enumerate() {
        io::print_info(format!("  {:>2}. {}", idx + 1, name));
    }
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [reference] = expect_args::<1>(args, RESTORE_USAGE)?;
    let backups = context.manager.list_backups()?;
    let backup = resolve_backup(&backups, reference).ok_or_else(|| {
        CommandError::InvalidArguments(format!("No backup matches `{}`.", reference))
    })?;

    if !context.confirm(&format!("Replace the current book with `{}`?", backup))? {
        io::print_info("Restore cancelled.");
        return Ok(());
    }
    context.manager.restore(&backup)?;
    io::print_success(format!(
        "Restored {} contacts from {}.",
        context.manager.book().len(),
        backup
    ));
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = expect_args::<1>(args, EXPORT_USAGE)?;
    context.manager.save_to_path(Path::new(path))?;
    io::print_success(format!("Exported {} contacts to {}.", context.manager.book().len(), path));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = expect_args::<1>(args, IMPORT_USAGE)?;
    if !context.confirm(&format!("Replace the current book with `{}`?", path))? {
        io::print_info("Import cancelled.");
        return Ok(());
    }
    context.manager.load_from_path(Path::new(path))?;
    io::print_success(format!("Imported {} contacts from {}.", context.manager.book().len(), path));
    Ok(())
}

/// Accepts a 1-based position from `backups` or an exact file name.
fn resolve_backup(backups: &[String], reference: &str) -> Option<String> {
    if let Ok(position) = reference.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|idx| backups.get(idx))
            .cloned();
    }
    backups.iter().find(|name| name.as_str() == reference).cloned()
}
