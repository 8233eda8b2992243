use crate::book::{PhoneNumber, Record};
use crate::cli::core::{expect_args, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::errors::ContactError;

const ADD_USAGE: &str = "add <name> <phone>";
const CHANGE_USAGE: &str = "change <name> <old-phone> <new-phone>";
const PHONE_USAGE: &str = "phone <name>";
const REMOVE_PHONE_USAGE: &str = "remove-phone <name> <phone>";
const DELETE_USAGE: &str = "delete <name>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("hello", "Greet the assistant", "hello", cmd_hello),
        CommandEntry::new(
            "add",
            "Add a contact or another phone to an existing one",
            ADD_USAGE,
            cmd_add,
        ),
        CommandEntry::new("change", "Replace a contact's phone", CHANGE_USAGE, cmd_change),
        CommandEntry::new("phone", "Show a contact's phones", PHONE_USAGE, cmd_phone),
        CommandEntry::new(
            "remove-phone",
            "Remove a phone from a contact",
            REMOVE_PHONE_USAGE,
            cmd_remove_phone,
        ),
        CommandEntry::new("delete", "Delete a contact", DELETE_USAGE, cmd_delete),
        CommandEntry::new("all", "List every contact", "all", cmd_all),
    ]
}

fn cmd_hello(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    io::print_info("How can I help you?");
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, phone] = expect_args::<2>(args, ADD_USAGE)?;
    if context.manager.book().find(name).is_some() {
        PhoneNumber::new(phone)?;
        context.record_mut(name)?.add_phone(phone)?;
        io::print_success("Contact updated.");
        return Ok(());
    }

    let mut record = Record::new(name)?;
    record.add_phone(phone)?;
    context.manager.book_mut().add_record(record);
    io::print_success("Contact added.");
    Ok(())
}

fn cmd_change(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, old, new] = expect_args::<3>(args, CHANGE_USAGE)?;
    let has_old = context.record(name)?.find_phone(old).is_some();
    if !PhoneNumber::is_valid(new) {
        return Err(ContactError::InvalidPhoneFormat(new.to_string()).into());
    }
    if !has_old {
        io::print_warning(format!(
            "{} has no phone {}; contact not updated.",
            name, old
        ));
        return Ok(());
    }
    context.record_mut(name)?.edit_phone(old, new);
    io::print_success("Contact updated.");
    Ok(())
}

fn cmd_phone(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name] = expect_args::<1>(args, PHONE_USAGE)?;
    let record = context.record(name)?;
    if record.phones().is_empty() {
        io::print_info(format!("{} has no phones.", record.name()));
    } else {
        let phones: Vec<&str> = record.phones().iter().map(PhoneNumber::as_str).collect();
        io::print_info(format!("{}: {}", record.name(), phones.join("; ")));
    }
    Ok(())
}

fn cmd_remove_phone(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, phone] = expect_args::<2>(args, REMOVE_PHONE_USAGE)?;
    if context.record(name)?.find_phone(phone).is_none() {
        io::print_warning(format!("{} has no phone {}.", name, phone));
        return Ok(());
    }
    context.record_mut(name)?.remove_phone(phone);
    io::print_success("Phone removed.");
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name] = expect_args::<1>(args, DELETE_USAGE)?;
    context.record(name)?;
    if !context.confirm(&format!("Delete contact `{}`?", name))? {
        io::print_info("Delete cancelled.");
        return Ok(());
    }
    context.manager.book_mut().delete(name);
    io::print_success("Contact deleted.");
    Ok(())
}

fn cmd_all(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::usage("all"));
    }
    let book = context.manager.book();
    if book.is_empty() {
        io::print_info("No contacts saved yet.");
        return Ok(());
    }
    output_section(format!("Contacts ({})", book.len()));
    for record in book {
        io::print_info(record);
    }
    Ok(())
}
