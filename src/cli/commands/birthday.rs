use crate::book::{Birthday, DAYS_IN_WEEK};
use crate::cli::core::{expect_args, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

const ADD_BIRTHDAY_USAGE: &str = "add-birthday <name> <DD.MM.YYYY>";
const SHOW_BIRTHDAY_USAGE: &str = "show-birthday <name>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add-birthday",
            "Set a contact's birthday",
            ADD_BIRTHDAY_USAGE,
            cmd_add_birthday,
        ),
        CommandEntry::new(
            "show-birthday",
            "Show a contact's birthday",
            SHOW_BIRTHDAY_USAGE,
            cmd_show_birthday,
        ),
        CommandEntry::new(
            "birthdays",
            "List congratulations due in the coming week",
            "birthdays",
            cmd_birthdays,
        ),
    ]
}

fn cmd_add_birthday(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, date] = expect_args::<2>(args, ADD_BIRTHDAY_USAGE)?;
    context.record(name)?;
    Birthday::parse(date)?;
    context.record_mut(name)?.set_birthday(date)?;
    io::print_success("Contact updated.");
    Ok(())
}

fn cmd_show_birthday(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name] = expect_args::<1>(args, SHOW_BIRTHDAY_USAGE)?;
    let record = context.record(name)?;
    match record.birthday() {
        Some(birthday) => io::print_info(format!("{}: {}", record.name(), birthday)),
        None => io::print_warning(format!("{} has no birthday set.", record.name())),
    }
    Ok(())
}

fn cmd_birthdays(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::usage("birthdays"));
    }
    let today = context.today();
    let upcoming = context.manager.book().upcoming_birthdays(today);
    if upcoming.is_empty() {
        io::print_info(format!("No birthdays in the next {} days.", DAYS_IN_WEEK));
        return Ok(());
    }
    output_section("Upcoming birthdays");
    for entry in &upcoming {
        io::print_info(entry);
    }
    Ok(())
}
