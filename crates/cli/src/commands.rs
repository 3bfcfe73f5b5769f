//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("slotsave")
        .about("Save, load and delete demo records in numbered slots")
        .subcommand_required(true)
        .arg(
            Arg::new("dir")
                .long("dir")
                .value_name("PATH")
                .help("Base directory for save files (default: .slotsave)")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Read settings from a TOML file; flags override it")
                .global(true),
        )
        .arg(
            Arg::new("namespace")
                .long("namespace")
                .value_name("NAME")
                .help("Subdirectory holding the slot files")
                .global(true),
        )
        .arg(
            Arg::new("slots")
                .long("slots")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Number of slots (1-10)")
                .global(true),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .value_parser(["text", "binary"])
                .help("On-disk encoding")
                .global(true),
        )
        .arg(
            Arg::new("no-backup")
                .long("no-backup")
                .help("Do not keep a backup of the previous save")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (-v info, -vv debug)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(build_save())
        .subcommand(build_load())
        .subcommand(build_delete())
        .subcommand(build_status())
        .subcommand(build_config())
}

fn slot_arg() -> Arg {
    Arg::new("slot")
        .required(true)
        .value_parser(clap::value_parser!(i64))
        .allow_negative_numbers(true)
        .help("Slot number, starting at 1")
}

fn build_save() -> Command {
    Command::new("save")
        .about("Edit the demo record and save it to a slot")
        .long_about(
            "Loads the slot first when it holds a save, applies the given edits \
             to the staged record, then folds and saves it.",
        )
        .arg(slot_arg())
        .arg(
            Arg::new("num")
                .long("num")
                .value_parser(clap::value_parser!(i32))
                .allow_negative_numbers(true)
                .help("New value for `num`"),
        )
        .arg(Arg::new("name").long("name").help("New value for `name`"))
        .arg(
            Arg::new("values")
                .long("values")
                .value_name("LIST")
                .value_delimiter(',')
                .value_parser(clap::value_parser!(i32))
                .help("New value for `test_num`, comma separated"),
        )
}

fn build_load() -> Command {
    Command::new("load")
        .about("Print the record saved in a slot")
        .arg(slot_arg())
}

fn build_delete() -> Command {
    Command::new("delete")
        .about("Delete a slot and its backup")
        .arg(slot_arg())
}

fn build_status() -> Command {
    Command::new("status").about("Show which slots hold saves and backups")
}

fn build_config() -> Command {
    Command::new("config").about("Print a commented default configuration file")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_tree_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_negative_slot_reaches_the_manager() {
        let matches = build_cli()
            .try_get_matches_from(["slotsave", "load", "-1"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<i64>("slot"), Some(&-1));
    }

    #[test]
    fn test_format_values_are_restricted() {
        let result = build_cli().try_get_matches_from(["slotsave", "--format", "xml", "status"]);
        assert!(result.is_err());
    }
}
