//! Remote sub-commands built at runtime from the loaded command specs
//!
//! Each spec becomes a clap command mounted under its name words, so `alarm list` and
//! `alarm show` share an `alarm` group. Each command's [`ArgumentSchema`] is mapped onto clap
//! arguments and, after parsing, back into [`ParsedArguments`].

use clap::{Arg, ArgAction, ArgMatches, Command, builder::PossibleValuesParser};
use hostcli::{
    args::ParsedArguments,
    argspec::{ArgumentSchema, ParamKind, ParamSpec},
    command::CommandSpec,
    error::ConfigurationError,
    field::ALL,
};

pub(crate) struct RemoteCommand {
    pub(crate) spec: CommandSpec,
    pub(crate) schema: ArgumentSchema,
}

#[derive(Default)]
pub(crate) struct CommandRegistry {
    commands: Vec<RemoteCommand>,
}

impl CommandRegistry {
    /// Derive a schema for every spec; specs whose schema cannot be built are returned
    /// as errors and left out
    ///
    pub(crate) fn new(specs: Vec<CommandSpec>) -> (Self, Vec<ConfigurationError>) {
        let mut commands = Vec::with_capacity(specs.len());
        let mut errors = Vec::new();

        for spec in specs {
            match ArgumentSchema::build(&spec) {
                Ok(schema) => commands.push(RemoteCommand { spec, schema }),
                Err(e) => errors.push(e),
            }
        }

        (Self { commands }, errors)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.commands.len()
    }

    /// Mount every remote command onto `root`
    ///
    pub(crate) fn augment(&self, root: Command) -> Command {
        self.commands.iter().fold(root, |root, command| {
            mount(root, command.spec.name_words(), clap_command(command))
        })
    }

    /// Find the remote command selected in `matches` together with its own matches
    ///
    pub(crate) fn resolve<'m>(
        &self,
        matches: &'m ArgMatches,
    ) -> Option<(&RemoteCommand, &'m ArgMatches)> {
        let mut words = Vec::new();
        let mut current = matches;

        while let Some((name, sub_matches)) = current.subcommand() {
            words.push(name);
            current = sub_matches;
        }

        self.commands
            .iter()
            .find(|command| command.spec.name_words() == words.as_slice())
            .map(|command| (command, current))
    }
}

fn mount(parent: Command, words: &[String], leaf: Command) -> Command {
    let Some((first, rest)) = words.split_first() else {
        return parent;
    };
    if rest.is_empty() {
        return parent.subcommand(leaf);
    }

    if parent.find_subcommand(first).is_some() {
        parent.mut_subcommand(first, |group| mount(group, rest, leaf))
    } else {
        let group = Command::new(first.clone())
            .subcommand_required(true)
            .arg_required_else_help(true);
        parent.subcommand(mount(group, rest, leaf))
    }
}

fn clap_command(command: &RemoteCommand) -> Command {
    let name = command
        .spec
        .name_words()
        .last()
        .cloned()
        .unwrap_or_default();

    let mut clap_command = Command::new(name).args(command.schema.iter().map(clap_arg));
    if let Some(help) = command.spec.help() {
        clap_command = clap_command.about(help.to_string());
    }
    clap_command
}

fn clap_arg(param: &ParamSpec) -> Arg {
    let key = param.key().to_string();
    let arg = Arg::new(key.clone()).help(param.help().to_string());

    if param.kind() == ParamKind::Switch {
        return arg.long(key).action(ArgAction::SetTrue);
    }

    let arg = arg.value_name(param.value_name().to_string());
    match param.kind() {
        ParamKind::Positional { required } => {
            let arg = arg.required(required);
            match param.default() {
                Some(default) => arg.default_value(default.to_string()),
                None => arg,
            }
        }
        ParamKind::ColumnFilter => arg.short('c').long("column").action(ArgAction::Append),
        ParamKind::Option | ParamKind::Switch => {
            let mut arg = arg.long(key);
            if let Some(default) = param.default() {
                arg = arg.default_value(default.to_string());
            }
            if let Some(choices) = param.choices() {
                let mut choices = choices.to_vec();
                if let Some(default) = param.default() {
                    if !choices.iter().any(|choice| choice == default) {
                        choices.push(default.to_string());
                    }
                }
                arg = arg.value_parser(PossibleValuesParser::new(choices));
            }
            arg
        }
    }
}

/// Read the values of `schema` back out of a remote command's matches
///
/// Absent single-valued parameters fall back to [`ALL`] and absent column filters to an
/// empty list.
pub(crate) fn parsed_arguments(schema: &ArgumentSchema, matches: &ArgMatches) -> ParsedArguments {
    let mut args = ParsedArguments::new();

    for param in schema.iter() {
        let key = param.key();
        match param.kind() {
            ParamKind::Switch => args.insert(key, matches.get_flag(key)),
            ParamKind::ColumnFilter => {
                let values: Vec<String> = matches
                    .get_many::<String>(key)
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default();
                args.insert(key, values);
            }
            ParamKind::Positional { .. } | ParamKind::Option => {
                let value = matches
                    .get_one::<String>(key)
                    .cloned()
                    .unwrap_or_else(|| ALL.to_string());
                args.insert(key, value);
            }
        }
    }

    args
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, FromArgMatches};
    use hostcli::field::{COLUMNS, DETAILED, SORT, STARTTIME};
    use test_common::{alarm_clear_spec, alarm_list_spec, alarm_show_spec};

    use super::*;
    use crate::cli::ClapCli;

    fn registry() -> CommandRegistry {
        let (registry, errors) =
            CommandRegistry::new(vec![alarm_list_spec(), alarm_show_spec(), alarm_clear_spec()]);
        assert!(errors.is_empty());
        registry
    }

    fn parse(argv: &[&str]) -> (ParsedArguments, Vec<String>) {
        let registry = registry();
        let matches = registry
            .augment(ClapCli::command())
            .try_get_matches_from(argv)
            .unwrap();
        let (command, sub_matches) = registry.resolve(&matches).unwrap();
        (
            parsed_arguments(&command.schema, sub_matches),
            command.spec.name_words().to_vec(),
        )
    }

    #[test]
    fn test_commands_share_their_group() {
        let registry = registry();
        let root = registry.augment(ClapCli::command());

        let alarm = root.find_subcommand("alarm").unwrap();
        let names: Vec<&str> = alarm.get_subcommands().map(Command::get_name).collect();

        assert_eq!(registry.len(), 3);
        assert_eq!(names, ["list", "show", "clear"]);
    }

    #[test]
    fn test_defaults_for_absent_parameters() {
        let (args, words) = parse(&["hostcli", "alarm", "list"]);

        assert_eq!(words, ["alarm", "list"]);
        assert_eq!(args.text("severity"), Some(ALL));
        assert_eq!(args.text(STARTTIME), Some(ALL));
        assert_eq!(args.text(SORT), Some(ALL));
        assert!(!args.switch(DETAILED));
        assert!(args.values(COLUMNS).is_empty());
    }

    #[test]
    fn test_flags_switches_and_columns() {
        let (args, _) = parse(&[
            "hostcli",
            "alarm",
            "list",
            "--severity",
            "critical,major",
            "--detailed",
            "-c",
            "Name,Time",
            "--column",
            "Severity",
        ]);

        assert_eq!(args.text("severity"), Some("critical,major"));
        assert!(args.switch(DETAILED));
        assert_eq!(args.values(COLUMNS), ["Name,Time", "Severity"]);
    }

    #[test]
    fn test_positionals() {
        let (show, _) = parse(&["hostcli", "alarm", "show"]);
        let (clear, _) = parse(&["hostcli", "alarm", "clear", "disk"]);

        assert_eq!(show.text("name"), Some(ALL));
        assert_eq!(clear.text("name"), Some("disk"));
    }

    #[test]
    fn test_mandatory_positional_is_enforced() {
        let registry = registry();

        let result = registry
            .augment(ClapCli::command())
            .try_get_matches_from(["hostcli", "alarm", "clear"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_with_remote_command() {
        let registry = registry();
        let matches = registry
            .augment(ClapCli::command())
            .try_get_matches_from(["hostcli", "alarm", "list", "--rest-url", "http://x", "-v"])
            .unwrap();

        let cli = ClapCli::from_arg_matches(&matches).unwrap();

        assert!(cli.command.is_none());
        assert!(cli.verbose);
        assert_eq!(cli.rest_url.as_deref(), Some("http://x"));
    }

    #[test]
    fn test_builtin_commands_are_not_remote() {
        let registry = registry();
        let matches = registry
            .augment(ClapCli::command())
            .try_get_matches_from(["hostcli", "config", "validate"])
            .unwrap();

        assert!(registry.resolve(&matches).is_none());
        assert!(ClapCli::from_arg_matches(&matches).unwrap().command.is_some());
    }
}
