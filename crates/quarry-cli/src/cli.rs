use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    New,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    New(NewArgs),
}

#[derive(Debug, Clone)]
pub struct NewArgs {
    pub name: String,
    pub dir: PathBuf,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help(HelpTopic::Root)),
        "new" => parse_new(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn parse_new<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut name: Option<String> = None;
    let mut dir = PathBuf::from("migrations");

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::New)),
            "--dir" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--dir requires a value");
                };
                dir = PathBuf::from(v);
            }
            _ if token.starts_with("--dir=") => {
                dir = PathBuf::from(token.trim_start_matches("--dir="));
            }
            other if other.starts_with('-') => anyhow::bail!("unknown argument: {other}"),
            other => {
                if name.is_some() {
                    anyhow::bail!("unexpected positional argument: {other}");
                }
                name = Some(other.to_string());
            }
        }
    }

    let Some(name) = name else {
        anyhow::bail!("missing migration name: usage `quarry new <Name>`");
    };

    Ok(Command::New(NewArgs { name, dir }))
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
quarry - migration scaffolding CLI for quarry

USAGE:
  quarry <COMMAND> [OPTIONS]

COMMANDS:
  new <Name>    Create a migration skeleton file

Run `quarry new --help` for more."
            );
        }
        HelpTopic::New => {
            println!(
                "\
USAGE:
  quarry new <Name> [OPTIONS]

NOTES:
  <Name> becomes the migration struct (e.g. CreateUsersTable); the file
  name is prefixed with the current timestamp so migrations sort in
  creation order.

OPTIONS:
  --dir <DIR>           Migration directory (default: migrations)
  -h, --help            Print help"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_new_with_dir() {
        let args = vec![
            "quarry".to_string(),
            "new".to_string(),
            "CreateUsersTable".to_string(),
            "--dir".to_string(),
            "db/migrations".to_string(),
        ];

        let cmd = parse_args(&args).unwrap();
        let Command::New(new) = cmd else {
            panic!("expected new command");
        };
        assert_eq!(new.name, "CreateUsersTable");
        assert_eq!(new.dir, PathBuf::from("db/migrations"));
    }

    #[test]
    fn parse_defaults_to_migrations_dir() {
        let args = vec![
            "quarry".to_string(),
            "new".to_string(),
            "AddIndexes".to_string(),
        ];

        let cmd = parse_args(&args).unwrap();
        let Command::New(new) = cmd else {
            panic!("expected new command");
        };
        assert_eq!(new.dir, PathBuf::from("migrations"));
    }

    #[test]
    fn missing_name_is_an_error() {
        let args = vec!["quarry".to_string(), "new".to_string()];
        assert!(parse_args(&args).is_err());
    }

    #[test]
    fn no_args_prints_help() {
        let args = vec!["quarry".to_string()];
        assert!(matches!(
            parse_args(&args).unwrap(),
            Command::Help(HelpTopic::Root)
        ));
    }
}
