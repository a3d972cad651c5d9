use thiserror::Error;

/// Kinds of subscriber the REPL can spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Milestone on `enemy_defeated`, every 5.
    Quest,
    /// Milestone on `rare_items_collected`, every 3.
    Achievement,
    /// Journal of every event.
    Hud,
}

impl Preset {
    fn parse(word: &str) -> Result<Self, ParseError> {
        match word {
            "quest" => Ok(Preset::Quest),
            "achievement" => Ok(Preset::Achievement),
            "hud" => Ok(Preset::Hud),
            other => Err(ParseError::UnknownPreset(other.to_owned())),
        }
    }
}

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Spawn {
        preset: Preset,
        key: String,
        kind: Option<String>,
        every: Option<usize>,
    },
    Despawn {
        key: String,
    },
    Subscribe {
        key: String,
    },
    Unsubscribe {
        key: String,
    },
    Publish {
        kind: String,
        payload: String,
    },
    List,
    Scenario,
    Help,
    Exit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    #[error("`{command}` needs <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("unknown subscriber preset `{0}` (quest, achievement, hud)")]
    UnknownPreset(String),
    #[error("`{0}` is not a positive number")]
    InvalidNumber(String),
}

pub const HELP: &str = "\
commands:
  spawn quest|achievement|hud <key> [kind] [every]   create a subscriber owned by the table
  despawn <key>                                      drop the table's subscriber
  subscribe <key>                                    register a spawned subscriber
  unsubscribe <key>                                  remove a registration
  publish <kind> [payload]                           publish an event
  list                                               show table and bus
  scenario                                           run the quest scenario
  help | exit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseError::Empty);
        };

        let command = match name {
            "spawn" => {
                let preset = Preset::parse(required(&mut words, "spawn", "preset")?)?;
                let key = required(&mut words, "spawn", "key")?.to_owned();
                let kind = words.next().map(str::to_owned);
                let every = words.next().map(parse_every).transpose()?;
                Command::Spawn {
                    preset,
                    key,
                    kind,
                    every,
                }
            }
            "despawn" => Command::Despawn {
                key: required(&mut words, "despawn", "key")?.to_owned(),
            },
            "subscribe" => Command::Subscribe {
                key: required(&mut words, "subscribe", "key")?.to_owned(),
            },
            "unsubscribe" => Command::Unsubscribe {
                key: required(&mut words, "unsubscribe", "key")?.to_owned(),
            },
            "publish" => Command::Publish {
                kind: required(&mut words, "publish", "kind")?.to_owned(),
                payload: words.collect::<Vec<_>>().join(" "),
            },
            "list" | "ls" => Command::List,
            "scenario" => Command::Scenario,
            "help" | "?" => Command::Help,
            "exit" | "quit" => Command::Exit,
            other => return Err(ParseError::UnknownCommand(other.to_owned())),
        };
        Ok(command)
    }
}

fn required<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, ParseError> {
    words
        .next()
        .ok_or(ParseError::MissingArgument { command, argument })
}

fn parse_every(word: &str) -> Result<usize, ParseError> {
    match word.parse::<usize>() {
        Ok(every) if every > 0 => Ok(every),
        _ => Err(ParseError::InvalidNumber(word.to_owned())),
    }
}
