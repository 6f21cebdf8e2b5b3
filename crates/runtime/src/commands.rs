//! Text command surface for debug and admin tools.
//!
//! Commands are parsed and validated here, at the boundary, and executed
//! against a [`Session`]. The outcome is a player-visible message.
//!
//! ```text
//! set-level 20
//! add-xp 1500
//! set-job knight
//! set-world-level 30
//! reset-skills
//! unlock-all-bosses
//! ```

use std::str::FromStr;

use thiserror::Error;

use progression_core::{CharacterId, ErrorSeverity, GameError, Job, JobError};

use crate::api::SessionError;
use crate::session::Session;

/// Command names, as typed.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum CommandKind {
    SetLevel,
    AddXp,
    SetJob,
    AddStatPoints,
    AddSkillPoints,
    SetWorldLevel,
    ResetCharacter,
    ResetSkills,
    ClearHotbar,
    UnlockAllBosses,
}

impl CommandKind {
    /// Argument placeholder for usage messages.
    pub fn usage(self) -> &'static str {
        match self {
            Self::SetLevel | Self::SetWorldLevel => "<level>",
            Self::AddXp | Self::AddStatPoints | Self::AddSkillPoints => "<amount>",
            Self::SetJob => "<job>",
            Self::ResetCharacter | Self::ResetSkills | Self::ClearHotbar | Self::UnlockAllBosses => {
                ""
            }
        }
    }
}

/// A validated command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SetLevel(u32),
    AddXp(u64),
    SetJob(Job),
    AddStatPoints(u32),
    AddSkillPoints(u32),
    SetWorldLevel(u32),
    ResetCharacter,
    ResetSkills,
    ClearHotbar,
    UnlockAllBosses,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::SetLevel(_) => CommandKind::SetLevel,
            Self::AddXp(_) => CommandKind::AddXp,
            Self::SetJob(_) => CommandKind::SetJob,
            Self::AddStatPoints(_) => CommandKind::AddStatPoints,
            Self::AddSkillPoints(_) => CommandKind::AddSkillPoints,
            Self::SetWorldLevel(_) => CommandKind::SetWorldLevel,
            Self::ResetCharacter => CommandKind::ResetCharacter,
            Self::ResetSkills => CommandKind::ResetSkills,
            Self::ClearHotbar => CommandKind::ClearHotbar,
            Self::UnlockAllBosses => CommandKind::UnlockAllBosses,
        }
    }
}

/// Command parse, validation and execution errors.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("{command} is missing its {argument} argument")]
    MissingArgument {
        command: CommandKind,
        argument: &'static str,
    },

    #[error("{command}: invalid {argument} '{value}'")]
    InvalidArgument {
        command: CommandKind,
        argument: &'static str,
        value: String,
    },

    #[error("{command} does not take '{value}'")]
    UnexpectedArgument { command: CommandKind, value: String },

    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Job(e) => e.severity(),
            Self::Session(e) => e.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "COMMAND_EMPTY",
            Self::UnknownCommand(_) => "COMMAND_UNKNOWN",
            Self::MissingArgument { .. } => "COMMAND_MISSING_ARGUMENT",
            Self::InvalidArgument { .. } => "COMMAND_INVALID_ARGUMENT",
            Self::UnexpectedArgument { .. } => "COMMAND_UNEXPECTED_ARGUMENT",
            Self::Job(e) => e.error_code(),
            Self::Session(e) => e.error_code(),
        }
    }
}

struct Args<'a> {
    command: CommandKind,
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn required(&mut self, argument: &'static str) -> Result<&'a str, CommandError> {
        self.tokens.next().ok_or(CommandError::MissingArgument {
            command: self.command,
            argument,
        })
    }

    /// Parses a positive number.
    fn positive<T>(&mut self, argument: &'static str) -> Result<T, CommandError>
    where
        T: FromStr + PartialOrd + Default,
    {
        let raw = self.required(argument)?;
        match raw.parse::<T>() {
            Ok(value) if value > T::default() => Ok(value),
            _ => Err(CommandError::InvalidArgument {
                command: self.command,
                argument,
                value: raw.to_owned(),
            }),
        }
    }

    fn finish(mut self) -> Result<(), CommandError> {
        match self.tokens.next() {
            Some(extra) => Err(CommandError::UnexpectedArgument {
                command: self.command,
                value: extra.to_owned(),
            }),
            None => Ok(()),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut tokens = input.trim().trim_start_matches('/').split_whitespace();
        let name = tokens.next().ok_or(CommandError::Empty)?;
        let kind = CommandKind::from_str(name)
            .map_err(|_| CommandError::UnknownCommand(name.to_owned()))?;
        let mut args = Args {
            command: kind,
            tokens,
        };

        let command = match kind {
            CommandKind::SetLevel => Command::SetLevel(args.positive("level")?),
            CommandKind::AddXp => Command::AddXp(args.positive("amount")?),
            CommandKind::SetJob => Command::SetJob(Job::lookup(args.required("job")?)?),
            CommandKind::AddStatPoints => Command::AddStatPoints(args.positive("amount")?),
            CommandKind::AddSkillPoints => Command::AddSkillPoints(args.positive("amount")?),
            CommandKind::SetWorldLevel => {
                let raw = args.required("level")?;
                let level = raw.parse().map_err(|_| CommandError::InvalidArgument {
                    command: kind,
                    argument: "level",
                    value: raw.to_owned(),
                })?;
                Command::SetWorldLevel(level)
            }
            CommandKind::ResetCharacter => Command::ResetCharacter,
            CommandKind::ResetSkills => Command::ResetSkills,
            CommandKind::ClearHotbar => Command::ClearHotbar,
            CommandKind::UnlockAllBosses => Command::UnlockAllBosses,
        };
        args.finish()?;
        Ok(command)
    }
}

/// Executes `command` for `issuer`. Returns the message shown to the player.
pub fn execute(
    session: &mut Session,
    issuer: CharacterId,
    command: Command,
) -> Result<String, CommandError> {
    tracing::debug!(character = %issuer, command = %command.kind(), "executing command");

    let message = match command {
        Command::SetLevel(level) => {
            let level = session.set_level(issuer, level)?;
            format!("Level set to {}.", level)
        }
        Command::AddXp(amount) => {
            let report = session.award_experience(issuer, amount)?;
            if report.leveled_up() {
                format!("Gained {} XP. Reached level {}!", amount, report.level)
            } else {
                format!("Gained {} XP.", amount)
            }
        }
        Command::SetJob(job) => {
            let previous = session.set_job(issuer, job)?;
            format!("Job changed from {} to {}.", previous, job)
        }
        Command::AddStatPoints(amount) => {
            session
                .character_mut(issuer)?
                .progression
                .add_stat_points(amount);
            format!("Added {} stat points.", amount)
        }
        Command::AddSkillPoints(amount) => {
            session
                .character_mut(issuer)?
                .progression
                .add_skill_points(amount);
            format!("Added {} skill points.", amount)
        }
        Command::SetWorldLevel(level) => {
            let world_level = session.set_world_level(level)?;
            format!(
                "World level is now {} (level cap {}).",
                world_level,
                session.world().level_cap()
            )
        }
        Command::ResetCharacter => {
            session.reset_character(issuer)?;
            "Character reset to level 1.".to_owned()
        }
        Command::ResetSkills => {
            let refunded = session.reset_skills(issuer)?;
            format!("Skills reset. Refunded {} skill points.", refunded)
        }
        Command::ClearHotbar => {
            session.character_mut(issuer)?.skills.clear_hotbar();
            "Hotbar cleared.".to_owned()
        }
        Command::UnlockAllBosses => {
            let unlocked = session.unlock_all_bosses();
            format!(
                "Unlocked {} bosses. World level is now {}.",
                unlocked,
                session.world().world_level()
            )
        }
    };
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_every_command_name() {
        for kind in CommandKind::iter() {
            let input = match kind.usage() {
                "<job>" => format!("{} warrior", kind),
                "" => kind.to_string(),
                _ => format!("{} 5", kind),
            };
            let command: Command = input.parse().unwrap();
            assert_eq!(command.kind(), kind);
        }
    }

    #[test]
    fn accepts_slash_prefix_and_any_case() {
        assert_eq!("/Set-Level 12".parse::<Command>().unwrap(), Command::SetLevel(12));
        assert_eq!(
            "set-job KNIGHT".parse::<Command>().unwrap(),
            Command::SetJob(Job::Knight)
        );
    }

    #[test]
    fn rejects_bad_input_at_the_boundary() {
        assert!(matches!("".parse::<Command>(), Err(CommandError::Empty)));
        assert!(matches!(
            "fly".parse::<Command>(),
            Err(CommandError::UnknownCommand(_))
        ));
        assert!(matches!(
            "set-level".parse::<Command>(),
            Err(CommandError::MissingArgument { argument: "level", .. })
        ));
        assert!(matches!(
            "set-level 0".parse::<Command>(),
            Err(CommandError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "add-xp -5".parse::<Command>(),
            Err(CommandError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "set-job archmage".parse::<Command>(),
            Err(CommandError::Job(JobError::Unknown(_)))
        ));
        assert!(matches!(
            "clear-hotbar now".parse::<Command>(),
            Err(CommandError::UnexpectedArgument { .. })
        ));
    }

    #[test]
    fn world_level_zero_is_a_valid_request() {
        assert_eq!(
            "set-world-level 0".parse::<Command>().unwrap(),
            Command::SetWorldLevel(0)
        );
    }
}
