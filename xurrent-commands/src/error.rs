use std::{error::Error, fmt};

/// A failed command.
///
/// Wraps the underlying error unchanged - whether it is an API-level
/// failure or anything else - and names the command it came from. Commands
/// never emit output once one of these is produced.
#[derive(Debug)]
pub struct CommandError {
    command: String,
    source: Box<dyn Error + Send + Sync>
}

impl CommandError {
    pub fn new<C, E>(command: C, source: E) -> Self
    where
        C: Into<String>,
        E: Error + Send + Sync + 'static
    {
        CommandError {
            command: command.into(),
            source: Box::new(source)
        }
    }

    /// The name of the command that failed.
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.command, self.source)
    }
}

#[cfg(test)]
mod test {
    use super::CommandError;
    use xurrent_graphql::ClientError;

    #[test]
    fn names_the_failing_command() {
        let error = CommandError::new(
            "create-team",
            ClientError::NoClient("no clients registered".to_string())
        );
        assert_eq!(error.command(), "create-team");
        assert_eq!(
            error.to_string(),
            "create-team: no client: no clients registered"
        );
    }
}
