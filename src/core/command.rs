//! Command parser for the : command palette

use super::SectionId;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Go to a section by name (unvalidated)
    Go(String),
    /// Switch domain, or cycle when no id is given
    Domain(Option<String>),
    /// Create a record in the active section
    New,
    Refresh,
    Export(Option<String>),
    Help,
    Quit,
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        "go" | "section" | "open" => match args {
            Some(name) => Command::Go(name),
            None => Command::Unknown(input.to_string()),
        },
        "domain" | "dom" | "site" => Command::Domain(args),
        "new" | "add" | "create" => Command::New,
        "refresh" | "reload" | "r" => Command::Refresh,
        "export" | "exp" => Command::Export(args),
        "help" | "?" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => {
            // bare section names work as shortcuts
            if args.is_none() && other.parse::<SectionId>().is_ok() {
                Command::Go(other.to_string())
            } else {
                Command::Unknown(input.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation() {
        assert_eq!(parse_command("go bookings"), Command::Go("bookings".into()));
        assert_eq!(parse_command("tours"), Command::Go("tours".into()));
        assert_eq!(parse_command("go"), Command::Unknown("go".into()));
        // unvalidated: the controller rejects it
        assert_eq!(parse_command("go flights"), Command::Go("flights".into()));
    }

    #[test]
    fn parses_domain_switch() {
        assert_eq!(
            parse_command("domain domain2"),
            Command::Domain(Some("domain2".into()))
        );
        assert_eq!(parse_command("dom"), Command::Domain(None));
    }

    #[test]
    fn parses_actions() {
        assert_eq!(parse_command("new"), Command::New);
        assert_eq!(parse_command("  refresh "), Command::Refresh);
        assert_eq!(parse_command("export json"), Command::Export(Some("json".into())));
        assert_eq!(parse_command("export"), Command::Export(None));
        assert_eq!(parse_command("q"), Command::Quit);
    }

    #[test]
    fn unknown_commands_keep_input() {
        assert_eq!(parse_command("launch rockets"), Command::Unknown("launch rockets".into()));
    }
}
