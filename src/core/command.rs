//! Command parser for the : command system

use crate::config::EndpointKind;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation commands
    Go(String),
    Action(String),
    Back,
    Close,

    // Classification of the open action
    Classify {
        type_code: String,
        category: Option<String>,
        subcategory: Option<String>,
    },

    // API configuration
    Set(Setting),
    ResetConfig,
    Probe(Option<String>),

    // Shell
    Sidebar,
    Quit,

    // Unknown command
    Unknown(String),
}

/// A single API configuration field update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    BaseUrl(String),
    Timeout(u64),
    Retries(u32),
    Endpoint(EndpointKind, String),
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
    let unknown = || Command::Unknown(input.to_string());

    match cmd.to_lowercase().as_str() {
        // Navigation
        "go" | "open" | "cd" => args.map(Command::Go).unwrap_or_else(unknown),
        "action" | "accion" => args.map(Command::Action).unwrap_or_else(unknown),
        "back" | "b" => Command::Back,
        "close" | "x" => Command::Close,

        "classify" | "cls" => {
            let Some(args) = args else {
                return unknown();
            };
            let mut words = args.split_whitespace().map(|s| s.to_string());
            match words.next() {
                Some(type_code) => Command::Classify {
                    type_code,
                    category: words.next(),
                    subcategory: words.next(),
                },
                None => unknown(),
            }
        }

        "set" => args
            .as_deref()
            .and_then(parse_setting)
            .map(Command::Set)
            .unwrap_or_else(unknown),
        "reset-config" | "reset" => Command::ResetConfig,
        "probe" | "ping" => Command::Probe(args),

        "sidebar" => Command::Sidebar,
        "quit" | "q" => Command::Quit,

        _ => unknown(),
    }
}

fn parse_setting(args: &str) -> Option<Setting> {
    let mut words = args.split_whitespace();
    let key = words.next()?.to_lowercase();
    let value = words.next()?;

    match key.as_str() {
        "base-url" | "baseurl" | "url" => Some(Setting::BaseUrl(value.to_string())),
        "timeout" => value
            .parse()
            .ok()
            .filter(|ms| *ms > 0)
            .map(Setting::Timeout),
        "retries" => value.parse().ok().map(Setting::Retries),
        "endpoint" => {
            let kind = EndpointKind::parse(value)?;
            let path = words.next()?;
            Some(Setting::Endpoint(kind, path.to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(parse_command("go /reports"), Command::Go("/reports".to_string()));
        assert_eq!(parse_command("action 42"), Command::Action("42".to_string()));
        assert_eq!(parse_command("back"), Command::Back);
        assert_eq!(parse_command("close"), Command::Close);
        assert_eq!(parse_command("go"), Command::Unknown("go".to_string()));
    }

    #[test]
    fn test_parse_classify() {
        assert_eq!(
            parse_command("classify lopd brecha acceso"),
            Command::Classify {
                type_code: "lopd".to_string(),
                category: Some("brecha".to_string()),
                subcategory: Some("acceso".to_string()),
            }
        );
        assert_eq!(
            parse_command("cls prl"),
            Command::Classify {
                type_code: "prl".to_string(),
                category: None,
                subcategory: None,
            }
        );
    }

    #[test]
    fn test_parse_settings() {
        assert_eq!(
            parse_command("set base-url https://capa.example/api"),
            Command::Set(Setting::BaseUrl("https://capa.example/api".to_string()))
        );
        assert_eq!(
            parse_command("set timeout 2500"),
            Command::Set(Setting::Timeout(2500))
        );
        assert_eq!(
            parse_command("set endpoint users /v2/users"),
            Command::Set(Setting::Endpoint(
                EndpointKind::Users,
                "/v2/users".to_string()
            ))
        );
        assert_eq!(
            parse_command("set timeout soon"),
            Command::Unknown("set timeout soon".to_string())
        );
        assert_eq!(
            parse_command("set timeout 0"),
            Command::Unknown("set timeout 0".to_string())
        );
    }

    #[test]
    fn test_parse_probe() {
        assert_eq!(parse_command("probe"), Command::Probe(None));
        assert_eq!(
            parse_command("probe http://localhost:9"),
            Command::Probe(Some("http://localhost:9".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
    }
}
