use blog_core::Msg;

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Core(Msg),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ParseError {
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0:?} is not a section number (sections start at 1)")]
    BadSection(String),
}

/// Parses one input line. Section numbers are 1-based on screen.
pub(crate) fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Core(Msg::NoOp));
    }
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        "title" => Command::Core(Msg::TitleChanged(rest.to_string())),
        "add" => Command::Core(Msg::SectionAdded),
        "section" => {
            let (number, title) = split_section_arg(rest, "section <n> <text>")?;
            Command::Core(Msg::SectionTitleChanged {
                index: parse_section(number)?,
                title: title.to_string(),
            })
        }
        "model" => {
            let (number, model) = split_section_arg(rest, "model <n> <id>")?;
            if model.is_empty() {
                return Err(ParseError::Usage("model <n> <id>"));
            }
            Command::Core(Msg::SectionModelChanged {
                index: parse_section(number)?,
                model: model.to_string(),
            })
        }
        "gen" | "generate" => match rest {
            "" => return Err(ParseError::Usage("gen <n> | gen all")),
            "all" => Command::Core(Msg::GenerateAllClicked),
            number => Command::Core(Msg::GenerateSectionClicked {
                index: parse_section(number)?,
            }),
        },
        "images" => Command::Core(Msg::GenerateImagesClicked),
        "download" => Command::Core(Msg::DownloadClicked),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(ParseError::Unknown(keyword.to_string())),
    };
    Ok(command)
}

fn split_section_arg<'a>(
    rest: &'a str,
    usage: &'static str,
) -> Result<(&'a str, &'a str), ParseError> {
    if rest.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    Ok(match rest.split_once(char::is_whitespace) {
        Some((number, value)) => (number, value.trim()),
        None => (rest, ""),
    })
}

fn parse_section(number: &str) -> Result<usize, ParseError> {
    match number.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(ParseError::BadSection(number.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_edits_map_to_messages() {
        assert_eq!(
            parse_command("title Goa beaches"),
            Ok(Command::Core(Msg::TitleChanged("Goa beaches".to_string())))
        );
        assert_eq!(parse_command("add"), Ok(Command::Core(Msg::SectionAdded)));
        assert_eq!(
            parse_command("section 2  Street food "),
            Ok(Command::Core(Msg::SectionTitleChanged {
                index: 1,
                title: "Street food".to_string()
            }))
        );
        assert_eq!(
            parse_command("model 1 gpt"),
            Ok(Command::Core(Msg::SectionModelChanged {
                index: 0,
                model: "gpt".to_string()
            }))
        );
    }

    #[test]
    fn empty_titles_are_allowed() {
        assert_eq!(
            parse_command("title"),
            Ok(Command::Core(Msg::TitleChanged(String::new())))
        );
        assert_eq!(
            parse_command("section 1"),
            Ok(Command::Core(Msg::SectionTitleChanged {
                index: 0,
                title: String::new()
            }))
        );
    }

    #[test]
    fn actions_map_to_messages() {
        assert_eq!(
            parse_command("gen all"),
            Ok(Command::Core(Msg::GenerateAllClicked))
        );
        assert_eq!(
            parse_command("GEN 3"),
            Ok(Command::Core(Msg::GenerateSectionClicked { index: 2 }))
        );
        assert_eq!(
            parse_command("images"),
            Ok(Command::Core(Msg::GenerateImagesClicked))
        );
        assert_eq!(
            parse_command("download"),
            Ok(Command::Core(Msg::DownloadClicked))
        );
        assert_eq!(parse_command("  "), Ok(Command::Core(Msg::NoOp)));
        assert_eq!(parse_command("show"), Ok(Command::Show));
        assert_eq!(parse_command("?"), Ok(Command::Help));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(
            parse_command("publish"),
            Err(ParseError::Unknown("publish".to_string()))
        );
        assert_eq!(
            parse_command("gen 0"),
            Err(ParseError::BadSection("0".to_string()))
        );
        assert_eq!(
            parse_command("section x title"),
            Err(ParseError::BadSection("x".to_string()))
        );
        assert_eq!(parse_command("model 1"), Err(ParseError::Usage("model <n> <id>")));
        assert_eq!(parse_command("gen"), Err(ParseError::Usage("gen <n> | gen all")));
    }
}
