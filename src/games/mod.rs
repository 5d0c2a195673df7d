pub mod memory;
pub mod rps;
pub mod sudoku;
pub mod terminal;
pub mod wordle;

pub struct GameDescriptor
{
    pub name: &'static str,
    pub description: &'static str,
}

pub fn registry() -> Vec<GameDescriptor>
{
    vec![
        GameDescriptor {
            name: "sudoku",
            description: "4x4 Sudoku in three difficulties",
        },
        GameDescriptor {
            name: "wordle",
            description: "Guess the five-letter word",
        },
        GameDescriptor {
            name: "memory",
            description: "Flip cards and find the matching pairs",
        },
        GameDescriptor {
            name: "rps",
            description: "Rock-Paper-Scissors against the computer",
        },
    ]
}

/// Splits `--flag=value` into its parts; a bare `--flag` has no inline value.
pub fn split_flag(arg: &str) -> (&str, Option<&str>)
{
    match arg.split_once('=') {
        Some((flag, value)) => (flag, Some(value)),
        None => (arg, None),
    }
}

/// The inline value of a flag, or else the next argument.
pub fn flag_value<'a>(
    flag: &str,
    inline: Option<&'a str>,
    rest: &mut impl Iterator<Item = &'a String>,
) -> Result<&'a str, String>
{
    match inline {
        Some(value) => Ok(value),
        None => rest
            .next()
            .map(String::as_str)
            .ok_or_else(|| format!("Expected value after {flag}")),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn registry_names_are_unique()
    {
        let games = registry();
        assert_eq!(games.len(), 4);
        for (idx, game) in games.iter().enumerate() {
            assert!(games[idx + 1..].iter().all(|other| other.name != game.name));
        }
    }

    #[test]
    fn flag_values_inline_or_next()
    {
        assert_eq!(split_flag("--seed=4"), ("--seed", Some("4")));
        assert_eq!(split_flag("--seed"), ("--seed", None));

        let rest = vec!["12".to_string()];
        let mut iter = rest.iter();
        assert_eq!(flag_value("--seed", None, &mut iter), Ok("12"));
        assert!(flag_value("--seed", None, &mut iter).is_err());
        assert_eq!(flag_value("--seed", Some("3"), &mut iter), Ok("3"));
    }
}
