use crate::games::terminal::{self, TICK_MS, TerminalGuard};
use crate::words::WORDLE_WORDS;
use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use rand::seq::SliceRandom;
use std::io::Stdout;
use std::time::{Duration, Instant};

pub const WORD_LEN: usize = 5;
pub const MAX_ATTEMPTS: usize = 10;

#[derive(Debug, PartialEq, Eq)]
pub enum GuessOutcome
{
    Rejected(String),
    Accepted,
    Solved,
}

/// Guesses are recorded, not scored letter by letter.
pub struct Wordle
{
    secret: String,
    guesses: Vec<String>,
}

impl Wordle
{
    pub fn new(secret: &str) -> Self
    {
        Self {
            secret: secret.to_ascii_uppercase(),
            guesses: Vec::new(),
        }
    }

    pub fn random(rng: &mut impl Rng) -> Result<Self, String>
    {
        let secret = WORDLE_WORDS
            .choose(rng)
            .ok_or_else(|| "Word list is empty".to_string())?;
        Ok(Self::new(secret))
    }

    pub fn submit(&mut self, guess: &str) -> GuessOutcome
    {
        if self.is_over() {
            return GuessOutcome::Rejected("The game is over".to_string());
        }
        if guess.len() != WORD_LEN || !guess.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return GuessOutcome::Rejected(format!("Guesses must be {WORD_LEN} letters"));
        }

        let guess = guess.to_ascii_uppercase();
        let solved = guess == self.secret;
        self.guesses.push(guess);
        if solved {
            GuessOutcome::Solved
        } else {
            GuessOutcome::Accepted
        }
    }

    pub fn guesses(&self) -> &[String]
    {
        &self.guesses
    }

    pub fn secret(&self) -> &str
    {
        &self.secret
    }

    pub fn is_solved(&self) -> bool
    {
        self.guesses.last().is_some_and(|guess| *guess == self.secret)
    }

    pub fn is_over(&self) -> bool
    {
        self.is_solved() || self.guesses.len() >= MAX_ATTEMPTS
    }
}

pub fn run() -> Result<(), String>
{
    let mut rng = rand::thread_rng();
    let mut game = Wordle::random(&mut rng)?;
    let mut term = TerminalGuard::enter()?;
    let mut current_guess = String::new();
    let mut message: Option<String> = None;
    let mut last_tick = Instant::now();

    loop {
        if game.is_over() {
            break;
        }

        if handle_input(&mut current_guess, &mut game, &mut message)? {
            return Ok(());
        }

        if last_tick.elapsed() >= Duration::from_millis(TICK_MS) {
            draw_ui(term.stdout(), &game, &current_guess, &message)?;
            last_tick = Instant::now();
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    draw_summary(term.stdout(), &game)?;
    terminal::wait_for_space()
}

fn handle_input(
    current_guess: &mut String,
    game: &mut Wordle,
    message: &mut Option<String>,
) -> Result<bool, String>
{
    for key in terminal::drain_keys()? {
        if terminal::is_quit(&key) {
            return Ok(true);
        }
        apply_key(key, current_guess, game, message);
    }
    Ok(false)
}

fn apply_key(key: KeyEvent, current_guess: &mut String, game: &mut Wordle, message: &mut Option<String>)
{
    match key.code {
        KeyCode::Backspace => {
            current_guess.pop();
        }
        KeyCode::Enter => match game.submit(current_guess) {
            GuessOutcome::Rejected(reason) => *message = Some(reason),
            GuessOutcome::Accepted | GuessOutcome::Solved => {
                current_guess.clear();
                *message = None;
            }
        },
        KeyCode::Char(ch) => {
            if ch.is_ascii_alphabetic() && current_guess.len() < WORD_LEN {
                current_guess.push(ch.to_ascii_uppercase());
            }
        }
        _ => {}
    }
}

fn draw_ui(
    stdout: &mut Stdout,
    game: &Wordle,
    current_guess: &str,
    message: &Option<String>,
) -> Result<(), String>
{
    let mut lines = Vec::new();
    lines.push("Puzzle Hub - Wordle".to_string());
    lines.push(format!(
        "Attempt {}/{}  Word length: {}",
        game.guesses().len() + 1,
        MAX_ATTEMPTS,
        WORD_LEN
    ));
    lines.push(String::new());

    for guess in game.guesses() {
        lines.push(render_tiles(guess));
    }
    lines.push(render_current_guess(current_guess));

    lines.push(String::new());
    if let Some(msg) = message {
        lines.push(msg.clone());
    } else {
        lines.push("Type a word and press Enter.".to_string());
    }
    lines.push("Backspace edits. Esc quits.".to_string());
    terminal::draw_lines(stdout, &lines)
}

fn render_tiles(guess: &str) -> String
{
    let mut row = String::new();
    for ch in guess.chars() {
        row.push_str(&format!("\x1b[48;2;0;150;70m {} \x1b[0m", ch));
    }
    row
}

fn render_current_guess(guess: &str) -> String
{
    let mut row = String::new();
    if guess.is_empty() {
        row.push_str("(type a guess)");
    } else {
        for ch in guess.chars() {
            row.push_str(&format!("\x1b[48;2;40;40;40m {} \x1b[0m", ch));
        }
    }
    row
}

fn draw_summary(stdout: &mut Stdout, game: &Wordle) -> Result<(), String>
{
    let mut lines = Vec::new();
    lines.push("Game over".to_string());
    lines.push(String::new());
    lines.push(format!("Secret word: {}", game.secret()));
    lines.push(format!(
        "Result: {}",
        if game.is_solved() { "Solved" } else { "Out of attempts" }
    ));
    lines.push(format!("Guesses: {}", game.guesses().len()));
    lines.push(String::new());
    lines.push("Press SPACE to exit.".to_string());
    terminal::draw_lines(stdout, &lines)
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent
    {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn only_five_letter_words_count()
    {
        let mut game = Wordle::new("apple");
        assert!(matches!(game.submit("pear"), GuessOutcome::Rejected(_)));
        assert!(matches!(game.submit("ab1de"), GuessOutcome::Rejected(_)));
        assert_eq!(game.submit("grape"), GuessOutcome::Accepted);
        assert_eq!(game.guesses(), &["GRAPE".to_string()]);
    }

    #[test]
    fn matching_secret_ends_game()
    {
        let mut game = Wordle::new("APPLE");
        assert_eq!(game.submit("Apple"), GuessOutcome::Solved);
        assert!(game.is_solved());
        assert!(game.is_over());
        assert!(matches!(game.submit("lemon"), GuessOutcome::Rejected(_)));
    }

    #[test]
    fn attempts_run_out()
    {
        let mut game = Wordle::new("zebra");
        for _ in 0..MAX_ATTEMPTS {
            assert_eq!(game.submit("house"), GuessOutcome::Accepted);
        }
        assert!(game.is_over());
        assert!(!game.is_solved());
        assert!(matches!(game.submit("zebra"), GuessOutcome::Rejected(_)));
    }

    #[test]
    fn random_secret_comes_from_word_list()
    {
        let game = Wordle::random(&mut rand::thread_rng()).unwrap();
        assert!(WORDLE_WORDS.contains(&game.secret()));
    }

    #[test]
    fn typing_and_submitting()
    {
        let mut game = Wordle::new("ocean");
        let mut guess = String::new();
        let mut message = None;
        for ch in "oceanx".chars() {
            apply_key(press(KeyCode::Char(ch)), &mut guess, &mut game, &mut message);
        }
        assert_eq!(guess, "OCEAN");

        apply_key(press(KeyCode::Backspace), &mut guess, &mut game, &mut message);
        apply_key(press(KeyCode::Enter), &mut guess, &mut game, &mut message);
        assert!(message.is_some());
        assert_eq!(guess, "OCEA");

        apply_key(press(KeyCode::Char('n')), &mut guess, &mut game, &mut message);
        apply_key(press(KeyCode::Enter), &mut guess, &mut game, &mut message);
        assert!(message.is_none());
        assert!(guess.is_empty());
        assert!(game.is_solved());
    }
}
