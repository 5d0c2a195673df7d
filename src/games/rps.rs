use crate::games::terminal::{self, TICK_MS, TerminalGuard};
use crossterm::event::KeyCode;
use rand::Rng;
use std::io::Stdout;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice
{
    Rock,
    Paper,
    Scissors,
}

impl Choice
{
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    pub fn glyph(self) -> &'static str
    {
        match self {
            Choice::Rock => "⚫",
            Choice::Paper => "📄",
            Choice::Scissors => "✂️",
        }
    }

    fn beats(self, other: Choice) -> bool
    {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Paper, Choice::Rock)
                | (Choice::Scissors, Choice::Paper)
        )
    }

    pub fn random(rng: &mut impl Rng) -> Self
    {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome
{
    Win,
    Lose,
    Draw,
}

impl Outcome
{
    pub fn of(player: Choice, ai: Choice) -> Self
    {
        if player == ai {
            Outcome::Draw
        } else if player.beats(ai) {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }

    fn label(self) -> &'static str
    {
        match self {
            Outcome::Win => "You Win 🎉",
            Outcome::Lose => "You Lose 😢",
            Outcome::Draw => "Draw 🤝",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score
{
    pub win: u32,
    pub lose: u32,
    pub draw: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Round
{
    pub player: Choice,
    pub ai: Choice,
    pub outcome: Outcome,
}

#[derive(Default)]
pub struct RpsGame
{
    score: Score,
    last: Option<Round>,
}

impl RpsGame
{
    pub fn play_against(&mut self, player: Choice, ai: Choice) -> Round
    {
        let outcome = Outcome::of(player, ai);
        match outcome {
            Outcome::Win => self.score.win += 1,
            Outcome::Lose => self.score.lose += 1,
            Outcome::Draw => self.score.draw += 1,
        }
        let round = Round { player, ai, outcome };
        self.last = Some(round);
        round
    }

    pub fn play(&mut self, player: Choice, rng: &mut impl Rng) -> Round
    {
        let ai = Choice::random(rng);
        self.play_against(player, ai)
    }

    pub fn reset_score(&mut self)
    {
        *self = Self::default();
    }

    pub fn score(&self) -> Score
    {
        self.score
    }

    pub fn last(&self) -> Option<Round>
    {
        self.last
    }
}

pub fn run() -> Result<(), String>
{
    let mut rng = rand::thread_rng();
    let mut game = RpsGame::default();
    let mut term = TerminalGuard::enter()?;
    let mut last_tick = Instant::now();

    loop {
        for key in terminal::drain_keys()? {
            if terminal::is_quit(&key) {
                return Ok(());
            }
            match key.code {
                KeyCode::Char('1') => {
                    game.play(Choice::Rock, &mut rng);
                }
                KeyCode::Char('2') => {
                    game.play(Choice::Paper, &mut rng);
                }
                KeyCode::Char('3') => {
                    game.play(Choice::Scissors, &mut rng);
                }
                KeyCode::Char('r') => game.reset_score(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= Duration::from_millis(TICK_MS) {
            draw_ui(term.stdout(), &game)?;
            last_tick = Instant::now();
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

fn draw_ui(stdout: &mut Stdout, game: &RpsGame) -> Result<(), String>
{
    let mut lines = Vec::new();
    lines.push("Puzzle Hub - Rock Paper Scissors".to_string());
    lines.push(String::new());
    let options: Vec<String> = Choice::ALL
        .iter()
        .enumerate()
        .map(|(idx, choice)| format!("{}. {}", idx + 1, choice.glyph()))
        .collect();
    lines.push(options.join("   "));
    lines.push(String::new());

    if let Some(round) = game.last() {
        lines.push(format!("You: {} | AI: {}", round.player.glyph(), round.ai.glyph()));
        lines.push(round.outcome.label().to_string());
    } else {
        lines.push("Pick your move.".to_string());
        lines.push(String::new());
    }

    let score = game.score();
    lines.push(String::new());
    lines.push(format!(
        "Win: {}  Lose: {}  Draw: {}",
        score.win, score.lose, score.draw
    ));
    lines.push(String::new());
    lines.push("1/2/3 play. R resets the score. Esc quits.".to_string());
    terminal::draw_lines(stdout, &lines)
}

#[cfg(test)]
mod tests
{
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn outcome_table()
    {
        use Choice::*;
        assert_eq!(Outcome::of(Rock, Scissors), Outcome::Win);
        assert_eq!(Outcome::of(Paper, Rock), Outcome::Win);
        assert_eq!(Outcome::of(Scissors, Paper), Outcome::Win);
        assert_eq!(Outcome::of(Scissors, Rock), Outcome::Lose);
        assert_eq!(Outcome::of(Rock, Paper), Outcome::Lose);
        assert_eq!(Outcome::of(Paper, Scissors), Outcome::Lose);
        for choice in Choice::ALL {
            assert_eq!(Outcome::of(choice, choice), Outcome::Draw);
        }
    }

    #[test]
    fn score_tracks_rounds()
    {
        let mut game = RpsGame::default();
        game.play_against(Choice::Rock, Choice::Scissors);
        game.play_against(Choice::Rock, Choice::Paper);
        let round = game.play_against(Choice::Paper, Choice::Paper);
        assert_eq!(round.outcome, Outcome::Draw);
        assert_eq!(game.score(), Score { win: 1, lose: 1, draw: 1 });
        assert_eq!(game.last(), Some(round));
    }

    #[test]
    fn reset_clears_score_and_round()
    {
        let mut game = RpsGame::default();
        game.play(Choice::Rock, &mut ChaCha8Rng::seed_from_u64(3));
        game.reset_score();
        assert_eq!(game.score(), Score::default());
        assert!(game.last().is_none());
    }

    #[test]
    fn random_play_counts_once()
    {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut game = RpsGame::default();
        for _ in 0..30 {
            game.play(Choice::Scissors, &mut rng);
        }
        let score = game.score();
        assert_eq!(score.win + score.lose + score.draw, 30);
    }
}
