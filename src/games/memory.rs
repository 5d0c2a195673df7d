//! Memory Match: find the pairs in a shuffled deck of face-down cards.
//!
//! At most two unmatched cards are face up at a time. A matching pair stays
//! face up; a mismatched pair flips back after a short delay, and reveals are
//! dropped until it does. The delay is a deadline owned by the session and
//! fired from the host loop through [`PairMatchGame::tick`] or
//! [`PairMatchGame::resolve_pending`].

use crate::games::terminal::{self, GridCursor, TICK_MS, TerminalGuard, highlight};
use crate::games::{flag_value, split_flag};
use crossterm::event::KeyCode;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::env;
use std::io::Stdout;
use std::time::{Duration, Instant};

pub const DEFAULT_FLIP_DELAY: Duration = Duration::from_millis(700);
const DEFAULT_PAIRS: usize = 4;
const MAX_DELAY_MS: u64 = 5000;
const GRID_COLS: usize = 4;
const SEED_ENV: &str = "PUZZLE_HUB_SEED";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol
{
    Apple,
    Banana,
    Grape,
    Orange,
    Cherry,
    Lemon,
    Peach,
    Melon,
}

impl Symbol
{
    pub const ALL: [Symbol; 8] = [
        Symbol::Apple,
        Symbol::Banana,
        Symbol::Grape,
        Symbol::Orange,
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Peach,
        Symbol::Melon,
    ];

    pub fn glyph(self) -> &'static str
    {
        match self {
            Symbol::Apple => "🍎",
            Symbol::Banana => "🍌",
            Symbol::Grape => "🍇",
            Symbol::Orange => "🍊",
            Symbol::Cherry => "🍒",
            Symbol::Lemon => "🍋",
            Symbol::Peach => "🍑",
            Symbol::Melon => "🍉",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card
{
    pub id: usize,
    pub value: Symbol,
    pub face_up: bool,
}

/// A scheduled un-flip of a mismatched pair.
///
/// Stamped with the deck generation it was created for, so firing it after a
/// reset does nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingFlip
{
    pub generation: u64,
    pub cards: (usize, usize),
    pub due: Instant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome
{
    /// Locked, already face up, or no such card.
    Ignored,
    Selected,
    Matched,
    Mismatched(PendingFlip),
}

pub struct PairMatchGame
{
    alphabet: Vec<Symbol>,
    cards: Vec<Card>,
    selection: Vec<usize>,
    pending: Option<PendingFlip>,
    delay: Duration,
    generation: u64,
    moves: u32,
    rng: ChaCha8Rng,
}

impl PairMatchGame
{
    /// Shuffled deck with two cards per distinct symbol of `alphabet`.
    pub fn new(alphabet: &[Symbol], delay: Duration, seed: u64) -> Self
    {
        let mut unique = Vec::with_capacity(alphabet.len());
        for symbol in alphabet {
            if !unique.contains(symbol) {
                unique.push(*symbol);
            }
        }

        let mut game = Self {
            alphabet: unique,
            cards: Vec::new(),
            selection: Vec::with_capacity(2),
            pending: None,
            delay,
            generation: 0,
            moves: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        game.deal();
        game
    }

    /// Deck in a fixed order. Every symbol must appear exactly twice.
    pub fn from_deck(values: &[Symbol], delay: Duration) -> Result<Self, String>
    {
        let mut alphabet: Vec<Symbol> = Vec::new();
        for symbol in values {
            if alphabet.contains(symbol) {
                continue;
            }
            let count = values.iter().filter(|value| *value == symbol).count();
            if count != 2 {
                return Err(format!(
                    "{:?} appears {} times, every symbol needs exactly 2",
                    symbol, count
                ));
            }
            alphabet.push(*symbol);
        }

        Ok(Self {
            alphabet,
            cards: build_cards(values),
            selection: Vec::with_capacity(2),
            pending: None,
            delay,
            generation: 0,
            moves: 0,
            rng: ChaCha8Rng::seed_from_u64(0),
        })
    }

    /// New shuffled deck from the same alphabet. Any pending un-flip is dropped.
    pub fn reset(&mut self)
    {
        self.generation += 1;
        self.deal();
    }

    fn deal(&mut self)
    {
        let mut values: Vec<Symbol> = self
            .alphabet
            .iter()
            .flat_map(|symbol| [*symbol, *symbol])
            .collect();
        values.shuffle(&mut self.rng);
        self.cards = build_cards(&values);
        self.selection.clear();
        self.pending = None;
        self.moves = 0;
    }

    pub fn reveal(&mut self, card_id: usize, now: Instant) -> RevealOutcome
    {
        if self.is_locked() {
            return RevealOutcome::Ignored;
        }
        let Some(card) = self.cards.get_mut(card_id) else {
            return RevealOutcome::Ignored;
        };
        if card.face_up {
            return RevealOutcome::Ignored;
        }

        card.face_up = true;
        self.selection.push(card_id);
        if self.selection.len() < 2 {
            return RevealOutcome::Selected;
        }

        self.moves += 1;
        let (first, second) = (self.selection[0], self.selection[1]);
        if self.cards[first].value == self.cards[second].value {
            self.selection.clear();
            return RevealOutcome::Matched;
        }

        let pending = PendingFlip {
            generation: self.generation,
            cards: (first, second),
            due: now + self.delay,
        };
        self.pending = Some(pending);
        RevealOutcome::Mismatched(pending)
    }

    /// Fires the pending un-flip once its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool
    {
        let Some(pending) = self.pending else {
            return false;
        };
        if now < pending.due {
            return false;
        }
        self.resolve_pending(pending)
    }

    /// Fires a specific un-flip regardless of the clock. Stale or already
    /// fired flips are ignored.
    pub fn resolve_pending(&mut self, flip: PendingFlip) -> bool
    {
        if self.pending != Some(flip) || flip.generation != self.generation {
            return false;
        }

        let (first, second) = flip.cards;
        self.cards[first].face_up = false;
        self.cards[second].face_up = false;
        self.selection.clear();
        self.pending = None;
        true
    }

    pub fn cards(&self) -> &[Card]
    {
        &self.cards
    }

    pub fn selection(&self) -> &[usize]
    {
        &self.selection
    }

    pub fn pending(&self) -> Option<PendingFlip>
    {
        self.pending
    }

    pub fn is_locked(&self) -> bool
    {
        self.selection.len() == 2
    }

    pub fn moves(&self) -> u32
    {
        self.moves
    }

    pub fn generation(&self) -> u64
    {
        self.generation
    }

    pub fn matched_pairs(&self) -> usize
    {
        let face_up = self.cards.iter().filter(|card| card.face_up).count();
        (face_up - self.selection.len()) / 2
    }

    pub fn pair_count(&self) -> usize
    {
        self.alphabet.len()
    }

    pub fn is_solved(&self) -> bool
    {
        self.pending.is_none() && self.cards.iter().all(|card| card.face_up)
    }
}

fn build_cards(values: &[Symbol]) -> Vec<Card>
{
    values
        .iter()
        .enumerate()
        .map(|(id, value)| Card {
            id,
            value: *value,
            face_up: false,
        })
        .collect()
}

pub struct MemoryConfig
{
    pairs: usize,
    delay: Duration,
    seed: Option<u64>,
}

impl MemoryConfig
{
    pub fn from_args(args: &[String]) -> Result<Self, String>
    {
        let mut config = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let (flag, inline) = split_flag(arg);
            match flag {
                "--pairs" => {
                    let pairs = flag_value(flag, inline, &mut iter)?
                        .parse::<usize>()
                        .map_err(|_| "Pairs must be a whole number".to_string())?;
                    config.pairs = pairs.clamp(1, Symbol::ALL.len());
                }
                "--delay-ms" => {
                    let millis = flag_value(flag, inline, &mut iter)?
                        .parse::<u64>()
                        .map_err(|_| "Delay must be a whole number of milliseconds".to_string())?;
                    config.delay = Duration::from_millis(millis.min(MAX_DELAY_MS));
                }
                "--seed" => {
                    let seed = flag_value(flag, inline, &mut iter)?
                        .parse::<u64>()
                        .map_err(|_| "Seed must be an unsigned integer".to_string())?;
                    config.seed = Some(seed);
                }
                _ => return Err(format!("Unknown memory option '{arg}'")),
            }
        }

        if config.seed.is_none() {
            config.seed = seed_from_env();
        }
        Ok(config)
    }
}

impl Default for MemoryConfig
{
    fn default() -> Self
    {
        Self {
            pairs: DEFAULT_PAIRS,
            delay: DEFAULT_FLIP_DELAY,
            seed: None,
        }
    }
}

fn seed_from_env() -> Option<u64>
{
    let value = env::var(SEED_ENV).ok()?;
    match value.parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(_) => {
            eprintln!("Warning: ignoring {SEED_ENV}='{value}', expected an unsigned integer.");
            None
        }
    }
}

pub fn run_with_config(config: MemoryConfig) -> Result<(), String>
{
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut game = PairMatchGame::new(&Symbol::ALL[..config.pairs], config.delay, seed);
    let rows = game.cards().len().div_ceil(GRID_COLS);
    let mut cursor = GridCursor::new(rows, GRID_COLS);
    let mut term = TerminalGuard::enter()?;
    let mut last_tick = Instant::now();

    loop {
        let now = Instant::now();
        game.tick(now);
        if game.is_solved() {
            break;
        }

        let mut quit = false;
        for key in terminal::drain_keys()? {
            if terminal::is_quit(&key) {
                quit = true;
                break;
            }
            if cursor.apply(key.code) {
                continue;
            }
            match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    game.reveal(cursor.index(), now);
                }
                KeyCode::Char('r') => game.reset(),
                _ => {}
            }
        }
        if quit {
            return Ok(());
        }

        if last_tick.elapsed() >= Duration::from_millis(TICK_MS) {
            draw_ui(term.stdout(), &game, &cursor)?;
            last_tick = Instant::now();
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    draw_summary(term.stdout(), &game)?;
    terminal::wait_for_space()
}

fn render_grid(game: &PairMatchGame, cursor: Option<&GridCursor>) -> Vec<String>
{
    game.cards()
        .chunks(GRID_COLS)
        .map(|cards| {
            let mut line = String::new();
            for card in cards {
                let face = if card.face_up { card.value.glyph() } else { "  " };
                let selected = cursor.is_some_and(|c| c.index() == card.id);
                line.push_str(&highlight(&format!("[{face}]"), selected));
                line.push(' ');
            }
            line
        })
        .collect()
}

fn draw_ui(stdout: &mut Stdout, game: &PairMatchGame, cursor: &GridCursor) -> Result<(), String>
{
    let mut lines = Vec::new();
    lines.push("Puzzle Hub - Memory Match".to_string());
    lines.push(format!(
        "Deal #{}  Pairs: {}/{}  Moves: {}",
        game.generation() + 1,
        game.matched_pairs(),
        game.pair_count(),
        game.moves()
    ));
    lines.push(String::new());
    lines.extend(render_grid(game, Some(cursor)));
    lines.push(String::new());
    if game.pending().is_some() {
        lines.push("No match.".to_string());
    } else {
        lines.push(String::new());
    }
    lines.push("Arrows move. Enter/Space flips. R reshuffles. Esc quits.".to_string());
    terminal::draw_lines(stdout, &lines)
}

fn draw_summary(stdout: &mut Stdout, game: &PairMatchGame) -> Result<(), String>
{
    let mut lines = Vec::new();
    lines.push("All pairs found".to_string());
    lines.push(String::new());
    lines.extend(render_grid(game, None));
    lines.push(String::new());
    lines.push(format!("Moves: {}", game.moves()));
    lines.push(String::new());
    lines.push("Press SPACE to exit.".to_string());
    terminal::draw_lines(stdout, &lines)
}
