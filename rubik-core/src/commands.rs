/// Named rotation commands and the surface that runs them
use indexmap::IndexMap;
use strum::IntoEnumIterator;

use crate::error::Result;
use crate::grid::{Axis, Direction};
use crate::picking::{PickHit, Ray};
use crate::puzzle::Puzzle;
use crate::rotation::RotationReport;
use crate::slice::{Slice, Wiring};

/// A quarter turn of one slice, bound at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command {
    pub slice: Slice,
    pub direction: Direction,
}

impl Command {
    pub fn new(slice: Slice, direction: Direction) -> Self {
        Self { slice, direction }
    }

    fn verb(self) -> &'static str {
        match (self.slice.axis, self.direction) {
            (Axis::X, Direction::Positive) => "up",
            (Axis::X, Direction::Negative) => "down",
            (Axis::Y, Direction::Positive) => "left",
            (Axis::Y, Direction::Negative) => "right",
            (Axis::Z, Direction::Positive) => "clockwise",
            (Axis::Z, Direction::Negative) => "counterclockwise",
        }
    }

    /// Machine name, e.g. `rotate-right-up`.
    pub fn name(self) -> String {
        format!("rotate-{}-{}", self.slice.name(), self.verb())
    }

    /// Button text, e.g. `Rotate Right Side Up`.
    pub fn label(self) -> String {
        let layer = capitalize(self.slice.name());
        let verb = capitalize(self.verb());
        match self.slice.axis {
            Axis::X => format!("Rotate {layer} Side {verb}"),
            Axis::Y | Axis::Z => format!("Rotate {layer} {verb}"),
        }
    }

    /// Key that triggers the command: lowercase for positive turns,
    /// uppercase for negative.
    pub fn key(self) -> char {
        let key = self.slice.key();
        match self.direction {
            Direction::Positive => key,
            Direction::Negative => key.to_ascii_uppercase(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ordered map from command name to command.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: IndexMap<String, Command>,
}

impl CommandTable {
    /// One command per wired slice and direction.
    pub fn new(wiring: Wiring) -> Self {
        let commands = wiring
            .slices()
            .flat_map(|slice| Direction::iter().map(move |d| Command::new(slice, d)))
            .map(|command| (command.name(), command))
            .collect();
        Self { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<Command> {
        self.commands.get(name).copied()
    }

    pub fn by_key(&self, key: char) -> Option<Command> {
        self.iter().find(|c| c.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = Command> + '_ {
        self.commands.values().copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }
}

/// Connects trigger sources (buttons, keys, pointer) to a puzzle.
#[derive(Debug, Clone)]
pub struct InteractionSurface {
    puzzle: Puzzle,
    commands: CommandTable,
}

impl InteractionSurface {
    pub fn new(puzzle: Puzzle) -> Self {
        let commands = CommandTable::new(puzzle.wiring());
        Self { puzzle, commands }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Turns a slice directly, bypassing the command table.
    pub fn rotate(&mut self, axis: Axis, layer: u8, direction: Direction) -> Result<RotationReport> {
        self.puzzle.rotate(axis, layer, direction)
    }

    /// Applies a command.
    pub fn run(&mut self, command: Command) -> Result<RotationReport> {
        let slice = command.slice;
        self.rotate(slice.axis, slice.layer, command.direction)
    }

    /// Runs the command called `name`.
    ///
    /// Unknown names and failed turns are logged and leave the puzzle as
    /// it was. Returns whether a turn happened.
    pub fn trigger(&mut self, name: &str) -> bool {
        let Some(command) = self.commands.get(name) else {
            log::error!("unknown command {name:?}");
            return false;
        };
        self.trigger_command(command)
    }

    /// Like [`InteractionSurface::trigger`], for an already resolved command.
    pub fn trigger_command(&mut self, command: Command) -> bool {
        log::info!("{}", command.label());
        match self.run(command) {
            Ok(_) => true,
            Err(e) => {
                log::error!("{} failed: {e}", command.name());
                false
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        match self.puzzle.undo() {
            Ok(_) => true,
            Err(e) => {
                log::warn!("undo: {e}");
                false
            }
        }
    }

    pub fn reset(&mut self) {
        log::info!("reset");
        self.puzzle.reset();
    }

    /// Nearest cubie under `ray`. Does not change the puzzle.
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        let hit = self.puzzle.pick(ray);
        if let Some(hit) = &hit {
            log::debug!("picked cubie {} at {}", hit.id, hit.coord);
        }
        hit
    }
}
