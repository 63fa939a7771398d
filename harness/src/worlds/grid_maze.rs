//! `GridMaze`: a 4-connected grid with walls, unit-cost moves, and the
//! Manhattan distance heuristic.
//!
//! # Text format
//!
//! ```text
//! S.#.
//! ..#G
//! ....
//! ```
//!
//! `S` start, `G` goal, `#` wall, `.` open. Exactly one `S` and one `G`;
//! all rows the same width.

use std::fmt;
use std::rc::Rc;

use treesearch::{Node, SearchProblem};

use crate::contract::SearchWorld;

/// Grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// A unit move. Successors are generated in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Failure parsing a maze from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeParseError {
    /// No rows.
    Empty,
    /// A row's width differs from the first row's.
    Ragged { line: usize, expected: usize, found: usize },
    /// A character outside `S`, `G`, `#`, `.`.
    UnknownCell { line: usize, column: usize, found: char },
    MissingStart,
    MissingGoal,
    /// More than one `S` or `G`.
    DuplicateMarker { marker: char, line: usize, column: usize },
}

impl fmt::Display for MazeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "maze has no rows"),
            Self::Ragged {
                line,
                expected,
                found,
            } => write!(f, "line {line}: width {found}, expected {expected}"),
            Self::UnknownCell {
                line,
                column,
                found,
            } => write!(f, "line {line}, column {column}: unknown cell {found:?}"),
            Self::MissingStart => write!(f, "maze has no start cell 'S'"),
            Self::MissingGoal => write!(f, "maze has no goal cell 'G'"),
            Self::DuplicateMarker {
                marker,
                line,
                column,
            } => write!(f, "line {line}, column {column}: second {marker:?} marker"),
        }
    }
}

impl std::error::Error for MazeParseError {}

/// A rectangular maze.
#[derive(Debug, Clone)]
pub struct GridMaze {
    world_id: String,
    width: usize,
    height: usize,
    /// Row-major; `true` is a wall.
    walls: Vec<bool>,
    start: Cell,
    goal: Cell,
}

impl GridMaze {
    /// Parse the text format described in the module docs. Blank lines and
    /// surrounding whitespace are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MazeParseError`] describing the first malformed line.
    pub fn parse(world_id: impl Into<String>, text: &str) -> Result<Self, MazeParseError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = rows.first().ok_or(MazeParseError::Empty)?.chars().count();

        let mut walls = Vec::with_capacity(width * rows.len());
        let mut start = None;
        let mut goal = None;
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MazeParseError::Ragged {
                    line: row + 1,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let slot = match ch {
                    '.' | '#' => None,
                    'S' => Some(&mut start),
                    'G' => Some(&mut goal),
                    other => {
                        return Err(MazeParseError::UnknownCell {
                            line: row + 1,
                            column: col + 1,
                            found: other,
                        })
                    }
                };
                if let Some(slot) = slot {
                    if slot.replace(Cell { row, col }).is_some() {
                        return Err(MazeParseError::DuplicateMarker {
                            marker: ch,
                            line: row + 1,
                            column: col + 1,
                        });
                    }
                }
                walls.push(ch == '#');
            }
        }

        Ok(Self {
            world_id: world_id.into(),
            width,
            height: rows.len(),
            walls,
            start: start.ok_or(MazeParseError::MissingStart)?,
            goal: goal.ok_or(MazeParseError::MissingGoal)?,
        })
    }

    /// A snake-shaped corridor maze of `lanes` horizontal lanes.
    ///
    /// Lanes are separated by wall rows with a single gap at alternating
    /// ends, so the only route walks every lane in turn. The start is the
    /// top-left cell, the goal the far end of the last lane. `width` is
    /// clamped to at least 2 and `lanes` to at least 1.
    #[must_use]
    pub fn serpentine(width: usize, lanes: usize) -> Self {
        let width = width.max(2);
        let lanes = lanes.max(1);
        let height = 2 * lanes - 1;
        let far_col = |lane: usize| if lane % 2 == 0 { width - 1 } else { 0 };

        let mut walls = vec![false; width * height];
        for lane in 0..lanes - 1 {
            let row = 2 * lane + 1;
            for col in 0..width {
                walls[row * width + col] = col != far_col(lane);
            }
        }

        Self {
            world_id: format!("grid_serpentine_{width}x{lanes}"),
            width,
            height,
            walls,
            start: Cell { row: 0, col: 0 },
            goal: Cell {
                row: height - 1,
                col: far_col(lanes - 1),
            },
        }
    }

    /// A wall-free `width` × `height` grid from the top-left to the
    /// bottom-right corner.
    #[must_use]
    pub fn open(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            world_id: format!("grid_open_{width}x{height}"),
            width,
            height,
            walls: vec![false; width * height],
            start: Cell { row: 0, col: 0 },
            goal: Cell {
                row: height - 1,
                col: width - 1,
            },
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn start_cell(&self) -> Cell {
        self.start
    }

    #[must_use]
    pub fn goal_cell(&self) -> Cell {
        self.goal
    }

    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width && !self.walls[cell.row * self.width + cell.col]
    }

    /// The neighbor reached by `mv`, if it is inside the grid and open.
    #[must_use]
    pub fn step(&self, from: Cell, mv: Move) -> Option<Cell> {
        let to = match mv {
            Move::Up => Cell {
                row: from.row.checked_sub(1)?,
                col: from.col,
            },
            Move::Down => Cell {
                row: from.row + 1,
                col: from.col,
            },
            Move::Left => Cell {
                row: from.row,
                col: from.col.checked_sub(1)?,
            },
            Move::Right => Cell {
                row: from.row,
                col: from.col + 1,
            },
        };
        self.is_open(to).then_some(to)
    }
}

impl SearchProblem for GridMaze {
    type State = Cell;
    type Action = Move;

    fn successors(&self, node: &Rc<Node<Cell, Move>>) -> Vec<Node<Cell, Move>> {
        let from = *node.state();
        Move::ALL
            .into_iter()
            .filter_map(|mv| self.step(from, mv).map(|to| Node::child(node, to, 1.0, mv)))
            .collect()
    }

    fn is_goal(&self, node: &Node<Cell, Move>) -> bool {
        *node.state() == self.goal
    }

    #[allow(clippy::cast_precision_loss)]
    fn heuristic(&self, state: &Cell) -> f64 {
        (state.row.abs_diff(self.goal.row) + state.col.abs_diff(self.goal.col)) as f64
    }
}

impl SearchWorld for GridMaze {
    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn start(&self) -> Node<Cell, Move> {
        Node::root(self.start)
    }

    fn render_state(&self, state: &Cell) -> String {
        state.to_string()
    }

    fn render_action(&self, action: &Move) -> String {
        action.as_str().to_string()
    }
}
