//! Game settings.
//!
//! Settings come from an optional TOML file, then command-line flags override
//! whatever the file says:
//!
//! ```toml
//! # Board size. When left out, the board is sized to fit the terminal.
//! width = 16
//! height = 8
//!
//! mines = 12
//!
//! # Fixed seed for a reproducible layout (optional)
//! seed = 42
//!
//! # Ask whether to show the instructions before the first move
//! intro = true
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::Args;
use serde::{Deserialize, Serialize};
use sweeper_core::{CellCount, Coord, Coord2};

/// Terminal size assumed when the real one cannot be read.
pub const FALLBACK_TERMINAL: (u16, u16) = (80, 24);

/// Rows kept free under the board for the prompt.
const PROMPT_ROWS: u16 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: Option<Coord>,
    pub height: Option<Coord>,
    pub mines: CellCount,
    pub seed: Option<u64>,
    pub intro: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            mines: 7,
            seed: None,
            intro: true,
        }
    }
}

/// Command-line overrides for [`Config`].
#[derive(Args, Debug, Clone, Default)]
pub struct GameArgs {
    /// Board width in cells (default: fit the terminal)
    #[arg(long)]
    pub width: Option<Coord>,

    /// Board height in cells (default: fit the terminal)
    #[arg(long)]
    pub height: Option<Coord>,

    /// Number of mines
    #[arg(short, long)]
    pub mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Skip the instructions prompt
    #[arg(long)]
    pub no_intro: bool,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn apply_args(mut self, args: &GameArgs) -> Self {
        if let Some(width) = args.width {
            self.width = Some(width);
        }
        if let Some(height) = args.height {
            self.height = Some(height);
        }
        if let Some(mines) = args.mines {
            self.mines = mines;
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if args.no_intro {
            self.intro = false;
        }
        self
    }

    /// Board size, filling in whatever was not configured from the terminal
    /// size `(columns, rows)`.
    pub fn board_size(&self, terminal: (u16, u16)) -> Coord2 {
        let (fit_x, fit_y) = fit_terminal(terminal);
        (self.width.unwrap_or(fit_x), self.height.unwrap_or(fit_y))
    }
}

/// Three columns per cell across, three rows per cell down, minus the prompt.
pub fn fit_terminal((columns, rows): (u16, u16)) -> Coord2 {
    let width = columns / 3;
    let height = rows.saturating_sub(PROMPT_ROWS) / 3;
    (
        Coord::try_from(width).unwrap_or(Coord::MAX),
        Coord::try_from(height).unwrap_or(Coord::MAX),
    )
}

pub fn terminal_size() -> (u16, u16) {
    crossterm::terminal::size().unwrap_or_else(|err| {
        log::debug!("Could not read terminal size ({}), assuming 80x24", err);
        FALLBACK_TERMINAL
    })
}
