use std::fmt::{self, Display, Formatter};

use ndarray::Array2;
use sweeper_core::{CellStatus, FieldCell};

pub const INTRO: &str = "\nSweeper: find the mines, flag them all, reveal nothing that explodes.\n";

pub const HELP: &str = "\nAt each iteration, type any of the following commands:\n\n\
Q:\tReveal the map and quit the game.\n\
H:\tDisplay this help text again.\n\
R x,y:\tReveal the contents of the square at (zero-based) x, y.\n\
M x,y:\tMark or unmark the square at (zero-based) x, y as containing a mine.\n";

pub const CONTINUE: &str = "\nPress ENTER to continue";

pub const LOSS_BANNER: &str = r"
  +-----------------------+
  |   *  B O O M !  *     |
  |   You hit a mine.     |
  +-----------------------+
";

pub const WIN_BANNER: &str = r"
  +-----------------------+
  |   Y O U   W I N !     |
  |   Every mine flagged. |
  +-----------------------+
";

fn status_char(status: CellStatus) -> char {
    match status {
        CellStatus::Hidden => ' ',
        CellStatus::Flagged => '*',
        CellStatus::Revealed(count) => char::from(b'0' + count),
        CellStatus::Exploded => 'X',
    }
}

/// Draws a `[x, y]` indexed grid one row per line, boxed in `|` and `-`.
fn write_grid<T: Copy>(
    f: &mut Formatter<'_>,
    grid: &Array2<T>,
    to_char: impl Fn(T) -> char,
) -> fmt::Result {
    let (width, height) = grid.dim();
    let spacer = "-".repeat(1 + 2 * width);

    writeln!(f, "{spacer}")?;
    for y in 0..height {
        write!(f, "|")?;
        for x in 0..width {
            write!(f, "{}|", to_char(grid[[x, y]]))?;
        }
        writeln!(f)?;
        writeln!(f, "{spacer}")?;
    }
    Ok(())
}

/// What the player knows about the board.
pub struct KnownBoard<'a>(pub &'a Array2<CellStatus>);

impl Display for KnownBoard<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_grid(f, self.0, status_char)
    }
}

/// The board with every mine uncovered. The mine that was hit shows as `X`.
pub struct FullField<'a>(pub &'a Array2<FieldCell>);

impl Display for FullField<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_grid(f, self.0, |cell| match cell.status {
            CellStatus::Exploded => 'X',
            _ if cell.is_mine => '*',
            status => status_char(status),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{GameEngine, MineField};

    fn engine() -> GameEngine {
        GameEngine::new(MineField::from_mine_coords((3, 2), &[(2, 0)]).unwrap())
    }

    #[test]
    fn known_board_shows_hidden_flags_and_counts() {
        let mut engine = engine();
        engine.reveal((1, 0)).unwrap();
        engine.reveal((0, 1)).unwrap();
        engine.toggle_flag((2, 1)).unwrap();

        let text = KnownBoard(engine.display_grid()).to_string();

        assert_eq!(text, "-------\n| |1| |\n-------\n|0| |*|\n-------\n");
    }

    #[test]
    fn full_field_uncovers_mines() {
        let mut engine = engine();
        engine.reveal((1, 1)).unwrap();

        let text = FullField(&engine.reveal_full_field()).to_string();

        assert_eq!(text, "-------\n| | |*|\n-------\n| |1| |\n-------\n");
    }

    #[test]
    fn exploded_mine_is_marked_on_the_known_board() {
        let mut engine = engine();
        engine.reveal((2, 0)).unwrap();

        let text = KnownBoard(engine.display_grid()).to_string();

        assert!(text.starts_with("-------\n| | |X|\n"));
    }

    #[test]
    fn full_field_marks_the_hit_mine_apart_from_the_others() {
        let mut engine =
            GameEngine::new(MineField::from_mine_coords((3, 2), &[(2, 0), (0, 1)]).unwrap());
        engine.reveal((0, 1)).unwrap();

        let text = FullField(&engine.reveal_full_field()).to_string();

        assert_eq!(text, "-------\n| | |*|\n-------\n|X| | |\n-------\n");
    }
}
