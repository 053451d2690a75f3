use std::io::{self, BufRead, Write};

use sweeper_core::{Coord2, GameEngine, GameError, GameOutcome};

use crate::command::{self, Command, MAIN_OPTIONS};
use crate::render::{self, FullField, KnownBoard};

/// How a session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    Finished(GameOutcome),
    Quit,
    /// Input ran out before the game was decided.
    Abandoned,
}

enum Flow {
    Continue,
    Stop(Ending),
}

/// One game played over a line-based input and a text output.
pub struct Session<R, W> {
    engine: GameEngine,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(engine: GameEngine, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn run(&mut self, intro: bool) -> io::Result<Ending> {
        if intro && !self.intro()? {
            return Ok(Ending::Abandoned);
        }

        while !self.engine.is_finished() {
            write!(self.output, "{}", KnownBoard(self.engine.display_grid()))?;

            let Some(answer) = command::menu(
                &mut self.input,
                &mut self.output,
                "What now?",
                &MAIN_OPTIONS,
            )?
            else {
                log::debug!("Input closed mid-game");
                return Ok(Ending::Abandoned);
            };

            if let Flow::Stop(ending) = self.process(&answer)? {
                return Ok(ending);
            }
        }

        Ok(Ending::Finished(self.engine.outcome()))
    }

    /// Returns `false` when input ran out.
    fn intro(&mut self) -> io::Result<bool> {
        writeln!(self.output, "{}", render::INTRO)?;
        match command::menu(&mut self.input, &mut self.output, "Instructions?", &["y", "n"])? {
            Some(answer) if answer.starts_with(['y', 'Y']) => self.help(),
            Some(_) => Ok(true),
            None => Ok(false),
        }
    }

    fn help(&mut self) -> io::Result<bool> {
        writeln!(self.output, "{}", render::HELP)?;
        writeln!(self.output, "{}", render::CONTINUE)?;
        self.output.flush()?;

        let mut line = String::new();
        Ok(self.input.read_line(&mut line)? > 0)
    }

    fn process(&mut self, answer: &str) -> io::Result<Flow> {
        let command = match answer.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(self.output, "Error! {err}.")?;
                return Ok(Flow::Continue);
            }
        };
        log::debug!("Command: {:?}", command);

        match command {
            Command::Quit => {
                write!(self.output, "{}", FullField(&self.engine.reveal_full_field()))?;
                Ok(Flow::Stop(Ending::Quit))
            }
            Command::Help => {
                if self.help()? {
                    Ok(Flow::Continue)
                } else {
                    Ok(Flow::Stop(Ending::Abandoned))
                }
            }
            Command::Reveal(coords) => {
                match self.engine.reveal(coords) {
                    Ok((GameOutcome::Lost, _)) => {
                        writeln!(self.output, "{}", render::LOSS_BANNER)?;
                        write!(self.output, "{}", FullField(&self.engine.reveal_full_field()))?;
                    }
                    Ok(_) => {}
                    Err(GameError::IllegalMove) => {
                        writeln!(self.output, "Error: {}, {} is already revealed.", coords.0, coords.1)?;
                    }
                    Err(err) => self.report(coords, err)?,
                }
                Ok(Flow::Continue)
            }
            Command::Mark(coords) => {
                match self.engine.toggle_flag(coords) {
                    Ok((GameOutcome::Won, _)) => {
                        writeln!(self.output, "{}", render::WIN_BANNER)?;
                    }
                    Ok(_) => {}
                    Err(GameError::IllegalMove) => {
                        writeln!(
                            self.output,
                            "Error: {}, {} is already known not to contain a mine.",
                            coords.0, coords.1
                        )?;
                    }
                    Err(err) => self.report(coords, err)?,
                }
                Ok(Flow::Continue)
            }
        }
    }

    fn report(&mut self, (x, y): Coord2, err: GameError) -> io::Result<()> {
        let (width, height) = self.engine.size();
        match err {
            GameError::OutOfBounds if x < 0 || x >= width => writeln!(
                self.output,
                "Error! The highest-numbered column is {}.",
                width - 1
            ),
            GameError::OutOfBounds if y < 0 || y >= height => writeln!(
                self.output,
                "Error! The highest-numbered row is {}.",
                height - 1
            ),
            err => writeln!(self.output, "Error! {err}."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use sweeper_core::{CellStatus, MineField};

    fn play(mines: &[Coord2], intro: bool, input: &str) -> (Ending, GameEngine, String) {
        let field = MineField::from_mine_coords((5, 5), mines).unwrap();
        let mut output = Vec::new();
        let mut session = Session::new(GameEngine::new(field), Cursor::new(input), &mut output);

        let ending = session.run(intro).unwrap();
        let engine = session.engine().clone();
        drop(session);

        (ending, engine, String::from_utf8(output).unwrap())
    }

    #[test]
    fn revealing_a_mine_loses_and_shows_the_field() {
        let (ending, engine, output) = play(&[(1, 1)], false, "R 0,0\nr 1,1\n");

        assert_eq!(ending, Ending::Finished(GameOutcome::Lost));
        assert_eq!(engine.cell_at((0, 0)).unwrap(), CellStatus::Revealed(1));
        assert!(output.contains("B O O M"));
        assert!(output.contains("| |X| | | |"));
    }

    #[test]
    fn flagging_every_mine_wins() {
        let (ending, _, output) = play(&[(1, 1), (3, 4)], false, "M 1,1\nm 3,4\n");

        assert_eq!(ending, Ending::Finished(GameOutcome::Won));
        assert!(output.contains("Y O U   W I N"));
    }

    #[test]
    fn quit_reveals_the_field() {
        let (ending, engine, output) = play(&[(4, 0)], false, "q\n");

        assert_eq!(ending, Ending::Quit);
        assert_eq!(engine.outcome(), GameOutcome::InProgress);
        assert!(output.contains("| | | | |*|"));
    }

    #[test]
    fn bad_moves_are_reported_and_play_continues() {
        let input = "R 9,0\nR 0,7\nR 1,2,3\nR 0,0\nR 0,0\nM 0,0\nq\n";
        let (ending, _, output) = play(&[(4, 4)], false, input);

        assert_eq!(ending, Ending::Quit);
        assert!(output.contains("Error! The highest-numbered column is 4."));
        assert!(output.contains("Error! The highest-numbered row is 4."));
        assert!(output.contains("Error! Coordinates must have two integers separated by a comma."));
        assert!(output.contains("Error: 0, 0 is already revealed."));
        assert!(output.contains("Error: 0, 0 is already known not to contain a mine."));
    }

    #[test]
    fn intro_can_show_help_first() {
        let (ending, _, output) = play(&[(4, 4)], true, "y\n\nq\n");

        assert_eq!(ending, Ending::Quit);
        assert!(output.contains("Instructions?  [Y / N]"));
        assert!(output.contains("M x,y:"));
        assert!(output.contains("What now?  [Q / H / R x,y / M x,y]"));
    }

    #[test]
    fn running_out_of_input_abandons_the_game() {
        let (ending, _, _) = play(&[(4, 4)], false, "R 0,0\n");

        assert_eq!(ending, Ending::Abandoned);
    }
}
