use std::io;

use crossterm::{cursor, queue, style::Print, terminal};
use crossterm::terminal::ClearType;

use crate::game::GameContext;
use crate::grid::Cell;
use crate::term::FrameBuffer;
use crate::TermInt;

const SNAKE_BODY_CHAR: char = '█';
const APPLE_CHAR: char = 'O';
const CORNER_CHAR: char = '+';
const HORIZONTAL_CHAR: char = '-';
const VERTICAL_CHAR: char = '|';

const HELP_LINE: &str = "Arrows/WASD: move   p/Esc: pause   q: quit";

/// Builds the whole screen for the current state.
///
/// Screen row 0 is the status line and the last row the help line; the
/// border sits on rows 1 and `rows-2` and on the outermost columns.
pub fn frame(ctx: &GameContext) -> io::Result<FrameBuffer> {
    let (rows, cols) = ctx.grid().dimensions();
    let mut out = FrameBuffer::with_capacity(rows as usize * (cols as usize + 8) + 256);

    queue!(out, cursor::MoveTo(0, 0), terminal::Clear(ClearType::CurrentLine))?;

    for row in 1..rows.saturating_sub(1) {
        queue!(out, cursor::MoveTo(0, row))?;
        let line: String = (0..cols).map(|col| glyph(ctx, row, col)).collect();
        queue!(out, Print(line))?;
    }

    queue!(out, cursor::MoveTo(0, 0), Print(fit(&status_line(ctx), cols)))?;
    if rows > 1 {
        queue!(
            out,
            cursor::MoveTo(0, rows - 1),
            terminal::Clear(ClearType::CurrentLine),
            Print(fit(HELP_LINE, cols))
        )?;
    }

    Ok(out)
}

fn glyph(ctx: &GameContext, row: TermInt, col: TermInt) -> char {
    let (rows, cols) = ctx.grid().dimensions();
    let edge_row = row == 1 || row + 2 == rows;
    let edge_col = col == 0 || col + 1 == cols;

    match (edge_row, edge_col) {
        (true, true) => CORNER_CHAR,
        (true, false) => HORIZONTAL_CHAR,
        (false, true) => VERTICAL_CHAR,
        (false, false) => match ctx.grid().get(row, col) {
            Cell::Empty => ' ',
            Cell::Head(_) => ctx.snake().head_char(),
            Cell::Body(_) => SNAKE_BODY_CHAR,
            Cell::Food => APPLE_CHAR,
        },
    }
}

fn status_line(ctx: &GameContext) -> String {
    let state = ctx.state();
    if state.is_paused() {
        format!("Score: {}   [PAUSED] press p or Esc to resume, q to quit", state.score())
    } else {
        format!("Score: {}", state.score())
    }
}

fn fit(line: &str, cols: TermInt) -> String {
    line.chars().take(cols as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::keys::LogicalKey;
    use rand::{rngs::StdRng, SeedableRng};

    fn context() -> GameContext {
        GameContext::new(14, 60, &GameConfig::default(), StdRng::seed_from_u64(7)).unwrap()
    }

    fn rendered(ctx: &GameContext) -> String {
        String::from_utf8(frame(ctx).unwrap().as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn frame_starts_at_home_and_clears_the_line() {
        let text = rendered(&context());
        assert!(text.starts_with("\x1b[1;1H\x1b[2K"));
    }

    #[test]
    fn frame_shows_snake_food_and_border() {
        let text = rendered(&context());

        assert_eq!(text.matches('^').count(), 1);
        assert_eq!(text.matches(SNAKE_BODY_CHAR).count(), 1);
        assert_eq!(text.matches(APPLE_CHAR).count(), 1);
        assert_eq!(text.matches(CORNER_CHAR).count(), 4);
        assert_eq!(text.matches(VERTICAL_CHAR).count(), 2 * 10);
        assert!(text.contains(&"-".repeat(58)));
    }

    #[test]
    fn status_and_help_lines() {
        let mut ctx = context();
        let text = rendered(&ctx);
        assert!(text.contains("Score: 0"));
        assert!(!text.contains("PAUSED"));
        assert!(text.contains(HELP_LINE));

        ctx.handle_key(LogicalKey::Pause);
        assert!(rendered(&ctx).contains("[PAUSED]"));
    }

    #[test]
    fn head_glyph_follows_direction() {
        let mut ctx = context();
        ctx.handle_key(LogicalKey::Left);
        let text = rendered(&ctx);
        assert_eq!(text.matches('<').count(), 1);
        assert_eq!(text.matches('^').count(), 0);
    }

    #[test]
    fn long_lines_are_cut_to_the_width() {
        assert_eq!(fit("Score: 12", 5), "Score");
    }
}
