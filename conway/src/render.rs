// render.rs - Text frames for terminals and logs

use crate::cells::LiveCells;
use crate::coord::Torus;

pub const DEAD: u8 = b'-';
pub const ALIVE: u8 = b'X';

/// One line per row, `X` for live cells and `-` for dead ones.
pub fn render_text(torus: &Torus, cells: &LiveCells) -> String {
    let (height, width) = (torus.height() as usize, torus.width() as usize);
    let mut rows = vec![vec![DEAD; width]; height];
    for coord in cells.iter().filter(|&&c| torus.contains(c)) {
        rows[coord.x as usize][coord.y as usize] = ALIVE;
    }
    rows.into_iter()
        .map(|row| row.into_iter().map(char::from).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
