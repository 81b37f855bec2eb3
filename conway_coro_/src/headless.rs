// headless.rs - Terminal loop: print a frame, step, wait out the interval

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use conway::Grid;

pub fn run<W: Write>(grid: &mut Grid, generations: u64, interval: Duration, out: &mut W) -> Result<()> {
    tracing::info!(
        height = grid.height(),
        width = grid.width(),
        generations,
        "running headless"
    );
    for _ in 0..generations {
        write_frame(grid, out)?;
        let started = Instant::now();
        grid.step();
        if let Some(rest) = interval.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
    write_frame(grid, out)?;
    out.flush()?;
    Ok(())
}

fn write_frame<W: Write>(grid: &Grid, out: &mut W) -> Result<()> {
    writeln!(out, "generation {} ({} alive)", grid.generation(), grid.population())?;
    writeln!(out, "{}", grid.render())?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_every_frame() {
        let mut grid = Grid::new(5, 5, [(1, 2), (2, 2), (3, 2)]).unwrap();
        let mut out = Vec::new();
        run(&mut grid, 2, Duration::ZERO, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "\
generation 0 (3 alive)
-----
--X--
--X--
--X--
-----

generation 1 (3 alive)
-----
-----
-XXX-
-----
-----

generation 2 (3 alive)
-----
--X--
--X--
--X--
-----

";
        assert_eq!(text, expected);
    }
}
