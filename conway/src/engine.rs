// engine.rs - Concurrent generation advance
//
// One task per live cell, one nested task per dead neighbor it discovers.
// Verdicts flow over a channel to a single aggregator that owns the next
// generation; the current generation is only read while a step is running.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::cells::LiveCells;
use crate::claims::DeadCellClaims;
use crate::coord::{Coord, Torus};
use crate::neighbors::{self, Cell, Neighbors};
use crate::rules::Rules;

pub const DEFAULT_VERDICT_BUFFER: usize = 100;

/// Outcome of evaluating one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub coord: Coord,
    pub was_alive: bool,
    pub alive: bool,
}

/// Counters gathered by the aggregator over one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Live cells evaluated, one per member of the previous generation.
    pub evaluated_live: usize,
    /// Dead cells evaluated, each claimed exactly once.
    pub evaluated_dead: usize,
    pub survivors: usize,
    pub births: usize,
}

impl StepStats {
    fn record(&mut self, verdict: &Verdict) {
        match (verdict.was_alive, verdict.alive) {
            (true, true) => {
                self.evaluated_live += 1;
                self.survivors += 1;
            }
            (true, false) => self.evaluated_live += 1,
            (false, true) => {
                self.evaluated_dead += 1;
                self.births += 1;
            }
            (false, false) => self.evaluated_dead += 1,
        }
    }

    pub fn population(&self) -> usize {
        self.survivors + self.births
    }
}

/// Everything an evaluator needs, shared by all tasks of one step.
struct Generation {
    torus: Torus,
    rules: Rules,
    field: Arc<RwLock<LiveCells>>,
    claims: DeadCellClaims,
}

/// Advances `field` by one generation.
///
/// Must run inside a tokio runtime. `field` is only read until every evaluator
/// has reported, then replaced in one write.
pub async fn advance(
    torus: Torus,
    rules: Rules,
    field: &Arc<RwLock<LiveCells>>,
    verdict_buffer: usize,
) -> StepStats {
    let generation = Arc::new(Generation {
        torus,
        rules,
        field: Arc::clone(field),
        claims: DeadCellClaims::new(),
    });

    let live: Vec<Coord> = field.read().iter().copied().collect();
    tracing::trace!(live = live.len(), "spawning evaluators");

    let (tx, rx) = mpsc::channel(verdict_buffer.max(1));
    let collector = tokio::spawn(compose_next(rx, live.len()));

    let workers: Vec<JoinHandle<()>> = live
        .into_iter()
        .map(|coord| tokio::spawn(evaluate_living(Arc::clone(&generation), coord, tx.clone())))
        .collect();
    for worker in workers {
        join(worker).await;
    }
    drop(tx);

    let (next, stats) = join(collector).await;
    debug_assert_eq!(stats.evaluated_dead, generation.claims.len());
    *field.write() = next;
    stats
}

async fn compose_next(mut rx: mpsc::Receiver<Verdict>, capacity: usize) -> (LiveCells, StepStats) {
    let mut next = LiveCells::with_capacity(capacity);
    let mut stats = StepStats::default();
    while let Some(verdict) = rx.recv().await {
        stats.record(&verdict);
        if verdict.alive {
            next.insert(verdict.coord);
        }
    }
    (next, stats)
}

async fn evaluate_living(generation: Arc<Generation>, coord: Coord, tx: mpsc::Sender<Verdict>) {
    let center = Cell { coord, alive: true };
    let neighbors = Arc::new(neighbors::resolve(&generation.torus, &generation.field, center));

    let children: Vec<JoinHandle<()>> = neighbors
        .dead()
        .map(|dead| {
            tokio::spawn(evaluate_dead(
                Arc::clone(&generation),
                dead,
                Arc::clone(&neighbors),
                tx.clone(),
            ))
        })
        .collect();

    let alive = generation.rules.survives(neighbors.live_count());
    send(&tx, Verdict { coord, was_alive: true, alive }).await;

    for child in children {
        join(child).await;
    }
}

async fn evaluate_dead(
    generation: Arc<Generation>,
    coord: Coord,
    cache: Arc<Neighbors>,
    tx: mpsc::Sender<Verdict>,
) {
    if !generation.claims.assign(coord) {
        return;
    }
    let center = Cell { coord, alive: false };
    let neighbors = neighbors::resolve_with_cache(&generation.torus, &generation.field, center, &cache);
    let alive = generation.rules.is_born(neighbors.live_count());
    send(&tx, Verdict { coord, was_alive: false, alive }).await;
}

async fn send(tx: &mpsc::Sender<Verdict>, verdict: Verdict) {
    if tx.send(verdict).await.is_err() {
        tracing::warn!(x = verdict.coord.x, y = verdict.coord.y, "aggregator gone, verdict dropped");
    }
}

/// Awaits a task, re-raising its panic on the caller.
async fn join<T>(handle: JoinHandle<T>) -> T {
    match handle.await {
        Ok(value) => value,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(err) => panic!("evaluation task cancelled: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(coords: &[(i32, i32)]) -> Arc<RwLock<LiveCells>> {
        Arc::new(RwLock::new(coords.iter().map(|&c| Coord::from(c)).collect()))
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn blinker_flips() {
        let torus = Torus::new(5, 5).unwrap();
        let f = field(&[(1, 2), (2, 2), (3, 2)]);
        let stats = advance(torus, Rules::default(), &f, DEFAULT_VERDICT_BUFFER).await;
        assert_eq!(f.read().sorted(), vec![Coord::new(2, 1), Coord::new(2, 2), Coord::new(2, 3)]);
        assert_eq!(stats.evaluated_live, 3);
        assert_eq!(stats.survivors, 1);
        assert_eq!(stats.births, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn every_dead_neighbor_is_evaluated_once() {
        let torus = Torus::new(5, 5).unwrap();
        // 12 distinct dead cells surround a vertical blinker on a 5x5 torus
        for _ in 0..200 {
            let f = field(&[(1, 2), (2, 2), (3, 2)]);
            let stats = advance(torus, Rules::default(), &f, 1).await;
            assert_eq!(stats.evaluated_dead, 12);
            assert_eq!(stats.births, 2);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn empty_field_stays_empty() {
        let torus = Torus::new(3, 3).unwrap();
        let f = field(&[]);
        let stats = advance(torus, Rules::default(), &f, DEFAULT_VERDICT_BUFFER).await;
        assert!(f.read().is_empty());
        assert_eq!(stats, StepStats::default());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn runs_on_a_single_thread_runtime() {
        let torus = Torus::new(6, 6).unwrap();
        let f = field(&[(1, 1), (1, 2), (2, 1), (2, 2)]);
        advance(torus, Rules::default(), &f, 1).await;
        assert_eq!(f.read().sorted(), vec![Coord::new(1, 1), Coord::new(1, 2), Coord::new(2, 1), Coord::new(2, 2)]);
    }
}
