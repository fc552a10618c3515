use tempotris_engine::BoardConfig;
use tempotris_pilot::Simulation;

/// Long seeded run at a fast tempo with a fixed frame time. The loop must
/// keep locking pieces without outside input, clear lines along the way,
/// and survive any game overs it runs into.
#[test]
fn seeded_run_locks_and_clears_unattended() {
    let mut simulation = Simulation::with_seed(
        BoardConfig {
            rows: 10,
            cols: 6,
            min_lines_to_clear: 1,
            line_clear_enabled: true,
        },
        2024,
    );
    for _ in 0..60_000 {
        simulation.tick(1.0 / 60.0, 600.0);
    }
    let stats = simulation.stats();
    assert!(stats.pieces_locked >= 50, "locked {}", stats.pieces_locked);
    assert!(stats.rows_cleared > 0, "cleared {}", stats.rows_cleared);
}

/// Stacking mode: clears disabled, so the stack overflows and the board
/// resets instead of ever clearing a row.
#[test]
fn stacking_mode_never_clears() {
    let mut simulation = Simulation::with_seed(
        BoardConfig {
            rows: 10,
            cols: 6,
            min_lines_to_clear: 1,
            line_clear_enabled: false,
        },
        99,
    );
    for _ in 0..60_000 {
        simulation.tick(1.0 / 60.0, 600.0);
    }
    let stats = simulation.stats();
    assert_eq!(stats.rows_cleared, 0);
    assert!(stats.resets >= 1, "resets {}", stats.resets);
}
