mod common;

use common::{ScriptedSymbols, SimBoard};
use simon_core::power::enter_low_power;
use simon_core::random::fold_seed;
use simon_core::telemetry::{GameEvent, NoopTelemetry, TelemetryLog};
use simon_core::{Game, Pattern, PatternRng, Phase, Symbol, Wake, run_session};

#[test]
fn start_mixes_carry_byte_with_timer_sample() {
    let mut board = SimBoard::with_seed_cell(0x5A);
    board.queue(&[Symbol::Two, Symbol::One]);
    let mut log = TelemetryLog::<64>::new();

    let game = run_session(&mut board, ScriptedSymbols::new(&[Symbol::One]), &mut log);

    let timer = board.samples[0];
    let seed = fold_seed(0x5A, timer, 0);
    assert_eq!(game.seed(), Some(seed));
    assert!(log.contains(|event| *event == GameEvent::SessionStarted { seed }));
    assert_eq!(board.stores[0], 0x5A ^ timer);

    // Each accepted step refreshes the carry byte.
    assert_eq!(board.stores.len(), 2);
    assert_eq!(board.stores[1], board.samples[1]);
    assert_eq!(board.seed_cell, board.samples[1]);
}

#[test]
fn wake_starts_a_fresh_session_from_the_carried_byte() {
    let mut board = SimBoard::with_seed_cell(0x11);
    board.queue(&[Symbol::One, Symbol::Three]);

    let first = run_session(
        &mut board,
        ScriptedSymbols::new(&[Symbol::Three]),
        &mut NoopTelemetry,
    );
    assert_eq!(first.max_step(), 2);

    assert_eq!(enter_low_power(&mut board), Wake);
    assert_eq!(board.wakes, 1);
    assert!(board.all_dark());

    let carried = board.seed_cell;
    let sampled = board.samples.len();
    board.queue(&[Symbol::Four]);

    let second = run_session(
        &mut board,
        ScriptedSymbols::new(&[Symbol::Two]),
        &mut NoopTelemetry,
    );
    assert_eq!(second.max_step(), 1, "pattern starts over after a wake");
    assert_eq!(
        second.seed(),
        Some(fold_seed(carried, board.samples[sampled], 0))
    );
}

#[test]
fn pattern_only_ever_grows_by_appending() {
    let mut board = SimBoard::with_seed_cell(0x7E);
    board.queue(&[Symbol::One]);
    let mut telemetry = NoopTelemetry;
    let mut game = Game::new(<PatternRng>::default());
    let mut previous = Pattern::new();

    for _ in 0..64 {
        let phase = game.advance(&mut board, &mut telemetry);
        if phase.is_terminal() {
            break;
        }
        if phase == Phase::Listening && game.step() == 0 {
            let current = game.pattern();
            assert_eq!(current.len(), previous.len() + 1);
            assert_eq!(&current.as_slice()[..previous.len()], previous.as_slice());
            assert!(current.as_slice().iter().all(|symbol| (1..=4).contains(&symbol.id())));
            previous = current.clone();

            if current.len() < 8 {
                board.queue(current.as_slice());
            }
        }
    }

    assert_eq!(game.phase(), Phase::PoweredDown);
    assert_eq!(game.max_step(), 8);
}
