use formation_shooter::compute::init_state;
use formation_shooter::entities::*;
use formation_shooter::{Engine, GameConfig};
use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
enum Op {
    Left,
    Right,
    Fire,
    Tick,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Left), Just(Op::Right), Just(Op::Fire), Just(Op::Tick)]
}

fn apply(engine: &mut Engine, op: Op) {
    match op {
        Op::Left => engine.move_player(Direction::Left),
        Op::Right => engine.move_player(Direction::Right),
        Op::Fire => engine.fire_bullet(),
        Op::Tick => engine.tick(),
    }
}

proptest! {
    #[test]
    fn left_moves_never_pass_margin(start in 40i32..=760, moves in 0usize..200) {
        let config = GameConfig::default();
        let mut state = init_state(&config);
        state.player.x = start;
        let mut engine = Engine::with_state(config, state);
        for _ in 0..moves {
            engine.move_player(Direction::Left);
            prop_assert!(engine.snapshot().player.x >= 40);
        }
    }

    #[test]
    fn right_moves_never_pass_margin(start in 40i32..=760, moves in 0usize..200) {
        let config = GameConfig::default();
        let mut state = init_state(&config);
        state.player.x = start;
        let mut engine = Engine::with_state(config, state);
        for _ in 0..moves {
            engine.move_player(Direction::Right);
            prop_assert!(engine.snapshot().player.x <= 760);
        }
    }

    #[test]
    fn mixed_ops_keep_player_in_field(ops in prop::collection::vec(op(), 0..300)) {
        let mut engine = Engine::new(GameConfig::default());
        for op in ops {
            apply(&mut engine, op);
            let x = engine.snapshot().player.x;
            prop_assert!((40..=760).contains(&x));
        }
    }

    #[test]
    fn game_over_freezes_state(
        dead in prop::collection::vec(any::<bool>(), 8),
        ops in prop::collection::vec(op(), 0..100),
    ) {
        let config = GameConfig::default();
        let mut state = init_state(&config);
        for (enemy, d) in state.enemies.iter_mut().zip(&dead) {
            enemy.alive = !d;
        }
        state.status = GameStatus::GameOver;
        let frozen = state.clone();
        let mut engine = Engine::with_state(config, state);
        for op in ops {
            apply(&mut engine, op);
        }
        prop_assert_eq!(engine.snapshot(), &frozen);
    }
}
