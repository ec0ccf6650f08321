use rand::RngCore;
use tictactoe_mcts::{
    Board, MCTSConfig, MCTSError, Position, RewardScheme, SearchTree, SimulationPolicy, MCTS,
};

fn seeded(seed: u64, iterations: usize) -> MCTSConfig {
    MCTSConfig::default()
        .with_max_iterations(iterations)
        .with_seed(seed)
}

#[test]
fn test_mcts_basic_functionality() {
    let mut mcts = MCTS::new(seeded(11, 100));

    let action = mcts.search(&Board::new()).unwrap();
    assert!(action.index().is_some(), "Action should be on the board");

    let stats = mcts.get_statistics();
    assert_eq!(stats.iterations, 100, "Should have performed expected iterations");
    assert!(stats.tree_size > 1, "Tree should have grown");
    assert!(stats.max_depth >= 1);
    assert!(!stats.stopped_early);
    assert!(stats.best_visits > 0 && stats.best_visits <= 100);
    assert!((-1.0..=1.0).contains(&stats.best_value));
    assert!(stats.summary().contains("Iterations: 100\n"));
}

#[test]
fn test_completes_two_in_a_row() {
    // X X .
    // O O .
    // . . .
    let board = Board::from_grid([[1, 1, 0], [2, 2, 0], [0, 0, 0]]).unwrap();

    for seed in 0..10 {
        let mut mcts = MCTS::new(seeded(seed, 100));
        assert_eq!(
            mcts.search(&board).unwrap(),
            Position::new(0, 2),
            "seed {} should find the winning completion",
            seed
        );
        // Every visit to a finished win scores in full
        assert_eq!(mcts.get_statistics().best_value, 1.0);
    }
}

#[test]
fn test_converges_on_win_in_one() {
    // X O O
    // . X .
    // . . .
    let board = Board::from_grid([[1, 2, 2], [0, 1, 0], [0, 0, 0]]).unwrap();
    let winning = Position::new(2, 2);

    let trials = 20;
    let found = (0..trials)
        .filter(|&seed| {
            let config = seeded(seed, 200).with_exploration_constant(std::f64::consts::SQRT_2);
            MCTS::new(config).search(&board).unwrap() == winning
        })
        .count();

    assert!(
        found >= 18,
        "winning move found in only {} of {} trials",
        found,
        trials
    );
}

#[test]
fn test_blocks_opponent_threat() {
    // X O .
    // . O .
    // . . X
    // O threatens the middle column, X has no win of its own
    let board = Board::from_grid([[1, 2, 0], [0, 2, 0], [0, 0, 1]]).unwrap();

    for seed in 0..5 {
        let mut mcts = MCTS::new(seeded(seed, 2_000));
        assert_eq!(mcts.search(&board).unwrap(), Position::new(2, 1));
    }
}

#[test]
fn test_mover_relative_scheme_finds_win() {
    let board = Board::from_grid([[1, 1, 0], [2, 2, 0], [0, 0, 0]]).unwrap();

    for seed in 0..5 {
        let config = seeded(seed, 1_000).with_reward_scheme(RewardScheme::MoverRelative);
        assert_eq!(
            MCTS::new(config).search(&board).unwrap(),
            Position::new(0, 2)
        );
    }
}

#[test]
fn test_search_rejects_finished_game_without_touching_tree() {
    // X has already won
    let board = Board::from_grid([[1, 1, 1], [2, 2, 0], [0, 0, 0]]).unwrap();
    let mut tree = SearchTree::new(board);
    let mut mcts = MCTS::new(seeded(1, 100));

    let result = mcts.search_tree(&mut tree, 100);
    assert_eq!(result, Err(MCTSError::GameAlreadyOver));

    let root = tree.get(tree.root());
    assert_eq!(tree.len(), 1);
    assert_eq!(root.visits(), 0);
    assert_eq!(root.total_reward(), 0.0);
    assert_eq!(root.unexpanded_actions.len(), 4);
}

#[test]
fn test_search_rejects_drawn_game() {
    let board = Board::from_grid([[1, 2, 1], [1, 2, 2], [2, 1, 1]]).unwrap();
    let mut mcts = MCTS::new(seeded(1, 100));

    assert_eq!(mcts.search(&board), Err(MCTSError::GameAlreadyOver));
}

#[test]
fn test_search_tree_keeps_statistics_consistent() {
    let mut tree = SearchTree::new(Board::new());
    let mut mcts = MCTS::new(seeded(5, 300));

    mcts.search_tree(&mut tree, 300).unwrap();

    let root = tree.get(tree.root());
    assert_eq!(root.visits(), 300);

    // Every visit of the root passed through exactly one child
    let child_visits: u64 = tree
        .children(tree.root())
        .iter()
        .map(|&id| tree.get(id).visits())
        .sum();
    assert_eq!(child_visits, 300);
    assert!(root.is_fully_expanded());
    assert_eq!(mcts.get_statistics().tree_size, tree.len());
}

#[test]
fn test_zero_iterations_is_rejected() {
    let mut mcts = MCTS::new(seeded(1, 100));
    let result = mcts.search_for_iterations(&Board::new(), 0);
    assert!(matches!(result, Err(MCTSError::InvalidConfiguration(_))));
}

#[test]
fn test_invalid_exploration_constant_is_rejected() {
    let config = seeded(1, 100).with_exploration_constant(-1.0);
    let result = MCTS::new(config).search(&Board::new());
    assert!(matches!(result, Err(MCTSError::InvalidConfiguration(_))));
}

#[test]
fn test_explicit_iterations_ignore_configured_budget() {
    let config = MCTSConfig::default().with_max_iterations(0).with_seed(3);
    let mut mcts = MCTS::new(config);

    let action = mcts.search_for_iterations(&Board::new(), 100).unwrap();
    assert!(action.index().is_some());
    assert_eq!(mcts.get_statistics().iterations, 100);

    // The configured budget is still the one `search` uses
    assert!(matches!(
        mcts.search(&Board::new()),
        Err(MCTSError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_finished_game_reported_before_configuration() {
    let won = Board::from_grid([[1, 1, 1], [2, 2, 0], [0, 0, 0]]).unwrap();

    let no_budget = MCTSConfig::default().with_max_iterations(0);
    assert_eq!(
        MCTS::new(no_budget).search_for_iterations(&won, 100),
        Err(MCTSError::GameAlreadyOver)
    );

    let bad_constant = MCTSConfig::default().with_exploration_constant(f64::NAN);
    assert_eq!(
        MCTS::new(bad_constant).search(&won),
        Err(MCTSError::GameAlreadyOver)
    );
}

#[test]
fn test_same_seed_same_choice() {
    let board = Board::from_grid([[0, 0, 0], [0, 1, 0], [0, 0, 0]]).unwrap();

    let first = MCTS::new(seeded(99, 400)).search(&board).unwrap();
    let second = MCTS::new(seeded(99, 400)).search(&board).unwrap();
    assert_eq!(first, second);
}

/// Scores every rollout as a draw
struct AlwaysDraw;

impl SimulationPolicy<Board> for AlwaysDraw {
    fn simulate(&self, _state: &Board, _rng: &mut dyn RngCore) -> tictactoe_mcts::Result<f64> {
        Ok(0.0)
    }
}

#[test]
fn test_simulation_policy_customization() {
    // With every value at zero the final choice falls to the first child,
    // which is the last legal move
    let mut mcts = MCTS::new(seeded(1, 200)).with_simulation_policy(AlwaysDraw);
    assert_eq!(mcts.search(&Board::new()).unwrap(), Position::new(2, 2));
}

#[test]
fn test_engine_can_be_reused() {
    let mut mcts = MCTS::new(seeded(8, 200));
    let mut board = Board::new();

    while !tictactoe_mcts::GameState::is_terminal(&board) {
        let position = mcts.search(&board).unwrap();
        board = board.apply(position, board.turn_to_move()).unwrap();
        assert_eq!(mcts.get_statistics().iterations, 200);
    }

    assert_eq!(
        mcts.search(&board),
        Err(MCTSError::GameAlreadyOver),
        "a finished game cannot be searched"
    );
}
