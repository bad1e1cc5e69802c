use std::time::Duration;

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use parlor::games::{BaghChal, ConnectFour, Konane, MuTorere, TicTacToe};
use parlor::{Game, Minimax, Winner};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameChoice {
    Tictactoe,
    Mutorere,
    ConnectFour,
    Konane,
    BaghChal,
}

#[derive(Debug, Parser)]
#[command(name = "selfplay", about = "Engine-vs-engine batches for a quick strength check")]
struct Args {
    /// Game to run
    #[arg(long, value_enum, default_value_t = GameChoice::Tictactoe)]
    game: GameChoice,

    /// Number of games in the batch
    #[arg(long, default_value_t = 20)]
    games: u32,

    /// Engine budget per move, in milliseconds
    #[arg(long, default_value_t = 100)]
    timeout_ms: u64,

    /// Cut a game off after this many plies (repetition games never finish)
    #[arg(long, default_value_t = 200)]
    max_plies: u32,
}

fn main() {
    let args = Args::parse();
    match args.game {
        GameChoice::Tictactoe => run::<TicTacToe>(&args),
        GameChoice::Mutorere => run::<MuTorere>(&args),
        GameChoice::ConnectFour => run::<ConnectFour>(&args),
        GameChoice::Konane => run::<Konane>(&args),
        GameChoice::BaghChal => run::<BaghChal>(&args),
    }
}

fn run<G: Game + Default>(args: &Args) {
    let budget = Duration::from_millis(args.timeout_ms);
    let mut ai: Minimax<G> = Minimax::new();

    let bar = ProgressBar::new(u64::from(args.games));
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("static template"),
    );

    let mut max_wins = 0u32;
    let mut min_wins = 0u32;
    let mut draws = 0u32;
    let mut unfinished = 0u32;
    let mut moves = 0u64;
    let mut solved_moves = 0u64;
    let mut depth_sum = 0u64;

    for _ in 0..args.games {
        let mut game = G::default();
        let mut plies = 0u32;
        while !game.is_terminal() && plies < args.max_plies {
            let (ans, depth) = ai.get_move(&game, budget);
            moves += 1;
            depth_sum += u64::from(depth);
            if ans.is_solved {
                solved_moves += 1;
            }
            game.commit(&ans.best_move);
            plies += 1;
        }
        if game.is_terminal() {
            match game.winner() {
                Winner::Max => max_wins += 1,
                Winner::Min => min_wins += 1,
                Winner::Draw => draws += 1,
            }
        } else {
            unfinished += 1;
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!(
        "[selfplay] {} games: {} player 1 wins, {} player 2 wins, {} draws, {} unfinished",
        args.games, max_wins, min_wins, draws, unfinished
    );
    if moves > 0 {
        println!(
            "[selfplay] avg depth {:.1}, {:.0}% of moves solved, {} cached states",
            depth_sum as f64 / moves as f64,
            100.0 * solved_moves as f64 / moves as f64,
            ai.cached_states()
        );
    }
}
