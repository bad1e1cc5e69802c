use std::fmt::Display;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;

use parlor::games::{BaghChal, ConnectFour, Konane, MuTorere, TicTacToe};
use parlor::persist::{load_game, save_game};
use parlor::{Answer, Game, Minimax, Player, Winner, TURN_NEVER};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameChoice {
    Tictactoe,
    Mutorere,
    ConnectFour,
    Konane,
    BaghChal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Both sides on the keyboard
    HumanHuman,
    /// You start, the engine answers
    HumanCpu,
    /// The engine starts
    CpuHuman,
    /// Engine against itself
    CpuCpu,
}

#[derive(Debug, Parser)]
#[command(name = "play", about = "Play the bundled board games against the minimax engine")]
struct Args {
    /// Game to play
    #[arg(long, value_enum, default_value_t = GameChoice::Tictactoe)]
    game: GameChoice,

    /// Who controls which side
    #[arg(long, value_enum, default_value_t = Mode::HumanCpu)]
    mode: Mode,

    /// Engine budget per move, in milliseconds
    #[arg(long, default_value_t = 2000)]
    timeout_ms: u64,

    /// Stop after this many plies, 0 to play to the end
    #[arg(long, default_value_t = 0)]
    max_plies: u32,

    /// Save file refreshed after every move
    #[arg(long)]
    save: Option<PathBuf>,

    /// Resume from a file written by --save (for the same --game)
    #[arg(long)]
    resume: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    let result = match args.game {
        GameChoice::Tictactoe => run::<TicTacToe>(&args),
        GameChoice::Mutorere => run::<MuTorere>(&args),
        GameChoice::ConnectFour => run::<ConnectFour>(&args),
        GameChoice::Konane => run::<Konane>(&args),
        GameChoice::BaghChal => run::<BaghChal>(&args),
    };
    if let Err(e) = result {
        eprintln!("[play] {e}");
        std::process::exit(1);
    }
}

fn side_name(player: Player) -> &'static str {
    match player {
        Player::Max => "player 1",
        Player::Min => "player 2",
    }
}

fn is_human_turn(player: Player, mode: Mode) -> bool {
    match player {
        Player::Max => matches!(mode, Mode::HumanHuman | Mode::HumanCpu),
        Player::Min => matches!(mode, Mode::HumanHuman | Mode::CpuHuman),
    }
}

fn run<G>(args: &Args) -> Result<(), String>
where
    G: Game + Default + Display + Serialize + DeserializeOwned,
{
    let mut game = match &args.resume {
        Some(path) => {
            let loaded: G = load_game(path)?;
            println!("[play] resumed from {} at turn {}", path.display(), loaded.turn());
            loaded
        }
        None => G::default(),
    };

    let mut ai: Minimax<G> = Minimax::new();
    let budget = Duration::from_millis(args.timeout_ms);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut plies = 0u32;

    while !game.is_terminal() {
        if args.max_plies > 0 && plies >= args.max_plies {
            println!("[play] ply limit reached after {plies} plies, stopping");
            return Ok(());
        }

        println!("\n========== TURN {:03} ==========\n", game.turn());
        println!("{game}");
        if let Some(path) = &args.save {
            save_game(path, &game)?;
        }

        if is_human_turn(game.player(), args.mode) {
            match human_move(&mut game, args.mode, &mut lines)? {
                Command::Move(mv) => game.commit(&mv),
                Command::Quit => return Ok(()),
                Command::Reset => {
                    game = G::default();
                    continue;
                }
                Command::Undone => continue,
            }
        } else {
            let mv = cpu_move(&mut ai, &game, budget);
            game.commit(&mv);
        }
        plies += 1;
    }

    println!("\n========== TURN {:03} ==========\n", game.turn());
    println!("{game}");
    match game.winner() {
        Winner::Draw => println!("Draw!"),
        Winner::Max => println!("{} won!", side_name(Player::Max)),
        Winner::Min => println!("{} won!", side_name(Player::Min)),
    }
    Ok(())
}

enum Command<M> {
    Move(M),
    Reset,
    Undone,
    Quit,
}

/// Prompt until a move index or a command comes in. An empty line plays the
/// only move when there is exactly one.
fn human_move<G>(
    game: &mut G,
    mode: Mode,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Command<G::Move>, String>
where
    G: Game,
{
    let moves = game.moves();
    if moves.len() == 1 {
        println!("only one possible move (press Enter to use it):");
    } else {
        println!("{} possible moves:", moves.len());
    }
    for (i, mv) in moves.iter().enumerate() {
        println!("  {i}: {mv}");
    }

    loop {
        println!("{} moves (index, 'undo', 'new'):", side_name(game.player()));
        let Some(line) = lines.next() else {
            return Ok(Command::Quit);
        };
        let line = line.map_err(|e| format!("reading input: {e}"))?;
        let input = line.trim().to_ascii_lowercase();

        match input.as_str() {
            "" if moves.len() == 1 => return Ok(Command::Move(moves[0].clone())),
            "undo" => {
                // Against the engine a human undo takes back a full round.
                let rewind = if mode == Mode::HumanHuman { 1 } else { 2 };
                if game.turn() > rewind {
                    for _ in 0..rewind {
                        game.undo();
                    }
                    return Ok(Command::Undone);
                }
                println!("nothing to undo");
            }
            "new" => return Ok(Command::Reset),
            _ => {
                if let Ok(i) = input.parse::<usize>() {
                    if i < moves.len() {
                        return Ok(Command::Move(moves[i].clone()));
                    }
                }
                println!("invalid command, try again");
            }
        }
    }
}

fn cpu_move<G: Game>(ai: &mut Minimax<G>, game: &G, budget: Duration) -> G::Move {
    let started = Instant::now();
    let (ans, depth) = ai.get_move(game, budget);
    let elapsed = started.elapsed();

    println!("[play] cpu plays {}", ans.best_move);
    println!(
        "[play] score={:+.3} time={:.3}s depth={} cached={}",
        ans.score,
        elapsed.as_secs_f64(),
        depth,
        ai.cached_states()
    );
    report_outlook(game, &ans);
    println!();
    ans.best_move
}

fn report_outlook<G: Game>(game: &G, ans: &Answer<G::Move>) {
    if !ans.is_solved {
        println!("[play] cpu might be playing non-optimally");
        return;
    }
    println!("[play] cpu is playing optimally");
    // Transposed positions can be cached under an older absolute turn, so
    // the distance is clamped for display.
    let plies_left = ans.turn.saturating_sub(game.turn());
    match ans.winner {
        Some(Winner::Draw) => {
            println!("[play] the game ends in a draw within {plies_left} plies");
        }
        Some(Winner::Max) => {
            println!("[play] {} wins within {plies_left} plies", side_name(Player::Max));
        }
        Some(Winner::Min) => {
            println!("[play] {} wins within {plies_left} plies", side_name(Player::Min));
        }
        None => {
            debug_assert!(ans.turn == TURN_NEVER);
            println!("[play] the game can go on forever");
        }
    }
}
