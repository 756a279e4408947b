use anyhow::{Context, Result};
use clap::Parser;
use plysearch::board::cozy::GameStatus;
use plysearch::board::notation;
use plysearch::{Difficulty, Move, Position, SearchConfig, Searcher, Side};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against the alpha-beta engine", long_about = None)]
struct Args {
    /// Difficulty tier; prompted for when neither this nor --depth/--config is given
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Search depth in plies, overrides the difficulty tier
    #[arg(long)]
    depth: Option<u32>,

    /// Your color: 'w' for white, 'b' for black
    #[arg(long, default_value = "b")]
    color: String,

    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,

    /// JSON file with search settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Let the engine play both sides for this many plies
    #[arg(long)]
    selfplay: Option<usize>,
}

fn parse_color(color_str: &str) -> Result<Side> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Side::White),
        "b" | "black" => Ok(Side::Black),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn read_line(stdin: &mut impl BufRead) -> Result<Option<String>> {
    let mut input = String::new();
    if stdin.read_line(&mut input)? == 0 { return Ok(None); }
    Ok(Some(input.trim().to_string()))
}

fn prompt_difficulty(stdin: &mut impl BufRead) -> Result<Difficulty> {
    loop {
        println!("Choose difficulty: 1) easy 2) medium 3) hard 4) expert 5) master");
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = read_line(stdin)? else { anyhow::bail!("no difficulty chosen") };
        match line.parse::<u32>().ok().and_then(Difficulty::from_menu) {
            Some(d) => return Ok(d),
            None => println!("Please enter a number from 1 to 5"),
        }
    }
}

fn build_config(args: &Args, stdin: &mut impl BufRead) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if let Some(d) = args.difficulty {
        config.depth = d.depth();
    } else if args.depth.is_none() && args.config.is_none() && args.selfplay.is_none() {
        config.depth = prompt_difficulty(stdin)?.depth();
    }
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    config.validate()?;
    Ok(config)
}

fn get_human_move(pos: &Position, stdin: &mut impl BufRead) -> Result<Option<Move>> {
    loop {
        print!("Enter your move in standard chess notation: ");
        io::stdout().flush()?;
        let Some(input) = read_line(stdin)? else { return Ok(None) };
        match notation::parse_input(pos, &input) {
            Some(mv) => return Ok(Some(mv)),
            None => {
                println!("Invalid move");
                let legal: Vec<String> = pos.legal_moves().into_iter().filter_map(|m| notation::san(pos, m)).collect();
                println!("Legal moves: {}", legal.join(" "));
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    let human = parse_color(&args.color)?;
    let config = build_config(&args, &mut stdin)?;
    let mut pos = match &args.fen {
        Some(fen) => Position::from_fen(fen).context("invalid --fen")?,
        None => Position::startpos(),
    };
    let mut searcher = Searcher::from_position(config, &pos);
    println!("Searching {} plies per move", config.depth);

    let mut plies = 0usize;
    loop {
        match pos.status() {
            GameStatus::Checkmate => {
                let winner = if pos.side_to_move() == Side::White { "Black" } else { "White" };
                println!("\nCheckmate! {winner} wins!");
                break;
            }
            GameStatus::Drawn => {
                println!("\nGame is drawn!");
                break;
            }
            GameStatus::Ongoing => {}
        }
        if let Some(limit) = args.selfplay {
            if plies >= limit { break; }
        }

        println!("\n{}", pos.to_ascii());
        let engine_turn = args.selfplay.is_some() || pos.side_to_move() != human;

        let mv = if engine_turn {
            let start = Instant::now();
            let Some(mv) = searcher.comp_move(&pos) else {
                println!("No move available!");
                break;
            };
            let san = notation::san(&pos, mv).unwrap_or_else(|| mv.to_string());
            let score = searcher.last_result().map_or(0, |r| r.score);
            println!(
                "Computer plays: {san} (score {score}, {} nodes, {:.2}s)",
                searcher.nodes(),
                start.elapsed().as_secs_f32()
            );
            mv
        } else {
            let Some(mv) = get_human_move(&pos, &mut stdin)? else { break };
            searcher.observe_move(&pos, mv);
            mv
        };

        pos.apply(mv).with_context(|| format!("playing {mv}"))?;
        plies += 1;
    }

    Ok(())
}
