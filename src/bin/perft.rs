use plysearch::perft::{cozy_perft, perft, perft_divide};
use plysearch::search::tracker::PieceTracker;
use plysearch::Position;

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for the tracker-based move generator")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN string or "startpos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Print node counts per root move
    #[arg(long, default_value_t = false)]
    divide: bool,
    /// Also count with cozy-chess' legal generator and compare
    #[arg(long, default_value_t = false)]
    compare: bool,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use clap::Parser;
    use rayon::prelude::*;
    use std::time::Instant;

    env_logger::init();
    let args = Args::parse();
    let base = if args.fen == "startpos" { Position::startpos() } else { Position::from_fen(&args.fen).context("invalid FEN")? };
    let tracker = PieceTracker::from_position(&base);

    if args.divide {
        let mut b = base.clone();
        let mut total = 0u64;
        for (mv, n) in perft_divide(&mut b, &tracker, args.depth) {
            println!("{mv}: {n}");
            total += n;
        }
        println!("\nnodes: {total}");
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build().context("thread pool")?;
    let t0 = Instant::now();
    let nodes = pool.install(|| {
        if args.threads <= 1 || args.depth == 0 {
            let mut b = base.clone();
            return perft(&mut b, &tracker, args.depth);
        }
        // Each worker gets its own board and tracker copy
        let mut scratch = base.clone();
        let roots: Vec<_> = perft_divide(&mut scratch, &tracker, 1).into_iter().map(|(mv, _)| mv).collect();
        roots
            .par_iter()
            .map(|&mv| {
                let mut b = base.clone();
                let child = tracker.after(&b, mv);
                match b.apply(mv) {
                    Ok(_) => perft(&mut b, &child, args.depth - 1),
                    Err(_) => 0,
                }
            })
            .sum::<u64>()
    });
    let dt = t0.elapsed().as_secs_f64();

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }

    if args.compare {
        let reference = cozy_perft(base.inner(), args.depth);
        if reference == nodes {
            println!("cozy:  nodes={reference} (match)");
        } else {
            println!("cozy:  nodes={reference} (MISMATCH, diff {})", reference as i64 - nodes as i64);
            std::process::exit(1);
        }
    }
    Ok(())
}
