use clap::{Parser, ValueEnum};
use flatseg::classic::monotonic::sliding_window_max;
use flatseg::{Operation, SegmentTree, ops::{BitXor, Gcd, Max, Min, Sum}};
use tracing_subscriber::filter::LevelFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OpKind {
    Sum,
    Min,
    Max,
    Xor,
    Gcd,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of elements in the sequence
    #[clap(short, long, value_parser, default_value_t = 1000)]
    len: usize,
    /// Number of random updates and queries to run
    #[clap(short, long, value_parser, default_value_t = 10_000)]
    ops: usize,
    /// Seed for the random generator
    #[clap(short, long, value_parser)]
    seed: Option<u64>,
    /// Operation that the tree combines values with
    #[clap(long, value_enum, default_value_t = OpKind::Sum)]
    op: OpKind,
    /// Log every rejected or checked request
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));
    log::info!("running {:?} with seed {seed}", args);
    let mut rng = fastrand::Rng::with_seed(seed);

    match args.op {
        OpKind::Sum => run(&args, &mut rng, Sum),
        OpKind::Min => run(&args, &mut rng, Min),
        OpKind::Max => run(&args, &mut rng, Max),
        OpKind::Xor => run(&args, &mut rng, BitXor),
        OpKind::Gcd => run(&args, &mut rng, Gcd),
    }
}

fn run<O: Operation<u64>>(
    args: &Args,
    rng: &mut fastrand::Rng,
    op: O,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut values: Vec<u64> = (0..args.len).map(|_| rng.u64(1..10_000)).collect();
    let mut tree = SegmentTree::build(values.clone(), op)?;

    let (mut updates, mut queries) = (0, 0);
    for _ in 0..args.ops {
        if rng.bool() {
            let index = rng.usize(0..values.len());
            let value = rng.u64(1..10_000);
            tree.update(index, value)?;
            values[index] = value;
            updates += 1;
        } else {
            let start = rng.usize(0..=values.len());
            let end = rng.usize(start..=values.len());
            let result = tree.query(start, end)?;
            let expected = values[start..end]
                .iter()
                .fold(tree.operation().identity(), |acc, v| {
                    tree.operation().combine(&acc, v)
                });
            if result != expected {
                return Err(format!(
                    "query [{start}, {end}) returned {result} but expected {expected}"
                )
                .into());
            }
            log::debug!("query [{start}, {end}) = {result}");
            queries += 1;
        }
    }

    // requests outside of the sequence are rejected without touching the tree
    if let Err(err) = tree.query(0, values.len() + 1) {
        log::info!("rejected request: {err}");
    }

    log::info!(
        "ran {updates} updates and {queries} queries, total is {}",
        tree.total()
    );
    let window = (values.len() / 10).max(1);
    let peaks = sliding_window_max(tree.leaves(), window);
    log::info!(
        "largest value of the first window of {window} elements is {:?}",
        peaks.first()
    );

    #[cfg(feature = "profiler")]
    println!("{:#?}", tree.stats());

    Ok(())
}
