use anyhow::{bail, Context};
use subarray_split::{SearchMode, Splitter};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: subarray-split [--first | --exhaustive] <subarrays> <drops> <values>...";

const DEMO_VALUES: [i32; 11] = [10, 7, 2, 10, 5, 1, 1, 4, 1, 11, 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Report {
    First,
    All(SearchMode),
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    report: Report,
    n_subarrays: usize,
    n_drops: usize,
    values: Vec<i32>,
}

impl Args {
    fn demo() -> Self {
        Self {
            report: Report::All(SearchMode::FirstPerRoot),
            n_subarrays: 3,
            n_drops: 2,
            values: DEMO_VALUES.to_vec(),
        }
    }

    fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut report = Report::All(SearchMode::FirstPerRoot);
        let mut positional = Vec::new();
        for arg in args {
            match arg.as_str() {
                "--first" => report = Report::First,
                "--exhaustive" => report = Report::All(SearchMode::Exhaustive),
                "-h" | "--help" => bail!(USAGE),
                flag if flag.starts_with("--") => bail!("unknown flag {flag}\n{USAGE}"),
                _ => positional.push(arg),
            }
        }

        if positional.is_empty() {
            return Ok(Self {
                report,
                ..Self::demo()
            });
        }
        if positional.len() < 3 {
            bail!("expected at least 3 positional arguments\n{USAGE}");
        }

        let n_subarrays = positional[0]
            .parse::<usize>()
            .with_context(|| format!("<subarrays> is not a usize: {}", positional[0]))?;
        let n_drops = positional[1]
            .parse::<usize>()
            .with_context(|| format!("<drops> is not a usize: {}", positional[1]))?;
        let values = positional[2..]
            .iter()
            .map(|value| {
                value
                    .parse::<i32>()
                    .with_context(|| format!("value is not an i32: {value}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            report,
            n_subarrays,
            n_drops,
            values,
        })
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse(std::env::args().skip(1))?;
    let splitter = Splitter::new(&args.values, args.n_subarrays, args.n_drops)
        .context("invalid split arguments")?;

    let bounds = splitter.bounds();
    println!(
        "values={:?} subarrays={} drops={} bounds={}..={}",
        args.values, args.n_subarrays, args.n_drops, bounds.lower, bounds.upper
    );

    match args.report {
        Report::First => match splitter.solutions().next() {
            Some(split) => println!("{split}"),
            None => println!("no split found"),
        },
        Report::All(mode) => {
            let mut found = 0;
            for split in splitter.search(mode) {
                println!("{split}");
                found += 1;
            }
            if found == 0 {
                println!("no split found");
            }
        }
    }
    println!("candidates visited: {}", splitter.reset_candidates());

    Ok(())
}
