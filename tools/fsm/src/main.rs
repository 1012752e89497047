use std::io::stderr;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use log::info;

use fsm_automata::Nfa;
use fsm_automata::simulate;
use fsm_automata::thompson;
use fsm_automata::validate;
use fsm_reduction::DEFAULT_STATE_LIMIT;
use fsm_reduction::Equivalence;
use fsm_reduction::check_equivalence;
use fsm_reduction::minimize;
use fsm_reduction::subset_construction;
use fsm_syntax::parse_regex;
use fsm_utilities::FsmError;
use fsm_utilities::Timing;

use crate::verbosity::VerbosityFlag;

mod verbosity;

#[derive(clap::Parser, Debug)]
#[command(
    name = "fsm",
    version,
    about = "A command line tool for regular expressions and finite automata"
)]
struct Cli {
    #[command(flatten)]
    verbosity: VerbosityFlag,

    #[command(subcommand)]
    commands: Commands,

    #[arg(long, global = true, help = "Print the time spent in every phase")]
    timings: bool,
}

/// Defines the subcommands for this tool.
#[derive(Debug, Subcommand)]
enum Commands {
    Info(InfoArgs),
    Simulate(SimulateArgs),
    Determinize(DeterminizeArgs),
    Compare(CompareArgs),
}

#[derive(clap::Args, Debug)]
#[command(about = "Prints information about the automaton of the given regular expression")]
struct InfoArgs {
    regex: String,

    #[arg(long, help = "Also print all states and transitions")]
    transitions: bool,
}

#[derive(clap::Args, Debug)]
#[command(about = "Runs the automaton of the given regular expression on an input word")]
struct SimulateArgs {
    regex: String,

    /// The input word, every character is a single symbol.
    input: String,
}

#[derive(clap::Args, Debug)]
#[command(about = "Prints the deterministic automaton of the given regular expression")]
struct DeterminizeArgs {
    regex: String,

    #[arg(long, help = "Minimize the resulting automaton")]
    minimize: bool,

    #[arg(long, default_value_t = DEFAULT_STATE_LIMIT)]
    state_limit: usize,
}

#[derive(clap::Args, Debug)]
#[command(about = "Decides whether two regular expressions accept the same language")]
struct CompareArgs {
    left: String,
    right: String,

    #[arg(long, default_value_t = DEFAULT_STATE_LIMIT)]
    state_limit: usize,
}

fn main() -> Result<ExitCode, FsmError> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .parse_default_env()
        .init();

    let mut timing = Timing::new();

    let exit_code = match cli.commands {
        Commands::Info(args) => {
            let nfa = build_nfa(&args.regex, &mut timing)?;
            if args.transitions {
                print!("{nfa:?}");
            } else {
                println!("{nfa}");
            }

            for diagnostic in validate(&nfa) {
                println!("{:?}: {diagnostic}", diagnostic.severity());
            }

            ExitCode::SUCCESS
        }
        Commands::Simulate(args) => {
            let nfa = build_nfa(&args.regex, &mut timing)?;
            let simulation = simulate(&nfa, args.input.chars())?;

            for (index, step) in simulation.steps().iter().enumerate() {
                match step.symbol {
                    Some(symbol) => println!("{index}: {symbol} -> {:?}", step.active),
                    None => println!("{index}: {:?}", step.active),
                }
            }

            if simulation.accepted() {
                println!("accepted");
                ExitCode::SUCCESS
            } else {
                println!("rejected");
                ExitCode::FAILURE
            }
        }
        Commands::Determinize(args) => {
            let nfa = build_nfa(&args.regex, &mut timing)?;
            let (dfa, truncated) = subset_construction(&nfa, args.state_limit, &mut timing);
            if truncated {
                return Err(format!("The automaton has more than {} states", args.state_limit).into());
            }

            let dfa = if args.minimize { minimize(&dfa, &mut timing) } else { dfa };
            print!("{dfa:?}");
            ExitCode::SUCCESS
        }
        Commands::Compare(args) => {
            let left = build_nfa(&args.left, &mut timing)?;
            let right = build_nfa(&args.right, &mut timing)?;

            let result = check_equivalence(&left, &right, args.state_limit, &mut timing)?;
            println!("{}", result.message());

            match result {
                Equivalence::Equivalent => ExitCode::SUCCESS,
                Equivalence::NotEquivalent(_) => ExitCode::FAILURE,
                Equivalence::LimitReached { .. } => ExitCode::from(2),
            }
        }
    };

    if cli.timings {
        timing.write_summary(&mut stderr())?;
    }

    Ok(exit_code)
}

/// Parses the regular expression and applies Thompson's construction.
fn build_nfa(text: &str, timing: &mut Timing) -> Result<Nfa, FsmError> {
    let mut timer = timing.start("construction");
    let regex = parse_regex(text)?;
    let nfa = thompson(&regex)?;
    timer.finish();

    info!("Constructed an automaton with {} states for {regex}", nfa.num_of_states());
    Ok(nfa)
}
