//! Interactive session scenarios driven through the library API

use jobmatch_cli::config::SimulationConfig;
use jobmatch_cli::repl::{Flow, Repl, ReplCommand};
use jobmatch_cli::{Config, OutputFormat};
use jobmatch_rl::Session;

fn seeded_repl(format: OutputFormat) -> Repl {
    let config = Config::default();
    let simulation = SimulationConfig {
        seed: Some(2024),
        ..config.simulation.clone()
    };
    let (states, actions) = simulation.labels();
    let session = Session::new(&states, &actions, config.params().unwrap()).unwrap();

    Repl::new(
        session,
        simulation.reward_source().unwrap(),
        simulation.selection_rng(),
        format,
    )
}

/// Feed `script` line by line, returning everything written and whether quit was seen
fn drive(repl: &mut Repl, script: &[&str]) -> (String, bool) {
    let mut out = Vec::new();
    let mut quit = false;

    for line in script {
        match ReplCommand::parse(line) {
            Ok(Some(command)) => match repl.execute(command, &mut out) {
                Ok(Flow::Quit) => {
                    quit = true;
                    break;
                }
                Ok(Flow::Continue) => {}
                Err(e) => out.extend_from_slice(format!("Error: {e}\n").as_bytes()),
            },
            Ok(None) => {}
            Err(e) => out.extend_from_slice(format!("Error: {e}\n").as_bytes()),
        }
    }

    (String::from_utf8(out).unwrap(), quit)
}

#[test]
fn test_dashboard_flow() {
    let mut repl = seeded_repl(OutputFormat::Table);

    let (output, quit) = drive(
        &mut repl,
        &["show", "update", "stats", "select State 2", "quit", "show"],
    );

    assert!(quit);
    assert!(output.contains("Q-Table:"));
    assert!(output.contains("Updated Q-Table:"));
    assert!(output.contains("Warehouse Associate"));
    assert!(output.contains("Updates:        10"));
    assert!(output.contains("State 2: "));
    assert_eq!(repl.session().stats().batches, 1);
}

#[test]
fn test_errors_do_not_end_session() {
    let mut repl = seeded_repl(OutputFormat::Table);

    let (output, quit) = drive(&mut repl, &["select State 7", "jump", "update 2"]);

    assert!(!quit);
    assert_eq!(output.matches("Error: ").count(), 2);
    assert_eq!(repl.session().stats().batches, 2);
}

#[test]
fn test_same_seed_same_session() {
    let script = ["update 3", "show"];

    let (first, _) = drive(&mut seeded_repl(OutputFormat::Json), &script);
    let (second, _) = drive(&mut seeded_repl(OutputFormat::Json), &script);

    assert_eq!(first, second);
}

#[test]
fn test_init_discards_learning() {
    let mut repl = seeded_repl(OutputFormat::Table);
    drive(&mut repl, &["update 5", "init"]);

    assert!(repl.session().table().iter().all(|(_, _, v)| v == 0.0));
    assert_eq!(repl.session().stats().total_updates, 0);
}
