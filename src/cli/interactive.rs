//! Menu-driven conversion session
//!
//! Shows the candidates in the movie directory, reads a selection and
//! converts the chosen file (or all of them), then shows the list again.
//! Bad input re-prompts; `0`, a quit keyword or end of input ends the session.

use anyhow::Result;
use console::style;

use super::prompts::{parse_selection, Selection, SelectionSource};
use crate::converter::{ConvertError, TranscodeEngine};
use crate::orchestrator::{print_no_candidates, Orchestrator};
use crate::report::{display_candidates, BatchReport};
use crate::utils::{list_candidates, print_error, print_success};

/// Run the interactive session, returning one report per conversion round.
pub fn run_interactive<E, S>(
    orchestrator: &Orchestrator<'_, E>,
    input: &mut S,
) -> Result<Vec<BatchReport>>
where
    E: TranscodeEngine,
    S: SelectionSource + ?Sized,
{
    let movie_dir = orchestrator.options().movie_dir.clone();
    let mut rounds = Vec::new();

    loop {
        let candidates = list_candidates(&movie_dir)?;
        if candidates.is_empty() {
            print_no_candidates(&movie_dir);
            return Ok(rounds);
        }

        display_candidates(&movie_dir, &candidates);
        println!();
        println!(
            "    {}",
            style("Enter a file number to convert ('all' for every file, 0 to quit):").cyan()
        );

        let Some(choice) = read_choice(input, candidates.len())? else {
            println!("    {}", style("Exiting.").yellow());
            return Ok(rounds);
        };

        let report = match choice {
            Choice::All => {
                let report = orchestrator.run_batch(&candidates);
                report.display();
                print_success(&format!(
                    "Converted {} of {} file(s)",
                    report.succeeded().len(),
                    report.total_count
                ));
                report
            }
            Choice::Index(i) => orchestrator.run_single(&candidates[i]),
        };

        let fatal = report
            .failed()
            .into_iter()
            .filter_map(|r| r.failure.clone())
            .find(ConvertError::is_fatal);
        rounds.push(report);

        if let Some(error) = fatal {
            return Err(error.into());
        }
    }
}

/// A usable selection. Quitting is `None` from [`read_choice`].
enum Choice {
    All,
    Index(usize),
}

/// Prompt until the input parses, re-prompting on bad input.
///
/// Returns `None` on a quit keyword or end of input.
fn read_choice<S>(input: &mut S, count: usize) -> Result<Option<Choice>>
where
    S: SelectionSource + ?Sized,
{
    loop {
        let Some(line) = input.next_input(count)? else {
            return Ok(None);
        };
        match parse_selection(&line, count) {
            Selection::Quit => return Ok(None),
            Selection::All => return Ok(Some(Choice::All)),
            Selection::Index(i) => return Ok(Some(Choice::Index(i))),
            Selection::Invalid(reason) => print_error(&reason),
        }
    }
}
