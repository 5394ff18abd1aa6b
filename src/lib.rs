pub mod error;
pub mod loan;
pub mod prompt;
pub mod schedule;
pub mod table;

use std::io::{BufRead, Write};

pub use error::AmortizationError;
pub use loan::Loan;
pub use schedule::{PeriodRecord, Schedule, Summary};

/// Prompts for the loan terms, then writes the full schedule and its summary.
/// Nothing is written past the prompts unless the whole schedule was built.
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Summary, AmortizationError> {
    let loan = prompt::read_loan(input, output)?;
    let schedule = loan.schedule();

    write!(output, "{}", table::render(&schedule))?;
    output.flush()?;
    Ok(schedule.summary())
}
