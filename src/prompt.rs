//! Interactive collection of loan terms.
//!
//! Values are checked as soon as they are entered, so an invalid principal
//! stops the session before the rate is asked for.

use log::warn;
use std::io::{BufRead, Write};

use crate::error::AmortizationError;
use crate::loan::{check_payment, round, Loan};

pub const PRINCIPAL_PROMPT: &str = "Enter the loan amount: ";
pub const RATE_PROMPT: &str = "Enter the annual interest rate (as decimal, e.g., 0.10 for 10%): ";
pub const PAYMENT_PROMPT: &str = "Enter the monthly payment: ";
pub const EXTRA_PROMPT: &str = "Enter the extra payment amount: ";

pub fn read_loan<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Loan, AmortizationError> {
    let principal = read_decimal(input, output, PRINCIPAL_PROMPT, "principal")?;
    if principal <= 0. {
        return Err(AmortizationError::NonPositivePrincipal(principal));
    }

    let annual_rate = read_decimal(input, output, RATE_PROMPT, "annual interest rate")?;
    if annual_rate < 0. {
        return Err(AmortizationError::NegativeRate(annual_rate));
    }
    if annual_rate > 1. {
        confirm_rate(input, output, annual_rate)?;
    }

    let monthly_payment = read_decimal(input, output, PAYMENT_PROMPT, "monthly payment")?;
    check_payment(principal, annual_rate, monthly_payment)?;

    let extra_payment = read_decimal(input, output, EXTRA_PROMPT, "extra payment")?;

    Loan::new(principal, annual_rate, monthly_payment, extra_payment)
}

// a rate above 1 is most likely a percentage typed where a fraction was expected
fn confirm_rate<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    annual_rate: f64,
) -> Result<(), AmortizationError> {
    let percent = round(annual_rate * 100., 2);
    warn!("annual interest rate of {}% entered", percent);

    let question = format!(
        "Are you sure the annual interest rate is {}%? (y for Yes, n for No): ",
        percent
    );
    let answer = read_line(input, output, &question, "rate confirmation")?;

    match answer.to_lowercase().as_str() {
        "y" | "yes" => Ok(()),
        "n" | "no" => Err(AmortizationError::RateRejected { percent }),
        _ => Err(AmortizationError::RateUnconfirmed { percent }),
    }
}

fn read_decimal<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    field: &'static str,
) -> Result<f64, AmortizationError> {
    let line = read_line(input, output, prompt, field)?;
    parse_decimal(&line, field)
}

fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    field: &'static str,
) -> Result<String, AmortizationError> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(AmortizationError::InputClosed(field));
    }
    Ok(line.trim().to_string())
}

/// Parses a finite decimal; `nan` and `inf` are rejected like any other
/// non-numeric text.
pub fn parse_decimal(text: &str, field: &'static str) -> Result<f64, AmortizationError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AmortizationError::NotNumeric {
            field,
            input: text.to_string(),
        }),
    }
}
