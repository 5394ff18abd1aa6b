use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmortizationError {
    #[error("Please enter numeric values ({field}: {input:?})")]
    NotNumeric { field: &'static str, input: String },

    #[error("Amount cannot be less than or equal to zero (got {0}).")]
    NonPositivePrincipal(f64),

    #[error("Annual interest rate cannot be negative (got {0}).")]
    NegativeRate(f64),

    #[error("Please enter value as decimal (rejected rate of {percent}%)")]
    RateRejected { percent: f64 },

    #[error("Please confirm annual interest rate of {percent}%")]
    RateUnconfirmed { percent: f64 },

    #[error("Payment must be greater than the interest {minimum:.2}")]
    InsufficientPayment { minimum: f64 },

    #[error("Loan would take {periods:.0} periods to repay, more than the {max} allowed")]
    TooManyPeriods { periods: f64, max: usize },

    #[error("Extra payment must be greater or equal to zero (got {0})")]
    NegativeExtraPayment(f64),

    #[error("Input closed before {0} was entered")]
    InputClosed(&'static str),

    #[error(transparent)]
    Io(#[from] io::Error),
}
