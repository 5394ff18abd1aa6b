use log::{info, trace};
use std::fmt;

use crate::loan::Loan;

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PeriodRecord {
    pub period: usize,
    pub beginning_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal_paid: f64,
    pub ending_balance: f64,
}

impl PeriodRecord {
    pub fn new(
        period: usize,
        beginning_balance: f64,
        payment: f64,
        interest: f64,
        principal_paid: f64,
        ending_balance: f64,
    ) -> Self {
        Self {
            period,
            beginning_balance,
            payment,
            interest,
            principal_paid,
            ending_balance,
        }
    }
}

impl fmt::Display for PeriodRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "period {}, beginning balance ${:.2}, payment ${:.2}, interest ${:.2}, principal paid ${:.2}, ending balance ${:.2}",
            self.period,
            self.beginning_balance,
            self.payment,
            self.interest,
            self.principal_paid,
            self.ending_balance
        )
    }
}

/// The full amortization of one loan, computed once and never mutated.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Schedule {
    records: Vec<PeriodRecord>,
}

impl Schedule {
    /// Walks the loan period by period. Every period but the last pays the
    /// scheduled payment plus the extra payment; the last one pays exactly
    /// the remaining balance and its interest, leaving the loan at zero.
    pub fn generate(loan: &Loan) -> Self {
        let monthly_rate = loan.monthly_rate();
        let pmt_amt = loan.total_payment();
        let period_count = loan.period_count();

        let mut records = Vec::with_capacity(period_count);
        let mut balance = loan.principal();

        for period in 1..=period_count {
            let begin_balance = balance;
            let interest = begin_balance * monthly_rate;

            let record = if period < period_count {
                let principal_paid = pmt_amt - interest;
                balance -= principal_paid;
                PeriodRecord::new(
                    period,
                    begin_balance,
                    pmt_amt,
                    interest,
                    principal_paid,
                    balance,
                )
            } else {
                balance = 0.;
                PeriodRecord::new(
                    period,
                    begin_balance,
                    begin_balance + interest,
                    interest,
                    begin_balance,
                    balance,
                )
            };
            trace!("{}", record);
            records.push(record);
        }

        info!(
            "generated {} periods for a principal of {:.2}",
            records.len(),
            loan.principal()
        );
        Self { records }
    }

    pub fn records(&self) -> &[PeriodRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for a 1-based period index.
    pub fn get(&self, period: usize) -> Option<&PeriodRecord> {
        period
            .checked_sub(1)
            .and_then(|index| self.records.get(index))
    }

    pub fn summary(&self) -> Summary {
        Summary::from_records(&self.records)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a PeriodRecord;
    type IntoIter = std::slice::Iter<'a, PeriodRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    pub periods: usize,
    pub years: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub total_principal: f64,
}

impl Summary {
    pub fn from_records(records: &[PeriodRecord]) -> Self {
        let (total_paid, total_interest, total_principal) = records.iter().fold(
            (0., 0., 0.),
            |(paid, interest, principal), r| {
                (
                    paid + r.payment,
                    interest + r.interest,
                    principal + r.principal_paid,
                )
            },
        );
        Self {
            periods: records.len(),
            years: records.len() as f64 / 12.,
            total_paid,
            total_interest,
            total_principal,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Years: {:.2}", self.years)?;
        writeln!(f, "Sum of all payments: {:.2}", self.total_paid)?;
        writeln!(f, "Interest Total: {:.2}", self.total_interest)?;
        write!(f, "Principal Total: {:.2}", self.total_principal)
    }
}
