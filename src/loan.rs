use log::debug;

use crate::error::AmortizationError;
use crate::schedule::Schedule;

// fractional remainders below this are treated as a whole number of periods
const PERIOD_EPSILON: f64 = 1e-9;

/// Longest schedule accepted: 100 years of monthly payments.
pub const MAX_PERIODS: usize = 1200;

/// Validated loan terms. The only way to build one is [`Loan::new`], so every
/// `Loan` satisfies `monthly_payment > principal * monthly_rate`.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Loan {
    principal: f64,
    annual_rate: f64,
    monthly_payment: f64,
    extra_payment: f64,
    estimated_periods: f64,
}

impl Loan {
    pub fn new(
        principal: f64,       // amount borrowed
        annual_rate: f64,     // annual interest rate as a fraction (0.05 for 5%)
        monthly_payment: f64, // fixed scheduled payment
        extra_payment: f64,   // paid on top of every scheduled payment
    ) -> Result<Self, AmortizationError> {
        check_finite("principal", principal)?;
        check_finite("annual interest rate", annual_rate)?;
        check_finite("monthly payment", monthly_payment)?;
        check_finite("extra payment", extra_payment)?;

        if principal <= 0. {
            return Err(AmortizationError::NonPositivePrincipal(principal));
        }
        if annual_rate < 0. {
            return Err(AmortizationError::NegativeRate(annual_rate));
        }
        check_payment(principal, annual_rate, monthly_payment)?;
        if extra_payment < 0. {
            return Err(AmortizationError::NegativeExtraPayment(extra_payment));
        }

        let estimated_periods =
            estimate_periods(principal, annual_rate, monthly_payment, extra_payment)?;
        debug!(
            "principal {}, rate {}, payment {}, extra {} -> {} periods",
            principal, annual_rate, monthly_payment, extra_payment, estimated_periods
        );
        if !estimated_periods.is_finite() || estimated_periods > MAX_PERIODS as f64 {
            return Err(AmortizationError::TooManyPeriods {
                periods: estimated_periods,
                max: MAX_PERIODS,
            });
        }

        Ok(Self {
            principal,
            annual_rate,
            monthly_payment,
            extra_payment,
            estimated_periods,
        })
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 12.
    }

    pub fn monthly_payment(&self) -> f64 {
        self.monthly_payment
    }

    pub fn extra_payment(&self) -> f64 {
        self.extra_payment
    }

    /// Scheduled payment plus extra payment, applied every non-final period.
    pub fn total_payment(&self) -> f64 {
        self.monthly_payment + self.extra_payment
    }

    /// The real-valued period count from the closed form.
    pub fn estimated_periods(&self) -> f64 {
        self.estimated_periods
    }

    /// Number of records the schedule will hold: the whole periods of the
    /// estimate plus one final period for the remainder. An integral estimate
    /// already ends on a whole period, so no extra period is added.
    pub fn period_count(&self) -> usize {
        let whole = self.estimated_periods.floor();
        if whole >= 1. && self.estimated_periods - whole < PERIOD_EPSILON {
            whole as usize
        } else {
            whole as usize + 1
        }
    }

    pub fn schedule(&self) -> Schedule {
        Schedule::generate(self)
    }
}

/// Number of monthly periods needed to retire `principal`:
/// `n = ln((M+E) / (M+E - r*P)) / ln(1 + r)` with `r = annual_rate / 12`.
///
/// Fails when the payments never cover the first period's interest, since
/// the loan would never amortize.
pub fn estimate_periods(
    principal: f64,
    annual_rate: f64,
    monthly_payment: f64,
    extra_payment: f64,
) -> Result<f64, AmortizationError> {
    let monthly_rate = annual_rate / 12.;
    let payment = monthly_payment + extra_payment;
    let first_interest = principal * monthly_rate;

    if payment <= first_interest {
        return Err(AmortizationError::InsufficientPayment {
            minimum: round(first_interest, 2),
        });
    }

    if monthly_rate == 0. {
        return Ok(principal / payment);
    }

    let numerator = (payment / (payment - first_interest)).ln();
    let denominator = monthly_rate.ln_1p();
    Ok(numerator / denominator)
}

/// Rejects a monthly payment that does not exceed the first period's interest.
pub fn check_payment(
    principal: f64,
    annual_rate: f64,
    monthly_payment: f64,
) -> Result<(), AmortizationError> {
    let first_interest = principal * (annual_rate / 12.);
    if monthly_payment <= first_interest {
        Err(AmortizationError::InsufficientPayment {
            minimum: round(first_interest, 2),
        })
    } else {
        Ok(())
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), AmortizationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AmortizationError::NotNumeric {
            field,
            input: value.to_string(),
        })
    }
}

pub(crate) fn round(amt: f64, dec: i32) -> f64 {
    if amt == 0. {
        0.
    } else {
        (amt * 10_f64.powi(dec)).round() / 10_f64.powi(dec)
    }
}

#[cfg(test)]
mod tests {
    use super::{check_payment, estimate_periods, round, Loan, MAX_PERIODS};
    use crate::error::AmortizationError;
    use test_log::test;

    #[test]
    fn test_estimate_periods() {
        // ln(200 / 150) / ln(1.005)
        let n = estimate_periods(10000., 0.06, 200., 0.).unwrap();
        assert!((n - 57.68).abs() < 0.01, "n = {}", n);

        // extra payments shorten the loan
        let n = estimate_periods(10000., 0.06, 200., 50.).unwrap();
        assert!((n - 44.74).abs() < 0.01, "n = {}", n);

        // zero rate falls back to straight division
        assert_eq!(estimate_periods(1200., 0., 100., 0.).unwrap(), 12.);
        assert_eq!(estimate_periods(1000., 0., 300., 0.).unwrap(), 1000. / 300.);
    }

    #[test]
    fn test_estimate_rejects_payment_below_interest() {
        match estimate_periods(1000., 0.12, 10., 0.) {
            Err(AmortizationError::InsufficientPayment { minimum }) => assert_eq!(minimum, 10.),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(estimate_periods(1000., 0.12, 9.99, 0.).is_err());
        // the extra payment counts toward covering the interest here
        assert!(estimate_periods(1000., 0.12, 10., 0.01).is_ok());
    }

    #[test]
    fn test_check_payment() {
        assert!(check_payment(1000., 0.12, 10.01).is_ok());
        assert!(check_payment(1000., 0.12, 10.).is_err());
        assert!(check_payment(1000., 0., 0.).is_err());
        assert!(check_payment(1000., 0., 0.01).is_ok());
    }

    #[test]
    fn test_loan_validation() {
        assert!(matches!(
            Loan::new(0., 0.05, 100., 0.),
            Err(AmortizationError::NonPositivePrincipal(_))
        ));
        assert!(matches!(
            Loan::new(-500., 0.05, 100., 0.),
            Err(AmortizationError::NonPositivePrincipal(_))
        ));
        assert!(matches!(
            Loan::new(1000., -0.05, 100., 0.),
            Err(AmortizationError::NegativeRate(_))
        ));
        assert!(matches!(
            Loan::new(1000., 0.12, 10., 0.),
            Err(AmortizationError::InsufficientPayment { .. })
        ));
        assert!(matches!(
            Loan::new(1000., 0.12, 100., -1.),
            Err(AmortizationError::NegativeExtraPayment(_))
        ));
        assert!(matches!(
            Loan::new(f64::NAN, 0.12, 100., 0.),
            Err(AmortizationError::NotNumeric { field: "principal", .. })
        ));
        assert!(matches!(
            Loan::new(1000., 0.12, f64::INFINITY, 0.),
            Err(AmortizationError::NotNumeric { field: "monthly payment", .. })
        ));
    }

    #[test]
    fn test_loan_rejects_endless_schedule() {
        // a hundred billion months at 0%
        match Loan::new(1e9, 0., 0.01, 0.) {
            Err(AmortizationError::TooManyPeriods { periods, max }) => {
                assert!(periods > MAX_PERIODS as f64);
                assert_eq!(max, MAX_PERIODS);
            }
            other => panic!("unexpected result {:?}", other),
        }

        // the estimate overflows to infinity
        assert!(matches!(
            Loan::new(1e300, 0., 1e-300, 0.),
            Err(AmortizationError::TooManyPeriods { .. })
        ));

        // payment a hair above the interest
        assert!(matches!(
            Loan::new(100000., 0.12, 1000.0000001, 0.),
            Err(AmortizationError::TooManyPeriods { .. })
        ));
    }

    #[test]
    fn test_loan_at_period_limit() {
        let loan = Loan::new(1200., 0., 1., 0.).unwrap();
        assert_eq!(loan.period_count(), MAX_PERIODS);
        assert_eq!(loan.schedule().len(), MAX_PERIODS);

        assert!(Loan::new(1201., 0., 1., 0.).is_err());
    }

    #[test]
    fn test_loan_accessors() {
        let loan = Loan::new(10000., 0.06, 200., 25.).unwrap();
        assert_eq!(loan.principal(), 10000.);
        assert_eq!(loan.annual_rate(), 0.06);
        assert!((loan.monthly_rate() - 0.005).abs() < 1e-12);
        assert_eq!(loan.monthly_payment(), 200.);
        assert_eq!(loan.extra_payment(), 25.);
        assert_eq!(loan.total_payment(), 225.);
    }

    #[test]
    fn test_period_count() {
        let loan = Loan::new(10000., 0.06, 200., 0.).unwrap();
        assert_eq!(
            loan.period_count(),
            loan.estimated_periods().floor() as usize + 1
        );
        assert_eq!(loan.period_count(), 58);

        // 1200 at 0% with 100 a month ends on exactly the 12th payment
        let loan = Loan::new(1200., 0., 100., 0.).unwrap();
        assert_eq!(loan.period_count(), 12);

        // a single payment covers everything
        let loan = Loan::new(100., 0.12, 500., 0.).unwrap();
        assert!(loan.estimated_periods() < 1.);
        assert_eq!(loan.period_count(), 1);
    }

    #[test]
    fn test_round() {
        assert_eq!(round(10.004999, 2), 10.);
        assert_eq!(round(1797.65649, 4), 1797.6565);
        assert_eq!(round(0., 2), 0.);
    }
}
