//! Fixed-payment loan calculations.
use crate::core::error::{BudgetError, Result};
use rust_decimal::{Decimal, prelude::*};
use rust_finprim::amort_dep_tax::amort_schedule;

const PERIODS_PER_YEAR: f64 = 12.0;
const SCHEDULE_DECIMALS: u32 = 2;

/// Longest accepted loan term, in months.
pub const MAX_TERM_PERIODS: i64 = 1200;

/// Input of a loan calculation. `annual_rate` is a fraction, `0.12` for 12%.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub principal: f64,
    pub annual_rate: f64,
    pub term_periods: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// A single row of the amortization table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Installment {
    pub period: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub remaining: f64,
}

/// Fixed monthly payment for `principal` borrowed at `annual_rate` over
/// `term_periods` months.
///
/// A zero rate splits the principal evenly across the term.
pub fn monthly_payment(principal: f64, annual_rate: f64, term_periods: i64) -> Result<f64> {
    if term_periods <= 0 || term_periods > MAX_TERM_PERIODS {
        return Err(BudgetError::InvalidTerm(term_periods));
    }
    if !principal.is_finite() || principal <= 0.0 {
        return Err(BudgetError::validation(
            "amount",
            format!("loan amount must be positive, got {principal}"),
        ));
    }
    let periodic_rate = periodic_rate(annual_rate)?;
    let periods = term_periods as f64;

    let payment = if periodic_rate > 0.0 {
        let growth = (1.0 + periodic_rate).powf(periods);
        principal * periodic_rate * growth / (growth - 1.0)
    } else {
        principal / periods
    };
    finite("interest_rate", payment, annual_rate, term_periods)
}

fn periodic_rate(annual_rate: f64) -> Result<f64> {
    if !annual_rate.is_finite() {
        return Err(BudgetError::validation(
            "interest_rate",
            format!("{annual_rate} is not a number"),
        ));
    }
    if annual_rate < 0.0 {
        return Err(BudgetError::NegativeInterestRate(annual_rate));
    }
    Ok(annual_rate / PERIODS_PER_YEAR)
}

/// Rejects overflowed or undefined amounts, which extreme rates or terms can produce.
fn finite(field: &str, value: f64, annual_rate: f64, term_periods: i64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BudgetError::validation(
            field,
            format!(
                "no finite payment exists for a rate of {annual_rate} over {term_periods} months"
            ),
        ))
    }
}

fn to_decimal(field: &str, value: f64) -> Result<Decimal> {
    Decimal::from_f64(value)
        .ok_or_else(|| BudgetError::validation(field, format!("{value} is out of range")))
}

fn from_decimal(value: Decimal) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| BudgetError::validation("amount", format!("{value} is out of range")))
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate: f64, term_periods: i64) -> Self {
        Self {
            principal,
            annual_rate,
            term_periods,
        }
    }

    pub fn calculate(&self) -> Result<LoanResult> {
        let payment = monthly_payment(self.principal, self.annual_rate, self.term_periods)?;
        let total_paid = finite(
            "amount",
            payment * self.term_periods as f64,
            self.annual_rate,
            self.term_periods,
        )?;
        Ok(LoanResult {
            monthly_payment: payment,
            total_paid,
            total_interest: total_paid - self.principal,
        })
    }

    /// Splits every payment into its interest and principal parts, rounded to
    /// cents. The last installment is adjusted so the balance ends at zero.
    pub fn schedule(&self) -> Result<Vec<Installment>> {
        let result = self.calculate()?;
        let periods = u32::try_from(self.term_periods)
            .map_err(|_| BudgetError::InvalidTerm(self.term_periods))?;

        // Every balance and interest part stays below the total paid, so a
        // representable total keeps the decimal arithmetic in range.
        to_decimal("amount", result.total_paid)?;
        let rate = to_decimal("interest_rate", periodic_rate(self.annual_rate)?)?;
        let principal = to_decimal("amount", self.principal)?;
        let payment = to_decimal("amount", result.monthly_payment)?;

        amort_schedule(
            rate,
            periods,
            principal,
            -payment,
            Some((SCHEDULE_DECIMALS, RoundingStrategy::MidpointNearestEven)),
        )
        .into_iter()
        .map(|row| {
            Ok(Installment {
                period: row.period,
                payment: from_decimal(row.principal_payment + row.interest_payment)?,
                interest: from_decimal(row.interest_payment)?,
                principal: from_decimal(row.principal_payment)?,
                remaining: from_decimal(row.remaining_balance)?,
            })
        })
        .collect()
    }
}
