use semval::prelude::*;
use serde::Deserialize;
use thiserror::Error;

pub const AMORTIZATION_YEARS_MIN: i64 = 5;
pub const AMORTIZATION_YEARS_MAX: i64 = 30;
pub const AMORTIZATION_YEARS_STEP: i64 = 5;

pub const PAYMENT_SCHEDULE_BI_WEEKLY: i64 = 2;
pub const PAYMENT_SCHEDULE_MONTHLY: i64 = 4;

/// The loan parameters a payment is calculated from.
///
/// Fields that are missing from the request body default to zero so that they
/// are rejected by validation rather than by the decoder.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct CalculateRequest {
    /// Purchase price of the property.
    pub property_price: f64,

    /// Amount paid up front. This must be positive, but it is not subtracted
    /// from the financed amount.
    pub down_payment: f64,

    /// Nominal annual interest rate as a decimal fraction, so `0.05` is 5%.
    pub annual_interest: f64,

    /// Number of years the loan is repaid over.
    pub amortization: i64,

    /// Payment frequency code. Either [PAYMENT_SCHEDULE_BI_WEEKLY] or
    /// [PAYMENT_SCHEDULE_MONTHLY].
    pub payment_schedule: i64,
}

/// A single rule that a [CalculateRequest] can break.
///
/// The display output of each variant is the reason reported to clients.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum CalculateRequestInvalidity {
    #[error("invalid property price")]
    PropertyPrice,
    #[error("invalid down payment")]
    DownPayment,
    #[error("invalid annual interest rate")]
    AnnualInterest,
    #[error("invalid amortization, must be > 5 and < 30")]
    AmortizationRange,
    #[error("invalid amortization, must be a multiple of 5")]
    AmortizationStep,
    #[error("invalid payment schedule")]
    PaymentSchedule,
}

impl CalculateRequest {
    /// Check the request and report the first rule it breaks.
    ///
    /// Rules are checked in a fixed order: property price, down payment,
    /// annual interest, amortization range, amortization step, and finally
    /// the payment schedule.
    pub fn first_invalidity(&self) -> Result<(), CalculateRequestInvalidity> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(context) => context.into_iter().next().map_or(Ok(()), Err),
        }
    }
}

impl Validate for CalculateRequest {
    type Invalidity = CalculateRequestInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(
                self.property_price <= 0.0,
                CalculateRequestInvalidity::PropertyPrice,
            )
            .invalidate_if(
                self.down_payment <= 0.0,
                CalculateRequestInvalidity::DownPayment,
            )
            .invalidate_if(
                self.annual_interest <= 0.0,
                CalculateRequestInvalidity::AnnualInterest,
            )
            .invalidate_if(
                !(AMORTIZATION_YEARS_MIN..=AMORTIZATION_YEARS_MAX).contains(&self.amortization),
                CalculateRequestInvalidity::AmortizationRange,
            )
            .invalidate_if(
                self.amortization % AMORTIZATION_YEARS_STEP != 0,
                CalculateRequestInvalidity::AmortizationStep,
            )
            .invalidate_if(
                self.payment_schedule != PAYMENT_SCHEDULE_BI_WEEKLY
                    && self.payment_schedule != PAYMENT_SCHEDULE_MONTHLY,
                CalculateRequestInvalidity::PaymentSchedule,
            )
            .into()
    }
}
