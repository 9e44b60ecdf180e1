use thiserror::Error;

use super::calculate_request::{CalculateRequest, CalculateRequestInvalidity};

/// Reasons a payment could not be calculated.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum CalculationError {
    /// The request broke one of the validation rules. The display output is
    /// the reason for the first rule broken.
    #[error(transparent)]
    InvalidRequest(#[from] CalculateRequestInvalidity),
}

/// Calculate the periodic payment for a loan.
///
/// The payment is computed with the amortized payment formula:
///
/// ```text
/// M = P * (r * (1 + r)^n) / ((1 + r)^n - 1)
/// ```
///
/// where `P` is the property price, `r` is the annual interest divided by the
/// payment schedule code, and `n` is the payment schedule code multiplied by
/// the amortization period in years.
///
/// The schedule code is used as-is for both the divisor and multiplier, and the
/// down payment is not deducted from the principal. The result is not rounded.
///
/// # Examples
///
/// ```
/// # use mortgage_calculator_api::mortgage::domain::{calculate, CalculateRequest};
/// let request = CalculateRequest {
///     property_price: 1.0,
///     down_payment: 1.0,
///     annual_interest: 1.0,
///     amortization: 5,
///     payment_schedule: 2,
/// };
///
/// let payment = calculate(&request).expect("request is valid");
/// assert!((payment - 0.5088237828522189).abs() < 1e-12);
/// ```
pub fn calculate(request: &CalculateRequest) -> Result<f64, CalculationError> {
    request.first_invalidity()?;

    let schedule = request.payment_schedule as f64;
    let scheduled_rate = request.annual_interest / schedule;
    let total_payments = schedule * request.amortization as f64;

    let compounded = (1.0 + scheduled_rate).powf(total_payments);
    let numerator = scheduled_rate * compounded;
    let denominator = compounded - 1.0;

    Ok(request.property_price * (numerator / denominator))
}

#[cfg(test)]
mod test {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn request(
        property_price: f64,
        annual_interest: f64,
        amortization: i64,
        payment_schedule: i64,
    ) -> CalculateRequest {
        CalculateRequest {
            property_price,
            down_payment: 1.0,
            annual_interest,
            amortization,
            payment_schedule,
        }
    }

    #[test]
    fn unit_loan_bi_weekly() {
        // r = 0.5, n = 10
        let payment = calculate(&request(1.0, 1.0, 5, 2)).expect("request should be valid");

        assert!(payment.is_finite());
        assert!(
            (payment - 0.508_823_782_852_218_9).abs() < TOLERANCE,
            "unexpected payment {}",
            payment
        );
    }

    #[test]
    fn monthly_code_divides_rate_by_four() {
        // r = 0.0125, n = 100
        let payment =
            calculate(&request(300_000.0, 0.05, 25, 4)).expect("request should be valid");

        assert!(
            (payment - 5_272.283_629_260_353).abs() < 1e-6,
            "unexpected payment {}",
            payment
        );
    }

    #[test]
    fn down_payment_does_not_change_result() {
        let small_down = request(250_000.0, 1.0, 5, 4);
        let large_down = CalculateRequest {
            down_payment: 200_000.0,
            ..small_down.clone()
        };

        assert_eq!(calculate(&small_down), calculate(&large_down));
    }

    #[test]
    fn idempotent() {
        let loan = request(420_000.0, 0.035, 30, 2);

        let first = calculate(&loan).expect("request should be valid");
        let second = calculate(&loan).expect("request should be valid");

        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn increases_with_property_price() {
        let mut previous = 0.0;

        for price in [1.0, 10.0, 1_000.0, 150_000.0, 2_500_000.0] {
            let payment =
                calculate(&request(price, 0.04, 20, 4)).expect("request should be valid");

            assert!(
                payment > previous,
                "payment {} for price {} should exceed {}",
                payment,
                price,
                previous
            );
            previous = payment;
        }
    }

    #[test]
    fn invalid_payment_schedule() {
        let error = calculate(&request(1.0, 1.0, 5, 1)).expect_err("schedule should be invalid");

        assert_eq!(
            CalculationError::InvalidRequest(CalculateRequestInvalidity::PaymentSchedule),
            error
        );
        assert_eq!("invalid payment schedule", error.to_string());
    }

    #[test]
    fn amortization_above_maximum() {
        let error = calculate(&request(1.0, 1.0, 31, 2)).expect_err("years should be invalid");

        assert_eq!(
            CalculationError::InvalidRequest(CalculateRequestInvalidity::AmortizationRange),
            error
        );
    }

    #[test]
    fn amortization_below_minimum() {
        let error = calculate(&request(1.0, 1.0, 4, 2)).expect_err("years should be invalid");

        assert_eq!(
            CalculationError::InvalidRequest(CalculateRequestInvalidity::AmortizationRange),
            error
        );
    }

    #[test]
    fn empty_request() {
        let error =
            calculate(&CalculateRequest::default()).expect_err("empty request should be invalid");

        assert_eq!("invalid property price", error.to_string());
    }
}
