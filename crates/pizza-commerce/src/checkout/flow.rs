//! Checkout state machine.

use crate::error::CheckoutError;
use serde::{Deserialize, Serialize};

/// Steps of a checkout attempt, in the only order they may occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Token and payment fields being checked.
    Validating,
    /// Cart read and non-empty.
    CartLoaded,
    /// Gateway accepted the charge.
    PaymentAuthorized,
    /// Receipt email accepted.
    ReceiptSent,
    /// Cart emptied. Terminal success.
    CartCleared,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Validating => "validating",
            CheckoutStep::CartLoaded => "cart_loaded",
            CheckoutStep::PaymentAuthorized => "payment_authorized",
            CheckoutStep::ReceiptSent => "receipt_sent",
            CheckoutStep::CartCleared => "cart_cleared",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Validating => 1,
            CheckoutStep::CartLoaded => 2,
            CheckoutStep::PaymentAuthorized => 3,
            CheckoutStep::ReceiptSent => 4,
            CheckoutStep::CartCleared => 5,
        }
    }

    pub fn next(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Validating => Some(CheckoutStep::CartLoaded),
            CheckoutStep::CartLoaded => Some(CheckoutStep::PaymentAuthorized),
            CheckoutStep::PaymentAuthorized => Some(CheckoutStep::ReceiptSent),
            CheckoutStep::ReceiptSent => Some(CheckoutStep::CartCleared),
            CheckoutStep::CartCleared => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of one checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutAttempt {
    step: CheckoutStep,
    completed: Vec<CheckoutStep>,
}

impl Default for CheckoutAttempt {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutAttempt {
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::Validating,
            completed: Vec::new(),
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Steps already passed, oldest first.
    pub fn completed(&self) -> &[CheckoutStep] {
        &self.completed
    }

    /// Move to `to`, which must be the step right after the current one.
    pub fn advance_to(&mut self, to: CheckoutStep) -> Result<(), CheckoutError> {
        if self.step.next() != Some(to) {
            return Err(CheckoutError::InvalidTransition {
                from: self.step.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }
        self.completed.push(self.step);
        self.step = to;
        Ok(())
    }

    /// Every step reached, including the current one.
    pub fn trail(&self) -> Vec<CheckoutStep> {
        let mut trail = self.completed.clone();
        trail.push(self.step);
        trail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(CheckoutStep::Validating.number(), 1);
        assert_eq!(CheckoutStep::CartCleared.number(), 5);
        assert!(CheckoutStep::CartCleared.is_terminal());
        assert_eq!(
            CheckoutStep::PaymentAuthorized.next(),
            Some(CheckoutStep::ReceiptSent)
        );
    }

    #[test]
    fn test_attempt_walks_forward() {
        let mut attempt = CheckoutAttempt::new();
        attempt.advance_to(CheckoutStep::CartLoaded).unwrap();
        attempt.advance_to(CheckoutStep::PaymentAuthorized).unwrap();
        assert_eq!(attempt.step(), CheckoutStep::PaymentAuthorized);
        assert_eq!(
            attempt.completed(),
            &[CheckoutStep::Validating, CheckoutStep::CartLoaded]
        );
    }

    #[test]
    fn test_attempt_cannot_skip_steps() {
        let mut attempt = CheckoutAttempt::new();
        let err = attempt
            .advance_to(CheckoutStep::ReceiptSent)
            .unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidTransition { .. }));
        assert_eq!(attempt.step(), CheckoutStep::Validating);
    }

    #[test]
    fn test_attempt_cannot_go_back() {
        let mut attempt = CheckoutAttempt::new();
        attempt.advance_to(CheckoutStep::CartLoaded).unwrap();
        assert!(attempt.advance_to(CheckoutStep::Validating).is_err());
    }
}
