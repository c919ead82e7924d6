use std::fmt::Debug;

use aerocoef_core::{CoefficientVector, IndependentVariable};

use crate::FlowCondition;

/// Failure of a [`CaseEvaluator`] at one flow condition.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum EvaluationError {
    /// The strategy needs a variable that the grid does not provide.
    #[display("{role} is required but not part of the grid")]
    MissingVariable {
        /// The missing role.
        role: IndependentVariable,
    },
    /// A variable value lies outside the strategy's domain of validity.
    #[display("{role} = {value} is outside the valid domain: {reason}")]
    OutOfDomain {
        /// The offending role.
        role: IndependentVariable,
        /// The offending value.
        value: f64,
        /// Domain of validity.
        reason: &'static str,
    },
}

/// A concrete coefficient-computation strategy.
///
/// An evaluator computes the coefficient vector of one flow condition. Panel
/// methods, empirical correlations and data loaders are separate
/// implementations; a [`CoefficientGenerator`](crate::CoefficientGenerator)
/// runs one over every grid point to fill a table, and an
/// [`OnTheFlySource`](crate::OnTheFlySource) runs one per query instead.
pub trait CaseEvaluator: Debug + Send + Sync {
    /// Returns the name of the strategy.
    fn name(&self) -> &'static str;

    /// Returns the number of components of every produced vector.
    fn arity(&self) -> usize;

    /// Computes the coefficient vector at `condition`.
    ///
    /// # Errors
    ///
    /// Returns an error if the condition lacks a required variable or lies
    /// outside the strategy's domain.
    fn evaluate(&self, condition: &FlowCondition) -> Result<CoefficientVector, EvaluationError>;
}

/// A boxed case evaluator.
pub type BoxedCaseEvaluator = Box<dyn CaseEvaluator>;

impl<T> CaseEvaluator for &T
where
    T: CaseEvaluator + ?Sized,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn evaluate(&self, condition: &FlowCondition) -> Result<CoefficientVector, EvaluationError> {
        (**self).evaluate(condition)
    }
}

impl<T> CaseEvaluator for Box<T>
where
    T: CaseEvaluator + ?Sized,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn evaluate(&self, condition: &FlowCondition) -> Result<CoefficientVector, EvaluationError> {
        (**self).evaluate(condition)
    }
}
