use serde::{Deserialize, Serialize};

/// The explicit result of a transition.
///
/// `Outcome` represents "Control Flow as Data": a step either hands its
/// state to the next step or stops the chain with a fault. An album that
/// cannot be found is *not* a fault; it travels as `Next(View::NotFound)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome<T, E> {
    /// Proceed to the next step
    Next(T),

    /// A structural fault (Error path)
    Fault(E),
}

impl<T, E> Outcome<T, E> {
    pub fn is_fault(&self) -> bool {
        matches!(self, Outcome::Fault(_))
    }

    pub fn into_result(self) -> Result<T, E> {
        match self {
            Outcome::Next(t) => Ok(t),
            Outcome::Fault(e) => Err(e),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(t) => Outcome::Next(t),
            Err(e) => Outcome::Fault(e),
        }
    }
}
