//! Composite termination conditions (AND/OR).
//!
//! Tuples get macro-generated implementations without type erasure; a
//! `Vec<Box<dyn Termination>>` covers lists assembled from configuration.

use super::Termination;
use crate::scope::SearchScope;

/// Combines multiple terminations with OR logic (any must terminate).
///
/// # Examples
///
/// ```
/// use enclosure_solver::termination::{
///     IterationCountTermination, OrTermination, TimeTermination,
/// };
///
/// // Terminate after 30 seconds OR 1000 iterations
/// let termination = OrTermination((
///     TimeTermination::seconds(30),
///     IterationCountTermination::new(1000),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a tuple or list of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Combines multiple terminations with AND logic (all must terminate).
#[derive(Debug)]
pub struct AndTermination<T>(pub T);

impl<T> AndTermination<T> {
    /// Creates a new AND termination from a tuple or list of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_composite_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
                $((self.0).$idx.is_terminated(scope))||+
            }
        }

        impl<$($T),+> Termination for AndTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
                $((self.0).$idx.is_terminated(scope))&&+
            }
        }
    };
}

impl_composite_termination!(0: T0);
impl_composite_termination!(0: T0, 1: T1);
impl_composite_termination!(0: T0, 1: T1, 2: T2);
impl_composite_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_composite_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
impl_composite_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5);

/// An empty list never terminates.
impl Termination for OrTermination<Vec<Box<dyn Termination>>> {
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        self.0.iter().any(|t| t.is_terminated(scope))
    }
}

/// An empty list never terminates.
impl Termination for AndTermination<Vec<Box<dyn Termination>>> {
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        !self.0.is_empty() && self.0.iter().all(|t| t.is_terminated(scope))
    }
}
