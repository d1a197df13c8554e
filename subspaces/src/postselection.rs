use crate::canonical::canonical_representative;
use crate::SubspaceSystem;
use bitrel::{BitString, Error, Result};
use log::debug;
use std::collections::HashMap;

/// Post-selects measurement outcomes onto the subspace of a known initial condition.
///
/// The dynamics of the system never leave the subspace of the initial condition, so an
/// outcome whose canonical representative differs from the initial condition's witnesses an
/// error and is discarded. Representatives come from the greedy bounded search; with a
/// `max_depth` shorter than the subspace diameter two members of one subspace may get
/// different representatives, which makes the verifier reject good outcomes but never accept
/// an outcome from a foreign subspace.
#[derive(Debug, Clone)]
pub struct MeasurementVerifier<'system> {
    system: &'system SubspaceSystem,
    initial_condition: BitString,
    max_depth: usize,
    target: BitString,
}

impl<'system> MeasurementVerifier<'system> {
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if an operator acts past the end of `initial_condition`.
    pub fn new(system: &'system SubspaceSystem, initial_condition: BitString, max_depth: usize) -> Result<Self> {
        let target = canonical_representative(system, &initial_condition, max_depth)?;
        debug!("post-selecting onto {target}, the representative of {initial_condition}");
        Ok(Self {
            system,
            initial_condition,
            max_depth,
            target,
        })
    }

    #[must_use]
    pub fn initial_condition(&self) -> BitString {
        self.initial_condition
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Canonical representative of the initial condition.
    #[must_use]
    pub fn target(&self) -> BitString {
        self.target
    }

    /// Canonical representative of `outcome`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `outcome` does not have the initial condition's length.
    pub fn representative(&self, outcome: &BitString) -> Result<BitString> {
        if outcome.len() != self.initial_condition.len() {
            return Err(Error::OutOfRange {
                index: outcome.len(),
                length: self.initial_condition.len(),
            });
        }
        canonical_representative(self.system, outcome, self.max_depth)
    }

    /// Whether `outcome` is kept by post-selection.
    ///
    /// # Errors
    ///
    /// As [`representative`](Self::representative).
    pub fn accepts(&self, outcome: &BitString) -> Result<bool> {
        Ok(self.representative(outcome)? == self.target)
    }

    /// Keeps the accepted outcomes, in their original order.
    ///
    /// Repeated outcomes are searched once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the outcomes do not all share one length, and
    /// [`Error::OutOfRange`] if that length is not the initial condition's.
    pub fn post_select<'outcome>(
        &self,
        outcomes: impl IntoIterator<Item = &'outcome BitString>,
    ) -> Result<Vec<BitString>> {
        let outcomes: Vec<BitString> = outcomes.into_iter().copied().collect();
        if let Some(first) = outcomes.first() {
            if let Some(other) = outcomes.iter().find(|outcome| outcome.len() != first.len()) {
                return Err(Error::LengthMismatch {
                    expected: first.len(),
                    found: other.len(),
                });
            }
        }

        let mut verdicts = HashMap::<BitString, bool>::new();
        let mut accepted = Vec::new();
        for outcome in outcomes {
            let keep = match verdicts.get(&outcome) {
                Some(keep) => *keep,
                None => {
                    let keep = self.accepts(&outcome)?;
                    verdicts.insert(outcome, keep);
                    keep
                }
            };
            if keep {
                accepted.push(outcome);
            }
        }
        debug!(
            "post-selection kept {} outcomes ({} distinct outcomes searched)",
            accepted.len(),
            verdicts.len()
        );
        Ok(accepted)
    }

    /// Fraction of `outcomes` kept by post-selection; zero for no outcomes.
    ///
    /// # Errors
    ///
    /// As [`post_select`](Self::post_select).
    #[allow(clippy::cast_precision_loss)]
    pub fn acceptance_rate<'outcome>(
        &self,
        outcomes: impl IntoIterator<Item = &'outcome BitString>,
    ) -> Result<f64> {
        let outcomes: Vec<&BitString> = outcomes.into_iter().collect();
        if outcomes.is_empty() {
            return Ok(0.0);
        }
        let accepted = self.post_select(outcomes.iter().copied())?;
        Ok(accepted.len() as f64 / outcomes.len() as f64)
    }
}
