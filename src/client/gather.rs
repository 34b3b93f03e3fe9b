//! The public gather surface.
//!
//! Six forms, mirroring the shapes callers actually hold: a scalar or a
//! slice of values, received into a freshly sized `Vec` on the root, into
//! a caller-provided pre-sized buffer, or not at all (the send-only forms
//! for ranks that know they are not the root). Every form classifies the
//! value type at compile time and runs either the direct or the serialized
//! transfer path.

use crate::collective::{GatherRoute, Gatherable};
use crate::error::{MusterError, Result};
use crate::types::Rank;

use super::MusterClient;

impl MusterClient {
    /// Gather one value from every rank.
    ///
    /// On the root, returns `Some(values)` with `values[k]` holding rank
    /// k's contribution; on other ranks, returns `None`.
    pub async fn gather<T: Gatherable>(&self, value: &T, root: Rank) -> Result<Option<Vec<T>>> {
        self.gather_slice(std::slice::from_ref(value), root).await
    }

    /// Gather one value from every rank into a caller-provided buffer.
    ///
    /// Root-side form: the caller must be the declared root, and `out`
    /// must hold exactly `world_size` elements.
    pub async fn gather_into<T: Gatherable>(
        &self,
        value: &T,
        out: &mut [T],
        root: Rank,
    ) -> Result<()> {
        self.gather_slice_into(std::slice::from_ref(value), out, root)
            .await
    }

    /// Contribute one value to a gather without receiving the result.
    ///
    /// Non-root form: calling this as the declared root is a caller error.
    pub async fn gather_send<T: Gatherable>(&self, value: &T, root: Rank) -> Result<()> {
        self.gather_slice_send(std::slice::from_ref(value), root)
            .await
    }

    /// Gather `values.len()` values from every rank.
    ///
    /// Every rank must contribute the same count. On the root, returns
    /// `Some(assembled)` with `assembled[k*n..(k+1)*n]` holding rank k's
    /// values in their original order; on other ranks, returns `None`.
    pub async fn gather_slice<T: Gatherable>(
        &self,
        values: &[T],
        root: Rank,
    ) -> Result<Option<Vec<T>>> {
        self.check_root(root)?;
        let call = self.next_collective_tag();
        <T::Route as GatherRoute<T>>::run(self, values, root, call).await
    }

    /// Gather `values.len()` values from every rank into a caller-provided
    /// buffer of exactly `world_size * values.len()` elements.
    pub async fn gather_slice_into<T: Gatherable>(
        &self,
        values: &[T],
        out: &mut [T],
        root: Rank,
    ) -> Result<()> {
        assert_eq!(
            self.rank(),
            root,
            "gather_slice_into is the root-side form; non-root ranks use gather_slice_send"
        );
        let gathered = self
            .gather_slice(values, root)
            .await?
            .expect("root gather always produces a result");
        if out.len() != gathered.len() {
            return Err(MusterError::BufferSizeMismatch {
                expected: gathered.len(),
                actual: out.len(),
            });
        }
        for (slot, v) in out.iter_mut().zip(gathered) {
            *slot = v;
        }
        Ok(())
    }

    /// Contribute `values.len()` values to a gather without receiving the
    /// result.
    pub async fn gather_slice_send<T: Gatherable>(&self, values: &[T], root: Rank) -> Result<()> {
        assert_ne!(
            self.rank(),
            root,
            "gather_slice_send must not be called by the declared root"
        );
        let gathered = self.gather_slice(values, root).await?;
        debug_assert!(gathered.is_none());
        Ok(())
    }
}
