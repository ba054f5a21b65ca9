use crate::error::{Error, Result};
use ndarray::{ArrayView2, ArrayViewMut2};
use tracing::trace;

/// Outcome of one pairwise sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Pairs closer than the collision radius whose velocities were updated.
    pub collisions: usize,
    /// Pairs with coincident centers, skipped because no contact normal exists.
    pub coincident: usize,
}

/// Resolve elastic equal-mass collisions for every overlapping pair.
///
/// Pairs are visited as `i = 0..N-1`, `j = i+1..N`. A pair collides when its squared
/// separation is strictly below `collision_radius2`; both velocities are then updated
/// from their values just before this pair, exchanging the relative velocity component
/// along the line of centers:
///
/// ```text
/// c   = (v_i - v_j) . (r_i - r_j) / |r_i - r_j|^2
/// v_i = v_i - c (r_i - r_j)
/// v_j = v_j + c (r_i - r_j)
/// ```
///
/// Positions are read-only. A particle that overlaps several neighbours carries its
/// already-updated velocity into later pairs, so multi-overlaps depend on visit order.
///
/// Errors: `Error::DimensionMismatch` if `r` and `v` have different shapes.
pub fn resolve_collisions(
    r: ArrayView2<'_, f64>,
    mut v: ArrayViewMut2<'_, f64>,
    collision_radius2: f64,
) -> Result<Resolution> {
    if r.dim() != v.dim() {
        return Err(Error::shape(r.dim(), v.dim()));
    }
    let (n, ndim) = r.dim();
    let mut dr = vec![0.0_f64; ndim];
    let mut out = Resolution::default();

    for i in 0..n.saturating_sub(1) {
        for j in (i + 1)..n {
            let mut dr2 = 0.0;
            for (k, d) in dr.iter_mut().enumerate() {
                *d = r[[i, k]] - r[[j, k]];
                dr2 += *d * *d;
            }
            // NaN separations fall through here as well
            let overlapping = dr2 < collision_radius2;
            if !overlapping {
                continue;
            }
            if dr2 == 0.0 {
                trace!(i, j, "skipping coincident pair");
                out.coincident += 1;
                continue;
            }

            let mut dv_dot_dr = 0.0;
            for (k, &d) in dr.iter().enumerate() {
                dv_dot_dr += (v[[i, k]] - v[[j, k]]) * d;
            }
            let c = dv_dot_dr / dr2;
            for (k, &d) in dr.iter().enumerate() {
                v[[i, k]] -= c * d;
                v[[j, k]] += c * d;
            }
            out.collisions += 1;
        }
    }

    Ok(out)
}
