//! Trajectory smoothing: recorded history → continuous target functions.
//!
//! Scans a generalized-coordinate/speed history sample by sample, installs
//! each configuration into the engine, records the tracked point's global
//! position and velocity, then fits one GCV smoothing spline per channel
//! after padding both series at the boundaries.

use crate::error::{SpringError, SpringResult};
use kt_core::{BodyId, Real, Vec3};
use kt_dynamics::{Configuration, DynamicsEngine};
use kt_series::{Series, SeriesError, pad_len};
use kt_spline::{GcvSplineVec3, VectorFunction};
use nalgebra::DVector;

/// Fit global target position and velocity functions for a body point.
///
/// Per sample time `t_i`:
/// 1. install `(q_i, u_i)` into the engine,
/// 2. evaluate the local attachment-point function at `t_i`,
/// 3. query the global position and velocity of that point,
/// 4. append both to accumulating series.
///
/// Both series are then padded by `min(100, count/4)` reflected samples per
/// side and independently fit with a GCV smoothing spline per component.
///
/// The engine configuration is mutated repeatedly; callers must not run
/// this concurrently with a live integration on the same engine.
///
/// # Errors
///
/// An empty history fails with [`SeriesError::Empty`]; mismatched histories
/// with [`SpringError::HistoryMismatch`]. Degenerate series make the spline
/// fitter fail and that error propagates unmodified.
pub fn fit_target_functions<E: DynamicsEngine>(
    engine: &mut E,
    body: BodyId,
    point_function: &dyn VectorFunction,
    q_history: &Series<DVector<Real>>,
    u_history: &Series<DVector<Real>>,
) -> SpringResult<(GcvSplineVec3, GcvSplineVec3)> {
    if q_history.is_empty() {
        return Err(SeriesError::Empty {
            what: "coordinate history",
        }
        .into());
    }
    if q_history.len() != u_history.len() {
        return Err(SpringError::HistoryMismatch {
            what: "coordinate and speed histories differ in length",
        });
    }

    let mut positions: Series<Vec3> = Series::new();
    let mut velocities: Series<Vec3> = Series::new();

    for (qs, us) in q_history.iter().zip(u_history.iter()) {
        if qs.t != us.t {
            return Err(SpringError::HistoryMismatch {
                what: "coordinate and speed histories sampled at different times",
            });
        }
        let config = Configuration::new(qs.value.clone(), us.value.clone());
        engine.set_configuration(&config);

        let local = point_function.evaluate(qs.t);
        let p_global = engine.global_position(body, &local);
        let v_global = engine.global_velocity(body, &local);

        positions.append(qs.t, p_global)?;
        velocities.append(qs.t, v_global)?;
    }

    let pad = pad_len(positions.len());
    positions.pad(pad);
    velocities.pad(pad);

    let position_fit = fit_series(&positions)?;
    let velocity_fit = fit_series(&velocities)?;
    Ok((position_fit, velocity_fit))
}

fn fit_series(series: &Series<Vec3>) -> SpringResult<GcvSplineVec3> {
    let times = series.time_column();
    let x = series.component_column(0)?;
    let y = series.component_column(1)?;
    let z = series.component_column(2)?;
    Ok(GcvSplineVec3::fit(&times, &x, &y, &z)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kt_core::{Id, Tolerances, vec3};
    use kt_dynamics::FreeBodyEngine;
    use kt_spline::ConstantPoint;

    fn linear_history(n: usize, dt: Real) -> (Series<DVector<Real>>, Series<DVector<Real>>) {
        let mut q = Series::new();
        let mut u = Series::new();
        for i in 0..n {
            let t = i as Real * dt;
            q.append(t, DVector::from_column_slice(&[t, 0.0, 0.0]))
                .unwrap();
            u.append(t, DVector::from_column_slice(&[1.0, 0.0, 0.0]))
                .unwrap();
        }
        (q, u)
    }

    #[test]
    fn linear_history_round_trips() {
        let mut engine = FreeBodyEngine::new();
        let body = Id::from_index(0);
        let point = ConstantPoint(vec3(0.0, 0.0, 0.0));
        let (q, u) = linear_history(31, 0.1);

        let (pos, vel) = fit_target_functions(&mut engine, body, &point, &q, &u).unwrap();

        let tol = Tolerances::FITTED;
        for &t in &[0.0, 0.75, 1.5, 2.25, 3.0] {
            let p = pos.evaluate(t);
            assert!(tol.close(p.x, t), "position at t={t}: {}", p.x);
            assert!(p.y.abs() < 1e-9);

            let dp = pos.evaluate_derivative(t);
            assert!(tol.close(dp.x, 1.0));

            let v = vel.evaluate(t);
            assert!(tol.close(v.x, 1.0), "velocity at t={t}: {}", v.x);
        }
    }

    #[test]
    fn offset_attachment_point_shifts_targets() {
        let mut engine = FreeBodyEngine::new();
        let body = Id::from_index(0);
        let point = ConstantPoint(vec3(0.0, 0.5, 0.0));
        let (q, u) = linear_history(31, 0.1);

        let (pos, _) = fit_target_functions(&mut engine, body, &point, &q, &u).unwrap();
        let p = pos.evaluate(1.0);
        let tol = Tolerances::FITTED;
        assert!(tol.close(p.x, 1.0));
        assert!(tol.close(p.y, 0.5));
    }

    #[test]
    fn rejects_mismatched_histories() {
        let mut engine = FreeBodyEngine::new();
        let body = Id::from_index(0);
        let point = ConstantPoint(vec3(0.0, 0.0, 0.0));

        let (q, _) = linear_history(10, 0.1);
        let (_, u_short) = linear_history(9, 0.1);
        let err = fit_target_functions(&mut engine, body, &point, &q, &u_short).unwrap_err();
        assert!(matches!(err, SpringError::HistoryMismatch { .. }));

        let (q_empty, u_empty): (Series<DVector<Real>>, Series<DVector<Real>>) =
            (Series::new(), Series::new());
        let err = fit_target_functions(&mut engine, body, &point, &q_empty, &u_empty).unwrap_err();
        assert!(matches!(err, SpringError::Series(SeriesError::Empty { .. })));
    }

    #[test]
    fn degenerate_history_propagates_spline_error() {
        let mut engine = FreeBodyEngine::new();
        let body = Id::from_index(0);
        let point = ConstantPoint(vec3(0.0, 0.0, 0.0));

        // pad_len(2) == 0, so the series stays at two samples and the
        // fitter rejects it as underdetermined.
        let (q, u) = linear_history(2, 0.1);
        let err = fit_target_functions(&mut engine, body, &point, &q, &u).unwrap_err();
        assert!(matches!(err, SpringError::Spline(_)));
    }
}
