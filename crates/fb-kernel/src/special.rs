//! Scalar special functions used by the generators.
//!
//! `sinc` is the normalized cardinal sine `sin(pi u) / (pi u)`. The Bessel
//! functions use the classic rational/asymptotic approximations (absolute
//! error around 1e-8), which is far below kernel truncation error.

use core::f64::consts::{FRAC_PI_4, PI};

/// Normalized cardinal sine, `1` at the origin.
pub fn sinc(u: f64) -> f64 {
    if u.abs() < 1e-12 {
        1.0
    } else {
        let pu = PI * u;
        pu.sin() / pu
    }
}

/// `d/du sinc(u)`, `0` at the origin.
pub fn sinc_derivative(u: f64) -> f64 {
    if u.abs() < 1e-12 {
        0.0
    } else {
        ((PI * u).cos() - sinc(u)) / u
    }
}

pub fn bessel_j0(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 8.0 {
        let y = x * x;
        let num = 57568490574.0
            + y * (-13362590354.0
                + y * (651619640.7 + y * (-11214424.18 + y * (77392.33017 + y * (-184.9052456)))));
        let den = 57568490411.0
            + y * (1029532985.0 + y * (9494680.718 + y * (59272.64853 + y * (267.8532712 + y))));
        return num / den;
    }

    let z = 8.0 / ax;
    let y = z * z;
    let xx = ax - FRAC_PI_4;
    let p = 1.0
        + y * (-0.1098628627e-2
            + y * (0.2734510407e-4 + y * (-0.2073370639e-5 + y * 0.2093887211e-6)));
    let q = -0.1562499995e-1
        + y * (0.1430488765e-3
            + y * (-0.6911147651e-5 + y * (0.7621095161e-6 - y * 0.934935152e-7)));
    (0.636619772 / ax).sqrt() * (xx.cos() * p - z * xx.sin() * q)
}

pub fn bessel_j1(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 8.0 {
        let y = x * x;
        let num = x
            * (72362614232.0
                + y * (-7895059235.0
                    + y * (242396853.1
                        + y * (-2972611.439 + y * (15704.48260 + y * (-30.16036606))))));
        let den = 144725228442.0
            + y * (2300535178.0 + y * (18583304.74 + y * (99447.43394 + y * (376.9991397 + y))));
        return num / den;
    }

    let z = 8.0 / ax;
    let y = z * z;
    let xx = ax - 3.0 * FRAC_PI_4;
    let p = 1.0
        + y * (0.183105e-2
            + y * (-0.3516396496e-4 + y * (0.2457520174e-5 + y * (-0.240337019e-6))));
    let q = 0.04687499995
        + y * (-0.2002690873e-3
            + y * (0.8449199096e-5 + y * (-0.88228987e-6 + y * 0.105787412e-6)));
    let r = (0.636619772 / ax).sqrt() * (xx.cos() * p - z * xx.sin() * q);
    if x < 0.0 { -r } else { r }
}

pub fn bessel_j2(x: f64) -> f64 {
    // The recurrence cancels badly near zero.
    if x.abs() < 1e-2 {
        let y = x * x;
        return y / 8.0 * (1.0 - y / 12.0);
    }
    2.0 * bessel_j1(x) / x - bessel_j0(x)
}

/// `J1(z) / z`, `1/2` at the origin.
pub fn jinc(z: f64) -> f64 {
    if z.abs() < 1e-8 {
        0.5
    } else {
        bessel_j1(z) / z
    }
}

/// `d/dz (J1(z) / z) = -J2(z) / z`, `0` at the origin.
pub fn jinc_derivative(z: f64) -> f64 {
    if z.abs() < 1e-8 {
        0.0
    } else {
        -bessel_j2(z) / z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn bessel_reference_values() {
        assert!(close(bessel_j0(0.0), 1.0, 1e-8));
        assert!(close(bessel_j0(1.0), 0.7651976866, 1e-7));
        assert!(close(bessel_j0(10.0), -0.2459357645, 1e-7));
        assert!(close(bessel_j1(1.0), 0.4400505857, 1e-7));
        assert!(close(bessel_j1(-1.0), -0.4400505857, 1e-7));
        assert!(close(bessel_j1(10.0), 0.0434727462, 1e-7));
        assert!(close(bessel_j2(1.0), 0.1149034849, 1e-7));
        // small-argument branch; J2(0.005) from the full power series
        assert!(close(bessel_j2(0.005), 3.124_993_489_588_4e-6, 1e-15));
        assert!(close(bessel_j2(-0.005), bessel_j2(0.005), 0.0));
    }

    #[test]
    fn sinc_zeros_and_slope() {
        assert_eq!(sinc(0.0), 1.0);
        for n in 1..6 {
            assert!(sinc(n as f64).abs() < 1e-15);
        }
        let h = 1e-6;
        for &u in &[0.3, 1.7, -2.2] {
            let fd = (sinc(u + h) - sinc(u - h)) / (2.0 * h);
            assert!(close(sinc_derivative(u), fd, 1e-6));
        }
    }

    #[test]
    fn jinc_derivative_matches_finite_difference() {
        assert_eq!(jinc(0.0), 0.5);
        let h = 1e-6;
        for &z in &[0.4, 2.0, 5.5, 9.0] {
            let fd = (jinc(z + h) - jinc(z - h)) / (2.0 * h);
            assert!(close(jinc_derivative(z), fd, 1e-6), "z = {z}");
        }
    }
}
