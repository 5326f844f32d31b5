//! Real-argument spherical Bessel functions of the first kind.

const SERIES_CUTOFF: f64 = 1.0;
const MID_RANGE_CUTOFF: f64 = 7.51;
const SERIES_MAX_ITER: usize = 160;
const SERIES_REL_TOL: f64 = 1.0e-16;
const ASYMPTOTIC_SEED_MAX_ORDER: usize = 10;
const DOWNWARD_EXTRA_ORDERS: usize = 16;
const DOWNWARD_ACCURACY: f64 = 40.0;
const DOWNWARD_SEED: f64 = 1.0e-30;
const DOWNWARD_RESCALE_LIMIT: f64 = 1.0e250;

/// Capability to evaluate `j_l(x)` for real `x`.
///
/// The trapezoidal integrator is generic over this trait so a different
/// special-function backend can be substituted without touching the
/// quadrature code.
pub trait SphericalBesselKernel {
    fn evaluate(&self, order: usize, argument: f64) -> f64;
}

/// Native evaluator: closed forms for `l <= 2`, series or exact sin/cos
/// basis otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeSphericalBessel;

impl SphericalBesselKernel for NativeSphericalBessel {
    fn evaluate(&self, order: usize, argument: f64) -> f64 {
        spherical_j(order, argument)
    }
}

/// `j_l(x)`. Orders 0..=2 always go through their dedicated fast paths, so
/// the value for a given `(l, x)` does not depend on the caller.
pub fn spherical_j(order: usize, argument: f64) -> f64 {
    match order {
        0 => spherical_j0(argument),
        1 => spherical_j1(argument),
        2 => spherical_j2(argument),
        _ => spherical_j_general(order, argument),
    }
}

pub fn spherical_j0(argument: f64) -> f64 {
    if argument.abs() < SERIES_CUTOFF {
        return series_j(argument, 0);
    }
    argument.sin() / argument
}

pub fn spherical_j1(argument: f64) -> f64 {
    if argument.abs() < SERIES_CUTOFF {
        return series_j(argument, 1);
    }
    let xi = 1.0 / argument;
    (argument.sin() * xi - argument.cos()) * xi
}

pub fn spherical_j2(argument: f64) -> f64 {
    if argument.abs() < SERIES_CUTOFF {
        return series_j(argument, 2);
    }
    let xi = 1.0 / argument;
    let xi2 = xi * xi;
    (3.0 * xi2 - 1.0) * argument.sin() * xi - 3.0 * argument.cos() * xi2
}

/// General-order evaluator valid for every `l`.
///
/// The power series is used below the mid-range cutoff. Past it, orders above
/// `|x|` come from Miller's downward recurrence normalised against `j_0` or
/// `j_1`; otherwise `j_l = sin(x) s_l(1/x) + cos(x) c_l(1/x)` with the exact
/// polynomial basis, seeded through order 10 and extended by upward
/// recurrence.
pub fn spherical_j_general(order: usize, argument: f64) -> f64 {
    let abs_argument = argument.abs();
    if abs_argument < MID_RANGE_CUTOFF {
        return series_j(argument, order);
    }
    if (order as f64) > abs_argument {
        return downward_j(order, argument);
    }

    let (sjl, cjl) = asymptotic_basis(order, argument);
    argument.sin() * sjl + argument.cos() * cjl
}

fn series_j(argument: f64, order: usize) -> f64 {
    // x^l / (2l+1)!! accumulated factor by factor; underflows to zero instead
    // of dividing two overflowed terms
    let mut prefactor = 1.0;
    for m in 1..=order {
        prefactor *= argument / (2 * m + 1) as f64;
    }

    let u = argument * argument * 0.5;
    let mut pj = 1.0;
    let mut nf = 1.0;
    let mut nfac = (2 * order + 3) as f64;
    let mut den = nfac;
    let mut sign = -1.0;
    let mut ux = u;

    for _ in 0..SERIES_MAX_ITER {
        let delta = ux * (sign / den);
        pj += delta;
        if delta.abs() <= SERIES_REL_TOL * pj.abs() {
            break;
        }

        sign = -sign;
        ux *= u;
        nf += 1.0;
        nfac += 2.0;
        den *= nf * nfac;
    }

    pj * prefactor
}

fn downward_j(order: usize, argument: f64) -> f64 {
    let start =
        order + DOWNWARD_EXTRA_ORDERS + (DOWNWARD_ACCURACY * order as f64).sqrt() as usize;
    let xi = 1.0 / argument;

    let mut upper = 0.0;
    let mut current = DOWNWARD_SEED;
    let mut value = 0.0;
    for index in (1..=start).rev() {
        let lower = (2 * index + 1) as f64 * xi * current - upper;
        upper = current;
        current = lower;
        if index - 1 == order {
            value = current;
        }
        if current.abs() > DOWNWARD_RESCALE_LIMIT {
            current /= DOWNWARD_RESCALE_LIMIT;
            upper /= DOWNWARD_RESCALE_LIMIT;
            value /= DOWNWARD_RESCALE_LIMIT;
        }
    }

    let j0 = argument.sin() * xi;
    let j1 = (argument.sin() * xi - argument.cos()) * xi;
    let scale = if j0.abs() >= j1.abs() {
        j0 / current
    } else {
        j1 / upper
    };
    value * scale
}

fn asymptotic_basis(order: usize, argument: f64) -> (f64, f64) {
    let xi = 1.0 / argument;
    let mut xi_powers = [0.0; 12];
    xi_powers[0] = 1.0;
    for power in 1..xi_powers.len() {
        xi_powers[power] = xi_powers[power - 1] * xi;
    }

    if order <= ASYMPTOTIC_SEED_MAX_ORDER {
        return asymptotic_seed(order, &xi_powers);
    }

    let (mut s_prev, mut c_prev) = asymptotic_seed(ASYMPTOTIC_SEED_MAX_ORDER - 1, &xi_powers);
    let (mut s_curr, mut c_curr) = asymptotic_seed(ASYMPTOTIC_SEED_MAX_ORDER, &xi_powers);
    for next_order in (ASYMPTOTIC_SEED_MAX_ORDER + 1)..=order {
        let coefficient = (2 * next_order - 1) as f64;
        let s_next = coefficient * xi * s_curr - s_prev;
        let c_next = coefficient * xi * c_curr - c_prev;
        s_prev = s_curr;
        c_prev = c_curr;
        s_curr = s_next;
        c_curr = c_next;
    }

    (s_curr, c_curr)
}

fn asymptotic_seed(order: usize, xi_powers: &[f64; 12]) -> (f64, f64) {
    let xi = xi_powers[1];
    let xi2 = xi_powers[2];
    let xi3 = xi_powers[3];
    let xi4 = xi_powers[4];
    let xi5 = xi_powers[5];
    let xi6 = xi_powers[6];
    let xi7 = xi_powers[7];
    let xi8 = xi_powers[8];
    let xi9 = xi_powers[9];
    let xi10 = xi_powers[10];
    let xi11 = xi_powers[11];

    match order {
        0 => (xi, 0.0),
        1 => (xi2, -xi),
        2 => (3.0 * xi3 - xi, -3.0 * xi2),
        3 => (15.0 * xi4 - 6.0 * xi2, -15.0 * xi3 + xi),
        4 => (105.0 * xi5 - 45.0 * xi3 + xi, -105.0 * xi4 + 10.0 * xi2),
        5 => (
            945.0 * xi6 - 420.0 * xi4 + 15.0 * xi2,
            -945.0 * xi5 + 105.0 * xi3 - xi,
        ),
        6 => (
            10_395.0 * xi7 - 4_725.0 * xi5 + 210.0 * xi3 - xi,
            -10_395.0 * xi6 + 1_260.0 * xi4 - 21.0 * xi2,
        ),
        7 => (
            135_135.0 * xi8 - 62_370.0 * xi6 + 3_150.0 * xi4 - 28.0 * xi2,
            -135_135.0 * xi7 + 17_325.0 * xi5 - 378.0 * xi3 + xi,
        ),
        8 => (
            2_027_025.0 * xi9 - 945_945.0 * xi7 + 51_975.0 * xi5 - 630.0 * xi3 + xi,
            -2_027_025.0 * xi8 + 270_270.0 * xi6 - 6_930.0 * xi4 + 36.0 * xi2,
        ),
        9 => (
            34_459_425.0 * xi10 - 16_216_200.0 * xi8 + 945_945.0 * xi6 - 13_860.0 * xi4
                + 45.0 * xi2,
            -34_459_425.0 * xi9 + 4_729_725.0 * xi7 - 135_135.0 * xi5 + 990.0 * xi3 - xi,
        ),
        _ => (
            654_729_075.0 * xi11 - 310_134_825.0 * xi9 + 18_918_900.0 * xi7 - 315_315.0 * xi5
                + 1_485.0 * xi3
                - xi,
            -654_729_075.0 * xi10 + 91_891_800.0 * xi8 - 2_837_835.0 * xi6 + 25_740.0 * xi4
                - 55.0 * xi2,
        ),
    }
}
