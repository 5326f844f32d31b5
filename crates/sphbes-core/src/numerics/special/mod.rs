pub mod bessel;
pub mod moments;

pub use bessel::{
    spherical_j, spherical_j0, spherical_j1, spherical_j2, spherical_j_general,
    NativeSphericalBessel, SphericalBesselKernel,
};
pub use moments::{
    cos_integ0, cos_integ1, cos_integ2, cos_integ3, sin_integ0, sin_integ1, sin_integ2,
    sin_integ3, MomentFn, TrigKernel,
};
