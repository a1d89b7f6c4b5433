//! Pick the best compute backend allowed by enabled crate features, expose it
//! as a Simulation typedef along with its name.

cfg_if::cfg_if! {
    if #[cfg(feature = "compute_parallel")] {
        pub type Simulation = compute_parallel::Simulation;
        pub const BACKEND_NAME: &str = "compute_parallel";
    } else if #[cfg(feature = "compute_manualvec")] {
        pub type Simulation = compute_manualvec::Simulation;
        pub const BACKEND_NAME: &str = "compute_manualvec";
    } else if #[cfg(feature = "compute_border")] {
        pub type Simulation = compute_border::Simulation;
        pub const BACKEND_NAME: &str = "compute_border";
    } else {
        pub type Simulation = compute_naive::Simulation;
        pub const BACKEND_NAME: &str = "compute_naive";
    }
}
