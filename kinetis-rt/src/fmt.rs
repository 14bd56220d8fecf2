//! Boot-time logging shims.
//!
//! With the `defmt` feature these forward to the corresponding `defmt` macros.
//! Without it they expand to nothing but still borrow their arguments, so
//! values computed only for logging don't trip unused-variable lints.
//!
//! Nothing may log before `mem_init` has finished: the global logger keeps its
//! state in `.data`/`.bss` like everyone else.

#![allow(unused_macros)]

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($s $(, $x)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($s $(, $x)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($( & $x ),*);
    }};
}
