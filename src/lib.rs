// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// GPU / graphics allowances — casts between numeric types are pervasive
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

//! GPU-accelerated 3D model viewer built on wgpu.
//!
//! Maquette loads a glTF asset (from disk or over HTTP), recenters it at
//! the origin, and presents it on a slowly rotating turntable under a
//! shadow-casting sun. The viewer supports orbiting and zooming the
//! camera, a day/night lighting toggle, hover feedback via the cursor,
//! and an ambient sound track that plays while the pointer is over the
//! viewport.
//!
//! # Key entry points
//!
//! - [`ViewerEngine`] - the core engine driven by [`engine::ViewerCommand`]
//! - [`Viewer`] - the standalone winit window (feature `viewer`)
//! - [`scene::SceneGraph`] - the attached model and the fixed sun
//! - [`options::Options`] - runtime configuration (window, camera, audio,
//!   key bindings)
//!
//! # Architecture
//!
//! Model loading runs on a background thread per request; results carry a
//! generation counter so only the most recently requested model is ever
//! attached. The main thread polls for finished loads, advances the
//! turntable, settles the damped orbit camera, and renders a shadow pass
//! followed by the main forward pass.

pub mod audio;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod lighting;
pub mod options;
pub mod picking;
pub mod renderer;
pub mod scene;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::ViewerEngine;
pub use error::ViewerError;
pub use input::{InputEvent, MouseButton};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
