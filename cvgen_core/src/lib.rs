//! `cvgen_core` is the core library for the cvgen resume generator. It turns a
//! data file describing summaries, skills, projects, jobs and education into
//! LaTeX section files, selecting and ordering entries through named recipes,
//! and hands the result to an external typesetting compiler.
//!
//! ## Processing Pipeline
//!
//! ```text
//! cvgen.toml + data.yaml + recipes.yaml + templates/
//!   → Config / DataStore / Recipes / TemplateSet (load_project)
//!   → Section builders (objective, skills, projects, experience, education)
//!   → Point renderer (nested bullets with include/exclude filters)
//!   → Assembler (entry point + one file per active section)
//!   → write_document (recreates build/) → compile (xelatex)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: `cvgen.toml` discovery and input path resolution.
//! - [`data`]: the data store and its entity records.
//! - [`recipe`]: recipes selecting entities, filters and title fields.
//! - [`points`]: the points tree and its renderer.
//! - [`sections`]: one builder per document section.
//! - [`templates`]: built-in and overridden templates, rendered with
//!   [`minijinja`].
//! - [`assembler`]: document assembly and the build directory layout.
//! - [`compiler`]: the external compiler invocation.
//! - [`loader`]: YAML, JSON and TOML document parsing.
//! - [`project`]: loading a project and building one of its recipes.
//! - [`scaffold`]: the sample project written by `cvgen init`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cvgen_core::project::BuildOptions;
//! use cvgen_core::project::load_project;
//! use std::path::Path;
//!
//! let ctx = load_project(Path::new(".")).unwrap();
//! let report = ctx.build("default", BuildOptions { compile: false }).unwrap();
//! println!("wrote {} file(s)", report.written.len());
//! ```

pub use error::*;

pub mod assembler;
pub mod compiler;
pub mod config;
pub mod data;
#[allow(unused_assignments)]
mod error;
pub mod loader;
pub mod points;
pub mod project;
pub mod recipe;
pub mod scaffold;
pub mod sections;
pub mod templates;

#[cfg(test)]
mod __fixtures;
