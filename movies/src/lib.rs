//! Movie data-access layer.
//!
//! The [`domain`] module holds the `Movie` model, the ports, the mapper and
//! the [`MovieRepository`](domain::MovieRepository) that decides between the
//! remote catalogue and the local snapshot. [`outbound`] hosts the HTTP and
//! snapshot adapters, [`config`] loads settings, and [`cli`] drives the
//! repository from the `movies` binary.

pub mod cli;
pub mod config;
pub mod domain;
pub mod outbound;
