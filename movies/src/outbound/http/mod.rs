//! HTTP outbound adapter for the remote catalogue.
//!
//! This module provides a thin reqwest implementation of the
//! `RemoteMovieSource` port.

mod dto;
mod http_source;

pub use http_source::HttpMovieSource;
