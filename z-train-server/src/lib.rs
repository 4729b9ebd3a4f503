//! Z-line departure board server.
//!
//! A small web application that answers: "when does the next Z train leave
//! this station, and is it late?" Train data comes live from the Finnish
//! Digitraffic rail API.

pub mod cache;
pub mod config;
pub mod digitraffic;
pub mod domain;
pub mod select;
pub mod web;
