// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

pub mod config;
pub mod constant;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod pose;
pub mod ut;
