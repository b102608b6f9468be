// Copyright 2025-2026 Neil Henderson
//
//! The `core` module defines small utilities shared by every compiler stage.

mod internal_error;
