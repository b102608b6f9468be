// Copyright 2025-2026 Neil Henderson
//
//! Integration test crate for the rvcc compiler. The tests live in `tests/it/`.
