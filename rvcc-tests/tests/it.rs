// Copyright 2025-2026 Neil Henderson

mod it {
    mod invalid_programs;
    mod utils;
    mod valid_programs;
}
