mod lifecycle_state_tests;
mod remaining_duration_tests;
