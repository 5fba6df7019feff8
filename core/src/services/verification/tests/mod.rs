mod issuance_tests;
mod reaper_tests;
