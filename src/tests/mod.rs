// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod helpers;
pub mod snapshot_tests;
pub mod property_tests;
