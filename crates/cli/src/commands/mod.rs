// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod demo;
pub mod inspect;
pub mod settle;
pub mod validate;
pub mod verify;
