//! Unit tests organized by concern, one submodule per component.

mod fragmenter_tests;
